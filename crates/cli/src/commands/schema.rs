//! `envcheck schema`: print the declared variables as a table.

use anyhow::Result;
use envcheck::{EnvLoader, Schema, VariableSpec};

const HEADERS: [&str; 5] = ["NAME", "TYPE", "REQUIRED", "DEFAULT", "PATTERN"];

fn row(spec: &VariableSpec) -> [String; 5] {
    [
        spec.name().to_string(),
        spec.var_type().to_string(),
        if spec.is_required() { "yes" } else { "no" }.to_string(),
        spec.default_value().map(ToString::to_string).unwrap_or_default(),
        spec.pattern().unwrap_or_default().to_string(),
    ]
}

/// Format the schema as a left-aligned table.
pub fn format_table(schema: &Schema) -> String {
    let rows: Vec<[String; 5]> = schema.iter().map(row).collect();

    let mut widths = HEADERS.map(str::len);
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(String::from);
    for cells in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = w))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

pub fn run(loader: &EnvLoader) -> Result<()> {
    let schema = Schema::load(loader.schema_path())?;
    print!("{}", format_table(&schema));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table() {
        let schema = Schema::from_yaml_str(
            "vars:\n  - name: PORT\n    type: int\n    default_value: 8080\n  - name: API_KEY\n    required: true\n    type: string\n    pattern: ^key-\n",
        )
        .unwrap();

        assert_eq!(
            format_table(&schema),
            "NAME     TYPE    REQUIRED  DEFAULT  PATTERN\n\
             PORT     int     no        8080\n\
             API_KEY  string  yes                ^key-\n"
        );
    }

    #[test]
    fn test_format_empty_schema() {
        assert_eq!(
            format_table(&Schema::default()),
            "NAME  TYPE  REQUIRED  DEFAULT  PATTERN\n"
        );
    }
}

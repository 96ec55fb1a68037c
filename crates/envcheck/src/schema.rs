//! Declarative schema of expected environment variables.
//!
//! Responsibilities:
//! - Define `VariableSpec`, `VarType`, and the tagged `DefaultValue` scalar.
//! - Load a `Schema` from a YAML file (`.env.yaml` by default) or string.
//! - Reject entries without a name.
//!
//! Does NOT handle:
//! - Checking that `pattern` is only declared on string variables; that
//!   happens when patterns are validated.
//! - Any interaction with the environment.
//!
//! Invariants:
//! - Every `VariableSpec` in a `Schema` has a non-empty name.
//! - Entry order from the file is preserved.
//! - An unknown `type` is kept as `VarType::Unsupported` so the type stage can
//!   report it; it is not a parse failure.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse schema, probably incorrect yaml structure")]
    Parse(#[source] serde_yaml::Error),

    #[error("config has var without name (entry {index})")]
    MissingName { index: usize },
}

/// Declared type of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum VarType {
    String,
    Int,
    Float,
    Bool,
    Any,
    /// Any other declared type, kept verbatim.
    Unsupported(String),
}

impl VarType {
    pub fn as_str(&self) -> &str {
        match self {
            VarType::String => "string",
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Bool => "bool",
            VarType::Any => "any",
            VarType::Unsupported(other) => other,
        }
    }

    fn missing() -> Self {
        VarType::Unsupported(String::new())
    }
}

impl From<String> for VarType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "string" => VarType::String,
            "int" => VarType::Int,
            "float" => VarType::Float,
            "bool" => VarType::Bool,
            "any" => VarType::Any,
            _ => VarType::Unsupported(s),
        }
    }
}

impl From<&str> for VarType {
    fn from(s: &str) -> Self {
        VarType::from(s.to_string())
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A default value as written in the schema document.
///
/// YAML scalars keep their document-level type; the value is always stored
/// into the environment as text via `Display`.
///
/// Integers print exactly, including those above `i64::MAX`. Floats print in
/// shortest form, switching to exponent notation below `1e-4` or from `1e21`
/// upward (`1e+21`, `1e-05`); infinities print as `+Inf`/`-Inf`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
}

fn format_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "+Inf" } else { "-Inf" });
    }

    let sci = format!("{x:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..21).contains(&exp) || x == 0.0 {
        write!(f, "{x}")
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Bool(b) => write!(f, "{b}"),
            DefaultValue::Integer(i) => write!(f, "{i}"),
            DefaultValue::Unsigned(u) => write!(f, "{u}"),
            DefaultValue::Float(x) => format_float(f, *x),
            DefaultValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        DefaultValue::String(s.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(s: String) -> Self {
        DefaultValue::String(s)
    }
}

impl From<i64> for DefaultValue {
    fn from(i: i64) -> Self {
        DefaultValue::Integer(i)
    }
}

impl From<u64> for DefaultValue {
    fn from(u: u64) -> Self {
        DefaultValue::Unsigned(u)
    }
}

impl From<f64> for DefaultValue {
    fn from(x: f64) -> Self {
        DefaultValue::Float(x)
    }
}

impl From<bool> for DefaultValue {
    fn from(b: bool) -> Self {
        DefaultValue::Bool(b)
    }
}

/// Declaration of one expected environment variable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableSpec {
    #[serde(default)]
    name: String,
    #[serde(default)]
    required: bool,
    #[serde(rename = "type", default = "VarType::missing")]
    var_type: VarType,
    #[serde(default)]
    default_value: Option<DefaultValue>,
    #[serde(default)]
    pattern: Option<String>,
}

impl VariableSpec {
    /// Create an optional variable with no default and no pattern.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::MissingName` if `name` is empty.
    pub fn new(name: impl Into<String>, var_type: impl Into<VarType>) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::MissingName { index: 0 });
        }
        Ok(Self {
            name,
            required: false,
            var_type: var_type.into(),
            default_value: None,
            pattern: None,
        })
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn var_type(&self) -> &VarType {
        &self.var_type
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    /// The declared pattern, if any. An empty pattern counts as none.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }
}

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    vars: Option<Vec<VariableSpec>>,
}

/// Ordered list of variable declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    vars: Vec<VariableSpec>,
}

impl Schema {
    /// Build a schema from already-constructed specs.
    pub fn from_specs(vars: Vec<VariableSpec>) -> Self {
        Self { vars }
    }

    /// Read and parse a schema file.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse a schema document.
    ///
    /// An empty document, or one without `vars`, is an empty schema.
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawSchema = serde_yaml::from_str(content).map_err(SchemaError::Parse)?;
        let vars = raw.vars.unwrap_or_default();

        if let Some(index) = vars.iter().position(|v| v.name.is_empty()) {
            return Err(SchemaError::MissingName { index });
        }

        Ok(Self { vars })
    }

    pub fn vars(&self) -> &[VariableSpec] {
        &self.vars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariableSpec> {
        self.vars.iter()
    }

    pub fn get(&self, name: &str) -> Option<&VariableSpec> {
        self.vars.iter().find(|v| v.name == name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a VariableSpec;
    type IntoIter = std::slice::Iter<'a, VariableSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FULL_SCHEMA: &str = r#"
vars:
  - name: firstVar
    required: false
    type: int
    default_value: 0
  - name: secondVar
    required: true
    type: string
    pattern: .*secret.*
  - name: ratio
    type: float
    default_value: 1.5
  - name: enabled
    type: bool
    default_value: true
  - name: label
    type: any
    default_value: "007"
"#;

    #[test]
    fn test_parses_all_fields_in_order() {
        let schema = Schema::from_yaml_str(FULL_SCHEMA).unwrap();
        let names: Vec<_> = schema.iter().map(VariableSpec::name).collect();
        assert_eq!(names, ["firstVar", "secondVar", "ratio", "enabled", "label"]);

        let first = schema.get("firstVar").unwrap();
        assert!(!first.is_required());
        assert_eq!(first.var_type(), &VarType::Int);
        assert_eq!(first.default_value(), Some(&DefaultValue::Integer(0)));
        assert_eq!(first.pattern(), None);

        let second = schema.get("secondVar").unwrap();
        assert!(second.is_required());
        assert_eq!(second.var_type(), &VarType::String);
        assert_eq!(second.default_value(), None);
        assert_eq!(second.pattern(), Some(".*secret.*"));
    }

    #[test]
    fn test_default_values_keep_document_type() {
        let schema = Schema::from_yaml_str(FULL_SCHEMA).unwrap();
        assert_eq!(
            schema.get("ratio").unwrap().default_value(),
            Some(&DefaultValue::Float(1.5))
        );
        assert_eq!(
            schema.get("enabled").unwrap().default_value(),
            Some(&DefaultValue::Bool(true))
        );
        assert_eq!(
            schema.get("label").unwrap().default_value(),
            Some(&DefaultValue::String("007".to_string()))
        );
    }

    #[test]
    fn test_default_value_display() {
        assert_eq!(DefaultValue::Integer(0).to_string(), "0");
        assert_eq!(DefaultValue::Integer(-42).to_string(), "-42");
        assert_eq!(DefaultValue::Float(1.5).to_string(), "1.5");
        assert_eq!(DefaultValue::Float(2.0).to_string(), "2");
        assert_eq!(DefaultValue::Bool(false).to_string(), "false");
        assert_eq!(DefaultValue::from("text").to_string(), "text");
    }

    #[test]
    fn test_integer_above_i64_max_is_kept_exactly() {
        let schema = Schema::from_yaml_str(
            "vars:\n  - name: BIG\n    type: string\n    default_value: 18446744073709551615\n",
        )
        .unwrap();
        let default = schema.get("BIG").unwrap().default_value().unwrap();

        assert_eq!(default, &DefaultValue::Unsigned(u64::MAX));
        assert_eq!(default.to_string(), "18446744073709551615");
    }

    #[test]
    fn test_float_display_switches_to_exponent_at_extremes() {
        assert_eq!(DefaultValue::Float(1e20).to_string(), "100000000000000000000");
        assert_eq!(DefaultValue::Float(1e21).to_string(), "1e+21");
        assert_eq!(DefaultValue::Float(1.5e300).to_string(), "1.5e+300");
        assert_eq!(DefaultValue::Float(0.0001).to_string(), "0.0001");
        assert_eq!(DefaultValue::Float(0.00001).to_string(), "1e-05");
        assert_eq!(DefaultValue::Float(-2.5e-7).to_string(), "-2.5e-07");
        assert_eq!(DefaultValue::Float(0.0).to_string(), "0");
        assert_eq!(DefaultValue::Float(f64::INFINITY).to_string(), "+Inf");
        assert_eq!(DefaultValue::Float(f64::NEG_INFINITY).to_string(), "-Inf");
        assert_eq!(DefaultValue::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_yaml_infinity_default_display() {
        let schema =
            Schema::from_yaml_str("vars:\n  - name: CAP\n    type: float\n    default_value: .inf\n")
                .unwrap();
        assert_eq!(
            schema.get("CAP").unwrap().default_value().unwrap().to_string(),
            "+Inf"
        );
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let schema = Schema::from_yaml_str("vars:\n  - name: A\n    type: uuid\n").unwrap();
        assert_eq!(
            schema.get("A").unwrap().var_type(),
            &VarType::Unsupported("uuid".to_string())
        );
    }

    #[test]
    fn test_missing_type_is_unsupported() {
        let schema = Schema::from_yaml_str("vars:\n  - name: A\n").unwrap();
        assert_eq!(
            schema.get("A").unwrap().var_type(),
            &VarType::Unsupported(String::new())
        );
    }

    #[test]
    fn test_entry_without_name_is_rejected() {
        let content = "vars:\n  - name: ok\n    type: string\n  - required: true\n    type: string\n";
        match Schema::from_yaml_str(content) {
            Err(SchemaError::MissingName { index }) => assert_eq!(index, 1),
            other => panic!("expected MissingName, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_with_empty_name_is_rejected() {
        let result = Schema::from_yaml_str("vars:\n  - name: \"\"\n    type: string\n");
        assert!(matches!(result, Err(SchemaError::MissingName { index: 0 })));
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let result = Schema::from_yaml_str("vars:\n  - name: A\n    required: maybe\n");
        assert!(matches!(result, Err(SchemaError::Parse(_))));

        let result = Schema::from_yaml_str("vars: not-a-list\n");
        assert!(matches!(result, Err(SchemaError::Parse(_))));
    }

    #[test]
    fn test_non_scalar_default_is_parse_error() {
        let result =
            Schema::from_yaml_str("vars:\n  - name: A\n    type: string\n    default_value: [1, 2]\n");
        assert!(matches!(result, Err(SchemaError::Parse(_))));
    }

    #[test]
    fn test_empty_document_is_empty_schema() {
        assert!(Schema::from_yaml_str("").unwrap().is_empty());
        assert!(Schema::from_yaml_str("vars:\n").unwrap().is_empty());
    }

    #[test]
    fn test_empty_pattern_counts_as_none() {
        let spec = VariableSpec::new("A", "string").unwrap().with_pattern("");
        assert_eq!(spec.pattern(), None);
    }

    #[test]
    fn test_new_rejects_empty_name() {
        assert!(matches!(
            VariableSpec::new("", VarType::String),
            Err(SchemaError::MissingName { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env.yaml");

        match Schema::load(&path) {
            Err(SchemaError::Read { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Read error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env.yaml");
        fs::write(&path, FULL_SCHEMA).unwrap();

        let schema = Schema::load(&path).unwrap();
        assert_eq!(schema.len(), 5);
    }
}

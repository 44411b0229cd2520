//! Named SQL variables and injection-safe literal binding.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::BindError;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex"));

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}([ T]\d{2}:\d{2}:\d{2})?$").expect("date regex")
});

/// Declared type of a SQL variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Number,
    Text,
    Date,
    /// Enumerated set, rendered as a parenthesized literal list for `IN`.
    Set,
}

impl VariableType {
    fn expected(&self) -> &'static str {
        match self {
            VariableType::Number => "number",
            VariableType::Text => "text",
            VariableType::Date => "date (YYYY-MM-DD)",
            VariableType::Set => "non-empty set",
        }
    }
}

/// A named placeholder with a declared type, an optional default, and the
/// value supplied with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlVariable {
    pub name: String,
    pub var_type: VariableType,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl SqlVariable {
    pub fn new(name: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            name: name.into(),
            var_type,
            default_value: None,
            value: None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default_value = Some(default);
        self
    }
}

/// Resolve every `${name}` placeholder in `template` to a typed literal.
///
/// Binding is total: a placeholder without a supplied value or default fails
/// with [`BindError::UnboundVariable`]. Text is never spliced in raw; string
/// literals are escaped by quote doubling before insertion.
pub fn bind(template: &str, variables: &[SqlVariable]) -> Result<String, BindError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let whole = caps.get(0).expect("capture 0 always present");
        let name = &caps[1];

        let var = variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| BindError::UnboundVariable(name.to_string()))?;
        let value = var
            .value
            .as_ref()
            .or(var.default_value.as_ref())
            .ok_or_else(|| BindError::UnboundVariable(name.to_string()))?;

        out.push_str(&template[last..whole.start()]);
        out.push_str(&render_literal(name, var.var_type, value)?);
        last = whole.end();
    }
    out.push_str(&template[last..]);

    Ok(out)
}

fn render_literal(name: &str, var_type: VariableType, value: &Value) -> Result<String, BindError> {
    let mismatch = || BindError::TypeMismatch {
        name: name.to_string(),
        expected: var_type.expected(),
        found: value.to_string(),
    };

    match var_type {
        VariableType::Number => match value {
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) if s.trim().parse::<f64>().is_ok() => Ok(s.trim().to_string()),
            _ => Err(mismatch()),
        },
        VariableType::Text => match value {
            Value::String(s) => Ok(quote(s)),
            _ => Err(mismatch()),
        },
        VariableType::Date => match value {
            Value::String(s) if DATE_RE.is_match(s.trim()) => Ok(quote(s.trim())),
            _ => Err(mismatch()),
        },
        VariableType::Set => match value {
            Value::Array(items) if !items.is_empty() => {
                let rendered: Result<Vec<String>, BindError> = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(quote(s)),
                        Value::Number(n) => Ok(n.to_string()),
                        _ => Err(mismatch()),
                    })
                    .collect();
                Ok(format!("({})", rendered?.join(", ")))
            }
            _ => Err(mismatch()),
        },
    }
}

/// Single-quote a string literal, doubling embedded quotes.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

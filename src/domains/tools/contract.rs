//! Argument contracts for tool inputs.
//!
//! A contract is plain data: a list of fields with a primitive kind and a
//! required flag. The dispatcher checks every argument bundle against the
//! tool's contract before the handler runs, so handlers only ever see
//! arguments that satisfy it.

use rmcp::model::JsonObject;
use serde_json::Value;
use std::fmt;

/// Primitive kind of a contract field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldKind {
    /// JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// Constraint on a single named argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Strings only: reject values that are empty after trimming.
    pub non_empty: bool,
    /// Shown to the caller when the field is rejected.
    pub hint: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            non_empty: false,
            hint: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            non_empty: false,
            hint: None,
        }
    }

    pub const fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    pub const fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    fn check(&self, value: Option<&Value>) -> Option<Problem> {
        let value = match value {
            None | Some(Value::Null) if self.required => return Some(Problem::Missing),
            None | Some(Value::Null) => return None,
            Some(value) => value,
        };

        if !self.kind.matches(value) {
            return Some(Problem::WrongType {
                expected: self.kind,
                found: json_type_name(value),
            });
        }

        if self.non_empty && value.as_str().is_some_and(|s| s.trim().is_empty()) {
            return Some(Problem::Empty);
        }

        None
    }
}

/// Fixed set of field constraints for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    fields: &'static [FieldSpec],
}

impl Contract {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// A contract accepting any bundle.
    pub const fn empty() -> Self {
        Self { fields: &[] }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// Check `arguments` against every field.
    ///
    /// Fields the contract does not mention are ignored. All violations are
    /// reported, in field order.
    pub fn validate(&self, arguments: &JsonObject) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .check(arguments.get(field.name))
                    .map(|problem| Violation {
                        field: field.name,
                        problem,
                        hint: field.hint,
                    })
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Missing,
    WrongType {
        expected: FieldKind,
        found: &'static str,
    },
    Empty,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "required field is missing"),
            Self::WrongType { expected, found } => {
                write!(f, "expected {}, got {}", expected.as_str(), found)
            }
            Self::Empty => write!(f, "must be a non-empty string"),
        }
    }
}

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub problem: Problem,
    pub hint: Option<&'static str>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)?;
        if let Some(hint) = self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

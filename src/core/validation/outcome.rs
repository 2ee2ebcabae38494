//! Validation results: per-field outcomes, violation locations and the
//! request-level aggregate.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One segment of a violation location
///
/// Keys are field names (wire names, so aliases show up as the client sent
/// them); indices point into list elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocSegment::Key(key) => write!(f, "{}", key),
            LocSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        LocSegment::Key(key.to_string())
    }
}

impl From<String> for LocSegment {
    fn from(key: String) -> Self {
        LocSegment::Key(key)
    }
}

impl From<usize> for LocSegment {
    fn from(index: usize) -> Self {
        LocSegment::Index(index)
    }
}

/// Location of a violation, outermost segment first
///
/// Serializes as a flat array, e.g. `["query", "item-query", 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<LocSegment>);

impl FieldPath {
    /// A path with a single segment
    pub fn root(segment: impl Into<LocSegment>) -> Self {
        Self(vec![segment.into()])
    }

    /// Prepend an enclosing segment
    pub fn nest(mut self, segment: impl Into<LocSegment>) -> Self {
        self.0.insert(0, segment.into());
        self
    }

    /// Append an inner segment
    pub fn child(mut self, segment: impl Into<LocSegment>) -> Self {
        self.0.push(segment.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// The specific rule a value broke
///
/// Coercion failures (`Type`) are kept apart from range and length failures so
/// clients can tell "not a number" from "number out of bounds".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("Field required")]
    Missing,

    #[error("Input should be a valid {expected}")]
    Type { expected: &'static str },

    #[error("String should have at least {min} characters")]
    MinLength { min: usize },

    #[error("String should have at most {max} characters")]
    MaxLength { max: usize },

    #[error("String should match pattern '{pattern}'")]
    Pattern { pattern: String },

    #[error("Input should be greater than or equal to {limit}")]
    Ge { limit: f64 },

    #[error("Input should be less than or equal to {limit}")]
    Le { limit: f64 },

    #[error("Input should be greater than {limit}")]
    Gt { limit: f64 },

    #[error("Input should be less than {limit}")]
    Lt { limit: f64 },

    #[error("Input should be {}", one_of(.allowed))]
    NotAMember { allowed: Vec<String> },

    #[error("Extra inputs are not permitted")]
    UnknownField,

    #[error("JSON decode error: {message}")]
    InvalidJson { message: String },
}

fn one_of(allowed: &[String]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|m| format!("'{}'", m)).collect();
    match quoted.split_last() {
        None => "one of an empty set".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

impl Violation {
    /// Machine-readable rule code, named after the constraint it enforces
    pub fn rule(&self) -> &'static str {
        match self {
            Violation::Missing => "required",
            Violation::Type { .. } => "type",
            Violation::MinLength { .. } => "min_length",
            Violation::MaxLength { .. } => "max_length",
            Violation::Pattern { .. } => "pattern",
            Violation::Ge { .. } => "ge",
            Violation::Le { .. } => "le",
            Violation::Gt { .. } => "gt",
            Violation::Lt { .. } => "lt",
            Violation::NotAMember { .. } => "enum_values",
            Violation::UnknownField => "unknown_field",
            Violation::InvalidJson { .. } => "json_invalid",
        }
    }
}

/// A violation pinned to the field it happened on
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub loc: FieldPath,
    pub violation: Violation,
}

impl FieldViolation {
    pub fn new(loc: FieldPath, violation: Violation) -> Self {
        Self { loc, violation }
    }

    /// Re-root this violation under an enclosing segment
    pub fn nested(self, segment: impl Into<LocSegment>) -> Self {
        Self {
            loc: self.loc.nest(segment),
            violation: self.violation,
        }
    }

    pub fn rule(&self) -> &'static str {
        self.violation.rule()
    }
}

impl Serialize for FieldViolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldViolation", 3)?;
        state.serialize_field("loc", &self.loc)?;
        state.serialize_field("rule", self.rule())?;
        state.serialize_field("message", &self.violation.to_string())?;
        state.end()
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loc, self.violation)
    }
}

/// Result of checking one raw value against one field spec
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The coerced, bounded value
    Valid(Value),
    /// Every violation found, locations rooted at the field's wire name
    Invalid(Vec<FieldViolation>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn into_result(self) -> Result<Value, Vec<FieldViolation>> {
        match self {
            ValidationOutcome::Valid(value) => Ok(value),
            ValidationOutcome::Invalid(violations) => Err(violations),
        }
    }
}

/// All violations found while validating one request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", describe(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

fn describe(violations: &[FieldViolation]) -> String {
    let msgs: Vec<String> = violations.iter().map(ToString::to_string).collect();
    format!("Validation errors: {}", msgs.join(", "))
}

impl ValidationErrors {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether any violation sits at exactly this dotted location
    pub fn has_violation_at(&self, loc: &str) -> bool {
        self.violations.iter().any(|v| v.loc.to_string() == loc)
    }
}

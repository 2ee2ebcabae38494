//! Declarative field descriptions
//!
//! A [`FieldSpec`] says where a value comes from, what type it must coerce to
//! and which constraints it must satisfy. Specs are built once when routes are
//! registered and never change afterwards.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Letters and whitespace only, at least one character
pub const LETTERS_AND_SPACES: &str = r"^[a-zA-Z\s]+$";

/// Where a raw value is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
    Path,
    Query,
    Body,
}

impl FieldSource {
    /// Name used as the outermost location segment in violations
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldSource::Path => "path",
            FieldSource::Query => "query",
            FieldSource::Body => "body",
        }
    }
}

/// Target type of a field
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    /// Closed set of member names, see [`Constraint::EnumValues`]
    Enum,
    /// Repeated query occurrences, each element checked on its own
    StringList,
    Object(ObjectSchema),
}

/// A compiled regex that remembers its source text
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: Regex::new(source)?,
        })
    }

    /// The shared [`LETTERS_AND_SPACES`] pattern
    pub fn letters_and_spaces() -> Self {
        static PATTERN: OnceLock<Pattern> = OnceLock::new();
        PATTERN
            .get_or_init(|| Pattern::new(LETTERS_AND_SPACES).unwrap())
            .clone()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// A single rule attached to a field
#[derive(Debug, Clone)]
pub enum Constraint {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Pattern),
    Ge(f64),
    Le(f64),
    Gt(f64),
    Lt(f64),
    EnumValues(Vec<String>),
}

impl Constraint {
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::MinLength(_) => "min_length",
            Constraint::MaxLength(_) => "max_length",
            Constraint::Pattern(_) => "pattern",
            Constraint::Ge(_) => "ge",
            Constraint::Le(_) => "le",
            Constraint::Gt(_) => "gt",
            Constraint::Lt(_) => "lt",
            Constraint::EnumValues(_) => "enum_values",
        }
    }

    /// Evaluation order within a field, independent of declaration order
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Constraint::Required => 0,
            Constraint::EnumValues(_) => 1,
            Constraint::MinLength(_) => 2,
            Constraint::MaxLength(_) => 3,
            Constraint::Pattern(_) => 4,
            Constraint::Ge(_) => 5,
            Constraint::Le(_) => 6,
            Constraint::Gt(_) => 7,
            Constraint::Lt(_) => 8,
        }
    }
}

/// Ordered named fields of a structured body
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
    allow_unknown: bool,
}

impl ObjectSchema {
    /// Unknown keys are rejected unless [`allow_unknown`](Self::allow_unknown) is set
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            allow_unknown: false,
        }
    }

    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn allows_unknown(&self) -> bool {
        self.allow_unknown
    }

    pub fn field(&self, wire_name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.wire_name() == wire_name)
    }
}

/// Declarative description of one input field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    alias: Option<String>,
    source: FieldSource,
    kind: FieldKind,
    constraints: Vec<Constraint>,
    default: Option<Value>,
}

impl FieldSpec {
    /// A required field with no constraints beyond its type
    pub fn new(name: impl Into<String>, source: FieldSource, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            alias: None,
            source,
            kind,
            constraints: vec![Constraint::Required],
            default: None,
        }
    }

    pub fn path(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, FieldSource::Path, kind)
    }

    pub fn query(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, FieldSource::Query, kind)
    }

    pub fn body(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, FieldSource::Body, kind)
    }

    /// Public name on the wire, when it differs from the handler-side name
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn min_length(self, min: usize) -> Self {
        self.constrain(Constraint::MinLength(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.constrain(Constraint::MaxLength(max))
    }

    pub fn pattern(self, pattern: Pattern) -> Self {
        self.constrain(Constraint::Pattern(pattern))
    }

    pub fn ge(self, limit: f64) -> Self {
        self.constrain(Constraint::Ge(limit))
    }

    pub fn le(self, limit: f64) -> Self {
        self.constrain(Constraint::Le(limit))
    }

    pub fn gt(self, limit: f64) -> Self {
        self.constrain(Constraint::Gt(limit))
    }

    pub fn lt(self, limit: f64) -> Self {
        self.constrain(Constraint::Lt(limit))
    }

    pub fn one_of<I, S>(self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constrain(Constraint::EnumValues(
            members.into_iter().map(Into::into).collect(),
        ))
    }

    /// Use `value` when the input is absent; drops the `required` constraint
    pub fn default_value(mut self, value: Value) -> Self {
        self.constraints
            .retain(|c| !matches!(c, Constraint::Required));
        self.default = Some(value);
        self
    }

    /// Shorthand for a `null` default
    pub fn optional(self) -> Self {
        self.default_value(Value::Null)
    }

    fn constrain(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wire_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn source(&self) -> FieldSource {
        self.source
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::Required))
    }

    /// Declared enum members, empty for non-enum fields
    pub fn members(&self) -> &[String] {
        self.constraints
            .iter()
            .find_map(|c| match c {
                Constraint::EnumValues(members) => Some(members.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Constraints sorted into evaluation order
    pub(crate) fn ordered_constraints(&self) -> Vec<&Constraint> {
        let mut ordered: Vec<&Constraint> = self.constraints.iter().collect();
        ordered.sort_by_key(|c| c.rank());
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_field_is_required() {
        let spec = FieldSpec::path("user_id", FieldKind::Integer);
        assert!(spec.is_required());
        assert!(spec.default().is_none());
        assert_eq!(spec.source(), FieldSource::Path);
    }

    #[test]
    fn test_default_value_drops_required() {
        let spec = FieldSpec::query("size", FieldKind::Integer)
            .ge(1.0)
            .default_value(json!(10));
        assert!(!spec.is_required());
        assert_eq!(spec.default(), Some(&json!(10)));
        assert_eq!(spec.constraints().len(), 1);
    }

    #[test]
    fn test_alias_is_wire_name() {
        let spec = FieldSpec::query("q", FieldKind::StringList).alias("item-query");
        assert_eq!(spec.name(), "q");
        assert_eq!(spec.wire_name(), "item-query");
    }

    #[test]
    fn test_constraints_sorted_into_evaluation_order() {
        let spec = FieldSpec::query("q", FieldKind::String)
            .pattern(Pattern::letters_and_spaces())
            .max_length(50)
            .min_length(3);
        let names: Vec<&str> = spec.ordered_constraints().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["required", "min_length", "max_length", "pattern"]);
    }

    #[test]
    fn test_members_of_enum_field() {
        let spec = FieldSpec::path("name", FieldKind::Enum).one_of(["me", "user"]);
        assert_eq!(spec.members(), ["me".to_string(), "user".to_string()]);
        assert!(FieldSpec::path("id", FieldKind::Integer).members().is_empty());
    }

    #[test]
    fn test_letters_and_spaces_pattern() {
        let pattern = Pattern::letters_and_spaces();
        assert!(pattern.is_match("hello world"));
        assert!(!pattern.is_match("hello42"));
        assert!(!pattern.is_match("hi!"));
        assert!(!pattern.is_match(""));
        assert_eq!(pattern.as_str(), LETTERS_AND_SPACES);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(Pattern::new("([a-z").is_err());
    }

    #[test]
    fn test_object_schema_field_lookup() {
        let schema = ObjectSchema::new(vec![
            FieldSpec::body("username", FieldKind::String),
            FieldSpec::body("age", FieldKind::Integer),
        ]);
        assert!(schema.field("age").is_some());
        assert!(schema.field("email").is_none());
        assert!(!schema.allows_unknown());
        assert!(schema.allow_unknown().allows_unknown());
    }
}

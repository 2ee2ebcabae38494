//! Per-kind field validation
//!
//! [`validate`] coerces one raw value to the field's kind and then applies
//! its constraints. It is a pure function of its inputs.

use super::outcome::{FieldPath, FieldViolation, ValidationOutcome, Violation};
use super::spec::{Constraint, FieldKind, FieldSpec, ObjectSchema};
use serde_json::{Map, Value};

/// An untyped input as it arrived on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    Absent,
    /// A single path segment or query value
    Text(&'a str),
    /// Every occurrence of a repeated query key, in submission order
    Texts(Vec<&'a str>),
    /// Part of a decoded JSON body
    Json(&'a Value),
}

impl<'a> RawValue<'a> {
    /// The text a scalar field reads; repeated keys resolve to the last one
    fn text(&self) -> Option<&'a str> {
        match self {
            RawValue::Text(s) => Some(*s),
            RawValue::Texts(values) => values.last().copied(),
            _ => None,
        }
    }
}

/// Check one raw value against one field spec
///
/// Violation locations are rooted at the field's wire name.
pub fn validate(raw: RawValue<'_>, spec: &FieldSpec) -> ValidationOutcome {
    match raw {
        RawValue::Absent => {
            return match spec.default() {
                Some(value) => ValidationOutcome::Valid(value.clone()),
                None => invalid_at(spec, Violation::Missing),
            };
        }
        RawValue::Json(Value::Null) if spec.default() == Some(&Value::Null) => {
            return ValidationOutcome::Valid(Value::Null);
        }
        _ => {}
    }

    let scalar = match spec.kind() {
        FieldKind::String => check_string(&raw, spec),
        FieldKind::Integer => coerce_integer(&raw).and_then(|n| {
            check_bounds(n as f64, spec)?;
            Ok(Value::from(n))
        }),
        FieldKind::Float => coerce_float(&raw).and_then(|n| {
            check_bounds(n, spec)?;
            Ok(Value::from(n))
        }),
        FieldKind::Boolean => coerce_boolean(&raw).map(Value::Bool),
        FieldKind::Enum => check_member(&raw, spec),
        FieldKind::StringList => return check_list(&raw, spec),
        FieldKind::Object(schema) => {
            return match raw {
                RawValue::Json(value) => nest_outcome(validate_object(value, schema), spec),
                _ => invalid_at(spec, Violation::Type { expected: "object" }),
            };
        }
    };

    match scalar {
        Ok(value) => ValidationOutcome::Valid(value),
        Err(violation) => invalid_at(spec, violation),
    }
}

/// Validate a JSON value against an object schema
///
/// Every sub-field is checked and every failure kept. Locations are relative
/// to the object itself.
pub fn validate_object(value: &Value, schema: &ObjectSchema) -> ValidationOutcome {
    let Some(input) = value.as_object() else {
        return ValidationOutcome::Invalid(vec![FieldViolation::new(
            FieldPath::default(),
            Violation::Type { expected: "object" },
        )]);
    };

    let mut output = Map::new();
    let mut violations = Vec::new();

    for field in schema.fields() {
        let raw = input
            .get(field.wire_name())
            .map(RawValue::Json)
            .unwrap_or(RawValue::Absent);

        match validate(raw, field) {
            ValidationOutcome::Valid(v) => {
                output.insert(field.name().to_string(), v);
            }
            ValidationOutcome::Invalid(found) => violations.extend(found),
        }
    }

    if !schema.allows_unknown() {
        for key in input.keys() {
            if schema.field(key).is_none() {
                violations.push(FieldViolation::new(
                    FieldPath::root(key.as_str()),
                    Violation::UnknownField,
                ));
            }
        }
    }

    if violations.is_empty() {
        ValidationOutcome::Valid(Value::Object(output))
    } else {
        ValidationOutcome::Invalid(violations)
    }
}

fn invalid_at(spec: &FieldSpec, violation: Violation) -> ValidationOutcome {
    ValidationOutcome::Invalid(vec![FieldViolation::new(
        FieldPath::root(spec.wire_name()),
        violation,
    )])
}

fn nest_outcome(outcome: ValidationOutcome, spec: &FieldSpec) -> ValidationOutcome {
    match outcome {
        ValidationOutcome::Valid(value) => ValidationOutcome::Valid(value),
        ValidationOutcome::Invalid(violations) => ValidationOutcome::Invalid(
            violations
                .into_iter()
                .map(|v| v.nested(spec.wire_name()))
                .collect(),
        ),
    }
}

fn check_string(raw: &RawValue<'_>, spec: &FieldSpec) -> Result<Value, Violation> {
    let text = match raw {
        RawValue::Json(Value::String(s)) => s.as_str(),
        RawValue::Json(_) => return Err(Violation::Type { expected: "string" }),
        other => other.text().ok_or(Violation::Type { expected: "string" })?,
    };
    check_text(text, spec)?;
    Ok(Value::String(text.to_string()))
}

/// Length is counted in Unicode scalar values
fn check_text(text: &str, spec: &FieldSpec) -> Result<(), Violation> {
    let len = text.chars().count();
    for constraint in spec.ordered_constraints() {
        match constraint {
            Constraint::MinLength(min) if len < *min => {
                return Err(Violation::MinLength { min: *min });
            }
            Constraint::MaxLength(max) if len > *max => {
                return Err(Violation::MaxLength { max: *max });
            }
            Constraint::Pattern(pattern) if !pattern.is_match(text) => {
                return Err(Violation::Pattern {
                    pattern: pattern.as_str().to_string(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_bounds(n: f64, spec: &FieldSpec) -> Result<(), Violation> {
    for constraint in spec.ordered_constraints() {
        match *constraint {
            Constraint::Ge(limit) if n < limit => return Err(Violation::Ge { limit }),
            Constraint::Le(limit) if n > limit => return Err(Violation::Le { limit }),
            Constraint::Gt(limit) if n <= limit => return Err(Violation::Gt { limit }),
            Constraint::Lt(limit) if n >= limit => return Err(Violation::Lt { limit }),
            _ => {}
        }
    }
    Ok(())
}

fn coerce_integer(raw: &RawValue<'_>) -> Result<i64, Violation> {
    const NOT_INTEGER: Violation = Violation::Type { expected: "integer" };

    match raw {
        RawValue::Json(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or(NOT_INTEGER),
        RawValue::Json(Value::String(s)) => s.trim().parse().map_err(|_| NOT_INTEGER),
        RawValue::Json(_) => Err(NOT_INTEGER),
        other => other
            .text()
            .and_then(|s| s.trim().parse().ok())
            .ok_or(NOT_INTEGER),
    }
}

fn coerce_float(raw: &RawValue<'_>) -> Result<f64, Violation> {
    const NOT_NUMBER: Violation = Violation::Type { expected: "number" };

    let parsed = match raw {
        RawValue::Json(Value::Number(n)) => n.as_f64(),
        RawValue::Json(Value::String(s)) => s.trim().parse().ok(),
        RawValue::Json(_) => None,
        other => other.text().and_then(|s| s.trim().parse().ok()),
    };
    parsed.filter(|f: &f64| f.is_finite()).ok_or(NOT_NUMBER)
}

fn coerce_boolean(raw: &RawValue<'_>) -> Result<bool, Violation> {
    const NOT_BOOLEAN: Violation = Violation::Type { expected: "boolean" };

    match raw {
        RawValue::Json(Value::Bool(b)) => Ok(*b),
        RawValue::Json(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(NOT_BOOLEAN),
        },
        RawValue::Json(Value::String(s)) => parse_bool_token(s).ok_or(NOT_BOOLEAN),
        RawValue::Json(_) => Err(NOT_BOOLEAN),
        other => other.text().and_then(parse_bool_token).ok_or(NOT_BOOLEAN),
    }
}

fn parse_bool_token(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

fn check_member(raw: &RawValue<'_>, spec: &FieldSpec) -> Result<Value, Violation> {
    let token = match raw {
        RawValue::Json(Value::String(s)) => Some(s.as_str()),
        RawValue::Json(_) => None,
        other => other.text(),
    };
    let members = spec.members();
    token
        .and_then(|t| members.iter().find(|m| m.as_str() == t))
        .map(|member| Value::String(member.clone()))
        .ok_or_else(|| Violation::NotAMember {
            allowed: members.to_vec(),
        })
}

fn check_list(raw: &RawValue<'_>, spec: &FieldSpec) -> ValidationOutcome {
    let elements: Vec<Option<&str>> = match raw {
        RawValue::Text(s) => vec![Some(*s)],
        RawValue::Texts(values) => values.iter().map(|s| Some(*s)).collect(),
        RawValue::Json(Value::Array(items)) => items.iter().map(Value::as_str).collect(),
        _ => return invalid_at(spec, Violation::Type { expected: "list" }),
    };

    let mut output = Vec::with_capacity(elements.len());
    let mut violations = Vec::new();

    for (index, element) in elements.into_iter().enumerate() {
        let checked = element
            .ok_or(Violation::Type { expected: "string" })
            .and_then(|text| check_text(text, spec).map(|_| text));
        match checked {
            Ok(text) => output.push(Value::String(text.to_string())),
            Err(violation) => violations.push(FieldViolation::new(
                FieldPath::root(spec.wire_name()).child(index),
                violation,
            )),
        }
    }

    if violations.is_empty() {
        ValidationOutcome::Valid(Value::Array(output))
    } else {
        ValidationOutcome::Invalid(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::spec::{FieldSource, Pattern};
    use serde_json::json;

    fn search_terms() -> FieldSpec {
        FieldSpec::query("q", FieldKind::StringList)
            .alias("item-query")
            .min_length(3)
            .max_length(50)
            .pattern(Pattern::letters_and_spaces())
            .optional()
    }

    fn page_size() -> FieldSpec {
        FieldSpec::query("size", FieldKind::Integer)
            .ge(1.0)
            .le(100.0)
            .default_value(json!(10))
    }

    fn violations(outcome: ValidationOutcome) -> Vec<FieldViolation> {
        match outcome {
            ValidationOutcome::Invalid(v) => v,
            ValidationOutcome::Valid(value) => panic!("expected rejection, got {value}"),
        }
    }

    // === string ===

    #[test]
    fn test_missing_required_string_is_required_violation() {
        let spec = FieldSpec::query("q", FieldKind::String);
        let found = violations(validate(RawValue::Absent, &spec));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].violation, Violation::Missing);
        assert_eq!(found[0].loc.to_string(), "q");
    }

    #[test]
    fn test_string_checks_min_before_pattern() {
        let spec = FieldSpec::query("q", FieldKind::String)
            .min_length(3)
            .pattern(Pattern::letters_and_spaces());
        let found = violations(validate(RawValue::Text("a1"), &spec));
        assert_eq!(found[0].violation, Violation::MinLength { min: 3 });
    }

    #[test]
    fn test_string_pattern_rejects_digits() {
        let spec = FieldSpec::query("q", FieldKind::String)
            .min_length(3)
            .pattern(Pattern::letters_and_spaces());
        let found = violations(validate(RawValue::Text("abc1"), &spec));
        assert_eq!(found[0].rule(), "pattern");
    }

    #[test]
    fn test_string_length_counts_characters_not_bytes() {
        let spec = FieldSpec::body("username", FieldKind::String).max_length(3);
        assert!(validate(RawValue::Json(&json!("éèà")), &spec).is_valid());
    }

    #[test]
    fn test_json_number_is_not_a_string() {
        let spec = FieldSpec::body("username", FieldKind::String);
        let found = violations(validate(RawValue::Json(&json!(42)), &spec));
        assert_eq!(found[0].violation, Violation::Type { expected: "string" });
    }

    #[test]
    fn test_optional_string_accepts_json_null() {
        let spec = FieldSpec::body("note", FieldKind::String).optional();
        assert_eq!(
            validate(RawValue::Json(&Value::Null), &spec),
            ValidationOutcome::Valid(Value::Null)
        );
    }

    // === list-of-string ===

    #[test]
    fn test_list_preserves_submission_order() {
        let outcome = validate(RawValue::Texts(vec!["Foo", "Bar baz"]), &search_terms());
        assert_eq!(outcome, ValidationOutcome::Valid(json!(["Foo", "Bar baz"])));
    }

    #[test]
    fn test_list_absent_defaults_to_null() {
        assert_eq!(
            validate(RawValue::Absent, &search_terms()),
            ValidationOutcome::Valid(Value::Null)
        );
    }

    #[test]
    fn test_list_reports_every_bad_element_with_index() {
        let long = "a".repeat(51);
        let outcome = validate(
            RawValue::Texts(vec!["ok ok", "no", long.as_str(), "x1y"]),
            &search_terms(),
        );
        let found = violations(outcome);
        let locs: Vec<String> = found.iter().map(|v| v.loc.to_string()).collect();
        assert_eq!(locs, vec!["item-query.1", "item-query.2", "item-query.3"]);
        assert_eq!(found[0].rule(), "min_length");
        assert_eq!(found[1].rule(), "max_length");
        assert_eq!(found[2].rule(), "pattern");
    }

    #[test]
    fn test_list_from_json_rejects_non_string_element() {
        let outcome = validate(RawValue::Json(&json!(["abc", 3])), &search_terms());
        let found = violations(outcome);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].loc.to_string(), "item-query.1");
        assert_eq!(found[0].rule(), "type");
    }

    // === integer / float ===

    #[test]
    fn test_integer_bounds_are_inclusive_for_ge_le() {
        for n in ["1", "50", "100"] {
            assert!(validate(RawValue::Text(n), &page_size()).is_valid(), "{n}");
        }
        for n in ["0", "-3", "101"] {
            assert!(!validate(RawValue::Text(n), &page_size()).is_valid(), "{n}");
        }
    }

    #[test]
    fn test_integer_echoes_value_unchanged() {
        assert_eq!(
            validate(RawValue::Text("42"), &page_size()),
            ValidationOutcome::Valid(json!(42))
        );
    }

    #[test]
    fn test_integer_absent_takes_default() {
        assert_eq!(
            validate(RawValue::Absent, &page_size()),
            ValidationOutcome::Valid(json!(10))
        );
    }

    #[test]
    fn test_unparseable_integer_is_type_violation_not_range() {
        let found = violations(validate(RawValue::Text("ten"), &page_size()));
        assert_eq!(found[0].violation, Violation::Type { expected: "integer" });
    }

    #[test]
    fn test_repeated_scalar_query_takes_last_value() {
        assert_eq!(
            validate(RawValue::Texts(vec!["5", "7"]), &page_size()),
            ValidationOutcome::Valid(json!(7))
        );
    }

    #[test]
    fn test_integer_from_json_accepts_integral_float_only() {
        let spec = FieldSpec::body("age", FieldKind::Integer).ge(18.0);
        assert_eq!(
            validate(RawValue::Json(&json!(18.0)), &spec),
            ValidationOutcome::Valid(json!(18))
        );
        assert!(!validate(RawValue::Json(&json!(18.5)), &spec).is_valid());
        assert!(!validate(RawValue::Json(&json!(true)), &spec).is_valid());
    }

    #[test]
    fn test_gt_is_exclusive() {
        let spec = FieldSpec::body("importance", FieldKind::Integer)
            .gt(0.0)
            .le(10.0);
        let found = violations(validate(RawValue::Json(&json!(0)), &spec));
        assert_eq!(found[0].violation, Violation::Gt { limit: 0.0 });
        assert!(validate(RawValue::Json(&json!(10)), &spec).is_valid());
        assert!(!validate(RawValue::Json(&json!(11)), &spec).is_valid());
    }

    #[test]
    fn test_lt_is_exclusive() {
        let spec = FieldSpec::query("ratio", FieldKind::Float).lt(1.0);
        assert!(validate(RawValue::Text("0.99"), &spec).is_valid());
        let found = violations(validate(RawValue::Text("1"), &spec));
        assert_eq!(found[0].rule(), "lt");
    }

    #[test]
    fn test_float_rejects_non_finite() {
        let spec = FieldSpec::body("size_mb", FieldKind::Float).gt(0.0);
        assert!(!validate(RawValue::Text("NaN"), &spec).is_valid());
        assert!(!validate(RawValue::Text("inf"), &spec).is_valid());
        assert_eq!(
            validate(RawValue::Json(&json!(2)), &spec),
            ValidationOutcome::Valid(json!(2.0))
        );
    }

    // === boolean ===

    #[test]
    fn test_boolean_tokens() {
        let spec = FieldSpec::query("confirm", FieldKind::Boolean).default_value(json!(false));
        for (token, expected) in [("true", true), ("1", true), ("Yes", true), ("false", false), ("0", false), ("off", false)] {
            assert_eq!(
                validate(RawValue::Text(token), &spec),
                ValidationOutcome::Valid(json!(expected)),
                "{token}"
            );
        }
        assert!(!validate(RawValue::Text("maybe"), &spec).is_valid());
        assert_eq!(
            validate(RawValue::Absent, &spec),
            ValidationOutcome::Valid(json!(false))
        );
    }

    // === enum ===

    #[test]
    fn test_enum_matches_member_name() {
        let spec = FieldSpec::path("name", FieldKind::Enum).one_of(["me", "user"]);
        assert_eq!(
            validate(RawValue::Text("me"), &spec),
            ValidationOutcome::Valid(json!("me"))
        );
        let found = violations(validate(RawValue::Text("developer"), &spec));
        assert_eq!(
            found[0].violation,
            Violation::NotAMember {
                allowed: vec!["me".to_string(), "user".to_string()]
            }
        );
    }

    // === object ===

    fn profile_schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::body("username", FieldKind::String).min_length(3),
            FieldSpec::body("age", FieldKind::Integer).ge(18.0),
        ])
    }

    #[test]
    fn test_object_collects_every_sub_field_failure() {
        let found = violations(validate_object(
            &json!({"username": "ab", "age": 17}),
            &profile_schema(),
        ));
        let locs: Vec<String> = found.iter().map(|v| v.loc.to_string()).collect();
        assert_eq!(locs, vec!["username", "age"]);
    }

    #[test]
    fn test_object_missing_and_unknown_sub_fields() {
        let found = violations(validate_object(
            &json!({"username": "abc", "email": "x@y.z"}),
            &profile_schema(),
        ));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].loc.to_string(), "age");
        assert_eq!(found[0].rule(), "required");
        assert_eq!(found[1].loc.to_string(), "email");
        assert_eq!(found[1].rule(), "unknown_field");
    }

    #[test]
    fn test_object_allowing_unknown_ignores_extra_keys() {
        let outcome = validate_object(
            &json!({"username": "abc", "age": 30, "email": "x@y.z"}),
            &profile_schema().allow_unknown(),
        );
        assert_eq!(outcome, ValidationOutcome::Valid(json!({"username": "abc", "age": 30})));
    }

    #[test]
    fn test_object_field_nests_locations_under_its_name() {
        let spec = FieldSpec::new("user_data", FieldSource::Body, FieldKind::Object(profile_schema()));
        let found = violations(validate(
            RawValue::Json(&json!({"username": "abc", "age": 3})),
            &spec,
        ));
        assert_eq!(found[0].loc.to_string(), "user_data.age");
    }

    #[test]
    fn test_object_rejects_non_object_json() {
        let found = violations(validate_object(&json!([1, 2]), &profile_schema()));
        assert!(found[0].loc.is_empty());
        assert_eq!(found[0].violation, Violation::Type { expected: "object" });
    }
}

//! Route-level dispatch of raw request inputs to field validators

use super::outcome::{FieldPath, FieldViolation, ValidationErrors, ValidationOutcome, Violation};
use super::spec::{FieldKind, FieldSource, FieldSpec};
use super::validators::{RawValue, validate, validate_object};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Request body as received, before any field is looked at
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawBody {
    #[default]
    Empty,
    Json(Value),
    /// Not valid JSON; carries the decoder message
    Malformed(String),
}

impl RawBody {
    /// Decode a request body; whitespace-only bodies count as empty
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return RawBody::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => RawBody::Json(value),
            Err(e) => RawBody::Malformed(e.to_string()),
        }
    }
}

/// Untyped inputs of one request, grouped by source
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub path: HashMap<String, String>,
    /// Query pairs in submission order; keys may repeat
    pub query: Vec<(String, String)>,
    pub body: RawBody,
}

/// The ordered field specs of one route
///
/// Body layout follows the usual convention: a route with a single object
/// body field reads the whole body as that object, any other combination
/// embeds each body field under its wire name.
#[derive(Debug, Clone)]
pub struct RouteSchema {
    fields: Vec<FieldSpec>,
}

impl RouteSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn has_source(&self, source: FieldSource) -> bool {
        self.fields.iter().any(|f| f.source() == source)
    }

    /// Whether body fields are looked up by name inside the body object
    pub fn embeds_body(&self) -> bool {
        let mut body_fields = self.fields.iter().filter(|f| f.source() == FieldSource::Body);
        match (body_fields.next(), body_fields.next()) {
            (Some(only), None) => !matches!(only.kind(), FieldKind::Object(_)),
            _ => true,
        }
    }

    /// Validate every field of the request
    ///
    /// Returns the typed values keyed by handler-side field name, or every
    /// violation found across all sources.
    pub fn validate(&self, raw: &RawRequest) -> Result<Map<String, Value>, ValidationErrors> {
        let mut values = Map::new();
        let mut violations = Vec::new();

        let mut body_problem = self.body_shape_problem(&raw.body);
        let body_usable = body_problem.is_none();
        let embed = self.embeds_body();

        for field in &self.fields {
            let outcome = match field.source() {
                FieldSource::Path => validate(
                    raw.path
                        .get(field.wire_name())
                        .map(|s| RawValue::Text(s))
                        .unwrap_or(RawValue::Absent),
                    field,
                ),
                FieldSource::Query => {
                    let hits: Vec<&str> = raw
                        .query
                        .iter()
                        .filter(|(key, _)| key == field.wire_name())
                        .map(|(_, value)| value.as_str())
                        .collect();
                    let input = if hits.is_empty() {
                        RawValue::Absent
                    } else {
                        RawValue::Texts(hits)
                    };
                    validate(input, field)
                }
                FieldSource::Body if !body_usable => {
                    // reported once, at the first body field
                    violations.extend(body_problem.take());
                    continue;
                }
                FieldSource::Body if embed => {
                    let input = match &raw.body {
                        RawBody::Json(Value::Object(map)) => map
                            .get(field.wire_name())
                            .map(RawValue::Json)
                            .unwrap_or(RawValue::Absent),
                        _ => RawValue::Absent,
                    };
                    validate(input, field)
                }
                FieldSource::Body => whole_body(&raw.body, field),
            };

            match outcome {
                ValidationOutcome::Valid(value) => {
                    values.insert(field.name().to_string(), value);
                }
                ValidationOutcome::Invalid(found) => violations.extend(
                    found
                        .into_iter()
                        .map(|v| v.nested(field.source().as_str())),
                ),
            }
        }

        if violations.is_empty() {
            Ok(values)
        } else {
            Err(ValidationErrors::new(violations))
        }
    }

    /// A body-level problem that makes every body field unreadable
    fn body_shape_problem(&self, body: &RawBody) -> Option<FieldViolation> {
        if !self.has_source(FieldSource::Body) {
            return None;
        }
        let violation = match body {
            RawBody::Malformed(message) => Violation::InvalidJson {
                message: message.clone(),
            },
            RawBody::Json(value) if self.embeds_body() && !value.is_object() => {
                Violation::Type { expected: "object" }
            }
            _ => return None,
        };
        Some(FieldViolation::new(
            FieldPath::root(FieldSource::Body.as_str()),
            violation,
        ))
    }
}

/// A lone object field reads the entire body; its locations skip its own name
fn whole_body(body: &RawBody, field: &FieldSpec) -> ValidationOutcome {
    match (body, field.kind()) {
        (RawBody::Json(value), FieldKind::Object(schema)) => validate_object(value, schema),
        (RawBody::Json(value), _) => validate(RawValue::Json(value), field),
        _ => match field.default() {
            Some(value) => ValidationOutcome::Valid(value.clone()),
            None => ValidationOutcome::Invalid(vec![FieldViolation::new(
                FieldPath::default(),
                Violation::Missing,
            )]),
        },
    }
}

//! Validation pipeline
//!
//! Routes declare their inputs as explicit [`FieldSpec`] data. The pipeline
//! routes each raw path segment, query value and body field through
//! [`validate`], collects every violation, and only lets a request reach its
//! handler when all fields are valid.

pub mod extractor;
pub mod outcome;
pub mod schema;
pub mod spec;
pub mod validators;

pub use extractor::{Guarded, GuardedInput};
pub use outcome::{
    FieldPath, FieldViolation, LocSegment, ValidationErrors, ValidationOutcome, Violation,
};
pub use schema::{RawBody, RawRequest, RouteSchema};
pub use spec::{
    Constraint, FieldKind, FieldSource, FieldSpec, LETTERS_AND_SPACES, ObjectSchema, Pattern,
};
pub use validators::{RawValue, validate, validate_object};

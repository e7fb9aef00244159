//! # Request Validation
//!
//! Declarative per-field rules for inbound request bodies.
//!
//! Each request type declares a table of fields (see [`Validatable`]); every
//! field carries a rule expression such as `"required,gt=0"`. The
//! [`Validator`] runs each field's rules left to right, keeps the first failure
//! per field and reports all failing fields together as [`ValidationErrors`].
//!
//! ## Rule vocabulary
//!
//! - `required`: value is not empty for its kind
//! - `min=N` / `max=N`: length bounds for non-empty strings
//! - `gt=N`: numbers strictly greater than N
//! - `email`: non-empty strings shaped like an address
//! - `datetime=LAYOUT`: non-empty strings that are a real date under LAYOUT
//! - `omitempty`: no effect
//!
//! Rules that do not fit a field's shape, unknown rule names and unreadable
//! parameters never fail.

pub mod errors;
pub mod evaluators;
pub mod requests;
pub mod rules;
pub mod validator;
pub mod value;

pub use errors::{ValidationError, ValidationErrors};
pub use evaluators::{evaluate, RuleOutcome};
pub use rules::{parse_rule_expression, RuleKind, RuleToken};
pub use validator::{FieldDescriptor, Validatable, Validator};
pub use value::{AsFieldValue, FieldValue};

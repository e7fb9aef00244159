//! Field walking and error aggregation.

use super::errors::{ValidationError, ValidationErrors};
use super::evaluators::{evaluate, RuleOutcome};
use super::rules::{parse_rule_expression, RuleToken};
use super::value::FieldValue;

/// Reads one field's current value out of a request.
pub type FieldAccessor<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

/// Static description of one declared field of a request type.
pub struct FieldDescriptor<T> {
    external_name: String,
    rules: Vec<RuleToken>,
    accessor: FieldAccessor<T>,
}

impl<T> FieldDescriptor<T> {
    /// `wire_name` is the alias the field travels under (for example
    /// `"created_at,omitempty"`); only its first token is used. Without an
    /// alias the declared name is used.
    pub fn new(
        declared_name: &str,
        wire_name: Option<&str>,
        rule_expression: &str,
        accessor: FieldAccessor<T>,
    ) -> Self {
        Self {
            external_name: resolve_external_name(declared_name, wire_name),
            rules: parse_rule_expression(rule_expression),
            accessor,
        }
    }

    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    pub fn rules(&self) -> &[RuleToken] {
        &self.rules
    }

    pub fn value<'a>(&self, request: &'a T) -> FieldValue<'a> {
        (self.accessor)(request)
    }
}

pub fn resolve_external_name(declared_name: &str, wire_name: Option<&str>) -> String {
    wire_name
        .and_then(|alias| alias.split(',').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(declared_name)
        .to_string()
}

/// A request type with a declared field table.
pub trait Validatable: Sized + 'static {
    /// Fields in declaration order. Built once per type.
    fn field_descriptors() -> &'static [FieldDescriptor<Self>];
}

/// Stateless rule engine over [`Validatable`] requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// `Ok(())` when every field passes; otherwise the first failure of each
    /// failing field, in declaration order.
    pub fn validate<T: Validatable>(&self, request: &T) -> Result<(), ValidationErrors> {
        self.validate_with(T::field_descriptors(), request)
    }

    pub fn validate_with<T>(
        &self,
        fields: &[FieldDescriptor<T>],
        request: &T,
    ) -> Result<(), ValidationErrors> {
        let errors: Vec<ValidationError> = fields
            .iter()
            .filter(|field| !field.rules.is_empty())
            .filter_map(|field| {
                check_field(&field.external_name, &field.rules, &field.value(request))
            })
            .collect();

        match ValidationErrors::from_errors(errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}

/// Evaluate `rules` left to right, stopping at the first failure.
pub fn check_field(
    name: &str,
    rules: &[RuleToken],
    value: &FieldValue<'_>,
) -> Option<ValidationError> {
    rules.iter().find_map(|rule| match evaluate(rule, name, value) {
        RuleOutcome::Failed(message) => Some(ValidationError::new(name, message)),
        RuleOutcome::Passed | RuleOutcome::NotApplicable => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::value::AsFieldValue;
    use once_cell::sync::Lazy;

    #[derive(Debug, Clone, PartialEq)]
    struct SignupForm {
        name: String,
        email: String,
        nickname: String,
        age: f64,
        notes: String,
    }

    impl Validatable for SignupForm {
        fn field_descriptors() -> &'static [FieldDescriptor<Self>] {
            static FIELDS: Lazy<Vec<FieldDescriptor<SignupForm>>> = Lazy::new(|| {
                vec![
                    FieldDescriptor::new("Name", Some("name"), "required,min=2,max=10", |f: &SignupForm| {
                        f.name.field_value()
                    }),
                    FieldDescriptor::new("Email", Some("email,omitempty"), "required,email", |f: &SignupForm| {
                        f.email.field_value()
                    }),
                    FieldDescriptor::new("Nickname", None, "min=3", |f: &SignupForm| f.nickname.field_value()),
                    FieldDescriptor::new("Age", Some("age"), "gt=17", |f: &SignupForm| f.age.field_value()),
                    FieldDescriptor::new("Notes", Some("notes"), "", |f: &SignupForm| f.notes.field_value()),
                ]
            });
            &FIELDS
        }
    }

    fn valid_form() -> SignupForm {
        SignupForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            nickname: String::new(),
            age: 36.0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_valid_request_is_accepted() {
        assert_eq!(Validator::new().validate(&valid_form()), Ok(()));
    }

    #[test]
    fn test_revalidating_accepted_request_is_idempotent() {
        let validator = Validator::new();
        let form = valid_form();

        assert!(validator.validate(&form).is_ok());
        assert!(validator.validate(&form).is_ok());
        assert_eq!(form, valid_form());
    }

    #[test]
    fn test_one_error_per_failing_field() {
        let form = SignupForm { name: String::new(), ..valid_form() };

        let errors = Validator::new().validate(&form).unwrap_err();

        // required fails first; min=2 is never reported for the same field
        assert_eq!(errors.errors(), &[ValidationError::new("name", "name is required")]);
    }

    #[test]
    fn test_later_rule_reported_when_earlier_pass() {
        let form = SignupForm { name: "A".to_string(), ..valid_form() };

        let errors = Validator::new().validate(&form).unwrap_err();

        assert_eq!(errors.to_string(), "name: name must be at least 2 characters");
    }

    #[test]
    fn test_errors_follow_declaration_order() {
        let form = SignupForm {
            name: String::new(),
            nickname: "ab".to_string(),
            age: 12.0,
            ..valid_form()
        };

        let errors = Validator::new().validate(&form).unwrap_err();

        assert_eq!(
            errors.to_string(),
            "name: name is required; Nickname: Nickname must be at least 3 characters; age: age must be greater than 17"
        );
    }

    #[test]
    fn test_external_name_resolution() {
        assert_eq!(resolve_external_name("Email", Some("email,omitempty")), "email");
        assert_eq!(resolve_external_name("Nickname", None), "Nickname");
        assert_eq!(resolve_external_name("Nickname", Some("")), "Nickname");
        assert_eq!(resolve_external_name("Nickname", Some(",omitempty")), "Nickname");
    }

    #[test]
    fn test_field_without_rules_is_skipped() {
        let fields = SignupForm::field_descriptors();

        assert!(fields[4].rules().is_empty());
    }

    #[test]
    fn test_check_field_stops_at_first_failure() {
        let rules = parse_rule_expression("min=5,max=2");

        let error = check_field("code", &rules, &FieldValue::Str("abc")).unwrap();

        assert_eq!(error.message(), "code must be at least 5 characters");
    }
}

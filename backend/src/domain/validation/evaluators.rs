//! The atomic rule evaluators.
//!
//! Each evaluator is a pure function of the field value and the rule parameter.
//! A rule that does not fit the value's shape, or whose parameter cannot be
//! read, reports [`RuleOutcome::NotApplicable`] instead of failing.

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::{RuleKind, RuleToken};
use super::value::FieldValue;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

/// Layout tokens accepted in `datetime=` parameters, mapped to strftime.
/// Both `YYYY-MM-DD` style and reference-date style (`2006-01-02`) layouts work.
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("2006", "%Y"),
    ("MM", "%m"),
    ("01", "%m"),
    ("DD", "%d"),
    ("02", "%d"),
    ("HH", "%H"),
    ("15", "%H"),
    ("mm", "%M"),
    ("04", "%M"),
    ("ss", "%S"),
    ("05", "%S"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Passed,
    /// The rule does not fit the value's shape or its parameter is malformed
    NotApplicable,
    Failed(String),
}

/// Run one rule token against a field value.
pub fn evaluate(token: &RuleToken, field: &str, value: &FieldValue<'_>) -> RuleOutcome {
    let parameter = token.parameter.as_deref().unwrap_or_default();

    match &token.kind {
        RuleKind::Required => required(field, value),
        RuleKind::Min => min_length(field, value, parameter),
        RuleKind::Max => max_length(field, value, parameter),
        RuleKind::Gt => greater_than(field, value, parameter),
        RuleKind::Email => email(field, value),
        RuleKind::Datetime => datetime(field, value, parameter),
        RuleKind::OmitEmpty => RuleOutcome::Passed,
        RuleKind::Unknown(_) => RuleOutcome::NotApplicable,
    }
}

fn required(field: &str, value: &FieldValue<'_>) -> RuleOutcome {
    if value.is_empty() {
        RuleOutcome::Failed(format!("{} is required", field))
    } else {
        RuleOutcome::Passed
    }
}

/// Non-empty string slot, or `None` when the rule should not look at the value.
fn non_empty_str<'a>(value: &FieldValue<'a>) -> Option<&'a str> {
    match value {
        FieldValue::Str(s) if !s.is_empty() => Some(*s),
        _ => None,
    }
}

// Lengths are byte lengths of the UTF-8 encoding.
fn min_length(field: &str, value: &FieldValue<'_>, parameter: &str) -> RuleOutcome {
    let Ok(min) = parameter.parse::<i64>() else {
        return RuleOutcome::NotApplicable;
    };
    let Some(s) = non_empty_str(value) else {
        return RuleOutcome::NotApplicable;
    };

    if (s.len() as i64) < min {
        RuleOutcome::Failed(format!("{} must be at least {} characters", field, min))
    } else {
        RuleOutcome::Passed
    }
}

fn max_length(field: &str, value: &FieldValue<'_>, parameter: &str) -> RuleOutcome {
    let Ok(max) = parameter.parse::<i64>() else {
        return RuleOutcome::NotApplicable;
    };
    let Some(s) = non_empty_str(value) else {
        return RuleOutcome::NotApplicable;
    };

    if (s.len() as i64) > max {
        RuleOutcome::Failed(format!("{} must be at most {} characters", field, max))
    } else {
        RuleOutcome::Passed
    }
}

fn greater_than(field: &str, value: &FieldValue<'_>, parameter: &str) -> RuleOutcome {
    let Ok(bound) = parameter.parse::<f64>() else {
        return RuleOutcome::NotApplicable;
    };
    let number = match value {
        FieldValue::Float(n) => *n,
        FieldValue::Int(n) => *n as f64,
        _ => return RuleOutcome::NotApplicable,
    };

    // a NaN bound never rejects
    if number <= bound {
        RuleOutcome::Failed(format!("{} must be greater than {}", field, format_bound(bound)))
    } else {
        RuleOutcome::Passed
    }
}

/// Shortest `%g` style rendering: plain notation for exponents in -4..6,
/// otherwise `1.5e+21` with at least two exponent digits.
fn format_bound(bound: f64) -> String {
    if bound.is_nan() {
        return "NaN".to_string();
    }
    if bound.is_infinite() {
        return if bound > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{:e}", bound);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return bound.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return bound.to_string();
    };

    if (-4..6).contains(&exponent) {
        bound.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

fn email(field: &str, value: &FieldValue<'_>) -> RuleOutcome {
    let Some(s) = non_empty_str(value) else {
        return RuleOutcome::NotApplicable;
    };

    if EMAIL_REGEX.is_match(s) {
        RuleOutcome::Passed
    } else {
        RuleOutcome::Failed(format!("{} must be a valid email address", field))
    }
}

fn datetime(field: &str, value: &FieldValue<'_>, layout: &str) -> RuleOutcome {
    let Some(s) = non_empty_str(value) else {
        return RuleOutcome::NotApplicable;
    };

    if parses_with_layout(s, layout) {
        RuleOutcome::Passed
    } else {
        RuleOutcome::Failed(format!("{} must be in format {}", field, layout))
    }
}

/// Translate a layout such as `YYYY-MM-DD` or `2006-01-02` into a strftime
/// string. Layouts that already contain `%` are taken as strftime verbatim.
pub fn layout_to_strftime(layout: &str) -> String {
    if layout.contains('%') {
        return layout.to_string();
    }

    let mut format = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'scan: while let Some(ch) = rest.chars().next() {
        for (token, directive) in LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                format.push_str(directive);
                rest = tail;
                continue 'scan;
            }
        }
        format.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    format
}

/// Whether `value` has exactly the character shape of `layout`: every layout
/// token is matched by as many ASCII digits as it is long and every other
/// character literally. strftime (`%`) layouts are not shape checked.
pub fn matches_layout_shape(value: &str, layout: &str) -> bool {
    if layout.contains('%') {
        return true;
    }

    let mut value = value.as_bytes();
    let mut rest = layout;
    'scan: while let Some(ch) = rest.chars().next() {
        for (token, _) in LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                let width = token.len();
                if value.len() < width || !value[..width].iter().all(u8::is_ascii_digit) {
                    return false;
                }
                value = &value[width..];
                rest = tail;
                continue 'scan;
            }
        }
        let Some(literal) = value.strip_prefix(&rest.as_bytes()[..ch.len_utf8()]) else {
            return false;
        };
        value = literal;
        rest = &rest[ch.len_utf8()..];
    }
    value.is_empty()
}

/// Whether `value` is a real calendar date/time under `layout`.
///
/// chrono accepts unpadded, space-prefixed and signed numbers, so the
/// fixed-width shape is checked first.
pub fn parses_with_layout(value: &str, layout: &str) -> bool {
    if !matches_layout_shape(value, layout) {
        return false;
    }
    let format = layout_to_strftime(layout);
    let has_date = ["%Y", "%m", "%d"].iter().any(|d| format.contains(d));
    let has_time = ["%H", "%M", "%S"].iter().any(|d| format.contains(d));

    match (has_date, has_time) {
        (true, true) => NaiveDateTime::parse_from_str(value, &format).is_ok(),
        (true, false) => NaiveDate::parse_from_str(value, &format).is_ok(),
        (false, true) => NaiveTime::parse_from_str(value, &format).is_ok(),
        (false, false) => {
            let mut parsed = Parsed::default();
            parse(&mut parsed, value, StrftimeItems::new(&format)).is_ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(expression: &str, value: FieldValue<'_>) -> RuleOutcome {
        evaluate(&RuleToken::parse(expression), "field", &value)
    }

    #[test]
    fn test_required() {
        assert_eq!(run("required", FieldValue::Str("")), RuleOutcome::Failed("field is required".into()));
        assert_eq!(run("required", FieldValue::Float(0.0)), RuleOutcome::Failed("field is required".into()));
        assert_eq!(run("required", FieldValue::Bool(false)), RuleOutcome::Failed("field is required".into()));
        assert_eq!(run("required", FieldValue::Optional(None)), RuleOutcome::Failed("field is required".into()));
        assert_eq!(run("required", FieldValue::Str("x")), RuleOutcome::Passed);
    }

    #[test]
    fn test_min_skips_empty_strings() {
        assert_eq!(run("min=3", FieldValue::Str("")), RuleOutcome::NotApplicable);
        assert_eq!(
            run("min=3", FieldValue::Str("ab")),
            RuleOutcome::Failed("field must be at least 3 characters".into())
        );
        assert_eq!(run("min=3", FieldValue::Str("abc")), RuleOutcome::Passed);
    }

    #[test]
    fn test_max() {
        assert_eq!(run("max=3", FieldValue::Str("abc")), RuleOutcome::Passed);
        assert_eq!(
            run("max=3", FieldValue::Str("abcd")),
            RuleOutcome::Failed("field must be at most 3 characters".into())
        );
    }

    #[test]
    fn test_length_rules_ignore_non_strings() {
        assert_eq!(run("min=3", FieldValue::Float(1.0)), RuleOutcome::NotApplicable);
        assert_eq!(run("max=1", FieldValue::List(5)), RuleOutcome::NotApplicable);
    }

    #[test]
    fn test_malformed_parameters_fail_open() {
        assert_eq!(run("min=three", FieldValue::Str("a")), RuleOutcome::NotApplicable);
        assert_eq!(run("max=", FieldValue::Str("abcdef")), RuleOutcome::NotApplicable);
        assert_eq!(run("gt=zero", FieldValue::Float(-4.0)), RuleOutcome::NotApplicable);
    }

    #[test]
    fn test_gt() {
        assert_eq!(
            run("gt=0", FieldValue::Float(0.0)),
            RuleOutcome::Failed("field must be greater than 0".into())
        );
        assert!(matches!(run("gt=0", FieldValue::Float(-1.0)), RuleOutcome::Failed(_)));
        assert_eq!(run("gt=0", FieldValue::Float(0.01)), RuleOutcome::Passed);
        assert_eq!(run("gt=1.5", FieldValue::Int(2)), RuleOutcome::Passed);
        assert_eq!(
            run("gt=2.5", FieldValue::Int(2)),
            RuleOutcome::Failed("field must be greater than 2.5".into())
        );
    }

    #[test]
    fn test_gt_bound_rendering() {
        assert_eq!(
            run("gt=1e21", FieldValue::Float(5.0)),
            RuleOutcome::Failed("field must be greater than 1e+21".into())
        );
        assert_eq!(
            run("gt=0.00001", FieldValue::Float(0.0)),
            RuleOutcome::Failed("field must be greater than 1e-05".into())
        );
        assert_eq!(
            run("gt=123456", FieldValue::Int(1)),
            RuleOutcome::Failed("field must be greater than 123456".into())
        );
        assert_eq!(
            run("gt=1500000", FieldValue::Int(1)),
            RuleOutcome::Failed("field must be greater than 1.5e+06".into())
        );
        assert_eq!(
            run("gt=0.0001", FieldValue::Float(0.0)),
            RuleOutcome::Failed("field must be greater than 0.0001".into())
        );
    }

    #[test]
    fn test_gt_nan_bound_passes() {
        assert_eq!(run("gt=NaN", FieldValue::Float(-1.0)), RuleOutcome::Passed);
        assert_eq!(run("gt=NaN", FieldValue::Int(0)), RuleOutcome::Passed);
    }

    #[test]
    fn test_gt_is_inert_on_optional_numbers() {
        let value = FieldValue::Optional(Some(Box::new(FieldValue::Float(-10.0))));

        assert_eq!(run("gt=0", value), RuleOutcome::NotApplicable);
    }

    #[test]
    fn test_email() {
        assert_eq!(run("email", FieldValue::Str("someone@example.com")), RuleOutcome::Passed);
        assert_eq!(run("email", FieldValue::Str("a.b+c@mail.example.org")), RuleOutcome::Passed);
        assert_eq!(
            run("email", FieldValue::Str("not-an-email")),
            RuleOutcome::Failed("field must be a valid email address".into())
        );
        assert!(matches!(run("email", FieldValue::Str("x@y.c")), RuleOutcome::Failed(_)));
        assert_eq!(run("email", FieldValue::Str("")), RuleOutcome::NotApplicable);
    }

    #[test]
    fn test_datetime_calendar_validity() {
        let layout = "datetime=YYYY-MM-DD";

        assert_eq!(run(layout, FieldValue::Str("2024-02-29")), RuleOutcome::Passed);
        assert_eq!(
            run(layout, FieldValue::Str("2024-02-30")),
            RuleOutcome::Failed("field must be in format YYYY-MM-DD".into())
        );
        assert!(matches!(run(layout, FieldValue::Str("2024-13-01")), RuleOutcome::Failed(_)));
        assert!(matches!(run(layout, FieldValue::Str("2023-02-29")), RuleOutcome::Failed(_)));
        assert_eq!(run(layout, FieldValue::Str("")), RuleOutcome::NotApplicable);
    }

    #[test]
    fn test_datetime_reference_layout() {
        assert_eq!(run("datetime=2006-01-02", FieldValue::Str("2024-06-15")), RuleOutcome::Passed);
        assert!(matches!(
            run("datetime=2006-01-02", FieldValue::Str("15/06/2024")),
            RuleOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_datetime_requires_fixed_width_digits() {
        for value in ["2024-6-5", " 2024-06-15", "+2024-06-15", "2024-06-15 ", "02024-06-15"] {
            assert_eq!(
                run("datetime=YYYY-MM-DD", FieldValue::Str(value)),
                RuleOutcome::Failed("field must be in format YYYY-MM-DD".into()),
                "{:?}",
                value
            );
        }
        assert!(matches!(run("datetime=2006-01-02", FieldValue::Str("2024-6-15")), RuleOutcome::Failed(_)));
    }

    #[test]
    fn test_layout_shape() {
        assert!(matches_layout_shape("2024-06-15", "YYYY-MM-DD"));
        assert!(matches_layout_shape("2024-06-15 09:05:00", "2006-01-02 15:04:05"));
        assert!(!matches_layout_shape("2024-06-15", "YYYY/MM/DD"));
        assert!(!matches_layout_shape("2024-06-1", "YYYY-MM-DD"));
        assert!(!matches_layout_shape("2024-0a-15", "YYYY-MM-DD"));
        assert!(matches_layout_shape("anything", "%d.%m.%Y"));
    }

    #[test]
    fn test_layout_translation() {
        assert_eq!(layout_to_strftime("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(layout_to_strftime("2006-01-02 15:04:05"), "%Y-%m-%d %H:%M:%S");
        assert_eq!(layout_to_strftime("%d.%m.%Y"), "%d.%m.%Y");
        assert!(parses_with_layout("2024-06-15 13:45:00", "YYYY-MM-DD HH:mm:ss"));
        assert!(!parses_with_layout("2024-06-15 25:00:00", "YYYY-MM-DD HH:mm:ss"));
    }

    #[test]
    fn test_omitempty_and_unknown_never_fail() {
        assert_eq!(run("omitempty", FieldValue::Str("")), RuleOutcome::Passed);
        assert_eq!(run("uuid", FieldValue::Str("nope")), RuleOutcome::NotApplicable);
    }
}

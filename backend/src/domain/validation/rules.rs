//! Parsing of per-field rule expressions such as `"required,gt=0"`.

/// The closed set of rule kinds understood by the evaluators.
///
/// A token whose name is not in the vocabulary, or whose shape does not fit the
/// named rule (`required=1`, `min` without a bound), parses to `Unknown` and is
/// never evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    Min,
    Max,
    Gt,
    Email,
    Datetime,
    OmitEmpty,
    Unknown(String),
}

impl RuleKind {
    fn from_token(name: &str, has_parameter: bool) -> Self {
        match (name, has_parameter) {
            ("required", false) => RuleKind::Required,
            ("email", false) => RuleKind::Email,
            ("omitempty", false) => RuleKind::OmitEmpty,
            ("min", true) => RuleKind::Min,
            ("max", true) => RuleKind::Max,
            ("gt", true) => RuleKind::Gt,
            ("datetime", true) => RuleKind::Datetime,
            _ => RuleKind::Unknown(name.to_string()),
        }
    }
}

/// One atomic directive of a rule expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleToken {
    pub kind: RuleKind,
    pub parameter: Option<String>,
}

impl RuleToken {
    /// Parse a single token. Splits on the first `=` only, so parameters may
    /// themselves contain `=`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (name, parameter) = match raw.split_once('=') {
            Some((name, parameter)) => (name, Some(parameter.to_string())),
            None => (raw, None),
        };

        Self {
            kind: RuleKind::from_token(name, parameter.is_some()),
            parameter,
        }
    }
}

/// Split a rule expression into its tokens, preserving order.
///
/// An empty (or whitespace-only) expression yields no tokens.
pub fn parse_rule_expression(expression: &str) -> Vec<RuleToken> {
    if expression.trim().is_empty() {
        return Vec::new();
    }

    expression.split(',').map(RuleToken::parse).collect()
}

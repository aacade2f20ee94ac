//! The condition language: a flat conjunction of comparisons.
//!
//! ```text
//! condition := clause ( AND clause )*      // AND is case-insensitive
//! clause    := <field-path> <op> <literal>
//! op        := >= | <= | != | == | > | <
//! ```
//!
//! There is no OR, grouping or negation. The right-hand side is always a literal, never a
//! field reference: `tags.owner == tags.admin` compares against the string `"tags.admin"`.
//!
//! Evaluation never fails. A clause without an operator, a failed numeric coercion, or an
//! unresolved path all make the clause false.

use regex::Regex;
use resguard_types::Resource;
use std::fmt;
use std::sync::LazyLock;

use crate::value::{Value, resolve_path};

static AND_SPLITTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AND\s+").expect("AND splitter pattern is valid"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Ge,
    Le,
    Ne,
    Eq,
    Gt,
    Lt,
}

impl Operator {
    /// Two-character tokens come first so `>=` is never read as `>`.
    const PRIORITY: [Operator; 6] = [
        Operator::Ge,
        Operator::Le,
        Operator::Ne,
        Operator::Eq,
        Operator::Gt,
        Operator::Lt,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Ne => "!=",
            Operator::Eq => "==",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }

    fn apply(self, left: &Value, right: &Value) -> bool {
        match self {
            Operator::Eq => loose_eq(left, right),
            Operator::Ne => !loose_eq(left, right),
            Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le => {
                let (Some(l), Some(r)) = (left.to_f64(), right.to_f64()) else {
                    return false;
                };
                match self {
                    Operator::Gt => l > r,
                    Operator::Lt => l < r,
                    Operator::Ge => l >= r,
                    _ => l <= r,
                }
            }
        }
    }
}

/// Type-sensitive equality. Booleans compare equal to 1 and 0; a number never equals a
/// string, even a numeric-looking one.
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Bool(b), Value::Number(n)) | (Value::Number(n), Value::Bool(b)) => {
            (if *b { 1.0 } else { 0.0 }) == *n
        }
        _ => left == right,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    Compare {
        path: String,
        op: Operator,
        literal: Value,
    },
    /// Text with none of the recognised operators. Never true.
    Unparsed(String),
}

impl Clause {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        for op in Operator::PRIORITY {
            if let Some((left, right)) = text.split_once(op.token()) {
                return Clause::Compare {
                    path: left.trim().to_string(),
                    op,
                    literal: parse_literal(right.trim()),
                };
            }
        }
        Clause::Unparsed(text.to_string())
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Clause::Compare { path, op, literal } => op.apply(&resolve_path(resource, path), literal),
            Clause::Unparsed(_) => false,
        }
    }
}

/// Parse a right-hand literal: `null`/`none`, `true`/`false` (any case), an integer, a float
/// (only when the text contains `.`), otherwise a string with surrounding quotes stripped.
pub fn parse_literal(raw: &str) -> Value {
    match raw.to_ascii_lowercase().as_str() {
        "null" | "none" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    let number = if raw.contains('.') {
        raw.parse::<f64>().ok()
    } else {
        parse_integer(raw)
    };
    if let Some(n) = number {
        return Value::Number(n);
    }

    Value::Str(raw.trim_matches(['\'', '"']).to_string())
}

fn parse_integer(raw: &str) -> Option<f64> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<f64>().ok()
}

/// A parsed condition. Parsing never fails; malformed clauses simply never match.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    source: String,
    clauses: Vec<Clause>,
}

impl Condition {
    pub fn parse(source: &str) -> Self {
        let clauses = if source.is_empty() {
            Vec::new()
        } else {
            AND_SPLITTER.split(source).map(Clause::parse).collect()
        };
        Self {
            source: source.to_string(),
            clauses,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// An empty condition never matches, so a policy without one can never fire.
    pub fn matches(&self, resource: &Resource) -> bool {
        !self.clauses.is_empty() && self.clauses.iter().all(|c| c.matches(resource))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse and evaluate in one step.
pub fn evaluate(condition: &str, resource: &Resource) -> bool {
    Condition::parse(condition).matches(resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::resource;
    use resguard_types::ResourceStatus;

    #[test]
    fn conjunction_requires_every_clause() {
        let cond = "age_days > 30 AND estimated_monthly_cost > 10";
        let old = resource("d1", "disk")
            .with_age_days(45)
            .with_estimated_monthly_cost(50.0);
        let young = resource("d2", "disk")
            .with_age_days(20)
            .with_estimated_monthly_cost(50.0);
        assert!(evaluate(cond, &old));
        assert!(!evaluate(cond, &young));
    }

    #[test]
    fn and_is_case_insensitive() {
        let r = resource("d1", "disk")
            .with_age_days(45)
            .with_estimated_monthly_cost(50.0);
        assert!(evaluate("age_days > 30 and estimated_monthly_cost > 10", &r));
        assert!(evaluate("age_days > 30   And\testimated_monthly_cost > 10", &r));
        assert_eq!(Condition::parse("a == 1 AND b == 2 and c == 3").clauses().len(), 3);
    }

    #[test]
    fn and_inside_a_word_is_not_a_separator() {
        let c = Condition::parse("name == BRANDON");
        assert_eq!(c.clauses().len(), 1);
    }

    #[test]
    fn operator_priority_prefers_two_char_tokens() {
        match Clause::parse("age_days >= 30") {
            Clause::Compare { path, op, literal } => {
                assert_eq!(path, "age_days");
                assert_eq!(op, Operator::Ge);
                assert_eq!(literal, Value::Number(30.0));
            }
            other => panic!("unexpected clause {other:?}"),
        }
        match Clause::parse("status != idle") {
            Clause::Compare { op, .. } => assert_eq!(op, Operator::Ne),
            other => panic!("unexpected clause {other:?}"),
        }
    }

    #[test]
    fn inclusive_and_exclusive_bounds() {
        let r = resource("d1", "disk").with_age_days(30);
        assert!(evaluate("age_days >= 30", &r));
        assert!(evaluate("age_days <= 30", &r));
        assert!(!evaluate("age_days > 30", &r));
        assert!(!evaluate("age_days < 30", &r));
        assert!(evaluate("age_days == 30", &r));
        assert!(evaluate("age_days == 30.0", &r));
    }

    #[test]
    fn clause_without_operator_never_matches() {
        let r = resource("d1", "disk");
        assert!(!evaluate("orphaned", &r));
        assert!(!evaluate("age_days > 0 AND orphaned", &r));
    }

    #[test]
    fn empty_or_blank_condition_never_matches() {
        let r = resource("d1", "disk");
        assert!(!evaluate("", &r));
        assert!(!evaluate("   ", &r));
    }

    #[test]
    fn status_shorthand_compares_to_bool_literal() {
        let r = resource("d1", "disk").with_status(ResourceStatus::Orphaned);
        assert!(evaluate("orphaned == true", &r));
        assert!(evaluate("idle == false", &r));
        assert!(evaluate("status == orphaned", &r));
        assert!(evaluate("status == 'orphaned'", &r));
    }

    #[test]
    fn null_checks_on_missing_tags() {
        let tagged = resource("d1", "disk").with_tag("owner", "alice");
        let untagged = resource("d2", "disk");
        assert!(evaluate("tags.owner == null", &untagged));
        assert!(evaluate("tags.owner == None", &untagged));
        assert!(!evaluate("tags.owner == null", &tagged));
        assert!(evaluate("tags.owner != null", &tagged));
    }

    #[test]
    fn numeric_field_never_equals_quoted_string() {
        let r = resource("d1", "disk").with_age_days(30);
        assert!(!evaluate("age_days == '30'", &r));
        assert!(evaluate("age_days != '30'", &r));
    }

    #[test]
    fn ordering_coerces_numeric_strings_and_fails_closed() {
        let r = resource("d1", "disk").with_tag("size", "128");
        assert!(evaluate("tags.size > 100", &r));
        assert!(!evaluate("name > 10", &r));
        assert!(!evaluate("tags.missing > 0", &r));
        assert!(!evaluate("tags.missing < 0", &r));
        assert!(!evaluate("age_days > abc", &r));
    }

    #[test]
    fn right_side_is_always_a_literal() {
        let r = resource("d1", "disk")
            .with_tag("owner", "tags.admin")
            .with_tag("admin", "bob");
        assert!(evaluate("tags.owner == tags.admin", &r));
    }

    #[test]
    fn literal_parsing() {
        assert_eq!(parse_literal("NULL"), Value::Null);
        assert_eq!(parse_literal("True"), Value::Bool(true));
        assert_eq!(parse_literal("FALSE"), Value::Bool(false));
        assert_eq!(parse_literal("42"), Value::Number(42.0));
        assert_eq!(parse_literal("-7"), Value::Number(-7.0));
        assert_eq!(parse_literal("2.5"), Value::Number(2.5));
        assert_eq!(parse_literal("1e3"), Value::from("1e3"));
        assert_eq!(parse_literal("inf"), Value::from("inf"));
        assert_eq!(parse_literal("\"quoted\""), Value::from("quoted"));
        assert_eq!(parse_literal("'single'"), Value::from("single"));
        assert_eq!(parse_literal("v1.2.3"), Value::from("v1.2.3"));
    }

    #[test]
    fn bool_and_number_compare_as_one_and_zero() {
        let r = resource("d1", "disk").with_status(ResourceStatus::Orphaned);
        assert!(evaluate("orphaned == 1", &r));
        assert!(evaluate("idle == 0", &r));
        assert!(evaluate("orphaned > 0", &r));
    }
}

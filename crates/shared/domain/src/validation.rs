//! Table-driven validation of user input.
//!
//! Every rule in the table is evaluated, in declaration order, and every
//! violation is reported. A date that cannot be parsed fails both the format
//! rule and the not-future rule.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    DATE_FORMAT, DATE_PATTERN, FIELD_DATE_OF_BIRTH, FIELD_NAME, MAX_NAME_LENGTH, MIN_NAME_LENGTH,
};
use crate::error::{DomainError, DomainResult};

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DATE_PATTERN).expect("date pattern is a valid regex"));

/// Parse a `YYYY-MM-DD` calendar date.
///
/// The text must have exactly four year digits and two month and day digits,
/// and must name a real date (no February 30).
pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(DomainError::invalid_date(raw));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| DomainError::invalid_date(raw))
}

/// Input fields a rule can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    DateOfBirth,
}

impl Field {
    /// Field name as shown in violation messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => FIELD_NAME,
            Field::DateOfBirth => FIELD_DATE_OF_BIRTH,
        }
    }
}

/// Predicate applied to a single field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Value is non-empty
    Required,
    /// At least this many Unicode code points
    MinChars(usize),
    /// At most this many Unicode code points
    MaxChars(usize),
    /// Parses as a `YYYY-MM-DD` calendar date
    DateFormat,
    /// Parses as a date strictly before today
    NotFuture,
}

impl Check {
    fn holds(&self, value: &str, today: NaiveDate) -> bool {
        match self {
            Check::Required => !value.is_empty(),
            Check::MinChars(min) => value.chars().count() >= *min,
            Check::MaxChars(max) => value.chars().count() <= *max,
            Check::DateFormat => parse_date(value).is_ok(),
            Check::NotFuture => parse_date(value).map_or(false, |date| date < today),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field: Field,
    pub check: Check,
}

impl Rule {
    const fn new(field: Field, check: Check) -> Self {
        Self { field, check }
    }

    /// Human-readable message reported when this rule fails
    pub fn message(&self) -> String {
        let field = self.field.as_str();
        match self.check {
            Check::Required => format!("{} is required", field),
            Check::MinChars(min) => format!("{} must be at least {} characters", field, min),
            Check::MaxChars(max) => format!("{} must be at most {} characters", field, max),
            Check::DateFormat => format!("{} must be in YYYY-MM-DD format", field),
            Check::NotFuture => format!("{} cannot be in the future", field),
        }
    }
}

/// Rules for create and update requests.
pub const USER_RULES: &[Rule] = &[
    Rule::new(Field::Name, Check::Required),
    Rule::new(Field::Name, Check::MinChars(MIN_NAME_LENGTH)),
    Rule::new(Field::Name, Check::MaxChars(MAX_NAME_LENGTH)),
    Rule::new(Field::DateOfBirth, Check::Required),
    Rule::new(Field::DateOfBirth, Check::DateFormat),
    Rule::new(Field::DateOfBirth, Check::NotFuture),
];

/// Raw user fields as received from a request.
#[derive(Debug, Clone, Copy)]
pub struct UserInput<'a> {
    pub name: &'a str,
    pub date_of_birth: &'a str,
}

impl UserInput<'_> {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => self.name,
            Field::DateOfBirth => self.date_of_birth,
        }
    }
}

/// Stateless rule evaluator, cheap to copy and safe to share.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    rules: &'static [Rule],
}

impl Validator {
    /// Validator for user create/update input
    pub fn new() -> Self {
        Self { rules: USER_RULES }
    }

    /// Evaluate every rule against `input`, using `today` for the not-future check.
    ///
    /// Returns the violation messages in rule order.
    pub fn validate(&self, input: &UserInput<'_>, today: NaiveDate) -> Result<(), Vec<String>> {
        let violations: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| !rule.check.holds(input.value(rule.field), today))
            .map(Rule::message)
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Value kind a form field is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Date,
}

/// Declared constraints of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldConstraints<'a> {
    /// Human readable label used in messages.
    pub label: &'a str,
    pub required: bool,
    pub kind: FieldKind,
}

/// Outcome of validating one field value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Verdict {
    pub valid: bool,
    /// Empty when `valid`.
    pub message: String,
}

impl Verdict {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Parse the ISO `YYYY-MM-DD` wire format of date fields.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Validate one field value against its constraints.
///
/// The value is trimmed first. An optional field with an empty value is always valid. Date
/// fields compare calendar days only: `today` itself is valid, anything before it is not.
pub fn validate_field(value: &str, constraints: &FieldConstraints<'_>, today: NaiveDate) -> Verdict {
    let value = value.trim();

    if value.is_empty() {
        if constraints.required {
            return Verdict::invalid(format!("{} is required", constraints.label));
        }
        return Verdict::ok();
    }

    match constraints.kind {
        FieldKind::Text => Verdict::ok(),
        FieldKind::Email if !is_valid_email(value) => {
            Verdict::invalid("Please enter a valid email address")
        }
        FieldKind::Email => Verdict::ok(),
        FieldKind::Date => match parse_date(value) {
            None => Verdict::invalid("Please enter a valid date"),
            Some(date) if date < today => Verdict::invalid("Date cannot be in the past"),
            Some(_) => Verdict::ok(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/field.rs"]
mod tests;

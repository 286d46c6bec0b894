use chrono::NaiveDate;

use crate::foundation::core::iso_date;

/// Subject characters kept in a generated filename.
pub const MAX_SUBJECT_CHARS: usize = 30;

const FALLBACK_SUBJECT: &str = "Letter";

/// Replace every character outside `[A-Za-z0-9]` with `_` (one for one) and keep the first
/// [`MAX_SUBJECT_CHARS`] characters.
pub fn sanitize_subject(subject: &str) -> String {
    subject
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_SUBJECT_CHARS)
        .collect()
}

/// `Kelsa_Letter_<subject>_<YYYY-MM-DD>.pdf`. An empty subject is named `Letter`.
pub fn export_filename(subject: &str, date: NaiveDate) -> String {
    let subject = if subject.is_empty() {
        FALLBACK_SUBJECT
    } else {
        subject
    };
    format!(
        "Kelsa_Letter_{}_{}.pdf",
        sanitize_subject(subject),
        iso_date(date)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/export/filename.rs"]
mod tests;

use chrono::NaiveDate;

use crate::record::fields::Field;
use crate::record::letter::LetterRecord;
use crate::validate::field::parse_date;

pub const DEFAULT_SALUTATION: &str = "Dear Sir/Madam,";
pub const DEFAULT_CLOSING: &str = "Yours faithfully,";
pub const DEFAULT_SIGNATORY: &str = "Management";

/// What each display region of the letter template shows.
///
/// `None` means the region is hidden, not rendered empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DisplayModel {
    pub date: Option<String>,
    pub reference: Option<String>,
    pub recipient_name: String,
    pub recipient_title: Option<String>,
    pub recipient_address: String,
    pub subject: String,
    pub salutation: String,
    pub body: String,
    pub closing: String,
    pub signatory: String,
    pub show_signature: bool,
}

/// Project a submitted record onto the letter template.
pub fn project(record: &LetterRecord) -> DisplayModel {
    let owned = |field: Field| record.get(field).map(str::to_string);

    DisplayModel {
        date: record
            .get(Field::LetterDate)
            .and_then(parse_date)
            .map(format_long_date),
        reference: record.get(Field::Reference).map(|r| format!("Ref: {r}")),
        recipient_name: record.value(Field::RecipientName).to_string(),
        recipient_title: owned(Field::RecipientTitle),
        recipient_address: record.value(Field::RecipientAddress).to_string(),
        subject: record.value(Field::Subject).to_string(),
        salutation: owned(Field::Salutation).unwrap_or_else(|| DEFAULT_SALUTATION.to_string()),
        body: record.value(Field::LetterBody).to_string(),
        closing: owned(Field::Closing).unwrap_or_else(|| DEFAULT_CLOSING.to_string()),
        signatory: owned(Field::Signatory).unwrap_or_else(|| DEFAULT_SIGNATORY.to_string()),
        show_signature: true,
    }
}

/// en-US long form, e.g. `May 1, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/preview/display.rs"]
mod tests;

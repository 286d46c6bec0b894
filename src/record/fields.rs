use crate::validate::field::{FieldConstraints, FieldKind};

/// Every input on the letter form, in form order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    RecipientName,
    RecipientTitle,
    RecipientAddress,
    Reference,
    LetterDate,
    Subject,
    Salutation,
    LetterBody,
    Closing,
    Signatory,
    Email,
}

impl Field {
    /// All fields in the order they appear on the form.
    pub const ALL: [Field; 11] = [
        Field::RecipientName,
        Field::RecipientTitle,
        Field::RecipientAddress,
        Field::Reference,
        Field::LetterDate,
        Field::Subject,
        Field::Salutation,
        Field::LetterBody,
        Field::Closing,
        Field::Signatory,
        Field::Email,
    ];

    /// Storage key of the field inside a serialized record.
    pub fn key(self) -> &'static str {
        match self {
            Field::RecipientName => "recipientName",
            Field::RecipientTitle => "recipientTitle",
            Field::RecipientAddress => "recipientAddress",
            Field::Reference => "reference",
            Field::LetterDate => "letterDate",
            Field::Subject => "subject",
            Field::Salutation => "salutation",
            Field::LetterBody => "letterBody",
            Field::Closing => "closing",
            Field::Signatory => "signatory",
            Field::Email => "email",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::RecipientName => "Recipient Name",
            Field::RecipientTitle => "Recipient Title",
            Field::RecipientAddress => "Recipient Address",
            Field::Reference => "Reference",
            Field::LetterDate => "Letter Date",
            Field::Subject => "Subject",
            Field::Salutation => "Salutation",
            Field::LetterBody => "Letter Body",
            Field::Closing => "Closing",
            Field::Signatory => "Signatory",
            Field::Email => "Contact Email",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::RecipientName | Field::RecipientAddress | Field::Subject | Field::LetterBody
        )
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::LetterDate => FieldKind::Date,
            Field::Email => FieldKind::Email,
            _ => FieldKind::Text,
        }
    }

    pub fn constraints(self) -> FieldConstraints<'static> {
        FieldConstraints {
            label: self.label(),
            required: self.is_required(),
            kind: self.kind(),
        }
    }

    /// Required fields, in form order.
    pub fn required() -> impl Iterator<Item = Field> {
        Self::ALL.into_iter().filter(|f| f.is_required())
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

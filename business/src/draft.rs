//! Payment request draft entered through the form.
//!
//! The draft is plain editable text. It only becomes usable for link
//! construction after [`PaymentDraft::validate`] turns it into a
//! [`ValidatedDraft`].

use std::fmt;

use crate::validation::{FieldErrors, validate};

/// Label substituted for an empty recipient name or description.
pub const FALLBACK_LABEL: &str = "Payment";

/// One editable field of the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    PayeeAddress,
    Amount,
    Description,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [
        Self::Name,
        Self::PayeeAddress,
        Self::Amount,
        Self::Description,
    ];

    /// Stable key used in logs.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PayeeAddress => "upi_id",
            Self::Amount => "amount",
            Self::Description => "message",
        }
    }

    /// Whether the form marks this field as required.
    pub fn is_required(self) -> bool {
        matches!(self, Self::PayeeAddress | Self::Amount)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Editable form contents. All fields start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDraft {
    /// Recipient name, optional.
    pub name: String,
    /// UPI ID of the payee, required.
    pub payee_address: String,
    /// Amount as typed, required.
    pub amount: String,
    /// Payment description, optional.
    pub description: String,
}

impl PaymentDraft {
    pub fn new(
        name: impl Into<String>,
        payee_address: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            payee_address: payee_address.into(),
            amount: amount.into(),
            description: description.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::PayeeAddress => &self.payee_address,
            Field::Amount => &self.amount,
            Field::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::PayeeAddress => &mut self.payee_address,
            Field::Amount => &mut self.amount,
            Field::Description => &mut self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Checks the required fields and freezes the draft on success.
    pub fn validate(&self) -> Result<ValidatedDraft, FieldErrors> {
        let errors = validate(self);
        if errors.is_empty() {
            Ok(ValidatedDraft {
                draft: self.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

/// A draft whose payee address and amount passed validation.
///
/// Only [`PaymentDraft::validate`] can construct this type, so every
/// [`crate::PaymentLink`] is built from checked input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    draft: PaymentDraft,
}

impl ValidatedDraft {
    /// Recipient name as typed, possibly empty.
    pub fn name(&self) -> &str {
        &self.draft.name
    }

    /// Recipient name or [`FALLBACK_LABEL`] when empty.
    pub fn display_name(&self) -> &str {
        or_fallback(&self.draft.name)
    }

    pub fn payee_address(&self) -> &str {
        &self.draft.payee_address
    }

    /// Part of the payee address before the `@`.
    pub fn payee_local_part(&self) -> &str {
        self.draft
            .payee_address
            .split_once('@')
            .map_or(self.draft.payee_address.as_str(), |(local, _)| local)
    }

    /// Amount with surrounding whitespace removed.
    pub fn amount(&self) -> &str {
        self.draft.amount.trim()
    }

    /// Amount exactly as typed, surrounding whitespace included.
    pub fn amount_as_typed(&self) -> &str {
        &self.draft.amount
    }

    /// Description as typed, possibly empty.
    pub fn description(&self) -> &str {
        &self.draft.description
    }

    /// Description or [`FALLBACK_LABEL`] when empty.
    pub fn display_description(&self) -> &str {
        or_fallback(&self.draft.description)
    }

    pub fn as_draft(&self) -> &PaymentDraft {
        &self.draft
    }
}

fn or_fallback(value: &str) -> &str {
    if value.is_empty() {
        FALLBACK_LABEL
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_is_empty() {
        let draft = PaymentDraft::default();
        assert!(draft.is_empty(), "default draft should have no content");
        for field in Field::ALL {
            assert_eq!(draft.get(field), "", "{field} should start empty");
        }
    }

    #[test]
    fn test_set_updates_only_target_field() {
        let mut draft = PaymentDraft::default();
        draft.set(Field::Amount, "42");

        assert_eq!(draft.amount, "42");
        assert_eq!(draft.name, "");
        assert_eq!(draft.payee_address, "");
        assert_eq!(draft.description, "");
        assert!(!draft.is_empty());
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<_> = Field::ALL.into_iter().filter(|f| f.is_required()).collect();
        assert_eq!(required, vec![Field::PayeeAddress, Field::Amount]);
    }

    #[test]
    fn test_validated_draft_fallbacks() {
        let validated = PaymentDraft::new("", "shop@okbank", " 250 ", "")
            .validate()
            .expect("draft should be valid");

        assert_eq!(validated.name(), "");
        assert_eq!(validated.display_name(), FALLBACK_LABEL);
        assert_eq!(validated.display_description(), FALLBACK_LABEL);
        assert_eq!(validated.amount(), "250");
        assert_eq!(validated.payee_local_part(), "shop");
    }

    #[test]
    fn test_invalid_draft_returns_errors() {
        let errors = PaymentDraft::default()
            .validate()
            .expect_err("empty draft must not validate");
        assert_eq!(errors.len(), 2);
    }
}

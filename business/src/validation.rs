//! Field validation for the payment form.
//!
//! Only the payee address and the amount are checked. The result is an
//! ordered map from [`Field`] to [`ValidationError`]; an empty map means the
//! draft may be turned into a link.

use std::collections::BTreeMap;

use crate::draft::{Field, PaymentDraft};

/// Reason a field was rejected. `Display` is the message shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("UPI ID is required")]
    AddressRequired,
    #[error("Please enter a valid UPI ID")]
    AddressInvalid,
    #[error("Amount is required")]
    AmountRequired,
    #[error("Please enter a valid amount")]
    AmountInvalid,
}

/// Validation errors keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.errors.insert(field, error);
    }

    /// Removes the error for one field, returning it if there was one.
    pub fn clear(&mut self, field: Field) -> Option<ValidationError> {
        self.errors.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}

/// Checks the draft and returns every rejected field.
pub fn validate(draft: &PaymentDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Err(error) = check_payee_address(&draft.payee_address) {
        errors.insert(Field::PayeeAddress, error);
    }
    if let Err(error) = check_amount(&draft.amount) {
        errors.insert(Field::Amount, error);
    }

    if !errors.is_empty() {
        log::debug!(
            "draft rejected: {}",
            errors
                .iter()
                .map(|(field, _)| field.key())
                .collect::<Vec<_>>()
                .join(",")
        );
    }

    errors
}

/// `^[\w.-]+@[\w.-]+$` with ASCII `\w`.
///
/// The pattern is matched against the raw value; only the emptiness check trims.
pub fn check_payee_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::AddressRequired);
    }

    let Some((local, handle)) = value.split_once('@') else {
        return Err(ValidationError::AddressInvalid);
    };

    if is_address_part(local) && is_address_part(handle) {
        Ok(())
    } else {
        Err(ValidationError::AddressInvalid)
    }
}

fn is_address_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Accepts any finite decimal number strictly greater than zero.
///
/// Hex literals and values that overflow to infinity are rejected.
pub fn check_amount(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AmountRequired);
    }

    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(()),
        _ => Err(ValidationError::AmountInvalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(address: &str, amount: &str) -> PaymentDraft {
        PaymentDraft::new("", address, amount, "")
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        let errors = validate(&draft("alice@bank", "100"));
        assert!(errors.is_empty(), "expected no errors, got {errors:?}");
    }

    #[test]
    fn test_blank_required_fields() {
        let errors = validate(&draft("   ", "\t"));
        assert_eq!(
            errors.get(Field::PayeeAddress),
            Some(ValidationError::AddressRequired)
        );
        assert_eq!(errors.get(Field::Amount), Some(ValidationError::AmountRequired));
    }

    #[test]
    fn test_malformed_addresses_are_flagged() {
        let cases = [
            "alice",
            "@bank",
            "alice@",
            "alice@@bank",
            "ali ce@bank",
            " alice@bank",
            "alice@bank!",
            "al+ice@bank",
            "alice@ba@nk",
            "ällice@bank",
        ];
        for address in cases {
            assert_eq!(
                check_payee_address(address),
                Err(ValidationError::AddressInvalid),
                "{address:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_well_formed_addresses_pass() {
        let cases = ["alice@bank", "a.b-c_d@ok-hdfc.bank", "9876543210@upi", "_@-"];
        for address in cases {
            assert_eq!(
                check_payee_address(address),
                Ok(()),
                "{address:?} should be accepted"
            );
        }
    }

    #[test]
    fn test_non_positive_or_non_numeric_amounts_are_flagged() {
        let cases = ["0", "-1", "0.00", "-0.5", "abc", "12abc", "1,000", "NaN", "inf"];
        for amount in cases {
            assert_eq!(
                check_amount(amount),
                Err(ValidationError::AmountInvalid),
                "{amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_and_overflowing_amounts_are_flagged() {
        for amount in ["0x10", "Infinity", "1e400", "-1e400"] {
            assert_eq!(
                check_amount(amount),
                Err(ValidationError::AmountInvalid),
                "{amount:?} is not a finite decimal amount"
            );
        }
    }

    #[test]
    fn test_positive_amounts_pass() {
        let cases = ["1", "0.01", "100.50", " 42 ", "1e3", ".5"];
        for amount in cases {
            assert_eq!(check_amount(amount), Ok(()), "{amount:?} should be accepted");
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::AddressRequired.to_string(), "UPI ID is required");
        assert_eq!(
            ValidationError::AddressInvalid.to_string(),
            "Please enter a valid UPI ID"
        );
        assert_eq!(ValidationError::AmountRequired.to_string(), "Amount is required");
        assert_eq!(
            ValidationError::AmountInvalid.to_string(),
            "Please enter a valid amount"
        );
    }

    #[test]
    fn test_optional_fields_are_not_checked() {
        let errors = validate(&PaymentDraft::new("", "alice@bank", "5", ""));
        assert!(!errors.contains(Field::Name));
        assert!(!errors.contains(Field::Description));
    }

    #[test]
    fn test_clear_single_field() {
        let mut errors = validate(&draft("", ""));
        assert_eq!(errors.clear(Field::Amount), Some(ValidationError::AmountRequired));
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::PayeeAddress));
        assert_eq!(errors.clear(Field::Amount), None);
    }
}

//! UPI payment-request link construction.
//!
//! The parameter set and order are fixed because payment apps parse them
//! positionally in the wild:
//!
//! ```text
//! upi://pay?pa=<payee>&pn=<name>&am=<amount>&cu=INR&tn=<description>
//! ```

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::draft::ValidatedDraft;

/// URI scheme understood by UPI payment apps.
pub const SCHEME: &str = "upi";

/// Currency of every generated request.
pub const CURRENCY_CODE: &str = "INR";

/// Bytes escaped in `pn` and `tn`: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A generated payment-request URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentLink(String);

impl PaymentLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PaymentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PaymentLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Formats a validated draft into a payment-request URI.
///
/// `pa` and `am` are copied exactly as typed. `pn` and `tn` are
/// percent-encoded as UTF-8 after the `"Payment"` fallback is applied.
pub fn build_link(draft: &ValidatedDraft) -> PaymentLink {
    let name = utf8_percent_encode(draft.display_name(), COMPONENT);
    let description = utf8_percent_encode(draft.display_description(), COMPONENT);

    PaymentLink(format!(
        "{SCHEME}://pay?pa={payee}&pn={name}&am={amount}&cu={CURRENCY_CODE}&tn={description}",
        payee = draft.payee_address(),
        amount = draft.amount_as_typed(),
    ))
}

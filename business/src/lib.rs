//! Business logic for the UPI payment link generator.
//!
//! Nothing in this crate touches the platform: validation, link building and
//! the form state are pure, and platform capabilities are driven through
//! closures by [`deliver`].

mod config;
mod delivery;
mod draft;
mod export;
mod form;
mod link;
mod validation;

pub use config::{ConfigError, ENV_PREFIX, PaymentConfig};
pub use delivery::{
    Affordance, Capability, CapabilityError, DeliveryOutcome, UnknownAffordance, deliver,
};
pub use draft::{FALLBACK_LABEL, Field, PaymentDraft, ValidatedDraft};
pub use export::{ExportContent, ExportKind, export_filename};
pub use form::{GenerateRequest, GeneratedLink, GenerationStatus, PaymentForm};
pub use link::{CURRENCY_CODE, PaymentLink, SCHEME, build_link};
pub use validation::{FieldErrors, ValidationError, check_amount, check_payee_address, validate};

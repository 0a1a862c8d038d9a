//! Form state for the payment link generator.
//!
//! This module tracks:
//! - The editable draft
//! - Inline validation errors
//! - The generation status (a short cosmetic delay before the link appears)
//! - The last generated link and the draft that produced it
//! - The "Copied!" feedback window
//!
//! Time is passed in as seconds on a monotonic clock (egui's input time in
//! the UI), which keeps every transition deterministic under test.

use std::time::Duration;

use crate::draft::{Field, PaymentDraft, ValidatedDraft};
use crate::link::{PaymentLink, build_link};
use crate::validation::FieldErrors;

/// A built link together with the validated input it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLink {
    pub link: PaymentLink,
    pub draft: ValidatedDraft,
}

/// Whether a link is being produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenerationStatus {
    #[default]
    Idle,
    /// Waiting for the delay to elapse before the link is published.
    Generating {
        ready_at: f64,
        draft: ValidatedDraft,
    },
}

/// Outcome of [`PaymentForm::request_generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateRequest {
    /// Validation passed and the delay has started.
    Started,
    /// A generation is already running; the request was ignored.
    AlreadyGenerating,
    /// Validation failed; the errors are now shown on the form.
    Rejected(FieldErrors),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentForm {
    draft: PaymentDraft,
    errors: FieldErrors,
    status: GenerationStatus,
    generated: Option<GeneratedLink>,
    copied_until: Option<f64>,
}

impl PaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &PaymentDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.status, GenerationStatus::Generating { .. })
    }

    pub fn generated(&self) -> Option<&GeneratedLink> {
        self.generated.as_ref()
    }

    pub fn link(&self) -> Option<&PaymentLink> {
        self.generated.as_ref().map(|generated| &generated.link)
    }

    /// Stores a new field value and hides that field's error, if any.
    pub fn handle_input_change(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        if self.errors.clear(field).is_some() {
            log::trace!("cleared {field} error after edit");
        }
    }

    /// Validates the draft and, if it passes, starts the generation delay.
    pub fn request_generate(&mut self, now: f64, delay: Duration) -> GenerateRequest {
        if self.is_generating() {
            return GenerateRequest::AlreadyGenerating;
        }

        match self.draft.validate() {
            Ok(draft) => {
                self.errors = FieldErrors::new();
                let ready_at = now + delay.as_secs_f64();
                log::info!("generating payment link for {}", draft.payee_address());
                self.status = GenerationStatus::Generating { ready_at, draft };
                GenerateRequest::Started
            }
            Err(errors) => {
                self.errors = errors.clone();
                GenerateRequest::Rejected(errors)
            }
        }
    }

    /// Time left before the pending link is published.
    pub fn remaining(&self, now: f64) -> Option<Duration> {
        match &self.status {
            GenerationStatus::Generating { ready_at, .. } => {
                Some(Duration::from_secs_f64((ready_at - now).max(0.0)))
            }
            GenerationStatus::Idle => None,
        }
    }

    /// Publishes the pending link once its delay has elapsed.
    ///
    /// Returns the link produced on this call, if any.
    pub fn poll(&mut self, now: f64) -> Option<&PaymentLink> {
        let ready = matches!(
            &self.status,
            GenerationStatus::Generating { ready_at, .. } if now >= *ready_at
        );
        if !ready {
            return None;
        }

        let GenerationStatus::Generating { draft, .. } = std::mem::take(&mut self.status) else {
            return None;
        };

        let link = build_link(&draft);
        log::info!("payment link ready: {link}");
        self.generated = Some(GeneratedLink { link, draft });
        self.copied_until = None;
        self.link()
    }

    /// Shows the "Copied!" state until `now + duration`.
    pub fn mark_copied(&mut self, now: f64, duration: Duration) {
        self.copied_until = Some(now + duration.as_secs_f64());
    }

    pub fn copy_feedback_active(&self, now: f64) -> bool {
        self.copied_until.is_some_and(|until| now < until)
    }

    /// Time left on the "Copied!" feedback, `None` once it has expired.
    pub fn copy_feedback_remaining(&self, now: f64) -> Option<Duration> {
        self.copied_until
            .filter(|until| now < *until)
            .map(|until| Duration::from_secs_f64(until - now))
    }

    /// Returns the form to its initial state, discarding any pending generation.
    pub fn reset(&mut self) {
        log::debug!("payment form reset");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    const NO_DELAY: Duration = Duration::ZERO;
    const HALF_SECOND: Duration = Duration::from_millis(500);

    fn filled_form() -> PaymentForm {
        let mut form = PaymentForm::new();
        form.handle_input_change(Field::Name, "Alice");
        form.handle_input_change(Field::PayeeAddress, "alice@bank");
        form.handle_input_change(Field::Amount, "100");
        form
    }

    #[test]
    fn test_generate_after_delay() {
        let mut form = filled_form();

        assert_eq!(form.request_generate(10.0, HALF_SECOND), GenerateRequest::Started);
        assert!(form.is_generating());
        assert!(form.poll(10.2).is_none(), "link should not appear before delay");
        assert!(form.link().is_none());

        let link = form.poll(10.5).cloned().expect("link should be ready");
        assert_eq!(
            link.as_str(),
            "upi://pay?pa=alice@bank&pn=Alice&am=100&cu=INR&tn=Payment"
        );
        assert!(!form.is_generating());
        assert_eq!(form.link(), Some(&link));
        assert!(form.poll(11.0).is_none(), "link is only reported once");
    }

    #[test]
    fn test_invalid_draft_sets_errors_and_blocks_link() {
        let mut form = PaymentForm::new();
        form.handle_input_change(Field::PayeeAddress, "not-an-id");

        let GenerateRequest::Rejected(errors) = form.request_generate(0.0, NO_DELAY) else {
            panic!("invalid draft must be rejected");
        };
        assert_eq!(
            errors.get(Field::PayeeAddress),
            Some(ValidationError::AddressInvalid)
        );
        assert_eq!(
            form.errors().get(Field::Amount),
            Some(ValidationError::AmountRequired)
        );
        assert!(!form.is_generating());
        assert!(form.poll(1.0).is_none());
        assert!(form.link().is_none());
    }

    #[test]
    fn test_editing_field_clears_only_its_error() {
        let mut form = PaymentForm::new();
        let _ = form.request_generate(0.0, NO_DELAY);
        assert_eq!(form.errors().len(), 2);

        form.handle_input_change(Field::Amount, "5");
        assert!(!form.errors().contains(Field::Amount));
        assert!(form.errors().contains(Field::PayeeAddress));
    }

    #[test]
    fn test_successful_request_clears_previous_errors() {
        let mut form = PaymentForm::new();
        let _ = form.request_generate(0.0, NO_DELAY);
        form.draft.payee_address = "a@b".to_owned();
        form.draft.amount = "1".to_owned();

        assert_eq!(form.request_generate(1.0, NO_DELAY), GenerateRequest::Started);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_request_while_generating_is_ignored() {
        let mut form = filled_form();
        assert_eq!(form.request_generate(0.0, HALF_SECOND), GenerateRequest::Started);
        form.handle_input_change(Field::Amount, "999");

        assert_eq!(
            form.request_generate(0.1, HALF_SECOND),
            GenerateRequest::AlreadyGenerating
        );
        let link = form.poll(0.5).cloned().expect("first request completes");
        assert!(link.as_str().contains("am=100"), "pending draft is frozen: {link}");
    }

    #[test]
    fn test_generated_snapshot_survives_later_edits() {
        let mut form = filled_form();
        let _ = form.request_generate(0.0, NO_DELAY);
        let _ = form.poll(0.0);

        form.handle_input_change(Field::Name, "Mallory");
        let generated = form.generated().expect("link generated");
        assert_eq!(generated.draft.name(), "Alice");
        assert_eq!(form.draft().name, "Mallory");
    }

    #[test]
    fn test_remaining_time() {
        let mut form = filled_form();
        assert_eq!(form.remaining(0.0), None);
        let _ = form.request_generate(2.0, HALF_SECOND);
        assert_eq!(form.remaining(2.25), Some(Duration::from_millis(250)));
        assert_eq!(form.remaining(3.0), Some(Duration::ZERO));
    }

    #[test]
    fn test_copy_feedback_window() {
        let mut form = filled_form();
        assert!(!form.copy_feedback_active(0.0));

        form.mark_copied(1.0, Duration::from_secs(2));
        assert!(form.copy_feedback_active(1.0));
        assert!(form.copy_feedback_active(2.9));
        assert!(!form.copy_feedback_active(3.0));
        assert_eq!(form.copy_feedback_remaining(2.0), Some(Duration::from_secs(1)));
        assert_eq!(form.copy_feedback_remaining(3.0), None);
    }

    #[test]
    fn test_reset_after_successful_build() {
        let mut form = filled_form();
        form.handle_input_change(Field::Description, "Rent");
        let _ = form.request_generate(0.0, NO_DELAY);
        assert!(form.poll(0.0).is_some());
        form.mark_copied(0.0, Duration::from_secs(2));

        form.reset();

        assert_eq!(form, PaymentForm::new());
        assert!(form.draft().is_empty());
        assert!(form.link().is_none());
        assert!(form.errors().is_empty());
        assert!(!form.copy_feedback_active(0.5));
    }

    #[test]
    fn test_reset_discards_pending_generation() {
        let mut form = filled_form();
        let _ = form.request_generate(0.0, HALF_SECOND);
        form.reset();
        assert!(!form.is_generating());
        assert!(form.poll(10.0).is_none());
    }
}

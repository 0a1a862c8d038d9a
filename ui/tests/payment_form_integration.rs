//! Integration tests for the payment form and link generation.

mod common;

use std::time::Duration;

use crate::common::{ALICE_LINK, TestCtx};
use paylink_business::Field;
use paylink_clipboard::MemoryClipboard;
use paylink_ui::platform::testing::{MemoryFileSaver, MemoryShareSheet};
use paylink_ui::widgets::{
    GENERATING_LABEL, PLACEHOLDER_TITLE, RESET_LABEL, RESULT_TITLE, SCAN_HINT, SUMMARY_TITLE,
};

#[test]
fn test_initial_screen_shows_placeholder() {
    let ctx = TestCtx::new_app();

    assert!(ctx.shows("UPI Payment Generator"), "header should be visible");
    assert!(ctx.shows(PLACEHOLDER_TITLE), "placeholder should be visible");
    assert!(!ctx.shows(RESULT_TITLE), "no link before generating");
    assert!(!ctx.shows(RESET_LABEL), "reset only appears with a link");
}

#[test]
fn test_empty_submit_shows_required_errors() {
    let mut ctx = TestCtx::new_app();
    ctx.generate();

    assert!(ctx.shows("UPI ID is required"));
    assert!(ctx.shows("Amount is required"));
    assert!(ctx.state().form.link().is_none());
    assert!(ctx.shows(PLACEHOLDER_TITLE));
}

#[test]
fn test_malformed_values_show_format_errors() {
    let mut ctx = TestCtx::new_app();
    ctx.fill("", "alice", "-5", "");
    ctx.generate();

    assert!(ctx.shows("Please enter a valid UPI ID"));
    assert!(ctx.shows("Please enter a valid amount"));
    assert!(ctx.state().form.link().is_none());
}

#[test]
fn test_editing_a_field_clears_only_its_error() {
    let mut ctx = TestCtx::new_app();
    ctx.generate();
    assert!(ctx.shows("Amount is required"));

    ctx.state_mut().form.handle_input_change(Field::Amount, "250");
    ctx.settle();

    assert!(!ctx.shows("Amount is required"), "amount error should clear");
    assert!(ctx.shows("UPI ID is required"), "other errors stay");
}

#[test]
fn test_generate_shows_link_qr_and_summary() {
    let mut ctx = TestCtx::new_app();
    ctx.generate_alice();

    assert!(ctx.shows(RESULT_TITLE));
    assert!(ctx.shows(SCAN_HINT));
    assert!(ctx.shows(SUMMARY_TITLE));
    assert!(ctx.shows(RESET_LABEL));
    assert!(!ctx.shows(PLACEHOLDER_TITLE));
    assert!(ctx.state().qr.is_loaded(), "QR texture should be uploaded");
}

#[test]
fn test_empty_optional_fields_fall_back_to_payment() {
    let mut ctx = TestCtx::new_app();
    ctx.fill("", "shop@okaxis", "49.50", "");
    ctx.generate();

    assert_eq!(
        ctx.state().form.link().map(|link| link.as_str()),
        Some("upi://pay?pa=shop@okaxis&pn=Payment&am=49.50&cu=INR&tn=Payment")
    );
}

#[test]
fn test_summary_rows_follow_filled_optional_fields() {
    let mut ctx = TestCtx::new_app();
    ctx.fill("", "shop@okaxis", "49.50", "");
    ctx.generate();

    assert!(ctx.shows(SUMMARY_TITLE));
    assert!(ctx.shows("UPI ID"));
    assert!(!ctx.shows("Recipient"), "empty name has no summary row");
    assert!(!ctx.shows("Description"), "empty description has no summary row");

    ctx.fill("Corner Shop", "shop@okaxis", "49.50", "Groceries");
    ctx.generate();

    assert!(ctx.shows("Recipient"));
    assert!(ctx.shows("Corner Shop"));
    assert!(ctx.shows("Description"));
    assert!(ctx.shows("Groceries"));
}

#[test]
fn test_name_and_description_are_encoded() {
    let mut ctx = TestCtx::new_app();
    ctx.fill("Chai & Co", "chai@upi", "120", "2 cups, tea");
    ctx.generate();

    assert_eq!(
        ctx.state().form.link().map(|link| link.as_str()),
        Some("upi://pay?pa=chai@upi&pn=Chai%20%26%20Co&am=120&cu=INR&tn=2%20cups%2C%20tea")
    );
}

#[test]
fn test_summary_reflects_generated_values_not_later_edits() {
    let mut ctx = TestCtx::new_app();
    ctx.generate_alice();

    ctx.fill("Bob", "bob@bank", "999", "");

    assert_eq!(
        ctx.state().form.link().map(|link| link.as_str()),
        Some(ALICE_LINK),
        "link only changes on the next generate"
    );
    assert!(ctx.shows("Alice"), "summary still shows the generated recipient");
}

#[test]
fn test_reset_clears_form_link_and_errors() {
    let mut ctx = TestCtx::new_app();
    ctx.generate_alice();

    ctx.click(RESET_LABEL);

    let form = &ctx.state().form;
    assert!(form.draft().is_empty());
    assert!(form.link().is_none());
    assert!(form.errors().is_empty());
    assert!(!ctx.state().qr.is_loaded());
    assert!(ctx.shows(PLACEHOLDER_TITLE));
}

#[test]
fn test_generation_waits_for_configured_delay() {
    let mut ctx = TestCtx::with_platform(
        MemoryClipboard::new(),
        MemoryShareSheet::new(),
        MemoryFileSaver::new(),
        |state| state.config.generate_delay = Duration::from_secs(600),
    );
    ctx.fill("Alice", "alice@bank", "100", "");
    ctx.generate();

    assert!(ctx.state().form.is_generating());
    assert!(ctx.shows(GENERATING_LABEL), "button shows progress");
    assert!(ctx.state().form.link().is_none());
}

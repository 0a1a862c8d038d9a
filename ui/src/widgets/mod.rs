mod link_result;
mod manual_dialog;
mod payment_form;
mod summary;

pub use link_result::{COPIED_LABEL, PLACEHOLDER_TITLE, RESULT_TITLE, SCAN_HINT, link_result};
pub use manual_dialog::{CLOSE_LABEL, manual_dialog};
pub use payment_form::{
    GENERATE_LABEL, GENERATING_LABEL, RESET_LABEL, field_label, payment_form,
};
pub use summary::{SUMMARY_TITLE, payment_summary};

//! egui front end for the UPI payment link generator.
//!
//! [`PaymentApp`] renders the form and the result panel; [`state::State`]
//! owns the form, the configuration and the platform capabilities, so the
//! whole app can be driven headless in tests with
//! [`platform::Platform::memory`].

pub mod actions;
pub mod app;
pub mod platform;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::PaymentApp;

use egui_kittest::Harness;
use kittest::Queryable;
use paylink_business::Field;
use paylink_clipboard::MemoryClipboard;
use paylink_ui::PaymentApp;
use paylink_ui::platform::Platform;
use paylink_ui::platform::testing::{MemoryFileSaver, MemoryShareSheet};
use paylink_ui::state::State;
use paylink_ui::widgets::GENERATE_LABEL;

/// Frames to run after an interaction so clicks, generation and inline
/// exports all settle.
pub const UI_PROPAGATION_FRAMES: usize = 5;

pub const ALICE_LINK: &str = "upi://pay?pa=alice@bank&pn=Alice&am=100&cu=INR&tn=Payment";

pub struct TestCtx<'a> {
    pub clipboard: MemoryClipboard,
    pub share_sheet: MemoryShareSheet,
    pub file_saver: MemoryFileSaver,
    harness: Harness<'a, PaymentApp>,
}

impl<'a> TestCtx<'a> {
    pub fn new_app() -> Self {
        Self::with_platform(
            MemoryClipboard::new(),
            MemoryShareSheet::new(),
            MemoryFileSaver::new(),
            |_| {},
        )
    }

    pub fn with_platform(
        clipboard: MemoryClipboard,
        share_sheet: MemoryShareSheet,
        file_saver: MemoryFileSaver,
        configure: impl FnOnce(&mut State),
    ) -> Self {
        env_logger::builder().is_test(true).try_init().ok();

        let platform = Platform::memory(clipboard.clone(), share_sheet.clone(), file_saver.clone());
        let mut state = State::test(platform);
        configure(&mut state);

        let app = PaymentApp::new(state);
        let harness = Harness::builder()
            .with_size(egui::vec2(1100.0, 900.0))
            .build_eframe(|_| app);

        let mut ctx = Self {
            clipboard,
            share_sheet,
            file_saver,
            harness,
        };
        ctx.settle();
        ctx
    }

    #[allow(dead_code)]
    pub fn harness_mut(&mut self) -> &mut Harness<'a, PaymentApp> {
        &mut self.harness
    }

    pub fn state(&self) -> &State {
        &self.harness.state().state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.harness.state_mut().state
    }

    /// Enters values into the four form fields.
    pub fn fill(&mut self, name: &str, payee_address: &str, amount: &str, description: &str) {
        let values = [
            (Field::Name, name),
            (Field::PayeeAddress, payee_address),
            (Field::Amount, amount),
            (Field::Description, description),
        ];
        for (field, value) in values {
            self.state_mut().form.handle_input_change(field, value);
        }
        self.settle();
    }

    pub fn click(&mut self, label: &str) {
        self.harness.get_by_label(label).click();
        self.settle();
    }

    pub fn generate(&mut self) {
        self.click(GENERATE_LABEL);
    }

    /// Fills in Alice's details and generates her link.
    #[allow(dead_code)]
    pub fn generate_alice(&mut self) {
        self.fill("Alice", "alice@bank", "100", "");
        self.generate();
        assert_eq!(
            self.state().form.link().map(|link| link.as_str()),
            Some(ALICE_LINK),
            "link should be generated"
        );
    }

    pub fn settle(&mut self) {
        for _ in 0..UI_PROPAGATION_FRAMES {
            self.harness.step();
        }
    }

    /// Whether any node carries exactly `label`.
    pub fn shows(&self, label: &str) -> bool {
        self.harness.query_all_by_label(label).next().is_some()
    }

    #[allow(dead_code)]
    pub fn shows_containing(&self, text: &str) -> bool {
        self.harness.query_all_by_label_contains(text).next().is_some()
    }
}

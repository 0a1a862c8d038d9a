use paylink_business::ExportContent;

use crate::bitmap::RenderedImage;
use crate::canvas::{Align, Canvas, TextStyle};
use crate::error::Result;
use crate::palette::{ACCENT, BACKDROP, BORDER, INK, MUTED, ON_ACCENT, PAPER, SUCCESS};
use crate::qr::QrMatrix;
use crate::RenderOptions;

pub const CARD_WIDTH: u32 = 540;
pub const CARD_HEIGHT: u32 = 760;
/// Edge length of the QR code on the card.
pub const CARD_QR_SIZE: f32 = 300.0;
/// Top edge of the QR code on the card.
pub const CARD_QR_TOP: f32 = 270.0;

const MARGIN: f32 = 20.0;
const HEADER_HEIGHT: f32 = 110.0;

/// Renders the shareable QR card.
pub fn render_share_card(
    content: &ExportContent,
    options: &RenderOptions,
) -> Result<RenderedImage> {
    let matrix = QrMatrix::encode(content.link.as_str())?;
    let mut canvas = Canvas::new(
        CARD_WIDTH,
        CARD_HEIGHT,
        options.scale,
        &options.font,
        BACKDROP,
    )?;

    let width = CARD_WIDTH as f32;
    let panel_width = width - 2.0 * MARGIN;
    let panel_height = CARD_HEIGHT as f32 - 2.0 * MARGIN;
    let center = width / 2.0;
    let text_width = panel_width - 48.0;

    canvas.fill_rounded_rect(
        MARGIN - 1.0,
        MARGIN - 1.0,
        panel_width + 2.0,
        panel_height + 2.0,
        25.0,
        BORDER,
    );
    canvas.fill_rounded_rect(MARGIN, MARGIN, panel_width, panel_height, 24.0, PAPER);

    // Header band with square bottom corners.
    canvas.fill_rounded_rect(MARGIN, MARGIN, panel_width, HEADER_HEIGHT, 24.0, ACCENT);
    canvas.fill_rect(MARGIN, MARGIN + HEADER_HEIGHT - 24.0, panel_width, 24.0, ACCENT);
    canvas.draw_text(
        "UPI Payment Request",
        center,
        MARGIN + 28.0,
        TextStyle::new(30.0, ON_ACCENT).align(Align::Center),
    );
    canvas.draw_text(
        "Scan to pay instantly",
        center,
        MARGIN + 72.0,
        TextStyle::new(17.0, ON_ACCENT).align(Align::Center),
    );

    let recipient = canvas.ellipsize(content.recipient_label(), 26.0, text_width);
    canvas.draw_text(
        &recipient,
        center,
        158.0,
        TextStyle::new(26.0, INK).align(Align::Center),
    );
    let amount = canvas.ellipsize(&content.amount_label(), 40.0, text_width);
    canvas.draw_text(
        &amount,
        center,
        198.0,
        TextStyle::new(40.0, SUCCESS).align(Align::Center),
    );

    let qr_x = center - CARD_QR_SIZE / 2.0;
    canvas.fill_rounded_rect(
        qr_x - 10.0,
        CARD_QR_TOP - 10.0,
        CARD_QR_SIZE + 20.0,
        CARD_QR_SIZE + 20.0,
        12.0,
        BORDER,
    );
    canvas.draw_qr(&matrix, qr_x, CARD_QR_TOP, CARD_QR_SIZE, INK, PAPER);

    let mut y = CARD_QR_TOP + CARD_QR_SIZE + 24.0;
    let address = canvas.ellipsize(&content.payee_address, 20.0, text_width);
    canvas.draw_text(
        &address,
        center,
        y,
        TextStyle::new(20.0, INK).align(Align::Center),
    );
    y += 34.0;

    if let Some(description) = &content.description {
        let description = canvas.ellipsize(description, 18.0, text_width);
        canvas.draw_text(
            &description,
            center,
            y,
            TextStyle::new(18.0, MUTED).align(Align::Center),
        );
    }

    let footer_y = CARD_HEIGHT as f32 - MARGIN - 50.0;
    canvas.hline(MARGIN + 24.0, width - MARGIN - 24.0, footer_y - 14.0, BORDER, 1.0);
    canvas.draw_text(
        "Scan with any UPI app",
        center,
        footer_y,
        TextStyle::new(16.0, MUTED).align(Align::Center),
    );

    log::debug!(
        "share card rendered for {} at {}x",
        content.payee_address,
        options.scale
    );
    Ok(canvas.finish())
}

use paylink_business::ExportContent;

use crate::bitmap::RenderedImage;
use crate::canvas::{Align, Canvas, TextStyle};
use crate::error::Result;
use crate::palette::{BORDER, INK, MUTED, PAPER, SUCCESS};
use crate::qr::QrMatrix;
use crate::RenderOptions;

pub const RECEIPT_WIDTH: u32 = 600;
/// Edge length of the QR code on the receipt.
pub const RECEIPT_QR_SIZE: f32 = 240.0;

const PADDING: f32 = 40.0;
const ROW_HEIGHT: f32 = 36.0;
const LINK_SIZE: f32 = 13.0;

/// Renders the receipt-style summary.
///
/// The height grows with the number of detail rows and link lines.
pub fn render_receipt(content: &ExportContent, options: &RenderOptions) -> Result<RenderedImage> {
    let matrix = QrMatrix::encode(content.link.as_str())?;
    let width = RECEIPT_WIDTH as f32;
    let inner = width - 2.0 * PADDING;

    let rows = rows(content);
    // Sized from the wrapped link before the real surface exists.
    let probe = Canvas::new(1, 1, 1.0, &options.font, PAPER)?;
    let link_line_height = probe.line_height(LINK_SIZE);
    let link_lines = probe.wrap(content.link.as_str(), LINK_SIZE, inner);

    let rows_top = 130.0;
    let qr_top = rows_top + rows.len() as f32 * ROW_HEIGHT + 28.0;
    let caption_top = qr_top + RECEIPT_QR_SIZE + 16.0;
    let link_top = caption_top + 40.0;
    let height = link_top + link_lines.len() as f32 * link_line_height + PADDING;

    let mut canvas = Canvas::new(
        RECEIPT_WIDTH,
        height.ceil() as u32,
        options.scale,
        &options.font,
        PAPER,
    )?;

    canvas.draw_text("Payment Receipt", PADDING, PADDING, TextStyle::new(28.0, INK));
    canvas.draw_text(
        &format!("Generated {}", content.timestamp_label()),
        PADDING,
        PADDING + 42.0,
        TextStyle::new(15.0, MUTED),
    );
    canvas.hline(PADDING, width - PADDING, 112.0, BORDER, 1.0);

    let value_width = inner - 140.0;
    for (index, (label, value, highlight)) in rows.iter().enumerate() {
        let top = rows_top + index as f32 * ROW_HEIGHT;
        canvas.draw_text(label, PADDING, top, TextStyle::new(16.0, MUTED));
        let color = if *highlight { SUCCESS } else { INK };
        let value = canvas.ellipsize(value, 17.0, value_width);
        canvas.draw_text(
            &value,
            width - PADDING,
            top,
            TextStyle::new(17.0, color).align(Align::Right),
        );
    }
    canvas.hline(PADDING, width - PADDING, qr_top - 14.0, BORDER, 1.0);

    let center = width / 2.0;
    canvas.draw_qr(
        &matrix,
        center - RECEIPT_QR_SIZE / 2.0,
        qr_top,
        RECEIPT_QR_SIZE,
        INK,
        PAPER,
    );
    canvas.draw_text(
        "Scan this QR code with any UPI app to make payment",
        center,
        caption_top,
        TextStyle::new(14.0, MUTED).align(Align::Center),
    );

    for (index, line) in link_lines.iter().enumerate() {
        canvas.draw_text(
            line,
            PADDING,
            link_top + index as f32 * link_line_height,
            TextStyle::new(LINK_SIZE, MUTED),
        );
    }

    log::debug!(
        "receipt rendered for {} with {} rows",
        content.payee_address,
        rows.len()
    );
    Ok(canvas.finish())
}

/// Detail rows as `(label, value, highlighted)`.
fn rows(content: &ExportContent) -> Vec<(&'static str, String, bool)> {
    let mut rows = vec![
        ("Recipient", content.recipient_label().to_owned(), false),
        ("UPI ID", content.payee_address.clone(), false),
        ("Amount", content.amount_label(), true),
    ];
    if let Some(description) = &content.description {
        rows.push(("Description", description.clone(), false));
    }
    rows
}

//! QR rendering for payloads.
//!
//! Payload QR codes use error-correction level M. The API returns SVG; the
//! CLI prints a half-block rendering that fits in a terminal.

use qrcode::render::{svg, unicode};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

fn code_for(payload: &str) -> Result<QrCode, QrError> {
    QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
}

/// Render a payload as an SVG document at least `size` pixels square.
pub fn render_svg(payload: &str, size: u32) -> Result<String, QrError> {
    let code = code_for(payload)?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .quiet_zone(true)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Render a payload with Unicode half blocks, two modules per character row.
///
/// Colors are inverted so the code scans on dark terminal backgrounds.
pub fn render_terminal(payload: &str) -> Result<String, QrError> {
    let code = code_for(payload)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

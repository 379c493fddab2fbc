use qrcode::QrCode;
use qrcode::render::unicode;

/// Prints `data` as a QR code on the terminal. Rendering is a visual side
/// effect only; problems are logged and otherwise ignored.
pub fn render_qr_terminal(data: &str) {
    match QrCode::new(data) {
        Ok(code) => {
            let image = code
                .render::<unicode::Dense1x2>()
                .quiet_zone(false)
                .build();
            println!("{image}");
        }
        Err(err) => tracing::debug!("Failed to render QR code: {err}"),
    }
}

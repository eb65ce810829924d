//! QR code rendering for invitation links and free-form invitation text.
//!
//! Codes use error-correction level M and are rendered as grayscale PNG,
//! centered on a square canvas of the configured width.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{GrayImage, ImageFormat, Luma};
use log::*;
use qrcode::{Color, EcLevel, QrCode};
use service::config::Config;

use invite_token::{now_ms, Signer};

use crate::error::{qr_error, Error, QrErrorKind};
use crate::invitation::{self, NewInvitation};
use crate::links;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Rendering options for QR images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrOptions {
    /// Target image width (and height) in pixels.
    pub width: u32,
    /// Quiet zone around the code, in modules.
    pub margin: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width: 512,
            margin: 1,
        }
    }
}

impl From<&Config> for QrOptions {
    fn from(config: &Config) -> Self {
        Self {
            width: config.qr_width,
            margin: config.qr_margin,
        }
    }
}

/// What a QR image should encode.
#[derive(Debug, Clone)]
pub enum QrSource {
    /// Free-form text, encoded verbatim.
    Text(String),
    /// A prebuilt invitation URL, encoded verbatim.
    InviteUrl(String),
    /// An existing token, encoded as its invitation URL.
    Token(String),
    /// Profile fields for an invitation issued on the spot.
    Invitation(NewInvitation),
}

/// Resolve a source into the text placed in the QR code.
pub fn source_text(
    signer: &Signer,
    config: &Config,
    source: QrSource,
    now: i64,
) -> Result<String, Error> {
    match source {
        QrSource::Text(text) | QrSource::InviteUrl(text) => Ok(text),
        QrSource::Token(token) => Ok(links::invite_url(config.public_base_url(), &token)),
        QrSource::Invitation(request) => {
            let token = invitation::sign_at(signer, config, request, now)?;
            Ok(links::invite_url(config.public_base_url(), &token))
        }
    }
}

/// Render the PNG for `source` using the configured size.
pub fn render_source(signer: &Signer, config: &Config, source: QrSource) -> Result<Vec<u8>, Error> {
    let text = source_text(signer, config, source, now_ms())?;
    render_png(&text, QrOptions::from(config))
}

/// Render `text` as a QR code PNG.
pub fn render_png(text: &str, options: QrOptions) -> Result<Vec<u8>, Error> {
    if text.is_empty() {
        return Err(qr_error(QrErrorKind::EmptyInput, "Nothing to encode"));
    }

    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)?;
    let image = rasterize(&code, options);

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    debug!(
        "Rendered {}px QR code ({} modules, {} bytes)",
        image.width(),
        code.width(),
        png.len()
    );

    Ok(png)
}

/// Encode PNG bytes as a `data:` URL suitable for an `<img src>`.
pub fn to_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

fn rasterize(code: &QrCode, options: QrOptions) -> GrayImage {
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let margin = options.margin;

    let total = modules + 2 * margin;
    let size = options.width.max(total);
    let scale = size / total;
    let offset = (size - total * scale) / 2;

    GrayImage::from_fn(size, size, |x, y| {
        let (Some(px), Some(py)) = (x.checked_sub(offset), y.checked_sub(offset)) else {
            return LIGHT;
        };
        let (mx, my) = (px / scale, py / scale);
        if mx < margin || my < margin {
            return LIGHT;
        }
        let (mx, my) = (mx - margin, my - margin);
        if mx >= modules || my >= modules {
            return LIGHT;
        }

        match colors[(my * modules + mx) as usize] {
            Color::Dark => DARK,
            Color::Light => LIGHT,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_render_png_produces_png() {
        let png = render_png(
            "http://localhost:3000/invite?token=abc.def",
            QrOptions::default(),
        )
        .unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_rendered_image_has_requested_width() {
        let code = QrCode::with_error_correction_level(b"hello", EcLevel::M).unwrap();
        let image = rasterize(&code, QrOptions::default());
        assert_eq!(image.dimensions(), (512, 512));
    }

    #[test]
    fn test_margin_is_light_and_first_module_is_dark() {
        let code = QrCode::with_error_correction_level(b"hello", EcLevel::M).unwrap();
        let options = QrOptions {
            width: 0,
            margin: 1,
        };
        let image = rasterize(&code, options);

        // With no target width every module is one pixel.
        assert_eq!(image.width(), code.width() as u32 + 2);
        assert_eq!(*image.get_pixel(0, 0), LIGHT);
        // Top-left finder pattern corner.
        assert_eq!(*image.get_pixel(1, 1), DARK);
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let err = render_png("", QrOptions::default()).unwrap_err();
        assert_eq!(
            err.error_kind,
            crate::error::DomainErrorKind::Qr(QrErrorKind::EmptyInput)
        );
    }

    #[test]
    fn test_oversized_text_is_rejected() {
        let text = "x".repeat(5000);
        let err = render_png(&text, QrOptions::default()).unwrap_err();
        assert_eq!(
            err.error_kind,
            crate::error::DomainErrorKind::Qr(QrErrorKind::DataTooLong)
        );
    }

    fn signer() -> Signer {
        Signer::new(secrecy::SecretString::from("dev_secret".to_string())).unwrap()
    }

    fn config() -> Config {
        Config::from_env().set_public_base_url("https://events.example.com".to_string())
    }

    #[test]
    fn test_text_and_invite_sources_are_verbatim() {
        let text = source_text(
            &signer(),
            &config(),
            QrSource::Text("Gala 2026, table 4".to_string()),
            0,
        )
        .unwrap();
        assert_eq!(text, "Gala 2026, table 4");

        let url = source_text(
            &signer(),
            &config(),
            QrSource::InviteUrl("https://other.example.com/x".to_string()),
            0,
        )
        .unwrap();
        assert_eq!(url, "https://other.example.com/x");
    }

    #[test]
    fn test_token_source_builds_invite_url() {
        let text = source_text(
            &signer(),
            &config(),
            QrSource::Token("abc.def".to_string()),
            0,
        )
        .unwrap();
        assert_eq!(text, "https://events.example.com/invite?token=abc.def");
    }

    #[test]
    fn test_invitation_source_signs_a_token() {
        let signer = signer();
        let request = NewInvitation {
            contact_id: Some("c1".to_string()),
            event_id: Some("evt1".to_string()),
            ..NewInvitation::default()
        };

        let text = source_text(&signer, &config(), QrSource::Invitation(request), 1000).unwrap();
        let token = text
            .strip_prefix("https://events.example.com/invite?token=")
            .unwrap();

        let payload = signer.verify(token).unwrap();
        assert_eq!(payload["contactId"], "c1");
        assert_eq!(payload["iat"], 1000);
    }

    #[test]
    fn test_data_url_prefix() {
        let url = to_data_url(&PNG_SIGNATURE);
        assert_eq!(url, "data:image/png;base64,iVBORw0KGgo=");
    }
}

//! Public links derived from an invitation token.

/// Link to the invitation page: `<base>/invite?token=<token>`.
pub fn invite_url(base_url: &str, token: &str) -> String {
    format!(
        "{}/invite?token={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(token)
    )
}

/// Link to the PNG QR image for a token: `<base>/api/qr.png?token=<token>`.
pub fn qr_png_url(base_url: &str, token: &str) -> String {
    format!(
        "{}/api/qr.png?token={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(token)
    )
}

//! HTML for the invitation page.
//!
//! Both views are self-contained documents. The invalid view never says why a
//! token was rejected.

use chrono::DateTime;
use domain::invitation::Invitation;

const LOGO_URL: &str = "/img/logo.png";
const BACKGROUND_URL: &str = "/img/background.png";
const MISSING: &str = "—";

/// Page shown for a verified, unexpired invitation.
pub fn render_valid(invitation: &Invitation) -> String {
    let mut details = vec![
        detail("Evento", invitation.event_id.as_deref()),
        detail("Nombre", invitation.display_name.as_deref()),
        detail("Correo", invitation.email.as_deref()),
    ];
    if invitation.organization.is_some() {
        details.push(detail("Organización", invitation.organization.as_deref()));
    }

    let body = format!(
        r#"<main class="card">
      <div class="logo"><img src="{LOGO_URL}" alt="Logo" width="160" height="56"></div>
      <h1>✅ Invitación válida</h1>
      <div class="details">
        {details}
        <p class="until"><strong>Válido hasta:</strong> {until}</p>
      </div>
    </main>"#,
        details = details.join("\n        "),
        until = format_ddmmyy(invitation.expires_at),
    );

    document(
        &format!(
            "background-image: url({BACKGROUND_URL}); background-size: cover; \
             background-position: center; background-repeat: no-repeat;"
        ),
        &body,
    )
}

/// Page shown for any token that is missing, malformed, forged or expired.
pub fn render_invalid() -> String {
    document(
        "background: linear-gradient(135deg,#fff1f1 0%,#fff 100%);",
        r#"<main class="card">
      <h1 class="invalid">❌ Invitación no válida</h1>
      <p class="center">Esta invitación no es válida o ha expirado.</p>
    </main>"#,
    )
}

/// Formats an instant in ms since the Unix epoch as DD/MM/YY (UTC).
pub fn format_ddmmyy(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|at| at.format("%d/%m/%y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn detail(label: &str, value: Option<&str>) -> String {
    format!(
        "<p><strong>{label}:</strong> {}</p>",
        escape_html(value.unwrap_or(MISSING))
    )
}

fn document(background: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Invitación</title>
    <style>
      body {{ margin: 0; font-family: system-ui, sans-serif; }}
      .page {{ min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 24px; box-sizing: border-box; {background} }}
      .card {{ width: 100%; max-width: 720px; background: rgba(255,255,255,0.92); border-radius: 16px; padding: 32px; box-shadow: 0 10px 35px rgba(0,0,0,0.12); }}
      .logo {{ display: flex; justify-content: center; margin-bottom: 16px; }}
      .logo img {{ object-fit: contain; }}
      h1 {{ font-size: 28px; margin-bottom: 12px; text-align: center; }}
      h1.invalid {{ color: #b00020; }}
      .details {{ margin: 0 auto; max-width: 520px; line-height: 1.5; }}
      .until {{ margin-top: 16px; }}
      .center {{ text-align: center; }}
    </style>
  </head>
  <body>
    <div class="page">
    {body}
    </div>
  </body>
</html>
"#
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

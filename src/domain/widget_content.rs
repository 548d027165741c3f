//! Usage: Prepare the ticker widget HTML before it is handed to the content view.

use serde::Serialize;

const PROMO_SPAN: &str = r#"<span class="blue-text">Track all markets on TradingView</span>"#;

pub(crate) const LOAD_EVENT: &str = "widget:load";
pub(crate) const APPEARANCE_EVENT: &str = "widget:appearance";

#[derive(Debug, Clone, Serialize)]
pub(crate) struct WidgetLoadPayload {
    pub html: String,
}

/// Drops the first promotional span; everything else is passed through unchanged.
pub(crate) fn sanitize(html: &str) -> String {
    html.replacen(PROMO_SPAN, "", 1)
}

pub(crate) fn load_payload(raw_html: &str) -> WidgetLoadPayload {
    WidgetLoadPayload {
        html: sanitize(raw_html),
    }
}

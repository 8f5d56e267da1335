use field_core::SessionState;
use web_sys as web;

const ENABLE_AUDIO_ID: &str = "enable-audio";

/// Reflect the capture state on the enable-audio affordance so page CSS
/// can show a spinner, a retry hint or hide it once live.
pub fn show_audio_state(document: &web::Document, state: &SessionState) {
    let Some(el) = document.get_element_by_id(ENABLE_AUDIO_ID) else {
        return;
    };
    let (tag, label) = match state {
        SessionState::Idle | SessionState::Closed => ("idle", "Enable audio"),
        SessionState::Requesting => ("requesting", "Waiting for microphone"),
        SessionState::Active => ("active", "Listening"),
        SessionState::Failed(_) => ("failed", "Audio unavailable, tap to retry"),
    };
    let _ = el.set_attribute("data-state", tag);
    el.set_text_content(Some(label));
    if let SessionState::Failed(e) = state {
        let _ = el.set_attribute("title", &e.to_string());
    } else {
        let _ = el.remove_attribute("title");
    }
}

#[inline]
pub fn hide_canvas(canvas: &web::HtmlCanvasElement) {
    let _ = canvas.set_attribute("style", "display:none");
}

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(target: &web::EventTarget, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// `data-*` attribute by its camelCase dataset key.
#[inline]
pub fn data_attribute(el: &web::HtmlElement, key: &str) -> Option<String> {
    el.dataset().get(key)
}

/// Vertical scroll offset and viewport height, polled once per frame.
pub fn scroll_metrics(window: &web::Window) -> (f64, f64) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (scroll_y, height)
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// Every element carrying `data-mode`, paired with its mode id.
pub fn mode_buttons(document: &web::Document) -> Vec<(web::HtmlElement, String)> {
    let Ok(list) = document.query_selector_all("[data-mode]") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .filter_map(|el| {
            let id = data_attribute(&el, "mode")?;
            Some((el, id))
        })
        .collect()
}

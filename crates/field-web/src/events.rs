use crate::audio::WebMicrophone;
use crate::dom;
use crate::overlay;
use field_core::{mode_key, AudioProvider, ModeKey, SimulationState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type WebAudio = AudioProvider<WebMicrophone>;

/// Switch to mode `id` and update the page chrome. Unknown ids are ignored.
pub fn select_mode(document: &web::Document, sim: &Rc<RefCell<SimulationState>>, id: &str) {
    let switched = sim.borrow_mut().set_mode(id);
    if let Err(e) = switched {
        log::warn!("[mode] {}", e);
        return;
    }
    show_mode(document, &sim.borrow());
}

pub fn show_mode(document: &web::Document, sim: &SimulationState) {
    let mode = sim.mode();
    dom::set_text(document, "mode-label", mode.label);
    dom::set_text(document, "mode-frequency", mode.frequency_label);
    for (el, id) in dom::mode_buttons(document) {
        let _ = el.class_list().toggle_with_force("active", id == mode.id);
    }
}

pub fn wire_mode_buttons(document: &web::Document, sim: &Rc<RefCell<SimulationState>>) {
    for (el, id) in dom::mode_buttons(document) {
        let document = document.clone();
        let sim = sim.clone();
        dom::add_click_listener(&el, move || select_mode(&document, &sim, &id));
    }
}

pub fn wire_global_keydown(
    window: &web::Window,
    document: &web::Document,
    sim: &Rc<RefCell<SimulationState>>,
) {
    let document = document.clone();
    let sim = sim.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        let Some(action) = mode_key(&ev.key()) else {
            return;
        };
        let target = {
            let s = sim.borrow();
            let registry = s.registry();
            match action {
                ModeKey::Select(i) => registry.by_index(i).map(|m| m.id),
                ModeKey::Next => Some(registry.cycle(s.mode().id, 1).id),
                ModeKey::Previous => Some(registry.cycle(s.mode().id, -1).id),
            }
        };
        if let Some(id) = target {
            select_mode(&document, &sim, id);
        }
    }) as Box<dyn FnMut(_)>);
    window
        .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// Capture only ever starts from this click; nothing requests the
/// microphone on load.
pub fn wire_enable_audio(document: &web::Document, audio: &WebAudio) {
    let Some(el) = document.get_element_by_id("enable-audio") else {
        log::info!("[audio] no #enable-audio on page; ambient only");
        return;
    };
    let document = document.clone();
    let audio = audio.clone();
    dom::add_click_listener(&el, move || {
        let document = document.clone();
        let audio = audio.clone();
        spawn_local(async move {
            // the frame loop shows Requesting; this covers pages without a field
            audio.start().await;
            overlay::show_audio_state(&document, &audio.state());
        });
    });
}

/// Release the microphone when the page goes away.
pub fn wire_pagehide(window: &web::Window, audio: &WebAudio) {
    let audio = audio.clone();
    let closure = Closure::wrap(Box::new(move || {
        audio.stop();
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

pub fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

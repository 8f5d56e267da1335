#![cfg(target_arch = "wasm32")]
//! Browser front-end: WebAudio capture, WebGPU feedback simulation and the
//! animation-frame loop driving them.

mod audio;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use field_core::{
    clamp_grid_size, AnalyserConfig, AudioProvider, ModeRegistry, SimulationState,
    DEFAULT_PARTICLE_GRID,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const CANVAS_ID: &str = "field-canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("field-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    dom::sync_canvas_backing_size(&canvas);
    events::wire_canvas_resize(&window, &canvas);

    let sim = Rc::new(RefCell::new(initial_simulation(&canvas)));
    let grid = dom::data_attribute(&canvas, "particles")
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(clamp_grid_size)
        .unwrap_or(DEFAULT_PARTICLE_GRID);

    // One capture session for the whole page; every consumer gets a clone.
    let audio = AudioProvider::new(audio::WebMicrophone, AnalyserConfig::default());

    events::wire_mode_buttons(&document, &sim);
    events::wire_global_keydown(&window, &document, &sim);
    events::wire_enable_audio(&document, &audio);
    events::wire_pagehide(&window, &audio);
    events::show_mode(&document, &sim.borrow());
    overlay::show_audio_state(&document, &audio.state());

    let Some(gpu) = frame::init_gpu(&canvas, grid).await else {
        // the page stays usable, only the field is missing
        overlay::hide_canvas(&canvas);
        return Ok(());
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        sim, audio, gpu, window, canvas,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}

fn initial_simulation(canvas: &web::HtmlCanvasElement) -> SimulationState {
    let registry = ModeRegistry::builtin();
    match dom::data_attribute(canvas, "initialMode") {
        Some(id) => match SimulationState::with_mode(registry.clone(), &id) {
            Ok(sim) => sim,
            Err(e) => {
                log::warn!("[mode] {}; using {}", e, registry.default_mode().id);
                SimulationState::new(registry)
            }
        },
        None => SimulationState::new(registry),
    }
}

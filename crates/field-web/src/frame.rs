use crate::dom;
use crate::events::WebAudio;
use crate::overlay;
use crate::render;
use field_core::{SessionState, SimulationState};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameContext {
    pub sim: Rc<RefCell<SimulationState>>,
    pub audio: WebAudio,
    pub gpu: Option<render::GpuState>,

    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,

    pub started: Instant,
    pub shown_audio_state: Option<SessionState>,
}

impl FrameContext {
    pub fn new(
        sim: Rc<RefCell<SimulationState>>,
        audio: WebAudio,
        gpu: render::GpuState,
        window: web::Window,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        Self {
            sim,
            audio,
            gpu: Some(gpu),
            window,
            canvas,
            started: Instant::now(),
            shown_audio_state: None,
        }
    }

    /// Run one animation frame. Returns false once there is nothing left
    /// to draw and the loop should stop.
    pub fn frame(&mut self) -> bool {
        let now_sec = self.started.elapsed().as_secs_f64();
        let (scroll_y, viewport_height) = dom::scroll_metrics(&self.window);
        self.sync_audio_indicator();

        let bundle = {
            let mut sim = self.sim.borrow_mut();
            sim.set_scroll(scroll_y, viewport_height);
            sim.set_audio_live(self.audio.is_ready());
            sim.tick(now_sec, self.audio.frequency_bands())
        };

        let Some(gpu) = &mut self.gpu else {
            return false;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        match gpu.render(&bundle) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost or outdated; reconfiguring");
                gpu.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory; removing the particle field");
                self.gpu = None;
                overlay::hide_canvas(&self.canvas);
                false
            }
            Err(e) => {
                log::warn!("[gpu] frame skipped: {:?}", e);
                true
            }
        }
    }

    fn sync_audio_indicator(&mut self) {
        let state = self.audio.state();
        if self.shown_audio_state.as_ref() == Some(&state) {
            return;
        }
        if let Some(document) = self.window.document() {
            overlay::show_audio_state(&document, &state);
        }
        self.shown_audio_state = Some(state);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, grid: u32) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, grid).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if frame_ctx.borrow_mut().frame() {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &FrameCallback) {
    if let (Some(w), Some(callback)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

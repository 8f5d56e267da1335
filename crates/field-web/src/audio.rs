//! Microphone capture through `getUserMedia` and an `AnalyserNode`.

use field_core::{AnalyserConfig, AudioError, CaptureDevice, CaptureHandle};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// The page's microphone. Each `open` prompts (the first time) and builds a
/// fresh context/analyser graph.
pub struct WebMicrophone;

pub struct WebCapture {
    ctx: web::AudioContext,
    stream: web::MediaStream,
    source: web::MediaStreamAudioSourceNode,
    analyser: web::AnalyserNode,
}

impl CaptureDevice for WebMicrophone {
    type Handle = WebCapture;

    async fn open(&self, config: AnalyserConfig) -> Result<WebCapture, AudioError> {
        let stream = request_stream().await?;
        match build_graph(&stream, config).await {
            Ok((ctx, source, analyser)) => Ok(WebCapture {
                ctx,
                stream,
                source,
                analyser,
            }),
            Err(e) => {
                stop_tracks(&stream);
                Err(e)
            }
        }
    }
}

async fn request_stream() -> Result<web::MediaStream, AudioError> {
    let window = web::window().ok_or(AudioError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| AudioError::Unsupported)?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(classify)?;
    let stream = JsFuture::from(promise).await.map_err(classify)?;
    stream
        .dyn_into::<web::MediaStream>()
        .map_err(|v| AudioError::DeviceUnavailable(format!("{:?}", v)))
}

async fn build_graph(
    stream: &web::MediaStream,
    config: AnalyserConfig,
) -> Result<
    (
        web::AudioContext,
        web::MediaStreamAudioSourceNode,
        web::AnalyserNode,
    ),
    AudioError,
> {
    let ctx = web::AudioContext::new().map_err(|_| AudioError::Unsupported)?;
    let wire = || -> Result<_, JsValue> {
        let source = ctx.create_media_stream_source(stream)?;
        let analyser = ctx.create_analyser()?;
        analyser.set_fft_size(config.fft_size);
        analyser.set_smoothing_time_constant(config.smoothing_time_constant);
        source.connect_with_audio_node(&analyser)?;
        Ok((source, analyser))
    };
    let (source, analyser) = match wire() {
        Ok(nodes) => nodes,
        Err(e) => {
            let _ = ctx.close();
            return Err(classify(e));
        }
    };
    // contexts created outside a gesture start suspended in some browsers
    if ctx.state() == web::AudioContextState::Suspended {
        if let Ok(p) = ctx.resume() {
            if let Err(e) = JsFuture::from(p).await {
                log::warn!("[audio] resume failed: {:?}", e);
            }
        }
    }
    Ok((ctx, source, analyser))
}

/// Map a rejected `getUserMedia` (or node construction) to the capture
/// error taxonomy by its DOMException name.
fn classify(err: JsValue) -> AudioError {
    match err.dyn_ref::<web::DomException>().map(|e| e.name()) {
        Some(name) if name == "NotAllowedError" || name == "SecurityError" => {
            AudioError::PermissionDenied
        }
        Some(name) if name == "NotSupportedError" => AudioError::Unsupported,
        Some(name) => AudioError::DeviceUnavailable(name),
        None => AudioError::DeviceUnavailable(format!("{:?}", err)),
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

impl CaptureHandle for WebCapture {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn read_bins(&mut self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }

    fn is_suspended(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Suspended
    }

    fn resume(&mut self) {
        // the returned promise settles on its own; failures are only logged
        if let Err(e) = self.ctx.resume() {
            log::warn!("[audio] resume failed: {:?}", e);
        }
    }

    fn close(&mut self) {
        stop_tracks(&self.stream);
        let _ = self.source.disconnect();
        let _ = self.analyser.disconnect();
        if let Err(e) = self.ctx.close() {
            log::warn!("[audio] context close failed: {:?}", e);
        }
    }
}

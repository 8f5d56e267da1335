//! WebGPU feedback simulator and particle renderer.
//!
//! Each frame issues two passes in order: the simulation pass writes the
//! next particle state into the write target, then the particle pass draws
//! from that same texture onto the swapchain. The targets swap afterwards.

mod helpers;
mod particles;
mod sim;
mod targets;

use field_core::{seed_sphere, Camera, FieldUniforms, UniformBundle, BASE_POINT_SIZE, PARTICLE_SEED};
use web_sys as web;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    uniform_buffer: wgpu::Buffer,
    field_bind_group: wgpu::BindGroup,
    sim: sim::SimResources,
    particles: particles::ParticleResources,
    targets: targets::StateTargets,

    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, grid: u32) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        log::info!("[gpu] device ready ({:?})", adapter.get_info().backend);

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let field_bgl = helpers::field_layout(&device);
        let state_bgl = helpers::state_layout(&device);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("field_uniforms"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let field_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("field_bg"),
            layout: &field_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field_pl"),
            bind_group_layouts: &[&field_bgl, &state_bgl],
            push_constant_ranges: &[],
        });

        let sim = sim::SimResources::new(&device, &layout);
        let particles = particles::ParticleResources::new(&device, &layout, format);
        let targets = targets::StateTargets::new(&device, &state_bgl, grid);
        targets.seed(&queue, &seed_sphere(grid, PARTICLE_SEED));
        log::info!("[gpu] particle field {}x{} ({} particles)", grid, grid, grid * grid);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            field_bind_group,
            sim,
            particles,
            targets,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Simulate one step and draw it. The ping-pong roles only flip once
    /// the frame has been submitted.
    pub fn render(&mut self, bundle: &UniformBundle) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let camera = Camera::orbiting(bundle.time, bundle.morph, aspect);
        let grid = self.targets.grid();
        let uniforms = FieldUniforms::pack(
            bundle,
            camera.view_projection(),
            grid,
            BASE_POINT_SIZE,
            (self.width, self.height),
        );
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });
        let (read, write) = self.targets.pair();
        self.sim
            .encode(&mut encoder, &self.field_bind_group, read, write);
        self.particles.encode(
            &mut encoder,
            &view,
            &self.field_bind_group,
            write,
            grid,
            wgpu::Color {
                r: bundle.background.x as f64,
                g: bundle.background.y as f64,
                b: bundle.background.z as f64,
                a: 1.0,
            },
        );
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        self.targets.swap();
        Ok(())
    }
}

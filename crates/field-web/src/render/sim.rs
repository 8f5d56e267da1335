use super::helpers;
use super::targets::StateTarget;

/// Full-screen pass advancing every particle by one frame.
pub(crate) struct SimResources {
    pipeline: wgpu::RenderPipeline,
}

impl SimResources {
    pub(crate) fn new(device: &wgpu::Device, layout: &wgpu::PipelineLayout) -> Self {
        let shader = helpers::shader_module(device, "simulate_shader", field_core::SIMULATE_WGSL);
        let pipeline = helpers::make_fullscreen_pipeline(
            device,
            layout,
            &shader,
            "fs_simulate",
            helpers::STATE_FORMAT,
            None,
        );
        Self { pipeline }
    }

    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        field: &wgpu::BindGroup,
        read: &StateTarget,
        write: &StateTarget,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("simulate_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &write.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    // every texel is rewritten
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, field, &[]);
        pass.set_bind_group(1, &read.read_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

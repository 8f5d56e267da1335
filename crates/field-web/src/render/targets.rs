use super::helpers;
use field_core::PingPong;

/// One half of the particle state double buffer, with a bind group that
/// exposes it for reading.
pub(crate) struct StateTarget {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) read_group: wgpu::BindGroup,
}

impl StateTarget {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str, grid: u32) -> Self {
        let (texture, view) = helpers::create_state_texture(device, label, grid);
        let read_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            }],
        });
        Self {
            texture,
            view,
            read_group,
        }
    }
}

/// The particle field: `grid x grid` texels in two textures whose
/// read/write roles flip after every frame.
pub(crate) struct StateTargets {
    buffers: PingPong<StateTarget>,
    grid: u32,
}

impl StateTargets {
    pub(crate) fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, grid: u32) -> Self {
        Self {
            buffers: PingPong::new(
                StateTarget::new(device, layout, "state_a", grid),
                StateTarget::new(device, layout, "state_b", grid),
            ),
            grid,
        }
    }

    /// Upload the initial field into both textures. Called once.
    pub(crate) fn seed(&self, queue: &wgpu::Queue, texels: &[[f32; 4]]) {
        let grid = self.grid;
        for target in self.buffers.both() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &target.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                bytemuck::cast_slice(texels),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(grid * 16),
                    rows_per_image: Some(grid),
                },
                wgpu::Extent3d {
                    width: grid,
                    height: grid,
                    depth_or_array_layers: 1,
                },
            );
        }
    }

    /// `(read, write)` for this frame; never the same texture.
    #[inline]
    pub(crate) fn pair(&self) -> (&StateTarget, &StateTarget) {
        self.buffers.pair()
    }

    #[inline]
    pub(crate) fn swap(&mut self) {
        self.buffers.swap();
    }

    #[inline]
    pub(crate) fn grid(&self) -> u32 {
        self.grid
    }
}

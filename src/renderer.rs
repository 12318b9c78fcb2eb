use wgpu::util::DeviceExt;

use life_grid::camera::CameraUniform;
use life_grid::grid::Grid;
use life_grid::topology::Coord;

/// Per-cell states understood by the render shader.
pub const STATE_DEAD: u32 = 0;
pub const STATE_ALIVE: u32 = 1;
pub const STATE_PREVIEW: u32 = 2;
pub const STATE_PREVIEW_ALIVE: u32 = 3;

/// Encode the grid plus a pattern preview overlay as one `u32` per cell,
/// row-major.
pub fn cell_states(grid: &Grid, preview: &[Coord]) -> Vec<u32> {
    let mut states: Vec<u32> = grid
        .cells()
        .iter()
        .map(|c| if c.is_alive() { STATE_ALIVE } else { STATE_DEAD })
        .collect();
    for coord in preview {
        if let Some(state) = states.get_mut(coord.i * grid.cols() + coord.j) {
            *state = if *state == STATE_ALIVE {
                STATE_PREVIEW_ALIVE
            } else {
                STATE_PREVIEW
            };
        }
    }
    states
}

/// Manages the GPU render pipeline that visualizes the grid.
///
/// The cell states live in a storage buffer that is rewritten whenever the
/// grid or the preview changes; a fullscreen triangle samples it through the
/// camera uniform.
pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    cell_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        cell_count: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Render Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/render.wgsl").into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Render BGL"),
                entries: &[
                    // Cell states (read-only)
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: true },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // Camera uniform
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform"),
            contents: bytemuck::bytes_of(&CameraUniform {
                center_x: 0.0,
                center_y: 0.0,
                zoom: 1.0,
                viewport_width: 1.0,
                viewport_height: 1.0,
                grid_cols: 1.0,
                grid_rows: 1.0,
                cell_width: 1.0,
                cell_height: 1.0,
                line_width: 1.0,
                _pad0: 0.0,
                _pad1: 0.0,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let cell_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cell States"),
            size: (cell_count.max(1) * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Render BG"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: cell_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: camera_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            render_pipeline,
            camera_buffer,
            cell_buffer,
            bind_group,
        }
    }

    /// Upload new cell states (see [`cell_states`]).
    pub fn update_cells(&self, queue: &wgpu::Queue, states: &[u32]) {
        queue.write_buffer(&self.cell_buffer, 0, bytemuck::cast_slice(states));
    }

    /// Upload new camera uniform data.
    pub fn update_camera(&self, queue: &wgpu::Queue, uniform: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Encode a render pass that draws the grid.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.render_pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1); // fullscreen triangle
    }
}

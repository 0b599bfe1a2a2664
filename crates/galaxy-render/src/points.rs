//! Point-cloud pipeline: one colored pixel per star.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::buffer::{PointBuffer, VertexPositionColor};
use crate::depth::DepthBuffer;

/// Per-cloud transforms.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointCloudUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl PointCloudUniform {
    pub fn new(view_proj: Mat4, model: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }
}

/// Render pipeline with `PointList` topology.
pub struct PointCloudPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl PointCloudPipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("point-cloud-shader"),
            source: wgpu::ShaderSource::Wgsl(POINT_CLOUD_SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("point-cloud-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(
                        std::mem::size_of::<PointCloudUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("point-cloud-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("point-cloud-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionColor::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
        }
    }

    /// Draw a set of clouds, each with its own transforms.
    pub fn draw<'a>(&self, render_pass: &mut wgpu::RenderPass<'a>, clouds: &[&GpuPointCloud]) {
        render_pass.set_pipeline(&self.pipeline);
        for cloud in clouds {
            render_pass.set_bind_group(0, &cloud.bind_group, &[]);
            cloud.points.draw(render_pass);
        }
    }
}

/// A point cloud's vertices and uniform buffer on the GPU.
pub struct GpuPointCloud {
    pub points: PointBuffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuPointCloud {
    pub fn new(
        device: &wgpu::Device,
        pipeline: &PointCloudPipeline,
        label: &str,
        vertices: &[VertexPositionColor],
    ) -> Self {
        let points = PointBuffer::new(device, label, vertices);

        let uniform = PointCloudUniform::new(Mat4::IDENTITY, Mat4::IDENTITY);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-uniform")),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}-bind-group")),
            layout: &pipeline.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::info!("Uploaded point cloud '{label}' ({} points)", vertices.len());

        Self {
            points,
            uniform_buffer,
            bind_group,
        }
    }

    /// Write this frame's transforms.
    pub fn update(&self, queue: &wgpu::Queue, view_proj: Mat4, model: Mat4) {
        let uniform = PointCloudUniform::new(view_proj, model);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
    }
}

/// WGSL for [`PointCloudPipeline`].
pub const POINT_CLOUD_SHADER_SOURCE: &str = r#"
struct PointCloudUniform {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> cloud: PointCloudUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = cloud.view_proj * cloud.model * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::interleave_points;
    use crate::test_support::create_test_device;

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<PointCloudUniform>(), 128);
    }

    #[test]
    fn test_uniform_packs_column_major() {
        let model = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let uniform = PointCloudUniform::new(Mat4::IDENTITY, model);
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.view_proj[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shader_entry_points_present() {
        assert!(POINT_CLOUD_SHADER_SOURCE.contains("fn vs_main"));
        assert!(POINT_CLOUD_SHADER_SOURCE.contains("fn fs_main"));
        assert!(POINT_CLOUD_SHADER_SOURCE.contains("cloud.view_proj * cloud.model"));
    }

    #[test]
    fn test_pipeline_and_cloud_creation() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let pipeline = PointCloudPipeline::new(&device, wgpu::TextureFormat::Bgra8UnormSrgb);
        let vertices = interleave_points(&[[0.0, 1.0, 2.0]], &[[1.0, 1.0, 1.0]]);
        let cloud = GpuPointCloud::new(&device, &pipeline, "test-cloud", &vertices);
        cloud.update(&queue, Mat4::IDENTITY, Mat4::from_rotation_y(0.5));
        assert_eq!(cloud.points.vertex_count, 1);
    }
}

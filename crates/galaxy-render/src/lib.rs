//! wgpu rendering for the galaxy viewer: device and surface setup, a
//! reverse-Z camera, the point-cloud pipeline for stars, and the textured
//! background sphere.

pub mod background;
pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod points;
pub mod sphere;
pub mod texture;

#[cfg(test)]
mod test_support;

pub use background::{BackgroundRenderer, BackgroundUniform};
pub use buffer::{MeshBuffer, PointBuffer, VertexPositionColor, VertexPositionUv, interleave_points};
pub use camera::Camera;
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use points::{GpuPointCloud, PointCloudPipeline, PointCloudUniform};
pub use sphere::{SphereMesh, uv_sphere};
pub use texture::{DecodedImage, GpuTexture, TextureError, decode_rgba8};

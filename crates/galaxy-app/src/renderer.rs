//! GPU resources for one [`GalaxyScene`] and the per-frame draw.

use galaxy_gen::srgb_to_linear;
use galaxy_render::{
    BackgroundRenderer, DecodedImage, DepthBuffer, FrameEncoder, GpuPointCloud, GpuTexture,
    PointCloudPipeline, RenderContext, RenderPassBuilder, SPACE_BLACK, SurfaceError,
    TextureError, VertexPositionColor, interleave_points, uv_sphere,
};
use galaxy_scene::{GalaxyScene, PointCloud};
use glam::Mat4;
use tracing::info;

/// Depth buffer, pipelines and uploaded buffers for the galaxy scene.
pub struct SceneRenderer {
    depth: DepthBuffer,
    points: PointCloudPipeline,
    axial: GpuPointCloud,
    spiral: GpuPointCloud,
    background: BackgroundRenderer,
}

impl SceneRenderer {
    /// Upload both star clouds and the background sphere.
    pub fn new(ctx: &RenderContext, scene: &GalaxyScene) -> Self {
        let (width, height) = ctx.size();
        let depth = DepthBuffer::new(&ctx.device, width, height);
        let points = PointCloudPipeline::new(&ctx.device, ctx.surface_format);

        let container = &scene.container;
        let axial = GpuPointCloud::new(
            &ctx.device,
            &points,
            container.axial.label(),
            &linear_vertices(&container.axial),
        );
        let spiral = GpuPointCloud::new(
            &ctx.device,
            &points,
            container.spiral.label(),
            &linear_vertices(&container.spiral),
        );

        let sphere_config = &container.background;
        let sphere = uv_sphere(
            sphere_config.radius,
            sphere_config.width_segments,
            sphere_config.height_segments,
        );
        let background =
            BackgroundRenderer::new(&ctx.device, &ctx.queue, ctx.surface_format, &sphere);

        info!(
            "Scene renderer ready: {} star vertices, {} sphere triangles",
            container.axial.len() + container.spiral.len(),
            sphere.indices.len() / 3
        );

        Self {
            depth,
            points,
            axial,
            spiral,
            background,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    /// Upload a decoded starfield and swap it in for the placeholder.
    ///
    /// # Errors
    ///
    /// Propagates [`TextureError`] for images the GPU upload rejects.
    pub fn set_background(
        &mut self,
        ctx: &RenderContext,
        image: &DecodedImage,
    ) -> Result<(), TextureError> {
        let texture = GpuTexture::from_image(&ctx.device, &ctx.queue, "starfield", image)?;
        self.background.set_texture(&ctx.device, &texture);
        Ok(())
    }

    /// Write this frame's camera, object transforms and light.
    pub fn update(&self, queue: &wgpu::Queue, scene: &GalaxyScene, view_proj: Mat4) {
        self.axial.update(queue, view_proj, scene.axial_world_matrix());
        self.spiral.update(queue, view_proj, scene.spiral_world_matrix());
        self.background.update(
            queue,
            view_proj,
            scene.background_world_matrix(),
            scene.container.light.to_uniform(),
        );
    }

    /// Draw the background, then the stars, and present.
    ///
    /// # Errors
    ///
    /// Returns the [`SurfaceError`] if no surface texture could be acquired.
    pub fn render(&self, ctx: &RenderContext) -> Result<(), SurfaceError> {
        let surface_texture = ctx.get_current_texture()?;
        let mut frame = FrameEncoder::new(&ctx.device, surface_texture);

        let builder = RenderPassBuilder::new()
            .clear_color(SPACE_BLACK)
            .depth(self.depth.view.clone(), DepthBuffer::CLEAR_VALUE)
            .label("galaxy-pass");
        {
            let mut pass = frame.begin_render_pass(&builder);
            self.background.render(&mut pass);
            self.points.draw(&mut pass, &[&self.axial, &self.spiral]);
        }

        frame.submit(&ctx.queue);
        Ok(())
    }
}

/// Interleave a cloud's positions with its colors converted to linear RGB
/// for the sRGB surface.
pub fn linear_vertices(cloud: &PointCloud) -> Vec<VertexPositionColor> {
    let colors: Vec<[f32; 3]> = cloud
        .colors()
        .iter()
        .map(|c| c.map(srgb_to_linear))
        .collect();
    interleave_points(cloud.positions(), &colors)
}

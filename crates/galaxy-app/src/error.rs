use galaxy_gen::GenerationError;
use galaxy_render::RenderContextError;

/// A `scene.camera` config field out of range.
#[derive(Debug, thiserror::Error)]
#[error("invalid camera setting `{name}`: {reason}")]
pub struct CameraConfigError {
    pub name: &'static str,
    pub reason: String,
}

/// Fatal viewer errors. Anything that reaches `main` ends the process with
/// a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Render(#[from] RenderContextError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Camera(#[from] CameraConfigError),

    #[error("GPU out of memory")]
    OutOfMemory,
}

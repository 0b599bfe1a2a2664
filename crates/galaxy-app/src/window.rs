use std::sync::Arc;

use galaxy_config::Config;
use galaxy_render::{Camera, RenderContext, SurfaceError, init_render_context_blocking};
use galaxy_scene::{GalaxyScene, OrbitControls};
use glam::Vec3;
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::loader::BackgroundLoader;
use crate::mouse::MouseState;
use crate::renderer::SceneRenderer;
use crate::setup::{orbit_settings, validate_camera};

/// Builds [`WindowAttributes`] from the window section of the config.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Camera from the config's projection settings. The pose is filled in by
/// the orbit controls every frame.
pub fn camera_from_config(config: &Config) -> Camera {
    let camera = &config.scene.camera;
    let mut cam = Camera::perspective(
        camera.fov_y_degrees.to_radians(),
        1.0,
        camera.near,
        camera.far,
    );
    cam.set_aspect_ratio(config.window.width as f32, config.window.height as f32);
    cam
}

/// Viewer state driven by the winit event loop.
pub struct AppState {
    config: Config,
    scene: GalaxyScene,
    camera: Camera,
    controls: OrbitControls,
    mouse: MouseState,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<SceneRenderer>,
    loader: Option<BackgroundLoader>,
    fatal: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config, scene: GalaxyScene) -> Self {
        let camera_config = &config.scene.camera;
        let controls = OrbitControls::new(
            Vec3::from_array(camera_config.initial_position),
            Vec3::ZERO,
            orbit_settings(camera_config),
        );
        let mut camera = camera_from_config(&config);
        let pose = controls.pose();
        camera.position = pose.position;
        camera.rotation = pose.rotation();

        Self {
            camera,
            controls,
            scene,
            config,
            mouse: MouseState::new(),
            window: None,
            gpu: None,
            renderer: None,
            loader: None,
            fatal: None,
        }
    }

    pub fn scene(&self) -> &GalaxyScene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The error that stopped the event loop, if any.
    pub fn take_fatal(&mut self) -> Option<AppError> {
        self.fatal.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width as f32, height as f32);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(&gpu.device, width.max(1), height.max(1));
            }
        }
        info!("Window resized to {width}x{height}");
    }

    /// Advance the scene and camera by one frame.
    fn tick(&mut self) {
        self.scene.step();

        let viewport_height = self
            .gpu
            .as_ref()
            .map_or(self.config.window.height, |gpu| gpu.size().1);
        self.controls
            .handle_input(&self.mouse.orbit_input(), viewport_height as f32);
        self.mouse.clear_transients();

        let pose = self.controls.update();
        self.camera.position = pose.position;
        self.camera.rotation = pose.rotation();
    }

    fn poll_background(&mut self) {
        let Some(loader) = &mut self.loader else {
            return;
        };
        let Some(result) = loader.poll() else {
            return;
        };
        let path = loader.path().clone();
        self.loader = None;

        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };
        match result.and_then(|image| renderer.set_background(gpu, &image)) {
            Ok(()) => info!("Background texture loaded from {}", path.display()),
            Err(e) => warn!("Background image unavailable, keeping black sky: {e}"),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };

        let ctx = match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(ctx) => ctx,
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };

        let (width, height) = ctx.size();
        self.camera.set_aspect_ratio(width as f32, height as f32);

        let max_dimension = ctx.device.limits().max_texture_dimension_2d;
        self.loader = Some(BackgroundLoader::spawn(
            self.scene.container.background.texture_path.clone(),
            max_dimension,
        ));
        self.renderer = Some(SceneRenderer::new(&ctx, &self.scene));
        self.gpu = Some(ctx);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse.on_cursor_left();
            }
            WindowEvent::RedrawRequested => {
                self.tick();
                self.poll_background();

                if let (Some(gpu), Some(renderer)) = (&self.gpu, &self.renderer) {
                    let view_proj = self.camera.view_projection_matrix();
                    renderer.update(&gpu.queue, &self.scene, view_proj);

                    match renderer.render(gpu) {
                        Ok(()) => {}
                        Err(SurfaceError::Lost) => {
                            let (w, h) = gpu.size();
                            if let Some(gpu) = &mut self.gpu {
                                gpu.resize(w, h);
                            }
                        }
                        Err(SurfaceError::OutOfMemory) => {
                            self.fail(event_loop, AppError::OutOfMemory);
                            return;
                        }
                        Err(SurfaceError::Timeout) => {
                            warn!("Surface timeout, skipping frame");
                        }
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Open the viewer window and run until it is closed.
///
/// # Errors
///
/// Returns [`AppError`] if the camera section is invalid, if the event loop,
/// window or GPU cannot be created, or if the GPU runs out of memory mid-run.
#[instrument(skip_all)]
pub fn run(config: Config, scene: GalaxyScene) -> Result<(), AppError> {
    validate_camera(&config.scene.camera)?;
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, scene);
    event_loop.run_app(&mut app)?;
    match app.take_fatal() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

//! Windowed runner: winit events in, particle frames out.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::AppConfig;
use crate::effects::Parallax;
use crate::error::RunError;
use crate::field::ParticleField;
use crate::frame_loop::FrameLoop;
use crate::gpu::{GpuCanvas, GpuState};
use crate::renderer::FrameRenderer;
use crate::theme::Theme;
use crate::time::FrameClock;

/// Pixels scrolled per wheel "line".
const LINE_SCROLL: f32 = 40.0;

/// Open a window and animate the particle field until it is closed.
pub fn run(config: AppConfig) -> Result<(), RunError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Everything that only exists once the window does.
struct Scene {
    window: Arc<Window>,
    gpu_state: GpuState,
    canvas: GpuCanvas,
    field: ParticleField,
}

struct App {
    config: AppConfig,
    theme: Theme,
    scene: Option<Scene>,
    renderer: FrameRenderer,
    frame_loop: FrameLoop,
    parallax: Parallax,
    clock: FrameClock,
    failure: Option<RunError>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            theme: config.theme,
            renderer: FrameRenderer::new(config.connections.clone()),
            parallax: Parallax::new(config.parallax),
            frame_loop: FrameLoop::new(),
            clock: FrameClock::new(),
            scene: None,
            failure: None,
            config,
        }
    }

    fn create_scene(&self, event_loop: &ActiveEventLoop) -> Result<Scene, RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;

        let size = window.inner_size();
        let field = ParticleField::new(self.config.field.clone(), size.width, size.height);
        tracing::info!(
            particles = field.len(),
            width = size.width,
            height = size.height,
            theme = %self.theme,
            "particle field started"
        );

        Ok(Scene {
            window,
            gpu_state,
            canvas: GpuCanvas::new(self.config.window.backdrop),
            field,
        })
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.frame_loop.stop();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Self {
            scene,
            renderer,
            frame_loop,
            parallax,
            clock,
            theme,
            config,
            ..
        } = self;
        let Some(scene) = scene.as_mut() else {
            return;
        };

        let window = scene.window.clone();
        let rendered = frame_loop.tick(window.as_ref(), |_| {
            parallax.advance();
            scene.canvas.set_translation(parallax.offset());
            renderer.render_frame(&mut scene.field, *theme, &mut scene.canvas);
        });
        if !rendered {
            // cancelled: leave the last presented frame alone
            return;
        }

        match scene.gpu_state.render(&scene.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                scene.gpu_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory, exiting");
                frame_loop.stop();
                event_loop.exit();
                return;
            }
            Err(e) => tracing::warn!("Render error: {:?}", e),
        }

        if clock.tick() {
            window.set_title(&format!("{} - {:.0} fps", config.window.title, clock.fps()));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return;
        }
        match self.create_scene(event_loop) {
            Ok(scene) => {
                self.parallax
                    .set_scroll_extent(scene.window.inner_size().height as f32);
                self.frame_loop.start(scene.window.as_ref());
                self.scene = Some(scene);
            }
            Err(err) => {
                tracing::error!("failed to start: {}", err);
                self.failure = Some(err);
                self.shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Resized(physical_size) => {
                if let Some(scene) = &mut self.scene {
                    scene.gpu_state.resize(physical_size);
                    scene.field.resize(physical_size.width, physical_size.height);
                    self.parallax.set_scroll_extent(physical_size.height as f32);
                }
            }
            WindowEvent::Occluded(hidden) => {
                if let Some(scene) = &mut self.scene {
                    scene.field.set_hidden(hidden);
                    if !hidden && self.frame_loop.is_running() {
                        scene.window.request_redraw();
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(scene) = &self.scene {
                    let size = scene.window.inner_size();
                    self.parallax.set_cursor(
                        Vec2::new(position.x as f32, position.y as f32),
                        Vec2::new(size.width as f32, size.height as f32),
                    );
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_SCROLL,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.parallax.scroll_by(scroll);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use life_grid::camera::Camera;
use life_grid::config::LifeConfig;
use life_grid::controller::{Controller, InteractionMode};
use life_grid::geometry::GridGeometry;
use life_grid::grid::Grid;
use life_grid::patterns::PatternLibrary;
use life_grid::simulation::Simulation;
use life_grid::topology::Coord;

use crate::renderer::{cell_states, Renderer};

/// Upper bound on generations run in one frame after a stall.
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Pattern selected at startup.
const DEFAULT_PATTERN: &str = "glider";

/// Application state managing the simulation, rendering, and user interaction.
pub struct App {
    config: LifeConfig,
    /// GPU resources (initialized after window creation).
    gpu: Option<GpuState>,
    camera: Camera,
    geometry: GridGeometry,
    grid: Grid,
    simulation: Simulation,
    controller: Controller,
    library: PatternLibrary,
    /// Time accumulated towards the next simulation tick.
    tick_accumulator: Duration,
    last_frame: Instant,
    /// Left button held for panning.
    dragging: bool,
    cursor: Option<(f64, f64)>,
}

struct GpuState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: Renderer,
}

impl App {
    pub fn new(config: LifeConfig) -> Self {
        let grid = Grid::from_config(&config);
        let geometry = GridGeometry::new(config.rows, config.cols, config.cell_size, config.cell_size);
        let (cx, cy) = geometry.center();
        log::info!(
            "Grid {}×{} ({} wrap), {} cells alive",
            grid.rows(),
            grid.cols(),
            grid.wrap().label(),
            grid.population()
        );

        Self {
            config,
            gpu: None,
            camera: Camera::new(cx, cy),
            geometry,
            grid,
            simulation: Simulation::new(),
            controller: Controller::new(DEFAULT_PATTERN),
            library: PatternLibrary::builtin(),
            tick_accumulator: Duration::ZERO,
            last_frame: Instant::now(),
            dragging: false,
            cursor: None,
        }
    }

    fn initialize_gpu(&mut self, window: Arc<Window>) {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).expect("Failed to create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("No suitable GPU adapter found");

        log::info!("GPU adapter: {:?}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
            None,
        ))
        .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.camera
            .set_viewport(config.width as f32, config.height as f32);

        let renderer = Renderer::new(&device, surface_format, self.grid.cells().len());

        self.gpu = Some(GpuState {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        });
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(ref mut gpu) = self.gpu {
            if new_size.width > 0 && new_size.height > 0 {
                gpu.config.width = new_size.width;
                gpu.config.height = new_size.height;
                gpu.surface.configure(&gpu.device, &gpu.config);
                self.camera
                    .set_viewport(new_size.width as f32, new_size.height as f32);
            }
        }
    }

    /// Run as many simulation ticks as the elapsed time allows, unless the
    /// controller is in edit mode.
    fn tick(&mut self, dt: Duration) {
        if self.controller.is_editing() {
            self.tick_accumulator = Duration::ZERO;
            return;
        }

        self.tick_accumulator += dt;
        let mut steps = 0;
        while self.tick_accumulator >= self.config.tick_interval && steps < MAX_STEPS_PER_FRAME {
            self.tick_accumulator -= self.config.tick_interval;
            self.simulation.step(&mut self.grid);
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            self.tick_accumulator = Duration::ZERO;
        }
    }

    fn render_frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;

        self.tick(dt);
        self.camera.locked = self.controller.camera_locked();

        let preview = self.controller.preview(&self.grid, &self.library);
        let states = cell_states(&self.grid, &preview);
        let cam_uniform = self.camera.uniform(&self.geometry, self.config.line_width);
        let title = self.status_line();

        let Some(ref mut gpu) = self.gpu else { return };

        let output = match gpu.surface.get_current_texture() {
            Ok(tex) => tex,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory");
                return;
            }
            Err(e) => {
                log::warn!("Surface error: {e:?}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.update_camera(&gpu.queue, &cam_uniform);
        gpu.renderer.update_cells(&gpu.queue, &states);

        let mut encoder =
            gpu.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        gpu.renderer.render(&mut encoder, &view);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        gpu.window.set_title(&title);
        gpu.window.request_redraw();
    }

    fn status_line(&self) -> String {
        let status = if self.controller.is_editing() { "✎ Editing" } else { "▶ Running" };
        let mirror = if self.controller.mirror() { " (mirrored)" } else { "" };
        format!(
            "Life Grid | {status} | Gen {} | Pop {} | Mode: {} | Pattern: {}{mirror} | Wrap: {} | {}×{}",
            self.simulation.generation(),
            self.grid.population(),
            self.controller.mode().label(),
            self.controller.selected_pattern(),
            self.grid.wrap().label(),
            self.grid.rows(),
            self.grid.cols(),
        )
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }

        match event.logical_key {
            Key::Named(NamedKey::Space) => self.controller.toggle_edit_mode(),
            Key::Named(NamedKey::ArrowRight) if self.controller.is_editing() => {
                self.simulation.step(&mut self.grid);
            }
            Key::Named(NamedKey::Escape) => {
                if let Some(ref gpu) = self.gpu {
                    gpu.window.set_visible(false);
                }
                std::process::exit(0);
            }
            Key::Character(ref c) => match c.to_lowercase().as_str() {
                "m" => self.set_mode(InteractionMode::MoveAround),
                "l" => self.set_mode(InteractionMode::Life),
                "d" => self.set_mode(InteractionMode::Death),
                "p" => self.set_mode(InteractionMode::Pattern),
                "[" => self.controller.cycle_pattern(&self.library, false),
                "]" => self.controller.cycle_pattern(&self.library, true),
                "f" => self.controller.toggle_mirror(),
                "w" => {
                    let wrap = self.grid.wrap().toggled();
                    self.grid.set_wrap(wrap);
                    log::info!("Wrap policy: {}", wrap.label());
                }
                "c" => {
                    self.grid.clear_all();
                    self.simulation.reset();
                    log::info!("Grid cleared");
                }
                "r" => {
                    self.grid.randomize(&mut rand::thread_rng(), self.config.density);
                    self.simulation.reset();
                    log::info!("Grid randomized");
                }
                "h" => {
                    self.camera.reset();
                    log::info!("Camera reset");
                }
                "g" => self.center_on_cursor(),
                _ => {}
            },
            _ => {}
        }
    }

    fn cell_under_cursor(&self) -> Option<Coord> {
        let (x, y) = self.cursor?;
        let (wx, wy) = self.camera.screen_to_world(x as f32, y as f32);
        self.geometry.cell_at(wx, wy)
    }

    /// Re-resolve the cell under a stationary cursor after the mode or the
    /// camera changed.
    fn refresh_pointer(&mut self) {
        let cell = self.cell_under_cursor();
        self.controller.pointer_moved(cell, &mut self.grid);
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        self.controller.set_mode(mode);
        self.refresh_pointer();
    }

    fn zoom(&mut self, factor: f32) {
        let (x, y) = self.cursor.unwrap_or((
            self.camera.viewport_width as f64 / 2.0,
            self.camera.viewport_height as f64 / 2.0,
        ));
        self.camera.zoom_at(factor, x as f32, y as f32);
        self.refresh_pointer();
    }

    fn center_on_cursor(&mut self) {
        let Some(cell) = self.cell_under_cursor() else { return };
        let (x, y) = self.geometry.cell_origin(cell);
        self.camera.center_on(
            x + self.geometry.cell_width / 2.0,
            y + self.geometry.cell_height / 2.0,
        );
        self.refresh_pointer();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_none() {
            let (width, height) = self.config.window_size;
            let attrs = WindowAttributes::default()
                .with_title("Life Grid")
                .with_inner_size(PhysicalSize::new(width, height));

            let window = Arc::new(
                event_loop
                    .create_window(attrs)
                    .expect("Failed to create window"),
            );

            self.initialize_gpu(window);
            self.last_frame = Instant::now();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.resize(size);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y / 50.0,
                };
                self.zoom(if scroll > 0.0 { 1.1 } else { 0.9 });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            let cell = self.cell_under_cursor();
                            self.controller
                                .pointer_pressed(cell, &mut self.grid, &self.library);
                            self.dragging = !self.controller.camera_locked();
                        }
                        ElementState::Released => {
                            self.controller.pointer_released();
                            self.dragging = false;
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging {
                    if let Some((lx, ly)) = self.cursor {
                        self.camera
                            .pan((position.x - lx) as f32, (position.y - ly) as f32);
                    }
                }
                self.cursor = Some((position.x, position.y));
                let cell = self.cell_under_cursor();
                self.controller.pointer_moved(cell, &mut self.grid);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.controller.pointer_moved(None, &mut self.grid);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10×10 grid of 10px cells seen through a 100×100 viewport, so screen
    /// and world pixels coincide at zoom 1.
    fn app() -> App {
        let config = LifeConfig {
            rows: 10,
            cols: 10,
            cell_size: 10.0,
            density: 0.2,
            seed: Some(3),
            ..LifeConfig::default()
        };
        let mut app = App::new(config);
        app.camera.set_viewport(100.0, 100.0);
        app
    }

    #[test]
    fn test_no_ticks_while_editing() {
        let mut app = app();
        let before: Vec<_> = app.grid.alive_cells().collect();
        app.controller.set_edit_mode(true);
        app.tick(Duration::from_secs(5));
        assert_eq!(app.simulation.generation(), 0);
        assert_eq!(app.tick_accumulator, Duration::ZERO);
        assert_eq!(app.grid.alive_cells().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_ticks_follow_interval() {
        let mut app = app();
        app.tick(Duration::from_millis(450));
        assert_eq!(app.simulation.generation(), 2);
        assert_eq!(app.tick_accumulator, Duration::from_millis(50));
        app.tick(Duration::from_millis(150));
        assert_eq!(app.simulation.generation(), 3);
    }

    #[test]
    fn test_stall_is_capped_and_dropped() {
        let mut app = app();
        app.tick(Duration::from_millis(450));
        app.tick(Duration::from_secs(10));
        assert_eq!(app.simulation.generation(), 2 + MAX_STEPS_PER_FRAME as u64);
        assert_eq!(app.tick_accumulator, Duration::ZERO);
    }

    #[test]
    fn test_resume_after_editing_starts_fresh() {
        let mut app = app();
        app.tick(Duration::from_millis(150));
        app.controller.set_edit_mode(true);
        app.tick(Duration::from_millis(100));
        app.controller.set_edit_mode(false);
        app.tick(Duration::from_millis(100));
        assert_eq!(app.simulation.generation(), 0);
    }

    #[test]
    fn test_entering_pattern_mode_shows_preview_under_cursor() {
        let mut app = app();
        app.cursor = Some((35.0, 72.0));
        app.set_mode(InteractionMode::Pattern);
        assert_eq!(app.controller.preview_anchor(), Some(Coord::new(7, 3)));
    }

    #[test]
    fn test_camera_moves_refresh_preview() {
        let mut app = app();
        app.cursor = Some((65.0, 65.0));
        app.set_mode(InteractionMode::Pattern);
        assert_eq!(app.controller.preview_anchor(), Some(Coord::new(6, 6)));

        // Recentring on (65, 65) puts world (80, 80) under the still cursor.
        app.center_on_cursor();
        assert!((app.camera.center_x - 65.0).abs() < 1e-3);
        assert_eq!(app.controller.preview_anchor(), Some(Coord::new(8, 8)));

        app.zoom(2.0);
        assert_eq!(app.controller.preview_anchor(), Some(Coord::new(8, 8)));
        app.cursor = None;
        app.zoom(0.5);
        assert_eq!(app.controller.preview_anchor(), None);
    }
}

mod app;
mod renderer;

use life_grid::config::LifeConfig;
use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    log::info!("Life Grid - Conway's Game of Life editor");
    log::info!("Controls:");
    log::info!("  Space       - Toggle edit mode (pauses the simulation)");
    log::info!("  Right Arrow - Step (while editing)");
    log::info!("  M / L / D / P - Move-around / life / death / pattern mode");
    log::info!("  [ / ]       - Previous / next pattern");
    log::info!("  F           - Mirror pattern");
    log::info!("  W           - Toggle bounded / toroidal wrap");
    log::info!("  Mouse Drag  - Pan (or paint while editing)");
    log::info!("  Scroll      - Zoom");
    log::info!("  H           - Reset camera");
    log::info!("  G           - Center camera on the cell under the cursor");
    log::info!("  R           - Randomize grid");
    log::info!("  C           - Clear grid");
    log::info!("  Escape      - Quit");

    let config = LifeConfig::from_env();
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = app::App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}

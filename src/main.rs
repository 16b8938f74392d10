use std::error::Error;
use std::time::Duration;

use sdl2::keyboard::Keycode;
use swarmtrail::config::{usage, CliCommand};
use swarmtrail::display::{Display, InputEvent, RenderTarget};
use swarmtrail::util::{FpsCounter, Interval};
use swarmtrail::{Simulation, SwarmConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swarmtrail=info")),
        )
        .init();

    let config = match SwarmConfig::from_args(std::env::args().skip(1))? {
        CliCommand::Run(config) => config,
        CliCommand::Help => {
            println!("{}", usage());
            return Ok(());
        },
    };

    let (mut display, texture_creator) =
        Display::with_options("Particle Simulation", config.width, config.height, config.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)?;
    let mut sim = Simulation::from_config(&config)?;

    let (width, height) = (display.width(), display.height());
    info!(
        width = width,
        height = height,
        vsync = config.vsync,
        "=== swarmtrail === (Escape or close the window to quit)"
    );

    // FPS counter with 60 sample rolling average
    let mut fps_counter = FpsCounter::new(60);
    let mut fps_log = Interval::new(Duration::from_secs(5));

    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(_) => {},
            }
        }

        sim.step(display.ticks());
        display.present(&mut target, sim.canvas().front())?;

        fps_counter.tick();
        if fps_log.ready() {
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            info!(
                avg = fps_counter.avg_fps() as u32,
                min = min_fps as u32,
                max = max_fps as u32,
                frame_ms = fps_counter.avg_frame_time_ms(),
                "fps"
            );
        }
    }

    info!("shutting down");
    Ok(())
}

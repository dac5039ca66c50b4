//! Space Invaders entry point
//!
//! Loads settings, then runs the fixed timestep loop: feed wall time to the
//! clock, run whole ticks, render a snapshot between ticks.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use space_invaders::platform::FixedTimestep;
use space_invaders::renderer::TextFrame;
use space_invaders::sim::{GameState, TickInput, tick};
use space_invaders::{RenderMode, Settings};

/// Game instance holding all host-side state
struct Game {
    state: GameState,
    clock: FixedTimestep,
    input: TickInput,
    settings: Settings,
    /// Ticks run since startup (across restarts)
    total_ticks: u64,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed),
            clock: FixedTimestep::new(Duration::from_millis(settings.tick_ms), settings.max_substeps),
            input: TickInput {
                idle_mode: settings.idle_mode,
                ..Default::default()
            },
            settings,
            total_ticks: 0,
        }
    }

    /// Run simulation ticks for the elapsed wall time
    fn update(&mut self, elapsed: Duration) {
        let ticks = self.clock.advance(elapsed);

        for _ in 0..ticks {
            if self.settings.auto_restart && !self.state.is_running() {
                self.input.restart = true;
            }

            let input = self.input.clone();
            tick(&mut self.state, &input);
            self.total_ticks += 1;

            // Clear one-shot inputs after processing
            self.input.fire = false;
            self.input.restart = false;

            if self.total_ticks % u64::from(self.settings.render_every) == 0 {
                self.render();
            }
            if self.finished() {
                break;
            }
        }
    }

    fn render(&self) {
        let snapshot = self.state.snapshot();
        match self.settings.render {
            RenderMode::Off => {}
            RenderMode::Text => println!("{}\n", TextFrame::from_snapshot(&snapshot)),
            RenderMode::Json => match serde_json::to_string(&snapshot) {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("Could not serialize snapshot: {}", e),
            },
        }
    }

    fn finished(&self) -> bool {
        if let Some(limit) = self.settings.max_ticks {
            if self.total_ticks >= limit {
                return true;
            }
        }
        !self.state.is_running() && !self.settings.auto_restart
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Space Invaders (native) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next().map(PathBuf::from) {
        Some(path) => {
            let settings = Settings::load(&path);
            if !path.exists() {
                // First run: leave a template to edit
                settings.save(&path);
            }
            settings
        }
        None => Settings::default(),
    };
    if let Some(mode) = args.next() {
        match RenderMode::from_str(&mode) {
            Some(render) => settings.render = render,
            None => log::warn!("Unknown render mode {:?}, keeping {}", mode, settings.render.as_str()),
        }
    }
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Seed {}, tick {} ms, render {}, autopilot {}",
        seed,
        settings.tick_ms,
        settings.render.as_str(),
        settings.idle_mode
    );
    if !settings.idle_mode {
        log::info!("Keyboard input is not captured natively - the ship will hold still");
    }

    let mut game = Game::new(seed, settings);
    game.render();

    let mut last = Instant::now();
    while !game.finished() {
        let now = Instant::now();
        game.update(now - last);
        last = now;
        thread::sleep(game.clock.step() / 2);
    }

    game.render();
    log::info!(
        "Stopped after {} ticks: score {}, wave {}, lives {}",
        game.total_ticks,
        game.state.score,
        game.state.wave_index + 1,
        game.state.lives
    );
}

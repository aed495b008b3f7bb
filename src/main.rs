//! Rocket Strike headless runner
//!
//! Plays a scripted session at 60 Hz, logs the event feed and prints the
//! final snapshot as JSON. Usage: `rocket-strike [seed] [tuning.json]`

use rocket_strike::sim::{GameEvent, GameState, TickInput, tick};
use rocket_strike::{Tuning, TuningError, consts};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Host frame time (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest a single shot may take before the runner gives up on it
const MAX_FRAMES_PER_SHOT: u32 = 60 * 10;

/// Scripted (angle, power) shots
const SHOTS: [(f32, f32); 6] = [
    (45.0, 60.0),
    (40.0, 65.0),
    (35.0, 70.0),
    (50.0, 62.0),
    (30.0, 75.0),
    (55.0, 64.0),
];

/// Headless host driving one session
struct Runner {
    state: GameState,
    input: TickInput,
    frames: u64,
    hits: u32,
    misses: u32,
}

impl Runner {
    fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            state: GameState::with_rng(tuning, Pcg32::seed_from_u64(seed)),
            input: TickInput::default(),
            frames: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Run one frame and report what happened
    fn frame(&mut self) {
        tick(&mut self.state, &self.input, FRAME_DT);
        self.frames += 1;

        // One-shot inputs only apply to a single frame
        self.input = TickInput::default();

        for event in self.state.drain_events() {
            match event {
                GameEvent::Hit { .. } => self.hits += 1,
                GameEvent::Miss => self.misses += 1,
                GameEvent::Reset => {}
            }
            log::info!("[frame {}] {}", self.frames, event.message());
        }
    }

    /// Aim, fire and wait for the launcher to re-arm
    fn fire(&mut self, angle: f32, power: f32) {
        self.input = TickInput {
            angle: Some(angle),
            power: Some(power),
            launch: true,
            ..Default::default()
        };
        self.frame();

        let mut waited = 0;
        while !self.state.can_launch() && waited < MAX_FRAMES_PER_SHOT {
            self.frame();
            waited += 1;
        }
        if waited == MAX_FRAMES_PER_SHOT {
            log::warn!("Shot at {angle}°/{power}% did not settle within {waited} frames");
        }
    }
}

fn load_tuning(path: Option<&str>) -> Result<Tuning, TuningError> {
    match path {
        Some(path) => Tuning::from_file(path),
        None => Ok(Tuning::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match args.first().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed {:?}: {e}", args[0]);
            std::process::exit(2);
        }
        None => 0x5EED,
    };
    let tuning_path = args.get(1).map(String::as_str);
    let tuning = match load_tuning(tuning_path) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{}: {e}", tuning_path.unwrap_or("<defaults>"));
            std::process::exit(2);
        }
    };

    log::info!(
        "Rocket Strike (headless) starting with seed {seed}, playfield {}x{}",
        tuning.playfield_width,
        tuning.playfield_height
    );
    if tuning.gravity != consts::GRAVITY {
        log::info!("Custom gravity: {}", tuning.gravity);
    }
    match tuning.to_json() {
        Ok(json) => log::debug!("Active tuning: {json}"),
        Err(e) => log::warn!("Failed to serialize tuning: {e}"),
    }

    let mut runner = Runner::new(tuning, seed);
    for (angle, power) in SHOTS {
        runner.fire(angle, power);
    }

    log::info!(
        "Session over after {} frames: {} hits, {} misses, score {}",
        runner.frames,
        runner.hits,
        runner.misses,
        runner.state.score
    );

    match serde_json::to_string_pretty(&runner.state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the engine directly; nothing to run here
}

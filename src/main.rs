//! Paddle Pong entry point
//!
//! Headless host: drives the game from the system clock the way a render
//! loop would, plays the left paddle with a simple tracker, and logs what
//! happens. The final snapshot is printed as JSON.
//!
//! Run `paddle-pong --help` for options.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use paddle_pong::sim::{Direction, Mode, Phase};
    use paddle_pong::{Command, Game, GameConfig};

    /// Host callback interval (faster than the 60 Hz simulation)
    const FRAME: Duration = Duration::from_millis(4);
    /// Slack before the tracker moves the paddle
    const TRACK_SLACK: i32 = 10;

    /// Command-line arguments for the headless host
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    struct Options {
        /// JSON config file; missing fields take their defaults
        #[arg(value_name = "CONFIG")]
        config: Option<PathBuf>,
        /// Play a challenge game instead of a normal one
        #[arg(long)]
        challenge: bool,
        /// RNG seed (defaults to the system clock)
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
        /// Stop after this many host seconds
        #[arg(long, value_name = "SECONDS", default_value_t = 60.0, value_parser = parse_seconds)]
        seconds: f64,
    }

    impl Options {
        fn mode(&self) -> Mode {
            if self.challenge {
                Mode::Challenge
            } else {
                Mode::Normal
            }
        }
    }

    fn parse_seconds(arg: &str) -> Result<f64, String> {
        let secs: f64 = arg.parse().map_err(|e| format!("{e}"))?;
        if secs.is_finite() && secs > 0.0 {
            Ok(secs)
        } else {
            Err(format!("expected a positive number of seconds, got {secs}"))
        }
    }

    /// Pick a direction that keeps the left paddle under the ball
    fn track(game: &Game) -> Direction {
        let state = game.state();
        let dy = state.ball.center().y - state.player.center().y;
        if dy > TRACK_SLACK {
            Direction::Down
        } else if dy < -TRACK_SLACK {
            Direction::Up
        } else {
            Direction::Stop
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Paddle Pong (headless) starting...");

        let options = Options::parse();
        log::debug!("{:?}", options);
        let config = options
            .config
            .as_deref()
            .map(GameConfig::load)
            .unwrap_or_default();
        let seed = options.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut game = Game::new(config, seed);
        let start = Instant::now();
        game.tick(0.0);

        match options.mode() {
            Mode::Normal => game.apply(Command::StartNormal),
            Mode::Challenge => {
                game.apply(Command::StartChallenge);
                game.apply(Command::AcknowledgeInstructions);
            }
        }

        let mut steps: u64 = 0;
        let mut last_report = 0.0;
        loop {
            let now = start.elapsed().as_secs_f64();
            game.apply(Command::Player(track(&game)));
            steps += game.tick(now) as u64;

            if now - last_report >= 1.0 {
                let snap = game.snapshot();
                log::debug!(
                    "t={:.1}s steps={} ball={:?} score {}-{}",
                    now,
                    steps,
                    snap.ball_pos,
                    snap.scores.player,
                    snap.scores.opponent
                );
                last_report = now;
            }

            if matches!(game.state().phase, Phase::Terminal { .. }) {
                break;
            }
            if now >= options.seconds {
                log::info!("Time limit reached");
                break;
            }
            std::thread::sleep(FRAME);
        }

        log::info!("Ran {} simulation steps", steps);
        match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize snapshot: {}", e),
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}

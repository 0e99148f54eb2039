use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{debug, error, info, LevelFilter};
use wordswarm::prelude::*;
use wordswarm::DriverError;

#[derive(Parser)]
#[clap(author, version, about = "Spoken words that form, break apart and flock")]
struct Cli {
    /// Path to a JSON swarm config
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Transcript with one utterance per line (stdin when omitted)
    #[clap(short, long)]
    transcript: Option<PathBuf>,

    /// Simulation frames per second
    #[clap(long, default_value_t = 60.0)]
    fps: f32,

    /// Seconds a triggered sample plays before the gate reopens
    #[clap(long, default_value_t = 3.0)]
    sample_secs: f32,

    /// Seconds to keep simulating after the transcript ends
    #[clap(long, default_value_t = 10.0)]
    linger: f32,

    /// Stop after this many frames
    #[clap(long)]
    max_frames: Option<u64>,

    /// RNG seed, overrides the config
    #[clap(long)]
    seed: Option<u64>,

    /// Pace frames in wall-clock time
    #[clap(long)]
    realtime: bool,

    /// Write the effective config to this path and exit
    #[clap(long)]
    dump_config: Option<PathBuf>,

    /// Debug mode
    #[clap(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(log_level).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn open_transcript(path: Option<&PathBuf>) -> Result<Box<dyn BufRead + Send>, DriverError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| DriverError::Transcript {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Forward transcript lines into the world's inbox until input ends.
fn spawn_reader(reader: Box<dyn BufRead + Send>, inbox: Inbox, done: Arc<AtomicBool>) {
    thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    if !inbox.send_utterance(line) {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read transcript: {e}");
                    break;
                }
            }
        }
        done.store(true, Ordering::Release);
    });
}

fn run(cli: Cli) -> Result<(), DriverError> {
    if !(cli.fps > 0.0) {
        return Err(DriverError::InvalidArgument(format!("fps must be positive, got {}", cli.fps)));
    }
    if !(cli.sample_secs >= 0.0) || !(cli.linger >= 0.0) {
        return Err(DriverError::InvalidArgument(
            "sample-secs and linger must not be negative".into(),
        ));
    }

    let mut config = match &cli.config {
        Some(path) => SwarmConfig::load(path)?,
        None => SwarmConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if let Some(path) = &cli.dump_config {
        config.save(path)?;
        info!("Wrote config to {}", path.display());
        return Ok(());
    }

    let mut world = World::from_config(config)?;
    let done = Arc::new(AtomicBool::new(false));
    spawn_reader(open_transcript(cli.transcript.as_ref())?, world.open_inbox(), done.clone());

    info!("Starting Word Swarm at {} fps", cli.fps);
    let frames = drive(&mut world, &cli, &done);

    let separated = world.agents().iter().filter(|a| a.is_separated()).count();
    info!(
        "Finished after {} frames: {} letters ({} separated), {:.2}s simulated",
        frames,
        world.agents().len(),
        separated,
        world.sim_time()
    );
    Ok(())
}

/// Run the fixed-step loop until the transcript is done and the world has
/// settled for `--linger` seconds, or `--max-frames` is reached.
///
/// Returns the number of frames simulated.
fn drive(world: &mut World, cli: &Cli, done: &AtomicBool) -> u64 {
    let mut clock = FrameClock::fixed(cli.fps);
    let mut playing: Option<f32> = None;
    let mut linger = cli.linger;

    loop {
        let dt = clock.update();
        // Read before the tick so its inbox drain sees every line the reader sent.
        let input_done = done.load(Ordering::Acquire);
        let report = world.tick(dt);

        if report.reset {
            info!("Reset");
        }
        if report.spawned > 0 {
            info!("Spawned {} letters (population {})", report.spawned, report.population);
        }
        for cue in &report.cues {
            info!("Playing {}", cue.file_name());
            playing = Some(cli.sample_secs);
        }
        if report.launched > 0 {
            debug!("Frame {}: {} letters separated", clock.frame(), report.launched);
        }

        if let Some(remaining) = playing {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                world.playback_finished();
                playing = None;
            } else {
                playing = Some(remaining);
            }
        }

        if cli.max_frames.is_some_and(|max| clock.frame() >= max) {
            break;
        }
        if input_done && playing.is_none() && world.pending_ops() == 0 {
            linger -= dt;
            if linger <= 0.0 {
                break;
            }
        }

        if cli.realtime {
            thread::sleep(Duration::from_secs_f32(dt));
        }
    }

    clock.frame()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_last_lines_ingested_before_exit() {
        let cli = Cli::parse_from(["wordswarm", "--linger", "0"]);
        let mut world = World::with_seed(1);
        let done = Arc::new(AtomicBool::new(false));
        spawn_reader(Box::new(Cursor::new("cat\n\ndog\n")), world.open_inbox(), done.clone());
        while !done.load(Ordering::Acquire) {
            thread::yield_now();
        }

        let frames = drive(&mut world, &cli, &done);
        assert_eq!(frames, 1);
        let letters: String = world.agents().iter().map(|a| a.identity()).collect();
        assert_eq!(letters, "catdog");
    }

    #[test]
    fn test_max_frames_stops_loop() {
        let cli = Cli::parse_from(["wordswarm", "--max-frames", "5"]);
        let mut world = World::with_seed(1);
        let done = AtomicBool::new(false);
        assert_eq!(drive(&mut world, &cli, &done), 5);
    }
}

//! Greed entry point
//!
//! Parses arguments, sets up logging and runs the game in the terminal or
//! headless.

use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use greed::platform::{HeadlessVideo, ScriptedKeyboard, terminal};
use greed::sim::{Group, build_cast};
use greed::{Difficulty, Director, Settings};

const USAGE: &str = "Greed - catch gems (*), dodge rocks (0)

Usage:
  greed [play] [options]
  greed headless --frames <n> [options]

Options:
  -h, --help             Show this help
  --config <file>        JSON settings file
  --seed <n>             RNG seed (default: time based)
  --difficulty <level>   easy | normal | hard";

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
    frames: Option<u64>,
    help: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let first = args.first().cloned().unwrap_or_default();
    let command = match first.as_str() {
        "play" | "headless" => args.remove(0),
        _ => "play".to_string(),
    };
    let options = parse_options(args)?;
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut settings = match &options.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(difficulty) = options.difficulty {
        settings.apply_difficulty(difficulty);
    }
    settings.validate()?;
    let seed = options.seed.unwrap_or_else(time_seed);
    log::info!("Seed: {seed}");

    match command.as_str() {
        "headless" => {
            let frames = options.frames.context("headless mode needs --frames <n>")?;
            headless(settings, seed, frames)
        }
        _ => play(settings, seed),
    }
}

fn parse_options(args: Vec<String>) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        if flag == "-h" || flag == "--help" {
            options.help = true;
            return Ok(options);
        }
        let value = args
            .next()
            .with_context(|| format!("{flag} needs a value\n\n{USAGE}"))?;
        match flag.as_str() {
            "--config" => options.config = Some(PathBuf::from(value)),
            "--seed" => {
                options.seed = Some(value.parse().with_context(|| format!("Bad seed {value:?}"))?)
            }
            "--difficulty" => {
                options.difficulty = Some(
                    Difficulty::from_str(&value)
                        .with_context(|| format!("Unknown difficulty {value:?}"))?,
                )
            }
            "--frames" => {
                options.frames = Some(
                    value
                        .parse()
                        .with_context(|| format!("Bad frame count {value:?}"))?,
                )
            }
            _ => bail!("Unknown option {flag}\n\n{USAGE}"),
        }
    }
    Ok(options)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn play(settings: Settings, seed: u64) -> Result<()> {
    let (keyboard, video) = terminal::open_pair(&settings);
    let mut director = Director::new(keyboard, video, settings.clone(), seed);
    let mut cast = build_cast(&settings, director.rng_mut());
    director.start_game(&mut cast)?;

    print_summary(&cast, director.stats().frames);
    Ok(())
}

fn headless(settings: Settings, seed: u64, frames: u64) -> Result<()> {
    let video = HeadlessVideo::new(&settings, Some(frames));
    let mut director = Director::new(ScriptedKeyboard::default(), video, settings.clone(), seed);
    let mut cast = build_cast(&settings, director.rng_mut());
    director.start_game(&mut cast)?;

    println!("{}", director.video().last_frame().to_text());
    print_summary(&cast, director.stats().frames);
    Ok(())
}

fn print_summary(cast: &greed::sim::Cast, frames: u64) {
    let score = cast
        .get_first_actor(Group::Banners)
        .and_then(|b| b.score())
        .unwrap_or_default();
    println!("Final score: {score} ({frames} frames)");
}

//! Terrain Backbone entry point
//!
//! Generates one map and prints it as JSON on stdout.
//!
//! Usage: `terrain-backbone [DIFFICULTY | SETTINGS.json] [SEED]`

use serde::Serialize;

use terrain_backbone::{Difficulty, GeneratorSettings, MapBuilder, MapError, RngState};

#[derive(Serialize)]
struct Output<'a> {
    difficulty: Difficulty,
    width: u32,
    height: u32,
    seed: &'a RngState,
    points: Vec<(f64, f64)>,
}

fn parse_args(args: &[String]) -> Result<(GeneratorSettings, Option<u64>), MapError> {
    let settings = match args.first() {
        Some(arg) if arg.ends_with(".json") => GeneratorSettings::load(arg)?,
        Some(arg) => GeneratorSettings::from_preset(arg.parse()?),
        None => GeneratorSettings::default(),
    };
    let seed = match args.get(1) {
        Some(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| MapError::InvalidSeed(format!("{raw:?}: {e}")))?,
        ),
        None => None,
    };
    Ok((settings, seed))
}

fn run() -> Result<(), MapError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (settings, seed) = parse_args(&args)?;

    let mut builder = match seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            MapBuilder::new(seed)
        }
        None => MapBuilder::from_entropy(),
    };

    let (path, seed_used) = builder.generate_with(&settings, None)?;

    let output = Output {
        difficulty: settings.difficulty,
        width: settings.resolution.width,
        height: settings.resolution.height,
        seed: &seed_used,
        points: path.to_tuples(),
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Terrain Backbone starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on wasm; nothing to run
}

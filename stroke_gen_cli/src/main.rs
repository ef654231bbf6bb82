use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stroke_gen::config::{GeneratorConfig, Rules};
use stroke_gen::{StrokeResult, StrokesGenerator};

/// Command line driver for the stroke generator.
#[derive(Parser)]
#[command(name = "stroke_gen_cli", version)]
struct Cli {
    /// Generator configuration file (TOML); the built-in one when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Validation rules file (TOML); the built-in one when omitted
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
    /// Seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered geometries.
    List,
    /// Generate strokes for one geometry.
    Generate {
        geometry: String,
        /// JSON file to write the strokes to.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate every geometry and save the results per geometry.
    GenerateAll {
        /// Directory receiving one sub-directory per geometry.
        #[arg(long)]
        output: PathBuf,
        /// Rounds over the geometries.
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn init_logging() {
    if let Ok(path) = std::env::var("STROKE_GEN_LOG") {
        match File::create(&path) {
            Ok(file) => {
                env_logger::Builder::from_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path, e);
                env_logger::Builder::from_default_env().init();
            }
        }
    } else {
        env_logger::Builder::from_default_env().init();
    }
}

fn load_generator(config: Option<&Path>, rules: Option<&Path>) -> StrokeResult<StrokesGenerator> {
    let rules = match rules {
        Some(path) => Rules::from_file(path)?,
        None => Rules::builtin()?,
    };
    let config = match config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::builtin()?,
    };
    StrokesGenerator::new(&rules, &config)
}

fn run(cli: Cli) -> StrokeResult<()> {
    let generator = load_generator(cli.config.as_deref(), cli.rules.as_deref())?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match cli.command {
        Commands::List => {
            for name in generator.list_geometries() {
                println!("{}", name);
            }
        }
        Commands::Generate { geometry, output } => {
            let result = generator.generate(&geometry, &mut rng)?;
            let strokes = result.strokes();
            println!(
                "Generated {}: {} strokes, {} points",
                geometry,
                strokes.stroke_count(),
                strokes.len()
            );
            if let Some(path) = output {
                generator.save(&result, &path)?;
                println!("Wrote {}", path.display());
            }
        }
        Commands::GenerateAll { output, count } => {
            let results = generator.generate_all(&mut rng, count)?;
            let written = generator.save_all(&results, &output)?;
            println!("Wrote {} files to {}", written, output.display());
        }
    }
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

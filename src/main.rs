// Command line entry point.
//
// Usage:
//   diachron generate <language.json> [count] [seed]
//   diachron evolve <language.json> [steps] [seed]
//
// Without a seed the run draws from system entropy.

use diachron::{DiachronResult, History, Language, WordGen};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::str::FromStr;

const DEFAULT_COUNT: usize = 10;
const DEFAULT_STEPS: usize = 10;

enum Command {
    Generate {
        path: String,
        count: usize,
        seed: Option<u64>,
    },
    Evolve {
        path: String,
        steps: usize,
        seed: Option<u64>,
    },
    Help,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = std::env::args().collect::<Vec<_>>();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            log::error!("{}", message);
            print_usage();
            return ExitCode::FAILURE;
        }
    };
    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(name) = args.get(1) else {
        return Err("missing command".to_string());
    };
    if matches!(name.as_str(), "--help" | "-h" | "help") {
        return Ok(Command::Help);
    }
    if args.len() > 5 {
        return Err(format!("unexpected argument: {}", args[5]));
    }
    let path = args
        .get(2)
        .cloned()
        .ok_or_else(|| format!("{} requires a language file", name))?;
    let seed = optional(args, 4, "seed")?;
    match name.as_str() {
        "generate" => Ok(Command::Generate {
            path,
            count: optional(args, 3, "count")?.unwrap_or(DEFAULT_COUNT),
            seed,
        }),
        "evolve" => Ok(Command::Evolve {
            path,
            steps: optional(args, 3, "steps")?.unwrap_or(DEFAULT_STEPS),
            seed,
        }),
        other => Err(format!("unknown command: {}", other)),
    }
}

fn optional<T: FromStr>(args: &[String], index: usize, name: &str) -> Result<Option<T>, String> {
    args.get(index)
        .map(|value| {
            value
                .parse()
                .map_err(|_| format!("{} must be a non-negative number, got {:?}", name, value))
        })
        .transpose()
}

fn load(path: &str) -> DiachronResult<Language> {
    log::info!("loading {}", path);
    Language::load(BufReader::new(File::open(path)?))
}

fn rng(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy)
}

fn run(command: Command) -> DiachronResult<()> {
    match command {
        Command::Generate { path, count, seed } => {
            let language = load(&path)?;
            let mut generator = WordGen::new(&language);
            for word in generator.generate_new_words(count, &mut rng(seed))? {
                println!("{}", word);
            }
        }
        Command::Evolve { path, steps, seed } => {
            let mut history = History::new(load(&path)?);
            history.steps(steps, &mut rng(seed))?;
            println!("{}", history.to_markdown());
            print!("{}", history.to_csv()?);
        }
        Command::Help => print_usage(),
    }
    Ok(())
}

fn print_usage() {
    println!("Usage:");
    println!("  diachron generate <language.json> [count] [seed]   Print new words (default 10)");
    println!("  diachron evolve <language.json> [steps] [seed]     Print a change log and word table (default 10 steps)");
}

use clap::Parser;
use shapley::{GameSpec, Mode, Result, ShapleyInput, ShapleyOutput, ValueFunction};
use std::{fs, path::PathBuf, process};
use tabled::{Table, Tabled};

/// Compute Shapley values for a cooperative game described in a file.
#[derive(Parser, Debug)]
#[command(name = "shapley-cli")]
struct Args {
    /// Game description: a .json GameSpec or a .csv of `members;worth` rows
    /// (coalition members separated by semicolons)
    input: PathBuf,

    /// Sample budget; when set, switches from exact enumeration to Monte
    /// Carlo estimation
    #[arg(long)]
    samples: Option<u64>,

    /// Seed for Monte Carlo sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Relative tolerance for the efficiency diagnostic
    #[arg(long, default_value_t = shapley::DEFAULT_EFFICIENCY_TOLERANCE)]
    tolerance: f64,
}

#[derive(Tabled)]
struct OutputRow {
    player: String,
    value: f64,
    #[tabled(display = "display_as_percent")]
    share: f64,
}

fn display_as_percent(share: &f64) -> String {
    format!("{:.2}%", share * 100.0)
}

fn load_game(path: &PathBuf) -> std::result::Result<(Vec<String>, ValueFunction<String>), String> {
    let is_csv = path.extension().is_some_and(|ext| ext == "csv");

    let spec: GameSpec = if is_csv {
        let file = fs::File::open(path).map_err(|e| e.to_string())?;
        GameSpec::from_csv_reader(file).map_err(|e| e.to_string())?
    } else {
        let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&text).map_err(|e| e.to_string())?
    };

    Ok(spec.into_parts())
}

fn run(args: &Args) -> Result<ShapleyOutput<String>> {
    let (players, value_function) = match load_game(&args.input) {
        Ok(game) => game,
        Err(reason) => {
            eprintln!("Could not read {}: {reason}", args.input.display());
            process::exit(1);
        }
    };

    let mode = match args.samples {
        Some(samples) => Mode::MonteCarlo {
            samples,
            seed: args.seed,
        },
        None => Mode::Exact,
    };

    ShapleyInput::new(players, value_function)
        .with_mode(mode)
        .with_efficiency_tolerance(args.tolerance)
        .compute()
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Err(e) => {
            eprintln!("Error computing Shapley values: {e}");
            process::exit(1);
        }
        Ok(values) => {
            let rows: Vec<OutputRow> = values
                .into_iter()
                .map(|(player, sv)| OutputRow {
                    player,
                    value: sv.value,
                    share: sv.proportion,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
    }
}

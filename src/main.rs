// Command-line front end: load a configuration and a vector batch, evaluate,
// and print one output per vector.
//
//   cargo run --bin perceptron -- --vectors batch.txt --activation heaviside
//   cargo run --bin perceptron -- --spec and_gate.json --vectors batch.txt --json
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use perceptron_studio::io::{load_config, load_vectors};
use perceptron_studio::logging::init_logging;
use perceptron_studio::{Perceptron, PerceptronError, PerceptronSpec};

#[derive(Parser, Debug)]
#[command(name = "perceptron", about = "Evaluate a single perceptron over a batch of vectors")]
struct Args {
    /// Configuration line file: bias first, then the weights.
    #[arg(short, long, default_value = "config.txt")]
    config: String,

    /// Perceptron spec JSON; overrides --config and --activation.
    #[arg(short, long)]
    spec: Option<String>,

    /// One vector per line, comma-separated components.
    #[arg(short, long)]
    vectors: String,

    /// Activation function: sigmoid or heaviside.
    #[arg(short, long, default_value = "sigmoid")]
    activation: String,

    /// Print the outputs as a JSON array instead of one line per vector.
    #[arg(long)]
    json: bool,
}

fn build_perceptron(args: &Args) -> Result<Perceptron, PerceptronError> {
    if let Some(path) = &args.spec {
        let spec = PerceptronSpec::load_json(path)?;
        info!(name = %spec.name, "using perceptron spec");
        return Perceptron::from_spec(&spec);
    }
    let config = load_config(&args.config)?;
    let mut perceptron = Perceptron::default();
    perceptron.configure(config.weights, config.bias, &args.activation)?;
    Ok(perceptron)
}

fn run(args: &Args) -> Result<(), PerceptronError> {
    let perceptron = build_perceptron(args)?;
    let vectors = load_vectors(&args.vectors)?;
    let outputs = perceptron.evaluate(&vectors)?;

    info!(
        vectors = vectors.len(),
        dimension = perceptron.dimension(),
        activation = %perceptron.configuration().activation,
        "run complete"
    );

    if args.json {
        println!("{}", serde_json::to_string(&outputs)?);
    } else {
        for (vector, output) in vectors.iter().zip(outputs.iter()) {
            println!("{:?} -> {}", vector, output);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging() {
        eprintln!("failed to install logger: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Perceptron Studio
///
/// A browser front end for a single perceptron: pick an activation, enter a
/// bias and weights, type or upload input vectors, and see one output per
/// vector.  Served by a synchronous tiny_http server; no JavaScript required.
///
/// Run with:
///   cargo run --bin studio -- --config config.txt
/// Then open http://127.0.0.1:7878

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tiny_http::Server;
use tracing::{error, info};

use perceptron_studio::logging::init_logging;
use state::StudioState;

#[derive(Parser, Debug)]
#[command(name = "studio", about = "Browser studio for exploring a single perceptron")]
struct Args {
    /// Address to serve on.
    #[arg(long, default_value = "127.0.0.1:7878")]
    addr: String,

    /// Configuration line file loaded at startup: bias first, then weights.
    #[arg(short, long, default_value = "config.txt")]
    config: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging() {
        eprintln!("failed to install logger: {}", e);
    }

    let server = match Server::http(&args.addr) {
        Ok(s)  => s,
        Err(e) => {
            error!(addr = %args.addr, "failed to bind HTTP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut initial = StudioState::new(args.config.clone());
    handlers::config::apply_config_file(&mut initial);
    let shared_state = Arc::new(Mutex::new(initial));

    info!("perceptron studio listening on http://{}", args.addr);

    // One thread per request; handlers serialize on the state mutex.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    ExitCode::SUCCESS
}

// Entrypoint for the CLI application.
// - Config is checked first, before the arguments are even looked at.
// - Config and usage problems print a message to stdout and exit 1;
//   anything else propagates out of `main` as an error.

use edge_ingest::{api::ApiClient, config::Config, error::IngestError, ui};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => exit_with_message(&IngestError::from(err)),
    };
    tracing::debug!(?config, "loaded configuration");

    let args = match ui::parse_args(std::env::args_os()) {
        Ok(args) => args,
        // --help / --version
        Err(IngestError::Usage(err)) if !err.use_stderr() => {
            err.print()?;
            return Ok(());
        }
        Err(err) => exit_with_message(&err),
    };

    let client = ApiClient::new(&config)?;
    tracing::debug!(url = client.ingest_url(), timeout = ?config.timeout, "client ready");
    let stdout = io::stdout();
    ui::run(&client, &args, &mut stdout.lock())?;
    Ok(())
}

fn exit_with_message(err: &IngestError) -> ! {
    debug_assert!(err.is_usage_like());
    println!("{err}");
    std::process::exit(1)
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

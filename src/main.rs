use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use slurm_accts::cli::{self, Args};
use slurm_accts::constants;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse_with_legacy_flags();
    init_tracing(args.debug);
    debug!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);

    let config = cli::resolve_config(&args).wrap_err("failed to load configuration")?;
    debug!(?config, "configuration");

    let out = cli::open_output(args.output.as_deref()).wrap_err("failed to open output file")?;
    let today = chrono::Local::now().date_naive();

    cli::run(&args, &config, today, out).wrap_err("failed to build accounting report")?;
    Ok(())
}

/// Logs go to stderr so printed commands on stdout stay clean.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .init();
}

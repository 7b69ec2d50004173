use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod driver;

use driver::{run, Cli};

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Backdrop starting");
    if let Err(e) = run(Cli::parse()) {
        error!("Backdrop error: {e}");
        std::process::exit(1);
    }
}

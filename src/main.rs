use clap::Parser;
use clipbridge::cli::Cli;
use clipbridge::console;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = console::run(cli).await {
        tracing::error!(error = %e, "console failed");
        eprintln!("clipbridge: {e}");
        std::process::exit(1);
    }
}

use clap::Parser;
use ml_catalog_mock::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (profile, args) = cli.command.into_parts();

    cli::serve::run(profile, args).await
}

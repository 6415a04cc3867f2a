use clap::{Parser, Subcommand};

mod discover;
mod sweep;

#[derive(Debug, Parser)]
#[command(name = "guardian")]
#[command(about = "Locate a storefront's marketplace listings and flag fraudulent ones")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover a shop's listings and preview or submit moderation flags
    Sweep(sweep::SweepArgs),
    /// Run discovery only and print the verified listings
    Discover(discover::DiscoverArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sweep(args) => sweep::run(args).await,
        Commands::Discover(args) => discover::run(args).await,
    }
}

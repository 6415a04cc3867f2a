//! The `discover` subcommand: discovery only, no moderation action.
//!
//! Useful for checking what a sweep would target before committing to a
//! run, or for diagnosing which strategy a shop is reachable through
//! (with `RUST_LOG=guardian_sweep=debug`).

use std::time::Duration;

use clap::Args;

use guardian_core::{load_app_config, ShopTarget};
use guardian_reverb::ReverbClient;
use guardian_sweep::{discover, DiscoverySettings};

#[derive(Debug, Args)]
pub(crate) struct DiscoverArgs {
    /// Shop URL (https://reverb.com/shop/<slug>) or bare slug
    pub shop: String,

    /// Bearer credential for the marketplace API
    #[arg(long, env = "REVERB_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Emit the verified listings as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub(crate) async fn run(args: DiscoverArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        !args.token.trim().is_empty(),
        "missing bearer credential — discovery authenticates against the search surface"
    );

    let app = load_app_config()?;
    let target = ShopTarget::parse(&args.shop)?;

    let client = ReverbClient::with_base_url(
        &args.token,
        app.request_timeout_secs,
        &app.user_agent,
        &app.api_base_url,
    )?;

    let settings = DiscoverySettings {
        max_pages_per_strategy: app.max_pages_per_strategy,
        page_delay: Duration::from_millis(app.page_delay_ms),
        max_barren_strategies: app.max_barren_strategies,
    };

    let found = discover(&client, &target, &settings).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("discovery failed: no listings found for shop \"{target}\"");
        return Ok(());
    }

    for listing in &found {
        let title = if listing.title.is_empty() {
            "(no title)"
        } else {
            listing.title.as_str()
        };
        println!("{:<12} {title}", listing.id);
    }
    println!("{} listing(s) verified for \"{target}\"", found.len());
    Ok(())
}

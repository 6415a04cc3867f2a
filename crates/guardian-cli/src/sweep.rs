//! The `sweep` subcommand: full pipeline from shop identifier to run
//! summary.
//!
//! Operator settings are validated before any network call — a missing
//! credential or out-of-range delay never reaches discovery. Per-item
//! failures surface in the summary, not the exit code: this is an
//! interactive tool, so the only hard failures are configuration errors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use guardian_core::{
    load_app_config, AppConfig, ReportOutcome, RunConfig, RunMode, ShopTarget, Tally,
    VerifiedListing,
};
use guardian_reverb::{extract_listing_ids, html, ReverbClient};
use guardian_sweep::{discover, execute, DiscoverySettings};

#[derive(Debug, Args)]
pub(crate) struct SweepArgs {
    /// Shop URL (https://reverb.com/shop/<slug>) or bare slug
    pub shop: String,

    /// Submit live moderation flags instead of the default dry-run preview
    #[arg(long)]
    pub live: bool,

    /// Seconds to wait between moderation requests (1-10)
    #[arg(long, default_value_t = 2)]
    pub delay: u64,

    /// Bearer credential for the marketplace API
    #[arg(long, env = "REVERB_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Act on these listing ids directly, skipping discovery and
    /// membership verification (you vouch for them)
    #[arg(long = "seed-id", value_name = "ID")]
    pub seed_ids: Vec<String>,

    /// Harvest listing ids from this shop page's HTML instead of API
    /// discovery (verification skipped)
    #[arg(long, value_name = "URL", conflicts_with = "seed_ids")]
    pub scrape_page: Option<String>,

    /// Emit the run summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub(crate) async fn run(args: SweepArgs) -> anyhow::Result<()> {
    let app = load_app_config()?;

    let mode = if args.live {
        RunMode::Live
    } else {
        RunMode::DryRun
    };
    let run_config = RunConfig::new(mode, args.delay, &args.token)?;
    let target = ShopTarget::parse(&args.shop)?;

    let client = ReverbClient::with_base_url(
        &run_config.bearer_token,
        app.request_timeout_secs,
        &app.user_agent,
        &app.api_base_url,
    )?;

    let listings = gather_listings(&args, &app, &client, &target).await?;
    if listings.is_empty() {
        println!("discovery failed: no listings found for shop \"{target}\"");
        println!("(the marketplace may be hiding this shop's listings from your account)");
        return Ok(());
    }

    println!(
        "{} listing(s) queued for {} run against \"{target}\"",
        listings.len(),
        run_config.mode
    );

    // Cooperative abort: ctrl-c stops between items and the partial
    // summary is still rendered.
    let abort = Arc::new(AtomicBool::new(false));
    {
        let abort = Arc::clone(&abort);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received; stopping after the current item");
                abort.store(true, Ordering::Relaxed);
            }
        });
    }

    let outcomes = execute(
        &client,
        &listings,
        run_config.mode,
        run_config.delay,
        &abort,
    )
    .await;

    render(&outcomes, args.json)
}

/// Resolves the listing set to act on: operator seeds, a scraped shop
/// page, or API discovery — in that precedence order.
async fn gather_listings(
    args: &SweepArgs,
    app: &AppConfig,
    client: &ReverbClient,
    target: &ShopTarget,
) -> anyhow::Result<Vec<VerifiedListing>> {
    if !args.seed_ids.is_empty() {
        tracing::info!(
            count = args.seed_ids.len(),
            "using operator-seeded listing ids; discovery and verification skipped"
        );
        return Ok(args
            .seed_ids
            .iter()
            .map(|id| VerifiedListing::seeded(id.as_str()))
            .collect());
    }

    if let Some(page_url) = &args.scrape_page {
        let body = html::fetch_shop_page(page_url, app.request_timeout_secs, &app.user_agent).await?;
        let ids = extract_listing_ids(&body);
        tracing::info!(count = ids.len(), %page_url, "harvested listing ids from shop page");
        return Ok(ids.into_iter().map(VerifiedListing::seeded).collect());
    }

    let settings = DiscoverySettings {
        max_pages_per_strategy: app.max_pages_per_strategy,
        page_delay: Duration::from_millis(app.page_delay_ms),
        max_barren_strategies: app.max_barren_strategies,
    };
    Ok(discover(client, target, &settings).await)
}

fn render(outcomes: &[ReportOutcome], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(outcomes)?);
        return Ok(());
    }

    for outcome in outcomes {
        let status = outcome
            .status_code
            .map_or_else(|| "-".to_owned(), |s| s.to_string());
        let title = if outcome.title.is_empty() {
            "(no title)"
        } else {
            outcome.title.as_str()
        };
        println!(
            "{:<12} {:<10} {:>4}  {}",
            outcome.listing_id,
            outcome.result.to_string(),
            status,
            title
        );
    }

    let tally = Tally::of(outcomes);
    println!(
        "summary: {} previewed, {} succeeded, {} not-found, {} forbidden, {} failed",
        tally.previewed, tally.succeeded, tally.not_found, tally.forbidden, tally.failed
    );
    Ok(())
}

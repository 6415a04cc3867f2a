pub mod config;
pub mod error;
pub mod shop;
pub mod types;

pub use config::{load_app_config, load_app_config_from_env, AppConfig, RunConfig};
pub use error::{ConfigError, TargetError};
pub use shop::ShopTarget;
pub use types::{ActionResult, CandidateListing, ReportOutcome, RunMode, Tally, VerifiedListing};

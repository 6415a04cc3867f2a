use thiserror::Error;

/// Errors from normalizing operator input into a [`crate::ShopTarget`].
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("shop identifier is empty")]
    Empty,

    #[error("no /shop/<slug> segment in \"{input}\"")]
    MissingShopSegment { input: String },

    #[error("shop slug \"{slug}\" contains characters outside [a-z0-9._-]")]
    InvalidSlug { slug: String },
}

/// Errors from run or environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("request delay {secs}s is outside the allowed 1-10s range")]
    DelayOutOfRange { secs: u64 },

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

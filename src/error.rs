use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `neurogate`.
///
/// Errors are reserved for policy lookup and configuration failures. A safety
/// violation inside a message is *not* an error: it is encoded as a
/// [`crate::verdict::Violation`] inside the evaluation result so that the
/// gateway always returns a structured verdict and never aborts.
#[derive(Debug, Error)]
pub enum GatewayError {
    // ── Policy ──────────────────────────────────────────────────────────
    #[error("policy: {0}")]
    Policy(#[from] PolicyError),

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

// ─── Policy errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PolicyError {
    /// Region is unknown to the policy table. Missing bounds are treated
    /// identically: unknown and misconfigured regions both fail closed.
    #[error("unauthorized region: {region}")]
    UnauthorizedRegion { region: String },
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse policy file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, GatewayError>;

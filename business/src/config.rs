use std::env::vars;
use std::time::Duration;

use serde::Deserialize;

use crate::delivery::{Affordance, UnknownAffordance};

/// Prefix of environment variables read by [`PaymentConfig::from_env`].
pub const ENV_PREFIX: &str = "PAYLINK_";

/// Runtime settings of the generator.
///
/// The defaults give a half-second generate pause and a 200px QR; every field can
/// be overridden with a `PAYLINK_`-prefixed environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    /// Cosmetic pause between pressing generate and the link appearing.
    pub generate_delay: Duration,
    /// How long the copy button shows "Copied!".
    pub copy_feedback: Duration,
    /// Target edge length of the on-screen QR code, in pixels.
    pub qr_size: u32,
    /// Result actions offered to the user, in display order.
    pub affordances: Vec<Affordance>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            generate_delay: Duration::from_millis(500),
            copy_feedback: Duration::from_secs(2),
            qr_size: 200,
            affordances: Affordance::ALL.to_vec(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("PAYLINK_AFFORDANCES: {0}")]
    Affordance(#[from] UnknownAffordance),
    #[error("PAYLINK_QR_SIZE must be between 64 and 1024, got {0}")]
    QrSize(u32),
}

// Every key is optional; missing keys keep the default.
#[derive(Debug, Deserialize)]
struct RawConfig {
    generate_delay_ms: Option<u64>,
    copy_feedback_ms: Option<u64>,
    qr_size: Option<u32>,
    affordances: Option<String>,
}

impl PaymentConfig {
    /// Config with no generation delay, for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            generate_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Reads overrides from `PAYLINK_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(vars())
    }

    /// Reads overrides from `(key, value)` pairs; keys without the prefix are ignored.
    pub fn from_vars<I, K, V>(iter: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = iter
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_ref()
                    .strip_prefix(ENV_PREFIX)
                    .map(|key| (key.to_owned(), value.as_ref().to_owned()))
            })
            .collect();

        if scoped.is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_env::from_iter(scoped)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = raw.generate_delay_ms {
            config.generate_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = raw.copy_feedback_ms {
            config.copy_feedback = Duration::from_millis(ms);
        }
        if let Some(size) = raw.qr_size {
            if !(64..=1024).contains(&size) {
                return Err(ConfigError::QrSize(size));
            }
            config.qr_size = size;
        }
        if let Some(list) = raw.affordances {
            config.affordances = parse_affordances(&list)?;
        }

        log::info!(
            "config loaded: delay={:?} feedback={:?} qr_size={} affordances={:?}",
            config.generate_delay,
            config.copy_feedback,
            config.qr_size,
            config.affordances
        );
        Ok(config)
    }

    pub fn offers(&self, affordance: Affordance) -> bool {
        self.affordances.contains(&affordance)
    }
}

/// Parses a comma separated list, dropping duplicates and keeping order.
fn parse_affordances(list: &str) -> Result<Vec<Affordance>, UnknownAffordance> {
    let mut affordances = Vec::new();
    for item in list.split(',').filter(|item| !item.trim().is_empty()) {
        let affordance: Affordance = item.parse()?;
        if !affordances.contains(&affordance) {
            affordances.push(affordance);
        }
    }
    Ok(affordances)
}

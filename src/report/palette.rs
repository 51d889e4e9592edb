//! Status Colors
//!
//! Colors come from an optional branding provider. A missing provider, or
//! one that fails for any status, falls back to the built-in triple so a
//! palette is always complete and self-consistent.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::analysis::Status;

pub const FALLBACK_PASS_COLOR: &str = "#10b981";
pub const FALLBACK_WARN_COLOR: &str = "#f59e0b";
pub const FALLBACK_FAIL_COLOR: &str = "#ef4444";

/// Errors a branding provider may report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BrandingError {
    #[error("No color token defined for status {0}")]
    MissingToken(Status),

    #[error("Branding provider failed: {0}")]
    Provider(String),
}

/// Maps a status to a color token (usually a `#rrggbb` hex string).
pub trait BrandingProvider {
    fn color_for(&self, status: Status) -> Result<String, BrandingError>;
}

/// A resolved set of status colors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusPalette {
    pub pass: String,
    pub warn: String,
    pub fail: String,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self::fallback()
    }
}

impl StatusPalette {
    /// The built-in colors.
    pub fn fallback() -> Self {
        Self {
            pass: FALLBACK_PASS_COLOR.to_string(),
            warn: FALLBACK_WARN_COLOR.to_string(),
            fail: FALLBACK_FAIL_COLOR.to_string(),
        }
    }

    /// Resolves all three colors from a provider.
    pub fn resolve(provider: Option<&dyn BrandingProvider>) -> Self {
        let Some(provider) = provider else {
            return Self::fallback();
        };

        let lookup = |status| provider.color_for(status);
        match (lookup(Status::Pass), lookup(Status::Warn), lookup(Status::Fail)) {
            (Ok(pass), Ok(warn), Ok(fail)) => Self { pass, warn, fail },
            (pass, warn, fail) => {
                let error = [pass.err(), warn.err(), fail.err()]
                    .into_iter()
                    .flatten()
                    .next();
                if let Some(e) = error {
                    warn!("Using fallback status colors: {}", e);
                }
                Self::fallback()
            }
        }
    }

    /// Color for a status.
    pub fn color(&self, status: Status) -> &str {
        match status {
            Status::Pass => &self.pass,
            Status::Warn => &self.warn,
            Status::Fail => &self.fail,
        }
    }
}

impl BrandingProvider for StatusPalette {
    fn color_for(&self, status: Status) -> Result<String, BrandingError> {
        Ok(self.color(status).to_string())
    }
}

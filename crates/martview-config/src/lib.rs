//! Catalog configuration: paginator window constants and scroll lookahead.
//!
//! Configuration is plain data. The engine converts it into its own policy
//! types, so nothing in this crate depends on `martview-core`.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

///
/// CatalogConfig
///
/// Root of a catalog TOML file. Every section is optional.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub paginator: PaginatorConfig,
    pub scroll: ScrollConfig,
}

impl CatalogConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paginator.validate()?;
        self.scroll.validate()
    }
}

///
/// PaginatorConfig
///
/// Digg-style page window constants.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginatorConfig {
    /// Pages shown while the current page sits near the start.
    pub leading_displayed: u32,

    /// Pages shown while the current page sits near the end.
    pub trailing_displayed: u32,

    pub leading_threshold: u32,
    pub trailing_threshold: u32,

    /// Pages pinned on the far side of an ellipsis.
    pub outside_range_size: u32,

    /// Pages shown on each side of the current page in the middle band.
    pub adjacent: u32,

    /// Render previous/next controls only.
    pub hide_page_numbers: bool,
}

impl PaginatorConfig {
    pub const DEFAULT_LEADING_DISPLAYED: u32 = 8;
    pub const DEFAULT_TRAILING_DISPLAYED: u32 = 8;
    pub const DEFAULT_LEADING_THRESHOLD: u32 = 6;
    pub const DEFAULT_TRAILING_THRESHOLD: u32 = 6;
    pub const DEFAULT_OUTSIDE_RANGE_SIZE: u32 = 2;
    pub const DEFAULT_ADJACENT: u32 = 2;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leading_displayed == 0 {
            return Err(ConfigError::invalid(
                "paginator.leading_displayed",
                "must be at least 1",
            ));
        }
        if self.trailing_displayed == 0 {
            return Err(ConfigError::invalid(
                "paginator.trailing_displayed",
                "must be at least 1",
            ));
        }
        if self.leading_threshold > self.leading_displayed {
            return Err(ConfigError::invalid(
                "paginator.leading_threshold",
                format!(
                    "{} exceeds leading_displayed {}",
                    self.leading_threshold, self.leading_displayed
                ),
            ));
        }
        if self.trailing_threshold > self.trailing_displayed {
            return Err(ConfigError::invalid(
                "paginator.trailing_threshold",
                format!(
                    "{} exceeds trailing_displayed {}",
                    self.trailing_threshold, self.trailing_displayed
                ),
            ));
        }

        // The middle band must leave at least one hidden page on each side,
        // between the outside range and the adjacent pages.
        let middle_reach = self
            .adjacent
            .saturating_add(self.outside_range_size)
            .saturating_add(1);
        if self.leading_threshold < middle_reach {
            return Err(ConfigError::invalid(
                "paginator.adjacent",
                format!(
                    "adjacent {} plus outside_range_size {} must stay below leading_threshold {}",
                    self.adjacent, self.outside_range_size, self.leading_threshold
                ),
            ));
        }
        if self.trailing_threshold < middle_reach {
            return Err(ConfigError::invalid(
                "paginator.adjacent",
                format!(
                    "adjacent {} plus outside_range_size {} must stay below trailing_threshold {}",
                    self.adjacent, self.outside_range_size, self.trailing_threshold
                ),
            ));
        }

        Ok(())
    }
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            leading_displayed: Self::DEFAULT_LEADING_DISPLAYED,
            trailing_displayed: Self::DEFAULT_TRAILING_DISPLAYED,
            leading_threshold: Self::DEFAULT_LEADING_THRESHOLD,
            trailing_threshold: Self::DEFAULT_TRAILING_THRESHOLD,
            outside_range_size: Self::DEFAULT_OUTSIDE_RANGE_SIZE,
            adjacent: Self::DEFAULT_ADJACENT,
            hide_page_numbers: false,
        }
    }
}

///
/// ScrollConfig
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Fetch the next page once the unseen content is shorter than this many
    /// viewport heights.
    pub lookahead_viewports: f64,
}

impl ScrollConfig {
    pub const DEFAULT_LOOKAHEAD_VIEWPORTS: f64 = 2.0;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lookahead_viewports.is_finite() || self.lookahead_viewports < 0.0 {
            return Err(ConfigError::invalid(
                "scroll.lookahead_viewports",
                format!(
                    "expected a finite non-negative number, found {}",
                    self.lookahead_viewports
                ),
            ));
        }

        Ok(())
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            lookahead_viewports: Self::DEFAULT_LOOKAHEAD_VIEWPORTS,
        }
    }
}

///
/// TESTS
///

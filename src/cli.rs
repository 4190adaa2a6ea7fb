//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, DesignConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
#[must_use]
pub struct Args {
    /// Load a design from a TOML file.
    #[arg(long, conflicts_with = "preset")]
    pub design: Option<PathBuf>,

    /// Use a built-in design: off_grid_cabin, day_night_cabin, hybrid_home,
    /// grid_tie_5kw or sprinkler.
    #[arg(long)]
    pub preset: Option<String>,

    /// Write the derivation log to a CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Print the sizing result as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Start the REST API server after sizing.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, env = "SOLAR_SIZER_PORT", default_value_t = 3000)]
    pub port: u16,
}

impl Args {
    /// The design selected by `--design` or `--preset`, falling back to the
    /// `off_grid_cabin` preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unreadable design file or an unknown preset.
    pub fn load_design(&self) -> Result<DesignConfig, ConfigError> {
        match (&self.design, &self.preset) {
            (Some(path), _) => DesignConfig::from_toml_file(path),
            (None, Some(name)) => DesignConfig::from_preset(name),
            (None, None) => DesignConfig::from_preset("off_grid_cabin"),
        }
    }
}

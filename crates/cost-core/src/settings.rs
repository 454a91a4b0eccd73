use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Estimate a monthly CDN bill from aggregated usage-log summaries
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cdn-cost",
    about = "Estimate a monthly CDN bill from aggregated usage-log summaries",
    version
)]
pub struct Settings {
    /// Usage summary JSON files, or directories to scan for *.json files
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print the accumulated counters before the estimate
    #[arg(long)]
    pub dump: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but from an explicit argument list.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// Apply the `--debug` override.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

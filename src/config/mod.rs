pub mod cli;
pub mod toml_config;

pub const DEFAULT_INPUT: &str = "Bans.cfg";
pub const DEFAULT_EXPIRED_FILE: &str = "expired_bans.cfg";
pub const DEFAULT_ACTIVE_FILE: &str = "active_bans.cfg";

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::{DEFAULT_ACTIVE_FILE, DEFAULT_EXPIRED_FILE, DEFAULT_INPUT};
    use crate::core::clock::parse_reference_time;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_distinct, validate_file_name, validate_path, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "ban-sweep")]
    #[command(about = "Splits a ban list into expired and active bans")]
    pub struct CliConfig {
        /// Ban list to read
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        pub input: String,

        /// Directory the two output files are created in
        #[arg(short, long, default_value = ".")]
        pub output_dir: String,

        #[arg(long, default_value = DEFAULT_EXPIRED_FILE)]
        pub expired_file: String,

        #[arg(long, default_value = DEFAULT_ACTIVE_FILE)]
        pub active_file: String,

        /// Reference time, as Unix seconds or RFC 3339 (defaults to the current time)
        #[arg(long)]
        pub now: Option<String>,

        /// TOML configuration file; replaces the path flags above
        #[arg(short, long)]
        pub config: Option<String>,

        /// Print the run summary as JSON
        #[arg(long)]
        pub json: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log memory usage per stage")]
        pub monitor: bool,

        #[serde(skip)]
        #[arg(skip)]
        pub resolved_now: Option<i64>,
    }

    impl CliConfig {
        /// Parses `--now` once so every later read sees the same value.
        pub fn resolve_now(&mut self) -> Result<()> {
            self.resolved_now = self.now.as_deref().map(parse_reference_time).transpose()?;
            Ok(())
        }
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            &self.input
        }

        fn expired_file(&self) -> &str {
            &self.expired_file
        }

        fn active_file(&self) -> &str {
            &self.active_file
        }

        fn now(&self) -> Option<i64> {
            self.resolved_now
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("input", &self.input)?;
            validate_path("output_dir", &self.output_dir)?;
            validate_file_name("expired_file", &self.expired_file)?;
            validate_file_name("active_file", &self.active_file)?;
            validate_distinct(
                "expired_file",
                &self.expired_file,
                "active_file",
                &self.active_file,
            )?;
            if let Some(now) = &self.now {
                parse_reference_time(now)?;
            }
            Ok(())
        }
    }

}

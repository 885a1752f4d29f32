pub mod batch_config;
pub mod cli;

use crate::core::{ConfigProvider, ExtractOptions};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::core::DEFAULT_MIN_ALPHA;
#[cfg(feature = "cli")]
use crate::utils::paths::{suggest_output_path, DEFAULT_OUTPUT_SUFFIX};
#[cfg(feature = "cli")]
use clap::Parser;

/// A single white/black pair and where its transparent PNG goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaJob {
    pub white: String,
    pub black: String,
    pub output: String,
    pub options: ExtractOptions,
}

impl ConfigProvider for AlphaJob {
    fn white_path(&self) -> &str {
        &self.white
    }

    fn black_path(&self) -> &str {
        &self.black
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn extract_options(&self) -> ExtractOptions {
        self.options
    }
}

impl Validate for AlphaJob {
    fn validate(&self) -> Result<()> {
        validation::validate_input_file("image_on_white", &self.white)?;
        validation::validate_input_file("image_on_black", &self.black)?;
        validation::validate_path("output", &self.output)?;
        validation::validate_range("min_alpha", self.options.min_alpha, 0.0, 1.0)?;
        validation::warn_if_not_png(&self.output);
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "pngalpha")]
#[command(about = "Creates a transparent PNG file from two images: one on a white background and one on a black background")]
#[command(after_help = "Example: pngalpha image_white.png image_black.png output.png")]
pub struct CliConfig {
    /// Image of the subject on a white background
    pub image_on_white: String,

    /// The same subject on a black background
    pub image_on_black: String,

    /// Output PNG path (defaults to <white_stem>_transparent.png next to the white image)
    pub output: Option<String>,

    /// Pixels with alpha at or below this keep no colour
    #[arg(long, default_value_t = DEFAULT_MIN_ALPHA)]
    pub min_alpha: f64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn to_job(&self) -> AlphaJob {
        let output = self.output.clone().unwrap_or_else(|| {
            suggest_output_path(
                std::path::Path::new(&self.image_on_white),
                DEFAULT_OUTPUT_SUFFIX,
                None,
            )
            .to_string_lossy()
            .into_owned()
        });

        AlphaJob {
            white: self.image_on_white.clone(),
            black: self.image_on_black.clone(),
            output,
            options: ExtractOptions {
                min_alpha: self.min_alpha,
            },
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.to_job().validate()
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::error::AlphaError;

    #[test]
    fn test_parse_three_positionals() {
        let config =
            CliConfig::try_parse_from(["pngalpha", "w.png", "b.png", "out.png"]).unwrap();
        let job = config.to_job();

        assert_eq!(job.white, "w.png");
        assert_eq!(job.black, "b.png");
        assert_eq!(job.output, "out.png");
        assert_eq!(job.options, ExtractOptions::default());
    }

    #[test]
    fn test_output_defaults_next_to_white() {
        let config =
            CliConfig::try_parse_from(["pngalpha", "shots/cup_white.png", "shots/cup_black.png"])
                .unwrap();

        assert_eq!(config.to_job().output, "shots/cup_white_transparent.png");
    }

    #[test]
    fn test_missing_inputs_rejected_by_parser() {
        assert!(CliConfig::try_parse_from(["pngalpha", "only_one.png"]).is_err());
    }

    #[test]
    fn test_min_alpha_flag() {
        let config = CliConfig::try_parse_from([
            "pngalpha",
            "w.png",
            "b.png",
            "--min-alpha",
            "0.2",
        ])
        .unwrap();
        assert_eq!(config.to_job().options.min_alpha, 0.2);
    }

    #[test]
    fn test_validate_reports_missing_white_input() {
        let config =
            CliConfig::try_parse_from(["pngalpha", "nope_white.png", "nope_black.png"]).unwrap();

        assert!(matches!(
            config.validate(),
            Err(AlphaError::InputNotFound { .. })
        ));
    }
}

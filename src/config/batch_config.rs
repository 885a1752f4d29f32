use crate::config::AlphaJob;
use crate::core::{ExtractOptions, DEFAULT_MIN_ALPHA};
use crate::utils::error::{AlphaError, Result};
use crate::utils::paths::{suggest_output_path, DEFAULT_OUTPUT_SUFFIX};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchSettings,
    pub extract: Option<ExtractSettings>,
    pub monitoring: Option<MonitoringConfig>,
    #[serde(default)]
    pub jobs: Vec<JobEntry>,

    /// Directory relative job paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    pub name: String,
    pub output_dir: Option<String>,
    pub suffix: Option<String>,
    pub continue_on_error: Option<bool>,
    pub report: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractSettings {
    pub min_alpha: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEntry {
    pub white: String,
    pub black: String,
    pub output: Option<String>,
    pub min_alpha: Option<f64>,
}

impl BatchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AlphaError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path
            .as_ref()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AlphaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ASSET_DIR})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AlphaError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn name(&self) -> &str {
        &self.batch.name
    }

    pub fn suffix(&self) -> &str {
        self.batch.suffix.as_deref().unwrap_or(DEFAULT_OUTPUT_SUFFIX)
    }

    pub fn continue_on_error(&self) -> bool {
        self.batch.continue_on_error.unwrap_or(true)
    }

    pub fn report_path(&self) -> Option<PathBuf> {
        self.batch.report.as_deref().map(|p| self.resolve(p))
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    pub fn default_min_alpha(&self) -> f64 {
        self.extract
            .as_ref()
            .and_then(|e| e.min_alpha)
            .unwrap_or(DEFAULT_MIN_ALPHA)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        }
    }

    /// Expands `[[jobs]]` into concrete jobs with resolved paths and options.
    pub fn jobs(&self) -> Vec<AlphaJob> {
        let output_dir = self.batch.output_dir.as_deref().map(|d| self.resolve(d));

        self.jobs
            .iter()
            .map(|entry| {
                let white = self.resolve(&entry.white);
                let output = match &entry.output {
                    Some(output) => self.resolve(output),
                    None => suggest_output_path(&white, self.suffix(), output_dir.as_deref()),
                };

                AlphaJob {
                    white: white.to_string_lossy().into_owned(),
                    black: self.resolve(&entry.black).to_string_lossy().into_owned(),
                    output: output.to_string_lossy().into_owned(),
                    options: ExtractOptions {
                        min_alpha: entry.min_alpha.unwrap_or_else(|| self.default_min_alpha()),
                    },
                }
            })
            .collect()
    }
}

impl Validate for BatchConfig {
    /// Structural checks only; input files are checked per job at run time.
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("batch.name", &self.batch.name)?;

        if self.jobs.is_empty() {
            return Err(AlphaError::ConfigValidationError {
                field: "jobs".to_string(),
                message: "At least one [[jobs]] entry is required".to_string(),
            });
        }

        let suffix = self.suffix();
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(AlphaError::InvalidConfigValueError {
                field: "batch.suffix".to_string(),
                value: suffix.to_string(),
                reason: "Suffix cannot contain path separators".to_string(),
            });
        }

        if let Some(output_dir) = &self.batch.output_dir {
            validation::validate_path("batch.output_dir", output_dir)?;
        }

        // 兩個 job 寫到同一個輸出會互相覆蓋
        let mut outputs: HashMap<&str, usize> = HashMap::new();
        let jobs = self.jobs();

        for (index, job) in jobs.iter().enumerate() {
            validation::validate_path(&format!("jobs[{}].white", index), &job.white)?;
            validation::validate_path(&format!("jobs[{}].black", index), &job.black)?;
            validation::validate_path(&format!("jobs[{}].output", index), &job.output)?;
            validation::validate_range(
                &format!("jobs[{}].min_alpha", index),
                job.options.min_alpha,
                0.0,
                1.0,
            )?;

            if let Some(first) = outputs.insert(job.output.as_str(), index) {
                return Err(AlphaError::InvalidConfigValueError {
                    field: format!("jobs[{}].output", index),
                    value: job.output.clone(),
                    reason: format!("Same output as jobs[{}]; set an explicit output", first),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[batch]
name = "product shots"
output_dir = "out"

[extract]
min_alpha = 0.02

[[jobs]]
white = "cup_white.png"
black = "cup_black.png"

[[jobs]]
white = "lamp_white.jpg"
black = "lamp_black.jpg"
output = "custom/lamp.png"
min_alpha = 0.1
"#;

    #[test]
    fn test_parse_and_expand_jobs() {
        let config = BatchConfig::from_toml_str(SAMPLE).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.name(), "product shots");
        assert!(config.continue_on_error());
        assert!(!config.monitoring_enabled());

        let jobs = config.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].output, "out/cup_white_transparent.png");
        assert_eq!(jobs[0].options.min_alpha, 0.02);
        assert_eq!(jobs[1].output, "custom/lamp.png");
        assert_eq!(jobs[1].options.min_alpha, 0.1);
    }

    #[test]
    fn test_base_dir_resolves_relative_paths() {
        let mut config = BatchConfig::from_toml_str(SAMPLE).unwrap();
        config.base_dir = Some(PathBuf::from("assets"));

        let jobs = config.jobs();
        assert_eq!(jobs[0].white, "assets/cup_white.png");
        assert_eq!(jobs[0].output, "assets/out/cup_white_transparent.png");
        assert_eq!(jobs[1].output, "assets/custom/lamp.png");
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("PNGALPHA_TEST_SHOTS", "/tmp/shots");
        let config = BatchConfig::from_toml_str(
            r#"
[batch]
name = "env"

[[jobs]]
white = "${PNGALPHA_TEST_SHOTS}/a_white.png"
black = "${PNGALPHA_TEST_UNSET_VAR}/a_black.png"
"#,
        )
        .unwrap();

        let jobs = config.jobs();
        assert_eq!(jobs[0].white, "/tmp/shots/a_white.png");
        assert_eq!(jobs[0].black, "${PNGALPHA_TEST_UNSET_VAR}/a_black.png");
        assert_eq!(jobs[0].output, "/tmp/shots/a_white_transparent.png");
    }

    #[test]
    fn test_validation_failures() {
        let no_jobs = BatchConfig::from_toml_str("[batch]\nname = \"empty\"\n").unwrap();
        assert!(matches!(
            no_jobs.validate(),
            Err(AlphaError::ConfigValidationError { .. })
        ));

        let bad_suffix = BatchConfig::from_toml_str(
            "[batch]\nname = \"x\"\nsuffix = \"a/b\"\n[[jobs]]\nwhite = \"w.png\"\nblack = \"b.png\"\n",
        )
        .unwrap();
        assert!(bad_suffix.validate().is_err());

        let bad_alpha = BatchConfig::from_toml_str(
            "[batch]\nname = \"x\"\n[extract]\nmin_alpha = 1.5\n[[jobs]]\nwhite = \"w.png\"\nblack = \"b.png\"\n",
        )
        .unwrap();
        assert!(bad_alpha.validate().is_err());

        let blank_name = BatchConfig::from_toml_str(
            "[batch]\nname = \"  \"\n[[jobs]]\nwhite = \"w.png\"\nblack = \"b.png\"\n",
        )
        .unwrap();
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_duplicate_outputs_rejected() {
        let config = BatchConfig::from_toml_str(
            r#"
[batch]
name = "clash"
output_dir = "out"

[[jobs]]
white = "day/cup_white.png"
black = "day/cup_black.png"

[[jobs]]
white = "night/cup_white.png"
black = "night/cup_black.png"
"#,
        )
        .unwrap();

        match config.validate() {
            Err(AlphaError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "jobs[1].output");
                assert_eq!(value, "out/cup_white_transparent.png");
            }
            other => panic!("expected duplicate output error, got {:?}", other),
        }

        let mut fixed = config.clone();
        fixed.jobs[1].output = Some("out/night_cup.png".to_string());
        assert!(fixed.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        let err = BatchConfig::from_toml_str("[batch\nname=").unwrap_err();
        assert!(matches!(err, AlphaError::ConfigValidationError { .. }));
    }
}

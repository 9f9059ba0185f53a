use crate::Result;
use crate::config::Color;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Number of scoring bands
pub const NUM_SCORING_BANDS: usize = 3;

/// Default scoring thresholds: `[orange_threshold, green_threshold]`
/// Scores < 50 are red (needs attention)
/// Scores 50-79 are orange (acceptable)
/// Scores >= 80 are green (excellent)
const fn default_scoring_bands() -> [f64; NUM_SCORING_BANDS - 1] {
    [50.0, 80.0]
}

/// Default colors for scoring bands: red, orange, green
const fn default_colors_for_scoring_bands() -> [Color; NUM_SCORING_BANDS] {
    [
        Color(Srgb::new(255, 0, 0)),   // Bad: Red
        Color(Srgb::new(255, 165, 0)), // Good: Orange
        Color(Srgb::new(0, 255, 0)),   // Excellent: Green
    ]
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Personal access token for API requests; the command line and the
    /// `GITHUB_TOKEN` environment variable take precedence over this value
    #[serde(default)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Thresholds splitting scores into bad/good/excellent bands
    #[serde(default = "default_scoring_bands")]
    pub scoring_bands: [f64; NUM_SCORING_BANDS - 1],

    /// Colors used when rendering each band
    #[serde(default = "default_colors_for_scoring_bands")]
    pub colors_for_scoring_bands: [Color; NUM_SCORING_BANDS],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: default_api_base_url(),
            scoring_bands: default_scoring_bands(),
            colors_for_scoring_bands: default_colors_for_scoring_bands(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Returns the configuration, the path it was read from (`None` when no
    /// file was found and the defaults apply), and any validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_path: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Option<Utf8PathBuf>, Vec<String>)> {
        let Some((final_path, text)) = Self::read_config_text(base_path, config_path)? else {
            return Ok((Self::default(), None, Vec::new()));
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, Some(final_path), warnings))
    }

    /// Read the explicit config file, or the first candidate that exists
    fn read_config_text(base_path: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Option<(Utf8PathBuf, String)>> {
        if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading gitpoints configuration from {path}"))?;
            return Ok(Some((path.clone(), text)));
        }

        let candidates = [
            base_path.join("gitpoints.toml"),
            base_path.join("gitpoints.yml"),
            base_path.join("gitpoints.yaml"),
            base_path.join("gitpoints.json"),
        ];

        for path in candidates {
            match fs::read_to_string(&path) {
                Ok(text) => return Ok(Some((path, text))),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e).into_app_err_with(|| format!("reading gitpoints configuration from {path}")),
            }
        }

        Ok(None)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration to a file, preserving comments for TOML format
    ///
    /// When saving to TOML format, this method writes the raw content from
    /// `default_config.toml`, keeping all comments and formatting. For other
    /// formats (YAML, JSON), it serializes the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default_with_comments(&self, output_path: &Utf8Path) -> Result<()> {
        if output_path.extension().unwrap_or_default() == "toml" {
            fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
            return Ok(());
        }

        self.save(output_path)
    }

    /// Get the color band index for a given score
    ///
    /// Returns:
    /// - Index 0 (bad color) if score is below the first threshold
    /// - Index 1 (good color) if score is between the two thresholds
    /// - Index 2 (excellent color) if score is at or above the second threshold
    #[must_use]
    pub fn color_index_for_score(&self, score: f64) -> usize {
        if score >= self.scoring_bands[1] {
            2 // Excellent
        } else if score >= self.scoring_bands[0] {
            1 // Good
        } else {
            0 // Bad
        }
    }

    /// Validate the configuration to detect non-sensical settings
    fn validate(&self, warnings: &mut Vec<String>) {
        let [low, high] = self.scoring_bands;
        if low > high {
            warnings.push(format!(
                "scoring_bands should be ascending, but {low} is greater than {high}"
            ));
        }
        if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) {
            warnings.push(format!("scoring_bands values should be between 0 and 100, got [{low}, {high}]"));
        }

        match Url::parse(&self.api_base_url) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                warnings.push(format!("api_base_url should use http or https, got '{}'", self.api_base_url));
            }
            Ok(_) => {
                if self.api_base_url.ends_with('/') {
                    warnings.push("api_base_url should not end with a trailing slash".to_string());
                }
            }
            Err(e) => {
                warnings.push(format!("api_base_url '{}' is not a valid URL: {e}", self.api_base_url));
            }
        }

        if self.github_token.as_deref().is_some_and(|token| token.trim().is_empty()) {
            warnings.push("github_token is blank; omit the field instead".to_string());
        }
    }
}

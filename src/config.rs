use crate::error::{HerdOpsError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub herd: HerdConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HerdConfig {
    /// Display name for the herd, shown in the dashboard header.
    pub name: String,
    /// Target daily gain preset for newly registered animals (kg/day).
    #[serde(default = "default_target_gain")]
    pub default_target_gain_kg: f64,
    /// Horizon for due-task listings when none is given (days).
    #[serde(default = "default_horizon_days")]
    pub default_horizon_days: i64,
}

fn default_target_gain() -> f64 {
    0.8
}

fn default_horizon_days() -> i64 {
    30
}

impl Config {
    /// Load the config, falling back to defaults when no file exists.
    /// Unlike a missing file, an unreadable or unparsable one is an error.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HerdOpsError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| HerdOpsError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Fall back to the XDG config directory
        let default_path = dirs::config_dir()
            .ok_or_else(|| HerdOpsError::Config("Cannot determine config directory".into()))?
            .join("herdops")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Default path for writing new config files (~/.config/herdops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HerdOpsError::Config("Cannot determine config directory".into()))?
            .join("herdops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up HerdOps!");
        println!();

        println!("Herd");
        let herd_name: String = Input::new()
            .with_prompt("  Herd name")
            .default("Main herd".into())
            .interact_text()
            .map_err(|e| HerdOpsError::Config(format!("Input error: {}", e)))?;

        let default_target_gain_kg: f64 = Input::new()
            .with_prompt("  Default target daily gain (kg/day)")
            .default(default_target_gain())
            .interact_text()
            .map_err(|e| HerdOpsError::Config(format!("Input error: {}", e)))?;

        let default_horizon_days: i64 = Input::new()
            .with_prompt("  Default due-task horizon (days)")
            .default(default_horizon_days())
            .interact_text()
            .map_err(|e| HerdOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            herd: HerdConfig {
                name: herd_name,
                default_target_gain_kg,
                default_horizon_days,
            },
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| HerdOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# HerdOps Configuration\n# Generated by `herdops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("HERDOPS_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| HerdOpsError::Config("Cannot determine data directory".into()))?
            .join("herdops");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("herdops.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            herd: HerdConfig {
                name: "Main herd".into(),
                default_target_gain_kg: default_target_gain(),
                default_horizon_days: default_horizon_days(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_yaml_with_defaults() {
        let config: Config = serde_yaml::from_str("herd:\n  name: North pasture\n").unwrap();
        assert_eq!(config.herd.name, "North pasture");
        assert_eq!(config.herd.default_target_gain_kg, 0.8);
        assert_eq!(config.herd.default_horizon_days, 30);
    }

    #[test]
    fn substitutes_env_vars() {
        std::env::set_var("HERDOPS_TEST_HERD_NAME", "East barn");
        let out = Config::substitute_env_vars("herd:\n  name: ${HERDOPS_TEST_HERD_NAME}\n");
        assert!(out.contains("East barn"));
    }

    #[test]
    fn leaves_unknown_vars_untouched() {
        let out = Config::substitute_env_vars("name: ${HERDOPS_DEFINITELY_UNSET_VAR}");
        assert!(out.contains("${HERDOPS_DEFINITELY_UNSET_VAR}"));
    }
}

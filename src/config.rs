use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The process table never lists more rows than this.
pub const MAX_TOP_PROCESSES: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub sensors: SensorConfig,
    pub popup: PopupConfig,
    pub badge: BadgeConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub top_processes: usize,
    /// Display width of process names in the popup table.
    pub name_width: usize,
    pub log_level: String,
    /// `text` or `json`.
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 2000,
            top_processes: 10,
            name_width: 25,
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub hwmon_root: String,
    pub cpu_chip: String,
    pub amd_gpu_chip: String,
    pub nvidia_smi: String,
    pub nvidia_timeout_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            hwmon_root: "/sys/class/hwmon".to_string(),
            cpu_chip: "k10temp".to_string(),
            amd_gpu_chip: "amdgpu".to_string(),
            nvidia_smi: "nvidia-smi".to_string(),
            nvidia_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub width: f32,
    pub height: f32,
    /// Gap kept between the popup and the screen's bottom-right corner.
    pub margin: f32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig {
            width: 450.0,
            height: 460.0,
            margin: 10.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub size: u32,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        BadgeConfig { size: 64 }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("traymon").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    let config: Config = match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    };
    config.clamped()
}

impl Config {
    fn clamped(mut self) -> Self {
        if self.general.top_processes > MAX_TOP_PROCESSES {
            tracing::warn!(
                requested = self.general.top_processes,
                max = MAX_TOP_PROCESSES,
                "top_processes capped"
            );
            self.general.top_processes = MAX_TOP_PROCESSES;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 2000);
        assert_eq!(config.general.top_processes, 10);
        assert_eq!(config.general.name_width, 25);
        assert_eq!(config.sensors.hwmon_root, "/sys/class/hwmon");
        assert_eq!(config.sensors.cpu_chip, "k10temp");
        assert_eq!(config.sensors.amd_gpu_chip, "amdgpu");
        assert_eq!(config.sensors.nvidia_timeout_ms, 2000);
        assert_eq!(config.popup.width, 450.0);
        assert_eq!(config.badge.size, 64);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.top_processes, 10);
        assert_eq!(config.sensors.cpu_chip, "k10temp");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 1000
top_processes = 5
log_level = "debug"
log_format = "json"

[sensors]
cpu_chip = "coretemp"
nvidia_timeout_ms = 500

[popup]
margin = 24.0

[badge]
size = 32
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert_eq!(config.general.top_processes, 5);
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.log_format, "json");
        assert_eq!(config.sensors.cpu_chip, "coretemp");
        assert_eq!(config.sensors.amd_gpu_chip, "amdgpu");
        assert_eq!(config.sensors.nvidia_timeout_ms, 500);
        assert!((config.popup.margin - 24.0).abs() < f32::EPSILON);
        assert_eq!(config.popup.width, 450.0);
        assert_eq!(config.badge.size, 32);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_rate_ms, 2000);
    }

    #[test]
    fn top_processes_is_capped_at_ten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ntop_processes = 50\n").unwrap();
        assert_eq!(load_config_from_path(&path).general.top_processes, 10);

        std::fs::write(&path, "[general]\ntop_processes = 3\n").unwrap();
        assert_eq!(load_config_from_path(&path).general.top_processes, 3);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&path);
        assert_eq!(config.general.refresh_rate_ms, 2000);
    }
}

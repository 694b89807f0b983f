use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::snapshot::TemperatureProbe;
use crate::config::SensorConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("no hwmon device named like `{0}`")]
    ChipNotFound(String),
    #[error("sensor read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unparsable sensor value `{0}`")]
    Parse(String),
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}")]
    ExitStatus { program: String, status: ExitStatus },
    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

/// Reads `temp1_input` of the first hwmon device whose `name` contains `chip`.
///
/// The search stops at the first matching device even when it has no
/// temperature input.
pub fn read_hwmon(root: &Path, chip: &str) -> Result<f32, SensorError> {
    let mut devices: Vec<PathBuf> = std::fs::read_dir(root)?
        .flatten()
        .map(|entry| entry.path())
        .collect();
    devices.sort();

    for device in devices {
        let Ok(name) = std::fs::read_to_string(device.join("name")) else {
            continue;
        };
        if !name.contains(chip) {
            continue;
        }
        let raw = std::fs::read_to_string(device.join("temp1_input"))?;
        let millis: i64 = raw
            .trim()
            .parse()
            .map_err(|_| SensorError::Parse(raw.trim().to_string()))?;
        return Ok(millis as f32 / 1000.0);
    }

    Err(SensorError::ChipNotFound(chip.to_string()))
}

/// External GPU diagnostic command returning one temperature per line.
#[derive(Clone, Debug)]
pub struct GpuQuery {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl GpuQuery {
    pub fn nvidia_smi(program: &str, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            args: vec![
                "--query-gpu=temperature.gpu".to_string(),
                "--format=csv,noheader".to_string(),
            ],
            timeout,
        }
    }

    /// Runs the command, killing it once `timeout` has elapsed.
    pub fn run(&self) -> Result<f32, SensorError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SensorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SensorError::Timeout {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            return Err(SensorError::ExitStatus {
                program: self.program.clone(),
                status,
            });
        }

        let mut output = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_string(&mut output)?;
        }
        parse_gpu_output(&output)
    }
}

/// Parses the first non-empty line. Hosts with several GPUs report the first.
pub fn parse_gpu_output(text: &str) -> Result<f32, SensorError> {
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| SensorError::Parse(String::new()))?;
    line.parse()
        .map_err(|_| SensorError::Parse(line.to_string()))
}

/// All temperature sources, each probed independently.
#[derive(Clone, Debug)]
pub struct Sensors {
    hwmon_root: PathBuf,
    cpu_chip: String,
    amd_gpu_chip: String,
    gpu_query: GpuQuery,
}

impl Sensors {
    pub fn from_config(config: &SensorConfig) -> Self {
        Self {
            hwmon_root: PathBuf::from(&config.hwmon_root),
            cpu_chip: config.cpu_chip.clone(),
            amd_gpu_chip: config.amd_gpu_chip.clone(),
            gpu_query: GpuQuery::nvidia_smi(
                &config.nvidia_smi,
                Duration::from_millis(config.nvidia_timeout_ms),
            ),
        }
    }

    pub fn with_gpu_query(mut self, query: GpuQuery) -> Self {
        self.gpu_query = query;
        self
    }

    pub fn probe(&self) -> TemperatureProbe {
        let probe = TemperatureProbe {
            cpu: read_hwmon(&self.hwmon_root, &self.cpu_chip),
            amd_gpu: read_hwmon(&self.hwmon_root, &self.amd_gpu_chip),
            nvidia_gpu: self.gpu_query.run(),
        };
        tracing::trace!(?probe, "temperature probe");
        probe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hwmon_device(root: &Path, dir: &str, name: &str, millis: Option<&str>) {
        let device = root.join(dir);
        std::fs::create_dir_all(&device).unwrap();
        std::fs::write(device.join("name"), format!("{name}\n")).unwrap();
        if let Some(value) = millis {
            std::fs::write(device.join("temp1_input"), format!("{value}\n")).unwrap();
        }
    }

    #[test]
    fn reads_matching_chip_in_celsius() {
        let root = tempfile::tempdir().unwrap();
        hwmon_device(root.path(), "hwmon0", "acpitz", Some("27800"));
        hwmon_device(root.path(), "hwmon1", "k10temp", Some("54250"));
        hwmon_device(root.path(), "hwmon2", "amdgpu", Some("61000"));

        assert_eq!(read_hwmon(root.path(), "k10temp").unwrap(), 54.25);
        assert_eq!(read_hwmon(root.path(), "amdgpu").unwrap(), 61.0);
    }

    #[test]
    fn missing_chip_is_reported() {
        let root = tempfile::tempdir().unwrap();
        hwmon_device(root.path(), "hwmon0", "nvme", Some("40000"));
        assert!(matches!(
            read_hwmon(root.path(), "k10temp"),
            Err(SensorError::ChipNotFound(_))
        ));
    }

    #[test]
    fn first_match_without_input_stops_search() {
        let root = tempfile::tempdir().unwrap();
        hwmon_device(root.path(), "hwmon0", "k10temp", None);
        hwmon_device(root.path(), "hwmon1", "k10temp", Some("50000"));
        assert!(matches!(
            read_hwmon(root.path(), "k10temp"),
            Err(SensorError::Io(_))
        ));
    }

    #[test]
    fn garbage_reading_is_a_parse_error() {
        let root = tempfile::tempdir().unwrap();
        hwmon_device(root.path(), "hwmon0", "k10temp", Some("hot"));
        assert!(matches!(
            read_hwmon(root.path(), "k10temp"),
            Err(SensorError::Parse(_))
        ));
    }

    #[test]
    fn missing_root_is_io_error() {
        let result = read_hwmon(Path::new("/nonexistent/hwmon"), "k10temp");
        assert!(matches!(result, Err(SensorError::Io(_))));
    }

    #[test]
    fn gpu_output_parsing() {
        assert_eq!(parse_gpu_output("47\n").unwrap(), 47.0);
        assert_eq!(parse_gpu_output("  \n 63 \n58\n").unwrap(), 63.0);
        assert!(parse_gpu_output("").is_err());
        assert!(parse_gpu_output("[N/A]").is_err());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let query = GpuQuery {
            program: "traymon-definitely-not-installed".into(),
            args: vec![],
            timeout: Duration::from_millis(200),
        };
        assert!(matches!(query.run(), Err(SensorError::Spawn { .. })));
    }
}

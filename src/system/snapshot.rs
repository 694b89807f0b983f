use super::sensors::SensorError;

/// One row of the top-N process list, recreated every sampling cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_mb: f32,
}

/// Celsius readings per sensor source. An unavailable source reads 0.0, so a
/// missing sensor cannot be told apart from a genuine zero here; use
/// [`TemperatureProbe`] when that distinction matters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TemperatureReading {
    pub cpu: f32,
    pub amd_gpu: f32,
    pub nvidia_gpu: f32,
}

/// Raw per-source outcome of one temperature probe.
#[derive(Debug)]
pub struct TemperatureProbe {
    pub cpu: Result<f32, SensorError>,
    pub amd_gpu: Result<f32, SensorError>,
    pub nvidia_gpu: Result<f32, SensorError>,
}

impl TemperatureProbe {
    pub fn collapse(&self) -> TemperatureReading {
        let value = |r: &Result<f32, SensorError>| r.as_ref().copied().unwrap_or(0.0);
        TemperatureReading {
            cpu: value(&self.cpu),
            amd_gpu: value(&self.amd_gpu),
            nvidia_gpu: value(&self.nvidia_gpu),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemSnapshot {
    pub cpu_percent: f32,
    pub ram_used_gb: f32,
    pub ram_total_gb: f32,
    /// Sorted by `cpu_percent` descending, at most the configured top-N.
    pub top_processes: Vec<ProcessSample>,
    pub temperatures: TemperatureReading,
}

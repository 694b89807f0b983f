use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use super::sensors::Sensors;
use super::snapshot::{ProcessSample, SystemSnapshot, TemperatureProbe, TemperatureReading};
use crate::config::{MAX_TOP_PROCESSES, SensorConfig};

const BYTES_PER_MB: f32 = 1024.0 * 1024.0;
const BYTES_PER_GB: f32 = 1024.0 * 1024.0 * 1024.0;

/// Where the controller gets its snapshots from.
pub trait MetricsSource {
    fn snapshot(&mut self) -> SystemSnapshot;
}

/// Sorts by CPU descending and keeps the first `limit`.
///
/// The sort is stable, so ties keep enumeration order. The OS does not
/// specify that order, so tie order can differ from run to run.
pub fn rank_top(mut samples: Vec<ProcessSample>, limit: usize) -> Vec<ProcessSample> {
    samples.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    samples.truncate(limit);
    samples
}

pub struct Collector {
    sys: System,
    sensors: Sensors,
    top_processes: usize,
}

impl Collector {
    /// `top_processes` above ten is capped at ten.
    pub fn new(sensors: &SensorConfig, top_processes: usize) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        Collector {
            sys,
            sensors: Sensors::from_config(sensors),
            top_processes: top_processes.min(MAX_TOP_PROCESSES),
        }
    }

    pub fn sample_top_processes(&mut self, limit: usize) -> Vec<ProcessSample> {
        self.refresh_processes();
        self.top_processes_from_cache(limit)
    }

    pub fn sample_cpu_percent(&mut self) -> f32 {
        self.sys.refresh_cpu_usage();
        self.sys.global_cpu_usage()
    }

    /// `(used, total)` in GB.
    pub fn sample_memory(&mut self) -> (f32, f32) {
        self.sys.refresh_memory();
        self.memory_from_cache()
    }

    pub fn sample_temperatures(&mut self) -> TemperatureReading {
        self.probe_temperatures().collapse()
    }

    pub fn probe_temperatures(&mut self) -> TemperatureProbe {
        self.sensors.probe()
    }

    fn refresh_processes(&mut self) {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
    }

    fn top_processes_from_cache(&self, limit: usize) -> Vec<ProcessSample> {
        // sysinfo only lists processes it could read; vanished or
        // inaccessible ones are simply absent.
        let samples = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| ProcessSample {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().to_string(),
                cpu_percent: process.cpu_usage(),
                memory_mb: process.memory() as f32 / BYTES_PER_MB,
            })
            .collect();
        rank_top(samples, limit)
    }

    fn memory_from_cache(&self) -> (f32, f32) {
        (
            self.sys.used_memory() as f32 / BYTES_PER_GB,
            self.sys.total_memory() as f32 / BYTES_PER_GB,
        )
    }
}

impl MetricsSource for Collector {
    fn snapshot(&mut self) -> SystemSnapshot {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        self.sys.refresh_memory();
        self.sys.refresh_cpu_usage();
        self.refresh_processes();

        let (ram_used_gb, ram_total_gb) = self.memory_from_cache();
        SystemSnapshot {
            cpu_percent: self.sys.global_cpu_usage(),
            ram_used_gb,
            ram_total_gb,
            top_processes: self.top_processes_from_cache(self.top_processes),
            temperatures: self.sample_temperatures(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pid: u32, cpu: f32) -> ProcessSample {
        ProcessSample {
            pid,
            name: format!("proc_{pid}"),
            cpu_percent: cpu,
            memory_mb: 10.0,
        }
    }

    #[test]
    fn rank_top_sorts_descending_and_truncates() {
        let samples = (1..=15).map(|i| sample(i, i as f32)).collect();
        let top = rank_top(samples, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].pid, 15);
        assert_eq!(top[9].pid, 6);
    }

    #[test]
    fn rank_top_keeps_enumeration_order_on_ties() {
        let samples = vec![sample(7, 1.0), sample(3, 5.0), sample(9, 1.0), sample(1, 1.0)];
        let pids: Vec<u32> = rank_top(samples, 10).iter().map(|s| s.pid).collect();
        assert_eq!(pids, vec![3, 7, 9, 1]);
    }

    #[test]
    fn rank_top_handles_short_and_empty_lists() {
        assert!(rank_top(Vec::new(), 10).is_empty());
        assert_eq!(rank_top(vec![sample(1, 0.0)], 10).len(), 1);
        assert!(rank_top(vec![sample(1, 0.0)], 0).is_empty());
    }

    fn collector_without_sensors(top: usize) -> Collector {
        let config = SensorConfig {
            hwmon_root: "/nonexistent/hwmon".into(),
            nvidia_smi: "traymon-definitely-not-installed".into(),
            ..SensorConfig::default()
        };
        Collector::new(&config, top)
    }

    #[test]
    fn individual_samples_are_sane() {
        let mut collector = collector_without_sensors(10);

        let top = collector.sample_top_processes(3);
        assert!(!top.is_empty() && top.len() <= 3);

        let cpu = collector.sample_cpu_percent();
        assert!((0.0..=100.0).contains(&cpu));

        let (used, total) = collector.sample_memory();
        assert!(total > 0.0);
        assert!(used <= total);

        assert_eq!(collector.sample_temperatures(), TemperatureReading::default());
    }

    #[test]
    fn live_snapshot_respects_limit() {
        let mut collector = collector_without_sensors(5);

        let snapshot = collector.snapshot();
        assert!(snapshot.top_processes.len() <= 5);
        assert!(
            snapshot
                .top_processes
                .windows(2)
                .all(|w| w[0].cpu_percent >= w[1].cpu_percent)
        );
        assert!(snapshot.ram_total_gb >= snapshot.ram_used_gb);
        assert_eq!(snapshot.temperatures, TemperatureReading::default());
    }

    #[test]
    fn oversized_limit_is_capped() {
        let mut collector = collector_without_sensors(50);
        assert_eq!(collector.top_processes, MAX_TOP_PROCESSES);
        assert!(collector.snapshot().top_processes.len() <= MAX_TOP_PROCESSES);
    }
}

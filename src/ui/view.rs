use crate::action::RowRef;
use crate::format::{fixed, truncate_display};
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::TempLevel;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub row: RowRef,
    pub name: String,
    pub cpu: String,
    pub ram: String,
}

/// Text content of the popup for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub cpu: String,
    pub ram: String,
    pub cpu_temp: String,
    pub cpu_temp_level: TempLevel,
    pub rows: Vec<ProcessRow>,
    pub readouts: [String; 3],
}

impl PopupView {
    pub fn from_snapshot(snapshot: &SystemSnapshot, name_width: usize) -> Self {
        let temps = &snapshot.temperatures;
        let rows = snapshot
            .top_processes
            .iter()
            .enumerate()
            .map(|(row_index, p)| ProcessRow {
                row: RowRef {
                    row_index,
                    pid: p.pid,
                },
                name: truncate_display(&p.name, name_width),
                cpu: format!("{}%", fixed(p.cpu_percent, 1)),
                ram: format!("{}MB", fixed(p.memory_mb, 0)),
            })
            .collect();

        PopupView {
            cpu: format!("CPU: {}%", fixed(snapshot.cpu_percent, 1)),
            ram: format!(
                "RAM: {}/{} GB",
                fixed(snapshot.ram_used_gb, 1),
                fixed(snapshot.ram_total_gb, 1)
            ),
            cpu_temp: format!("{}°C", fixed(temps.cpu, 0)),
            cpu_temp_level: TempLevel::from_celsius(temps.cpu),
            rows,
            readouts: [
                format!("CPU: {}°C", fixed(temps.cpu, 0)),
                format!("AMD: {}°C", fixed(temps.amd_gpu, 0)),
                format!("NVIDIA: {}°C", fixed(temps.nvidia_gpu, 0)),
            ],
        }
    }

    /// Pid rendered in `row_index`, if that row exists.
    pub fn pid_at(&self, row_index: usize) -> Option<u32> {
        self.rows.get(row_index).map(|r| r.row.pid)
    }
}

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::system::snapshot::SystemSnapshot;

/// Longest prefix of `s` that fits in `max_width` columns.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Rounds half away from zero before formatting, so 6.35 shows as 6.4.
pub fn fixed(value: f32, decimals: usize) -> String {
    let scale = 10f32.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.decimals$}")
}

pub fn tooltip_text(snapshot: &SystemSnapshot) -> String {
    format!(
        "CPU: {}% | RAM: {}/{}GB | {}°C",
        fixed(snapshot.cpu_percent, 0),
        fixed(snapshot.ram_used_gb, 1),
        fixed(snapshot.ram_total_gb, 0),
        fixed(snapshot.temperatures.cpu, 0),
    )
}

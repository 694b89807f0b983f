use eframe::egui::Color32;

pub const PANEL_BG: Color32 = Color32::from_rgb(0x2d, 0x2d, 0x2d);
pub const PANEL_BORDER: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub const TABLE_BG: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
pub const HEADER_BG: Color32 = Color32::from_rgb(0x44, 0x44, 0x44);
pub const TEXT: Color32 = Color32::WHITE;
pub const KILL_BUTTON: Color32 = Color32::from_rgb(0xaa, 0x44, 0x44);

pub const WARM_THRESHOLD: f32 = 60.0;
pub const HOT_THRESHOLD: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempLevel {
    Cool,
    Warm,
    Hot,
}

impl TempLevel {
    /// Upper bounds are inclusive: 60.0 is warm, 80.0 is hot.
    pub fn from_celsius(celsius: f32) -> Self {
        if celsius < WARM_THRESHOLD {
            TempLevel::Cool
        } else if celsius < HOT_THRESHOLD {
            TempLevel::Warm
        } else {
            TempLevel::Hot
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            TempLevel::Cool => Color32::from_rgb(0x00, 0xff, 0x00),
            TempLevel::Warm => Color32::from_rgb(0xff, 0xaa, 0x00),
            TempLevel::Hot => Color32::from_rgb(0xff, 0x44, 0x44),
        }
    }
}

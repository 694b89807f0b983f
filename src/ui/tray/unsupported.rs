use super::TrayHandle;
use crate::badge::Badge;
use crate::event::EventSender;

/// Stand-in where no StatusNotifierItem host exists; the popup still works.
pub struct NoTray;

impl TrayHandle for NoTray {
    fn set_icon(&mut self, _badge: &Badge) {}

    fn set_tooltip(&mut self, text: &str) {
        tracing::trace!(tooltip = text, "tray unavailable");
    }

    fn hide(&mut self) {}
}

pub fn select_window_backend(_options: &mut eframe::NativeOptions) {}

pub fn spawn(_events: EventSender) -> Box<dyn TrayHandle> {
    tracing::warn!("system tray is not supported on this platform");
    Box::new(NoTray)
}

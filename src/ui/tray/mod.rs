use crate::badge::Badge;
use crate::event::EventSender;

/// The tray icon as the controller drives it.
pub trait TrayHandle {
    fn set_icon(&mut self, badge: &Badge);
    fn set_tooltip(&mut self, text: &str);
    fn hide(&mut self);
}

pub const TRAY_TITLE: &str = "System Monitor";

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod unsupported;

#[cfg(target_os = "linux")]
use linux as tray_impl;
#[cfg(not(target_os = "linux"))]
use unsupported as tray_impl;

/// Picks the windowing backend for the popup. The popup is hidden, shown and
/// placed with absolute coordinates, which a native Wayland surface ignores.
pub fn select_window_backend(options: &mut eframe::NativeOptions) {
    tray_impl::select_window_backend(options);
}

/// Shows the tray icon; its clicks and menu choices arrive through `events`.
pub fn spawn(events: EventSender) -> Box<dyn TrayHandle> {
    tray_impl::spawn(events)
}

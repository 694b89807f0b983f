use egui_winit::winit::platform::x11::EventLoopBuilderExtX11;
use ksni::menu::StandardItem;
use ksni::{Icon, MenuItem, ToolTip, Tray, TrayService};

use super::{TRAY_TITLE, TrayHandle};
use crate::badge::Badge;
use crate::event::{Event, EventSender, TrayEvent};

/// StatusNotifierItem state served over D-Bus by ksni.
struct StatusTray {
    icon: Option<Icon>,
    tooltip: String,
    events: EventSender,
}

impl Tray for StatusTray {
    fn id(&self) -> String {
        env!("CARGO_PKG_NAME").into()
    }

    fn title(&self) -> String {
        TRAY_TITLE.into()
    }

    fn icon_pixmap(&self) -> Vec<Icon> {
        self.icon.iter().cloned().collect()
    }

    fn tool_tip(&self) -> ToolTip {
        ToolTip {
            title: self.tooltip.clone(),
            ..Default::default()
        }
    }

    fn activate(&mut self, _x: i32, _y: i32) {
        self.events.send(Event::Tray(TrayEvent::Activate));
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        vec![
            StandardItem {
                label: "Quit".into(),
                activate: Box::new(|tray: &mut Self| {
                    tray.events.send(Event::Tray(TrayEvent::Quit));
                }),
                ..Default::default()
            }
            .into(),
        ]
    }
}

pub struct KsniTray {
    handle: ksni::Handle<StatusTray>,
}

impl TrayHandle for KsniTray {
    fn set_icon(&mut self, badge: &Badge) {
        let size = badge.size() as i32;
        let icon = Icon {
            width: size,
            height: size,
            data: badge.argb32(),
        };
        self.handle.update(move |tray| tray.icon = Some(icon));
    }

    fn set_tooltip(&mut self, text: &str) {
        let text = text.to_string();
        self.handle.update(move |tray| tray.tooltip = text);
    }

    fn hide(&mut self) {
        self.handle.shutdown();
    }
}

/// Runs the popup on X11, through XWayland on Wayland sessions.
pub fn select_window_backend(options: &mut eframe::NativeOptions) {
    options.event_loop_builder = Some(Box::new(|builder| {
        EventLoopBuilderExtX11::with_x11(builder);
    }));
}

pub fn spawn(events: EventSender) -> Box<dyn TrayHandle> {
    let service = TrayService::new(StatusTray {
        icon: None,
        tooltip: TRAY_TITLE.to_string(),
        events,
    });
    let handle = service.handle();
    service.spawn();
    tracing::info!("tray icon registered");
    Box::new(KsniTray { handle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_runs_on_x11() {
        let mut options = eframe::NativeOptions::default();
        assert!(options.event_loop_builder.is_none());
        select_window_backend(&mut options);
        assert!(options.event_loop_builder.is_some());
    }
}

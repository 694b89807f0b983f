pub mod popup;
pub mod theme;
pub mod tray;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, ViewportCommand};

use crate::app::{App, ScreenArea, WindowCommand};
use crate::config::Config;
use crate::event::EventHandler;
use crate::system::collector::Collector;
use crate::system::kill::SysinfoProcesses;

/// Drives the controller from the egui event loop: drains tray and timer
/// events, paints the popup while shown, and applies window commands.
pub struct Dashboard {
    app: App,
    events: EventHandler,
    tick_rate: Duration,
    frame: u64,
}

impl eframe::App for Dashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.app.set_screen(screen_area(ctx));

        while let Some(event) = self.events.try_next() {
            let action = self.app.map_event(event);
            self.app.dispatch(action);
        }

        if self.app.is_popup_shown() {
            if let Some(action) = popup::render(ctx, self.app.view.as_ref(), self.app.prompt.as_ref()) {
                self.app.dispatch(action);
            }
            if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
                self.app.set_popup_size(rect.width(), rect.height());
            }
        }

        match self.frame {
            0 => ctx.request_repaint(),
            // eframe maps the root window after painting the first frame.
            1 => self.app.restore_window_visibility(),
            _ => {}
        }
        self.frame = self.frame.saturating_add(1);

        for command in self.app.take_window_commands() {
            apply(ctx, command);
        }

        if self.app.running {
            ctx.request_repaint_after(self.tick_rate);
        }
    }
}

fn screen_area(ctx: &egui::Context) -> Option<ScreenArea> {
    ctx.input(|i| i.viewport().monitor_size)
        .map(|size| ScreenArea {
            width: size.x,
            height: size.y,
        })
}

fn apply(ctx: &egui::Context, command: WindowCommand) {
    match command {
        WindowCommand::Show { position } => {
            if let Some((x, y)) = position {
                ctx.send_viewport_cmd(ViewportCommand::OuterPosition(egui::pos2(x, y)));
            }
            ctx.send_viewport_cmd(ViewportCommand::Visible(true));
            ctx.send_viewport_cmd(ViewportCommand::Focus);
        }
        WindowCommand::Hide => ctx.send_viewport_cmd(ViewportCommand::Visible(false)),
        WindowCommand::Close => ctx.send_viewport_cmd(ViewportCommand::Close),
    }
}

/// Window setup for the popup: one undecorated, always-on-top viewport that
/// starts hidden, on a windowing backend that honours hide and placement.
pub fn native_options(config: &Config) -> eframe::NativeOptions {
    let mut options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(tray::TRAY_TITLE)
            .with_inner_size([config.popup.width, config.popup.height])
            .with_decorations(false)
            .with_resizable(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop)
            .with_taskbar(false)
            .with_visible(false),
        ..Default::default()
    };
    tray::select_window_backend(&mut options);
    options
}

/// Runs the tray and popup until Quit. Needs an entered tokio runtime for the
/// tick task.
pub fn run(config: Config) -> eframe::Result<()> {
    let options = native_options(&config);
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms);

    eframe::run_native(
        env!("CARGO_PKG_NAME"),
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            let repaint = cc.egui_ctx.clone();
            let events = EventHandler::new(tick_rate, Arc::new(move || repaint.request_repaint()));
            let tray = tray::spawn(events.sender());
            let collector = Collector::new(&config.sensors, config.general.top_processes);

            let mut app = App::new(
                &config,
                Box::new(collector),
                Box::new(SysinfoProcesses::new()),
                tray,
            );
            app.update_data();
            tracing::info!(?tick_rate, "sampling started");

            Ok(Box::new(Dashboard {
                app,
                events,
                tick_rate,
                frame: 0,
            }))
        }),
    )
}

use crate::action::{Action, RowRef};
use crate::badge::render_badge;
use crate::config::Config;
use crate::event::{Event, TrayEvent};
use crate::format::tooltip_text;
use crate::system::collector::MetricsSource;
use crate::system::kill::{KillOutcome, ProcessControl};
use crate::system::snapshot::SystemSnapshot;
use crate::ui::tray::TrayHandle;
use crate::ui::view::PopupView;

pub const PERMISSION_DENIED_MESSAGE: &str =
    "Permission denied. Try running with elevated privileges.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Hidden,
    Shown,
}

/// Modal dialog over the popup.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    ConfirmKill { pid: u32, name: String },
    Warning(String),
}

impl Prompt {
    pub fn message(&self) -> String {
        match self {
            Prompt::ConfirmKill { pid, name } => {
                format!("Kill process '{name}' (PID: {pid})?")
            }
            Prompt::Warning(text) => text.clone(),
        }
    }
}

/// Monitor size the popup is anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenArea {
    pub width: f32,
    pub height: f32,
}

/// Top-left corner placing a `width` x `height` popup `margin` away from the
/// bottom-right of `screen`.
///
/// `screen` is the whole monitor. Desktop panels are not subtracted, so a
/// bottom panel can cover the lower edge of the popup.
pub fn popup_position(screen: ScreenArea, width: f32, height: f32, margin: f32) -> (f32, f32) {
    (
        (screen.width - width - margin).max(0.0),
        (screen.height - height - margin).max(0.0),
    )
}

/// What the window layer has to do after the controller ran.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    Show { position: Option<(f32, f32)> },
    Hide,
    Close,
}

/// Application context: owns every piece of mutable state. Lives on the GUI
/// thread and is only touched from the event loop.
pub struct App {
    pub running: bool,
    source: Box<dyn MetricsSource>,
    processes: Box<dyn ProcessControl>,
    tray: Box<dyn TrayHandle>,
    /// Most recent snapshot; replaced wholesale every cycle.
    pub snapshot: Option<SystemSnapshot>,
    pub popup: PopupState,
    /// Popup content, only refreshed while the popup is shown.
    pub view: Option<PopupView>,
    pub prompt: Option<Prompt>,
    screen: Option<ScreenArea>,
    popup_size: (f32, f32),
    popup_margin: f32,
    name_width: usize,
    badge_size: u32,
    window_commands: Vec<WindowCommand>,
}

impl App {
    pub fn new(
        config: &Config,
        source: Box<dyn MetricsSource>,
        processes: Box<dyn ProcessControl>,
        tray: Box<dyn TrayHandle>,
    ) -> Self {
        App {
            running: true,
            source,
            processes,
            tray,
            snapshot: None,
            popup: PopupState::Hidden,
            view: None,
            prompt: None,
            screen: None,
            popup_size: (config.popup.width, config.popup.height),
            popup_margin: config.popup.margin,
            name_width: config.general.name_width,
            badge_size: config.badge.size,
            // The window starts hidden whatever the windowing backend does.
            window_commands: vec![WindowCommand::Hide],
        }
    }

    pub fn map_event(&self, event: Event) -> Action {
        match event {
            Event::Tick => Action::Refresh,
            Event::Tray(TrayEvent::Activate) => Action::TogglePopup,
            Event::Tray(TrayEvent::Quit) => Action::Quit,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::TogglePopup => self.toggle_popup(),
            Action::HidePopup => self.hide_popup(),
            Action::Kill(row) => self.kill_row(row),
            Action::ConfirmKill => self.confirm_kill(),
            Action::CancelKill => self.cancel_kill(),
            Action::DismissWarning => self.dismiss_warning(),
            Action::Refresh => self.update_data(),
            Action::Quit => self.quit(),
        }
    }

    /// One sampling cycle: tray icon and tooltip always, popup only when shown.
    pub fn update_data(&mut self) {
        let _update_span = tracing::debug_span!("app.update_data").entered();

        let snapshot = self.source.snapshot();
        match render_badge(snapshot.cpu_percent, self.badge_size) {
            Ok(badge) => self.tray.set_icon(&badge),
            Err(err) => tracing::warn!(%err, "tray badge not updated"),
        }
        self.tray.set_tooltip(&tooltip_text(&snapshot));

        if self.popup == PopupState::Shown && !self.awaiting_confirmation() {
            self.view = Some(PopupView::from_snapshot(&snapshot, self.name_width));
        }
        self.snapshot = Some(snapshot);
    }

    pub fn toggle_popup(&mut self) {
        match self.popup {
            PopupState::Shown => self.hide_popup(),
            PopupState::Hidden => {
                let (width, height) = self.popup_size;
                let position = self
                    .screen
                    .map(|screen| popup_position(screen, width, height, self.popup_margin));
                self.popup = PopupState::Shown;
                self.update_data();
                self.window_commands.push(WindowCommand::Show { position });
            }
        }
    }

    pub fn hide_popup(&mut self) {
        if self.popup == PopupState::Hidden {
            return;
        }
        self.popup = PopupState::Hidden;
        if self.prompt.take().is_some() {
            tracing::debug!("pending prompt dismissed with the popup");
        }
        self.window_commands.push(WindowCommand::Hide);
    }

    /// Kill button on a table row. The row must still show the same pid,
    /// otherwise the click landed on content that has since changed.
    pub fn kill_row(&mut self, row: RowRef) {
        let shown = self.view.as_ref().and_then(|view| view.pid_at(row.row_index));
        if shown != Some(row.pid) {
            tracing::debug!(?row, ?shown, "kill row no longer matches the table");
            return;
        }
        self.request_kill(row.pid);
    }

    /// Looks the pid up again and asks for confirmation; a pid that is gone
    /// by now is ignored.
    pub fn request_kill(&mut self, pid: u32) {
        if self.prompt.is_some() {
            return;
        }
        match self.processes.resolve(pid) {
            Some(name) => self.prompt = Some(Prompt::ConfirmKill { pid, name }),
            None => tracing::debug!(pid, "kill target already exited"),
        }
    }

    pub fn confirm_kill(&mut self) {
        let Some(Prompt::ConfirmKill { pid, name }) = self.prompt.take() else {
            return;
        };
        match self.processes.terminate(pid) {
            KillOutcome::Terminated(pid) => tracing::info!(pid, %name, "sent SIGTERM"),
            KillOutcome::NotFound(pid) => tracing::debug!(pid, "kill target already exited"),
            KillOutcome::PermissionDenied(pid) => {
                tracing::warn!(pid, %name, "permission denied");
                self.prompt = Some(Prompt::Warning(PERMISSION_DENIED_MESSAGE.to_string()));
            }
        }
    }

    pub fn cancel_kill(&mut self) {
        if matches!(self.prompt, Some(Prompt::ConfirmKill { .. })) {
            self.prompt = None;
        }
    }

    pub fn dismiss_warning(&mut self) {
        if matches!(self.prompt, Some(Prompt::Warning(_))) {
            self.prompt = None;
        }
    }

    pub fn quit(&mut self) {
        self.tray.hide();
        self.running = false;
        self.window_commands.push(WindowCommand::Close);
    }

    /// Re-issues a hide when the window host mapped the window on its own
    /// while the popup is meant to be hidden.
    pub fn restore_window_visibility(&mut self) {
        if self.popup == PopupState::Hidden {
            self.window_commands.push(WindowCommand::Hide);
        }
    }

    pub fn awaiting_confirmation(&self) -> bool {
        matches!(self.prompt, Some(Prompt::ConfirmKill { .. }))
    }

    pub fn is_popup_shown(&self) -> bool {
        self.popup == PopupState::Shown
    }

    pub fn set_screen(&mut self, screen: Option<ScreenArea>) {
        self.screen = screen;
    }

    pub fn set_popup_size(&mut self, width: f32, height: f32) {
        self.popup_size = (width, height);
    }

    pub fn take_window_commands(&mut self) -> Vec<WindowCommand> {
        std::mem::take(&mut self.window_commands)
    }
}

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayEvent {
    /// Primary click on the tray icon.
    Activate,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Tick,
    Tray(TrayEvent),
}

/// Wakes the GUI loop so it drains the channel.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Event>,
    wake: Waker,
}

impl EventSender {
    pub fn send(&self, event: Event) -> bool {
        if self.tx.send(event).is_err() {
            return false;
        }
        (self.wake)();
        true
    }
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    sender: EventSender,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Starts the tick task. Must be called inside a tokio runtime.
    pub fn new(tick_rate: Duration, wake: Waker) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let sender = EventSender { tx, wake };

        let ticker = sender.clone();
        let task = tokio::spawn(async move {
            // The controller samples once at startup, so skip the immediate tick.
            let mut tick_interval = tokio::time::interval_at(Instant::now() + tick_rate, tick_rate);
            tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tick_interval.tick().await;
                if !ticker.send(Event::Tick) {
                    break;
                }
            }
        });

        Self {
            rx,
            sender,
            _task: task,
        }
    }

    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

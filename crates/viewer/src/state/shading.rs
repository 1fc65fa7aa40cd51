//! Current shading mode and its change notifications.

use std::sync::mpsc::{self, Receiver, Sender};

use shared::ShadingMode;

/// Shading mode with an explicit subscriber list.
///
/// Subscribers get a channel and poll it from their own update loop; senders
/// whose receiver was dropped are pruned on the next change.
#[derive(Debug, Default)]
pub struct ShadingState {
    mode: ShadingMode,
    subscribers: Vec<Sender<ShadingMode>>,
}

impl ShadingState {
    pub fn new(mode: ShadingMode) -> Self {
        Self {
            mode,
            subscribers: Vec::new(),
        }
    }

    pub fn mode(&self) -> ShadingMode {
        self.mode
    }

    /// Face picking is only active in face selection mode
    pub fn interaction_enabled(&self) -> bool {
        self.mode.enables_selection()
    }

    /// Register for mode changes
    pub fn subscribe(&mut self) -> Receiver<ShadingMode> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Switch mode and notify every live subscriber. Setting the current mode
    /// again still notifies.
    pub fn set(&mut self, mode: ShadingMode) {
        self.mode = mode;
        self.subscribers.retain(|tx| tx.send(mode).is_ok());
        tracing::info!(
            "Shading mode: {} (selection {})",
            mode.display_name(),
            if mode.enables_selection() { "on" } else { "off" }
        );
    }
}

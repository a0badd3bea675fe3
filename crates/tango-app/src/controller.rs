use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tango_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::spawn_key_reader;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            // typing bursts plus delayed advances
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender into the event loop, for input sources and tests
    pub fn sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.state.library.subscribe(),
            self.state.config.clone(),
        ));

        tasks
    }

    /// Terminal input runs on its own thread, see [`spawn_key_reader`]
    pub fn spawn_input(&self, raw: bool) -> std::thread::JoinHandle<()> {
        spawn_key_reader(
            tokio::runtime::Handle::current(),
            self.cancel_token.child_token(),
            self.sender(),
            raw,
        )
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

//! Headless effect runtime: an `EffectStore` whose effects run as keyed tasks

use tokio::sync::mpsc;
use tracing::debug;
use tui_dispatch::{EffectStore, TaskManager};

use crate::action::Action;
use crate::effect::{handle_effect, Effect};
use crate::reducer::reducer;
use crate::resolver::DetailResolver;
use crate::state::AppState;

pub struct EffectRunner {
    store: EffectStore<AppState, Action, Effect>,
    tasks: TaskManager<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    resolver: DetailResolver,
}

impl EffectRunner {
    pub fn new(resolver: DetailResolver) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: EffectStore::new(AppState::default(), reducer),
            tasks: TaskManager::new(action_tx),
            action_rx,
            resolver,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Number of tasks still running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Reduces `action` and spawns whatever it asks for without waiting.
    pub fn dispatch(&mut self, action: Action) {
        debug!(action = ?action, "dispatch");
        let result = self.store.dispatch(action);
        for effect in result.effects {
            handle_effect(effect, &mut self.tasks, &self.resolver);
        }
    }

    /// Feeds task results back through the reducer until no task is left.
    pub async fn settle(&mut self) {
        loop {
            // Checked before draining: a finished task has already sent its action.
            let idle = self.tasks.is_empty();
            match self.action_rx.try_recv() {
                Ok(action) => {
                    self.dispatch(action);
                    continue;
                }
                Err(_) if idle => return,
                Err(_) => {}
            }
            match self.action_rx.recv().await {
                Some(action) => self.dispatch(action),
                None => return,
            }
        }
    }

    /// Dispatches `action` and waits for everything it started.
    pub async fn run(&mut self, action: Action) {
        self.dispatch(action);
        self.settle().await;
    }
}

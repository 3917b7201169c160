use std::collections::VecDeque;

use crate::config::Messages;
use crate::error::Result;
use crate::field::{apply_writes, UiContext};
use crate::http_client::Dispatcher;
use crate::outcome::Outcome;
use crate::render::ResultRenderer;

use super::actions::ConsoleAction;
use super::effect::{plan, settle};

/// Where the console is in the lifecycle of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A request is in flight.
    Pending,
}

/// `Pending` while alive. Dropping it, cancellation included, restores `Idle`.
struct PendingGuard<'a> {
    phase: &'a mut Phase,
}

impl<'a> PendingGuard<'a> {
    fn enter(phase: &'a mut Phase) -> Self {
        *phase = Phase::Pending;
        Self { phase }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        *self.phase = Phase::Idle;
    }
}

pub struct ConsoleManager<U: UiContext, D: Dispatcher> {
    // The document - single source of truth for everything shown
    ui: U,

    dispatcher: D,
    renderer: ResultRenderer,

    // Action queue for sequential processing
    pending_actions: VecDeque<ConsoleAction>,

    phase: Phase,
    last_outcome: Option<Outcome>,
}

impl<U: UiContext, D: Dispatcher> ConsoleManager<U, D> {
    pub fn new(ui: U, dispatcher: D, messages: Messages) -> Self {
        Self {
            ui,
            dispatcher,
            renderer: ResultRenderer::new(messages),
            pending_actions: VecDeque::new(),
            phase: Phase::Idle,
            last_outcome: None,
        }
    }

    /// Queue an action; nothing runs until `update` or `run_pending`.
    pub fn dispatch(&mut self, action: ConsoleAction) {
        log::debug!("Dispatching action: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// Process one queued action.
    pub async fn update(&mut self) {
        if let Some(action) = self.pending_actions.pop_front() {
            if let Err(e) = self.handle_action(action).await {
                log::warn!("'{}' did not complete: {}", action.description(), e);
            }
        }
    }

    /// Drain the queue in order.
    pub async fn run_pending(&mut self) {
        while !self.pending_actions.is_empty() {
            self.update().await;
        }
    }

    /// Run one action immediately, bypassing the queue.
    pub async fn perform(&mut self, action: ConsoleAction) -> Result<()> {
        self.handle_action(action).await
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn into_ui(self) -> U {
        self.ui
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome of the most recent request, if any action has sent one.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty() || self.phase == Phase::Pending
    }

    pub fn clear_pending_actions(&mut self) {
        self.pending_actions.clear();
    }

    async fn handle_action(&mut self, action: ConsoleAction) -> Result<()> {
        log::info!("🔄 [ACTION] {}", action.description());

        let effect = match plan(&self.ui, action) {
            Ok(effect) => effect,
            Err(e) => {
                self.ui.set_flash(&e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = apply_writes(&mut self.ui, &effect.writes) {
            self.ui.set_flash(&e.to_string());
            return Err(e);
        }

        let request = match effect.request {
            Some(request) => request,
            None => return Ok(()),
        };

        let outcome = {
            let _pending = PendingGuard::enter(&mut self.phase);
            self.dispatcher.send(&request).await
        };

        let writes = settle(&self.renderer, action, &outcome);
        self.last_outcome = Some(outcome);

        // A document missing an element cannot undo the request that already
        // went out; report it and leave the rest of the document as written.
        if let Err(e) = apply_writes(&mut self.ui, &writes) {
            log::error!("❌ [ACTION] failed to render '{}': {}", action.description(), e);
            self.ui.set_flash(&e.to_string());
            return Err(e);
        }

        Ok(())
    }
}

use std::ops::ControlFlow;

use tracing::{debug, info};

use unitdeck_core::reducer::{Effect, SessionEvent, reduce, request_refresh};
use unitdeck_core::state::SessionState;

use crate::runner::Backend;

/// Owns the session and performs the effects its transitions ask for
pub struct App<B: Backend> {
    pub state: SessionState,
    backend: B,
}

impl<B: Backend> App<B> {
    pub fn new(state: SessionState, backend: B) -> Self {
        Self { state, backend }
    }

    /// Kick off the initial unit fetch
    pub fn start(&mut self) {
        if let Some(effect) = request_refresh(&mut self.state) {
            let _ = self.perform(effect);
        }
    }

    /// Feed one event through the state machine.
    ///
    /// Returns `Break` when the session asked to quit.
    pub fn dispatch(&mut self, event: SessionEvent) -> ControlFlow<()> {
        let before = self.state.phase;
        let effect = reduce(&mut self.state, event);
        if self.state.phase != before {
            debug!(from = before.label(), to = self.state.phase.label(), "phase changed");
        }

        match effect {
            Some(effect) => self.perform(effect),
            None => ControlFlow::Continue(()),
        }
    }

    fn perform(&self, effect: Effect) -> ControlFlow<()> {
        match effect {
            Effect::Run(args) => self.backend.execute(args),
            Effect::FetchUnits => {
                info!("refreshing unit catalog");
                self.backend.fetch_units();
            }
            Effect::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }
}

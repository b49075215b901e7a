use super::*;
use crate::{EventBus, PlayOutcome};

impl RunState {
    pub fn toggle_select(&mut self, index: usize) -> Result<bool, RunError> {
        self.require_phase(Phase::Playing)?;
        Ok(self.round.toggle_select(index)?)
    }

    pub fn discard(&mut self, events: &mut EventBus) -> Result<usize, RunError> {
        self.require_phase(Phase::Playing)?;
        Ok(self.round.discard(events)?)
    }

    /// Plays the selection. The target is checked after every play, never after a discard.
    pub fn play(&mut self, events: &mut EventBus) -> Result<PlayOutcome, RunError> {
        self.require_phase(Phase::Playing)?;
        let outcome = self.round.play(events)?;
        self.check_outcome(events);
        Ok(outcome)
    }
}

use super::*;
use crate::{BlindOutcome, Event, EventBus};
use log::info;

impl RunState {
    pub fn select_blind(&mut self, kind: BlindKind, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::SelectingBlind)?;
        let idx = self
            .config
            .blind_index(kind)
            .ok_or(RunError::UnknownBlind(kind))?;
        if idx >= self.unlocked {
            return Err(RunError::BlindLocked(kind));
        }
        let target = self.config.blinds[idx].requirement;

        self.current = Some(idx);
        self.phase = Phase::Playing;
        let rules = self.round.rules();
        events.push(Event::BlindStarted {
            blind: kind,
            target,
            plays: rules.plays,
            discards: rules.discards,
        });
        info!("starting {} (target {target})", kind.id());
        self.round.start_round(target, self.rng.as_mut(), events);
        Ok(())
    }

    pub fn start_new_round_after_result(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.require_phase(Phase::RoundResult)?;
        self.phase = Phase::SelectingBlind;
        self.current = None;
        self.round.reset();
        events.push(Event::ReturnedToBlindSelect);
        Ok(())
    }

    /// Moves to the result screen once the round engine reports a finished round.
    pub(super) fn check_outcome(&mut self, events: &mut EventBus) -> Option<RoundResult> {
        let outcome = match self.round.status() {
            RoundStatus::Won => BlindOutcome::Cleared,
            RoundStatus::Exhausted => BlindOutcome::Failed,
            RoundStatus::Initialized | RoundStatus::Playing => return None,
        };
        let blind = self.current_blind()?.kind;
        let score = self.round.state().score;
        let target = self.round.target();

        match outcome {
            BlindOutcome::Cleared => {
                events.push(Event::BlindCleared {
                    blind,
                    score,
                    target,
                });
                info!("cleared {} with {score}/{target}", blind.id());
                self.unlock_next(events);
            }
            BlindOutcome::Failed => {
                events.push(Event::BlindFailed {
                    blind,
                    score,
                    target,
                });
                info!("failed {} with {score}/{target}", blind.id());
            }
        }

        let result = RoundResult {
            blind,
            outcome,
            score,
            target,
        };
        self.phase = Phase::RoundResult;
        self.last_result = Some(result);
        Some(result)
    }

    fn unlock_next(&mut self, events: &mut EventBus) {
        if self.unlocked >= self.config.blinds.len() {
            return;
        }
        let kind = self.config.blinds[self.unlocked].kind;
        self.unlocked += 1;
        events.push(Event::BlindUnlocked { blind: kind });
    }
}

//! Synchronous session core
//!
//! Owns the game, the buffered input slot and the milestone bookkeeping.
//! It has no clock: the runner decides when ticks and timer expiries happen
//! and feeds them in, so every transition here is deterministic.

use crate::collaborator::{MilestoneError, SwapReceipt};
use crate::settings::{Settings, SettingsError};
use crate::sim::{Direction, GameState, StepOutcome, step};

use super::input::InputSignal;
use super::snapshot::{Snapshot, SwapOutcome};

/// What the caller must do after handing an input to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// Stored for the next tick
    Buffered,
    /// Dropped: the game is stopped or the heading would reverse
    Ignored,
    /// Leave now
    Exit,
}

/// Request to start the milestone action, tagged with the session it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneTrigger {
    pub generation: u64,
    pub score: u32,
}

/// One game session plus everything that must reset with it
#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    threshold: u32,
    /// Latest unconsumed heading request
    pending: Option<Direction>,
    milestone_fired: bool,
    generation: u64,
    swap: SwapOutcome,
    banner: bool,
}

impl Session {
    /// New session, seeded from settings or from entropy
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, seed)
    }

    /// Settings are validated here, so hand-built ones are caught too
    pub fn with_seed(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            game: GameState::new(settings.board(), seed),
            threshold: settings.milestone_threshold,
            pending: None,
            milestone_fired: false,
            generation: 0,
            swap: SwapOutcome::Idle,
            banner: false,
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn swap_outcome(&self) -> &SwapOutcome {
        &self.swap
    }

    pub fn milestone_fired(&self) -> bool {
        self.milestone_fired
    }

    pub fn banner(&self) -> bool {
        self.banner
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    /// Accept one input. Headings overwrite any earlier unconsumed request,
    /// except a reversal of the heading applied on the last step, which is
    /// dropped so a burst collapses to its latest non-reversing request.
    pub fn handle_input(&mut self, signal: InputSignal) -> InputEffect {
        match signal {
            InputSignal::Exit => InputEffect::Exit,
            InputSignal::Move(_) if !self.is_running() => InputEffect::Ignored,
            InputSignal::Move(dir) if dir.is_opposite(self.game.direction()) => {
                InputEffect::Ignored
            }
            InputSignal::Move(dir) => {
                self.pending = Some(dir);
                InputEffect::Buffered
            }
        }
    }

    /// Advance one step and decide whether the milestone fires.
    ///
    /// The flag is raised before the trigger is returned, so however long
    /// the action takes the same session can never fire twice.
    pub fn tick(&mut self) -> (StepOutcome, Option<MilestoneTrigger>) {
        let requested = self.pending.take();
        let outcome = step(&mut self.game, requested);

        if !outcome.alive {
            return (outcome, None);
        }

        if self.milestone_fired || outcome.score < self.threshold {
            return (outcome, None);
        }

        self.milestone_fired = true;
        self.swap = SwapOutcome::Pending;
        self.banner = true;
        log::info!(
            "Milestone reached: score {} (session {})",
            outcome.score,
            self.generation
        );

        let trigger = MilestoneTrigger {
            generation: self.generation,
            score: outcome.score,
        };
        (outcome, Some(trigger))
    }

    /// Apply the result of a milestone action. Returns false (and changes
    /// nothing) when the result belongs to an earlier session.
    pub fn settle(
        &mut self,
        generation: u64,
        result: Result<SwapReceipt, MilestoneError>,
    ) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding milestone result from session {} (now {})",
                generation,
                self.generation
            );
            return false;
        }

        self.swap = match result {
            Ok(receipt) => {
                log::info!("Milestone action succeeded: {}", receipt.reference);
                SwapOutcome::Succeeded {
                    reference: receipt.reference,
                }
            }
            Err(MilestoneError::Busy) => {
                log::info!("Milestone action skipped: collaborator busy");
                SwapOutcome::Skipped {
                    reason: MilestoneError::Busy.to_string(),
                }
            }
            Err(err) => {
                log::warn!("Milestone action failed: {}", err);
                SwapOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };
        true
    }

    /// Display timeout for a settled outcome
    pub fn expire_outcome(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.swap.is_terminal() {
            return false;
        }
        self.swap = SwapOutcome::Idle;
        true
    }

    /// Display timeout for the milestone banner
    pub fn expire_banner(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.banner {
            return false;
        }
        self.banner = false;
        true
    }

    /// Start a fresh session. Anything still in flight from the old one
    /// becomes stale.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.milestone_fired = false;
        self.swap = SwapOutcome::Idle;
        self.banner = false;
        self.pending = None;
        self.game.restart();
        log::info!("Session {} started", self.generation);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            tick: self.game.time_ticks(),
            board: self.game.board(),
            snake: self.game.snake().iter().copied().collect(),
            food: self.game.food(),
            heading: self.game.direction(),
            score: self.game.score(),
            state: self.game.phase(),
            swap: self.swap.clone(),
            banner: self.banner,
            milestone_threshold: self.threshold,
        }
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }
}

//! Async session driver
//!
//! A single task owns the `Session` and serializes everything that touches
//! it: the fixed-period tick, input commands, milestone settlements and the
//! display timers. Milestone actions and timers run on their own tasks and
//! report back through an internal channel, tagged with the generation that
//! started them.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::collaborator::{Collaborator, MilestoneError, SwapReceipt};
use crate::settings::{Settings, SettingsError};

use super::controller::{InputEffect, MilestoneTrigger, Session};
use super::input::InputSignal;
use super::snapshot::Snapshot;

/// Commands accepted from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(InputSignal),
    Restart,
}

/// How `SessionRunner::run` ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Exit input; the collaborator's `on_exit` was called
    Exited,
    /// Every `SessionHandle` was dropped
    Detached,
}

/// Internal completions, always tagged with the session they belong to
#[derive(Debug)]
enum Event {
    Settled {
        generation: u64,
        result: Result<SwapReceipt, MilestoneError>,
    },
    OutcomeExpired {
        generation: u64,
    },
    BannerExpired {
        generation: u64,
    },
}

/// Presentation-side handle: send input, read snapshots
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Snapshot>,
}

impl SessionHandle {
    /// Returns false once the runner has stopped
    pub fn send(&self, signal: InputSignal) -> bool {
        self.commands.send(Command::Input(signal)).is_ok()
    }

    /// Unmapped keys are ignored and report false
    pub fn press_key(&self, key: &str) -> bool {
        InputSignal::from_key(key).is_some_and(|signal| self.send(signal))
    }

    /// Pointer press, as an offset from the centre of the input surface
    pub fn pointer(&self, offset: Vec2) -> bool {
        InputSignal::from_pointer(offset).is_some_and(|signal| self.send(signal))
    }

    pub fn restart(&self) -> bool {
        self.commands.send(Command::Restart).is_ok()
    }

    pub fn exit(&self) -> bool {
        self.send(InputSignal::Exit)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }
}

/// Drives one `Session` against the clock
pub struct SessionRunner<C: Collaborator> {
    session: Session,
    collaborator: Arc<C>,
    tick_period: Duration,
    outcome_display: Duration,
    banner_display: Duration,
    commands: mpsc::UnboundedReceiver<Command>,
    events_tx: mpsc::UnboundedSender<Event>,
    events: mpsc::UnboundedReceiver<Event>,
    snapshots: watch::Sender<Snapshot>,
    outcome_timer: Option<JoinHandle<()>>,
    banner_timer: Option<JoinHandle<()>>,
}

impl<C: Collaborator> SessionRunner<C> {
    pub fn new(
        settings: &Settings,
        collaborator: Arc<C>,
    ) -> Result<(Self, SessionHandle), SettingsError> {
        Self::with_session(Session::new(settings)?, settings, collaborator)
    }

    /// Drive an already-built session (e.g. one with a fixed seed)
    pub fn with_session(
        session: Session,
        settings: &Settings,
        collaborator: Arc<C>,
    ) -> Result<(Self, SessionHandle), SettingsError> {
        settings.validate()?;
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (events_tx, events) = mpsc::unbounded_channel();
        let (snapshots, snapshots_rx) = watch::channel(session.snapshot());

        let runner = Self {
            session,
            collaborator,
            tick_period: settings.tick_period(),
            outcome_display: settings.outcome_display(),
            banner_display: settings.banner_display(),
            commands,
            events_tx,
            events,
            snapshots,
            outcome_timer: None,
            banner_timer: None,
        };
        let handle = SessionHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
        };
        Ok((runner, handle))
    }

    /// Run until exit input or until every handle is dropped.
    pub async fn run(mut self) -> RunEnd {
        log::info!(
            "Session {} running ({} ms ticks)",
            self.session.generation(),
            self.tick_period.as_millis()
        );
        let mut ticker = schedule(self.tick_period);

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Input(signal)) => {
                        if self.session.handle_input(signal) == InputEffect::Exit {
                            self.cancel_timers();
                            self.collaborator.on_exit();
                            return RunEnd::Exited;
                        }
                    }
                    Some(Command::Restart) => {
                        self.restart();
                        ticker = schedule(self.tick_period);
                    }
                    None => {
                        log::info!("All session handles dropped, stopping");
                        self.cancel_timers();
                        return RunEnd::Detached;
                    }
                },

                Some(event) = self.events.recv() => self.on_event(event),

                _ = ticker.tick(), if self.session.is_running() => self.on_tick(),
            }
        }
    }

    fn on_tick(&mut self) {
        let (outcome, trigger) = self.session.tick();

        if let Some(trigger) = trigger {
            self.start_milestone(trigger);
            let timer = self.arm(
                self.banner_display,
                Event::BannerExpired {
                    generation: trigger.generation,
                },
            );
            replace_timer(&mut self.banner_timer, timer);
        }

        if !outcome.alive {
            log::info!(
                "Session {} stopped with score {}",
                self.session.generation(),
                outcome.score
            );
        }

        self.publish();
    }

    /// Invoke the collaborator and let its future settle on its own task.
    /// Nothing here waits for it and nothing cancels it.
    fn start_milestone(&self, trigger: MilestoneTrigger) {
        let action = self.collaborator.on_score_milestone(trigger.score);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = action.await;
            let _ = events.send(Event::Settled {
                generation: trigger.generation,
                result,
            });
        });
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Settled { generation, result } => {
                if self.session.settle(generation, result) {
                    let timer =
                        self.arm(self.outcome_display, Event::OutcomeExpired { generation });
                    replace_timer(&mut self.outcome_timer, timer);
                    self.publish();
                }
            }
            Event::OutcomeExpired { generation } => {
                if self.session.expire_outcome(generation) {
                    self.outcome_timer = None;
                    self.publish();
                }
            }
            Event::BannerExpired { generation } => {
                if self.session.expire_banner(generation) {
                    self.banner_timer = None;
                    self.publish();
                }
            }
        }
    }

    fn restart(&mut self) {
        self.cancel_timers();
        self.session.restart();
        self.publish();
    }

    /// One-shot timer that posts `event` after `delay`
    fn arm(&self, delay: Duration, event: Event) -> JoinHandle<()> {
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = events.send(event);
        })
    }

    fn cancel_timers(&mut self) {
        for timer in [self.outcome_timer.take(), self.banner_timer.take()]
            .into_iter()
            .flatten()
        {
            timer.abort();
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.session.snapshot());
    }
}

/// Tick schedule whose first tick lands one full period from now
fn schedule(period: Duration) -> Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

fn replace_timer(slot: &mut Option<JoinHandle<()>>, timer: JoinHandle<()>) {
    if let Some(old) = slot.replace(timer) {
        old.abort();
    }
}

//! Async match runner.
//!
//! Owns one [`MatchSession`] inside a tokio task and drives it with real
//! timers: a one-second clock deadline and, while an automated actor holds
//! the turn, a think-time deadline tagged with that turn's number. Pausing
//! holds back only the clock deadline. Inbound commands arrive on a channel;
//! every transition that changes state publishes a fresh snapshot.
//!
//! All timers are locals of the task. Whichever way the task exits (match
//! over, `Leave`, dropped sender, or abort from [`MatchHandle`]'s `Drop`),
//! nothing is left scheduled against the session.

use anyhow::{Context, Result};
use domino_match::{
    MatchEnded, MatchEvent, MatchSession, MatchSnapshot, TileId, TransitionError, TurnNumber,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, sleep_until};
use tracing::{debug, info, instrument, warn};

/// Inbound intent from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select (or deselect) a tile in the human's hand.
    Select(TileId),
    /// Play the selected tile.
    Confirm(TileId),
    /// Suspend the clock.
    Pause,
    /// Resume after a pause.
    Resume,
    /// Abandon the match.
    Leave,
}

/// Outbound state after an accepted transition.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    /// Session state after the transition.
    pub snapshot: MatchSnapshot,
    /// Events the transition produced.
    pub events: Vec<MatchEvent>,
}

/// How the runner finished.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The match reached its end.
    Ended(MatchEnded),
    /// The player left; the last snapshot is kept.
    Left(MatchSnapshot),
}

/// Real-time cadence of a running match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    tick_interval: Duration,
    speed: u32,
}

impl Pacing {
    /// Ticks every `tick_interval`, with all delays divided by `speed`.
    pub fn new(tick_interval: Duration, speed: u32) -> Self {
        Self {
            tick_interval,
            speed: speed.max(1),
        }
    }

    /// Wall time between clock ticks.
    pub fn tick_interval(&self) -> Duration {
        self.scale(self.tick_interval)
    }

    /// Converts a match duration into wall time.
    pub fn scale(&self, duration: Duration) -> Duration {
        duration / self.speed
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 1)
    }
}

/// Deadline for the automated actor holding `turn`.
#[derive(Debug, Clone, Copy)]
struct TurnTimer {
    turn: TurnNumber,
    deadline: Instant,
}

impl TurnTimer {
    fn new(turn: TurnNumber, delay: Duration) -> Self {
        Self {
            turn,
            deadline: Instant::now() + delay,
        }
    }
}

/// Drives one session until it ends or is abandoned.
#[derive(Debug)]
pub struct MatchRunner {
    session: MatchSession,
    pacing: Pacing,
    commands: mpsc::UnboundedReceiver<Command>,
    updates: mpsc::UnboundedSender<SessionUpdate>,
}

impl MatchRunner {
    /// Starts `session` on a new task and returns its handle.
    #[instrument(skip(session), fields(mode = %session.mode()))]
    pub fn spawn(session: MatchSession, pacing: Pacing) -> MatchHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        let runner = Self {
            session,
            pacing,
            commands: command_rx,
            updates: update_tx,
        };
        let task = tokio::spawn(runner.run());
        info!("Match runner spawned");

        MatchHandle {
            commands: command_tx,
            updates: update_rx,
            task: Some(task),
        }
    }

    /// Runs the event loop.
    #[instrument(skip(self), fields(mode = %self.session.mode()))]
    pub async fn run(mut self) -> RunOutcome {
        let mut next_tick = Instant::now() + self.pacing.tick_interval();
        let mut automated: Option<TurnTimer> = None;

        self.publish(Vec::new());

        loop {
            if let Some(ended) = self.session.outcome() {
                info!(winner = %ended.winner, "Runner finished");
                return RunOutcome::Ended(ended.clone());
            }

            let pending = self.session.pending_automated_turn();
            if automated.map(|t| t.turn) != pending {
                automated = pending.map(|turn| {
                    let delay = self.pacing.scale(self.session.draw_automated_delay());
                    debug!(turn, delay_ms = delay.as_millis() as u64, "Automated turn armed");
                    TurnTimer::new(turn, delay)
                });
            }

            let paused = self.session.is_paused();
            let turn_deadline = automated.map(|t| t.deadline).unwrap_or(next_tick);

            tokio::select! {
                biased;

                _ = sleep_until(next_tick), if !paused => {
                    next_tick += self.pacing.tick_interval();
                    self.apply(|session| session.tick());
                }

                _ = sleep_until(turn_deadline), if automated.is_some() => {
                    if let Some(timer) = automated.take() {
                        self.apply(|session| session.automated_turn_elapsed(timer.turn));
                    }
                }

                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("Command channel closed");
                        return RunOutcome::Left(self.session.leave());
                    };
                    debug!(?command, "Command received");
                    match command {
                        Command::Leave => {
                            return RunOutcome::Left(self.session.leave());
                        }
                        Command::Pause => {
                            self.apply(|session| session.pause());
                        }
                        Command::Resume => {
                            // A redundant resume must not push the next tick back.
                            if self.apply(|session| session.resume()) {
                                next_tick = Instant::now() + self.pacing.tick_interval();
                            }
                        }
                        Command::Select(tile) => {
                            self.apply(|session| session.select_tile(tile));
                        }
                        Command::Confirm(tile) => {
                            self.apply(|session| session.confirm_tile(tile));
                        }
                    }
                }
            }
        }
    }

    /// Runs a transition and returns true when it changed the session.
    /// Rejected transitions are logged and dropped; no-ops produce no events.
    fn apply(
        &mut self,
        transition: impl FnOnce(&mut MatchSession) -> Result<Vec<MatchEvent>, TransitionError>,
    ) -> bool {
        match transition(&mut self.session) {
            Ok(events) if events.is_empty() => false,
            Ok(events) => {
                self.publish(events);
                true
            }
            Err(error) => {
                debug!(%error, "Transition ignored");
                false
            }
        }
    }

    fn publish(&self, events: Vec<MatchEvent>) {
        let update = SessionUpdate {
            snapshot: self.session.snapshot(),
            events,
        };
        if self.updates.send(update).is_err() {
            debug!("Update receiver dropped");
        }
    }
}

/// Caller's side of a running match. Dropping it cancels the match task.
#[derive(Debug)]
pub struct MatchHandle {
    commands: mpsc::UnboundedSender<Command>,
    updates: mpsc::UnboundedReceiver<SessionUpdate>,
    task: Option<JoinHandle<RunOutcome>>,
}

impl MatchHandle {
    /// Sends a command; returns false once the runner has stopped.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Waits for the next update; `None` once the runner has stopped.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        self.updates.recv().await
    }

    /// Returns an update if one is ready.
    pub fn try_update(&mut self) -> Option<SessionUpdate> {
        self.updates.try_recv().ok()
    }

    /// Waits for the runner to stop and returns how it finished.
    #[instrument(skip(self))]
    pub async fn finish(mut self) -> Result<RunOutcome> {
        let task = self.task.take().context("Match task already joined")?;
        let outcome = task.await.context("Match task failed")?;
        debug!(?outcome, "Match task joined");
        Ok(outcome)
    }

    /// Asks the runner to leave and waits for it.
    pub async fn leave(self) -> Result<RunOutcome> {
        if !self.send(Command::Leave) {
            warn!("Runner already stopped before leave");
        }
        self.finish().await
    }
}

impl Drop for MatchHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Aborting match task");
            task.abort();
        }
    }
}

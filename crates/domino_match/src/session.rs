//! Match session: the state machine behind one game.
//!
//! A session composes the [`Clock`], the [`TurnSequencer`] and the
//! [`MoveResolver`]. It owns all match state and is driven from a single
//! caller through the transition methods below. Every transition either
//! returns the events it produced or a [`TransitionError`]; an error means
//! the session was left untouched.

use crate::{
    Actor, ActorId, ActorKind, Clock, ClockTick, DominoTile, EndReason, Hand, MatchEnded,
    MatchEvent, MatchMode, MoveResolver, TileId, TransitionError, TurnNumber, TurnSequencer,
};
use derive_getters::Getters;
use derive_setters::Setters;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Display names seated by default, human first.
pub const DEFAULT_ACTOR_NAMES: [&str; 4] = ["You", "Ahmad K.", "Fatima L.", "Omar S."];

/// Seat index of the locally controlled actor.
pub const HUMAN_INDEX: usize = 0;

/// Match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Accepting ticks and moves.
    #[display("in_progress")]
    InProgress,
    /// Terminal; nothing changes any more.
    #[display("finished")]
    Finished,
}

/// Parameters for starting a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Table size and scoring ranges.
    mode: MatchMode,
    /// Display names in seat order; seat 0 is the human.
    actor_names: Vec<String>,
    /// Clock budget in seconds.
    time_budget: u32,
    /// Shortest automated think time, in milliseconds.
    automated_delay_min_ms: u64,
    /// Longest automated think time, in milliseconds.
    automated_delay_max_ms: u64,
    /// Seed for the move resolver; `None` draws from OS entropy.
    seed: Option<u64>,
}

impl MatchConfig {
    /// Default configuration for `mode`.
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            actor_names: DEFAULT_ACTOR_NAMES
                .iter()
                .take(mode.actor_count())
                .map(|name| name.to_string())
                .collect(),
            time_budget: mode.time_budget(),
            automated_delay_min_ms: 2000,
            automated_delay_max_ms: 4000,
            seed: None,
        }
    }
}

/// Read-only copy of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Table mode.
    pub mode: MatchMode,
    /// Actors in seat order.
    pub actors: Vec<Actor>,
    /// Seconds left on the clock.
    pub seconds_remaining: u32,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Seat holding (or last holding) the turn.
    pub current_actor_index: usize,
    /// Turns taken so far.
    pub turn: TurnNumber,
    /// Whether the clock is suspended.
    pub paused: bool,
    /// Human's tiles.
    pub hand: Vec<DominoTile>,
    /// Human's pending selection.
    pub selected_tile: Option<TileId>,
    /// Terminal result, once finished.
    pub outcome: Option<MatchEnded>,
}

impl MatchSnapshot {
    /// Actor holding the turn.
    pub fn current_actor(&self) -> Option<&Actor> {
        self.actors.get(self.current_actor_index)
    }

    /// Returns true when the human may select or confirm a tile.
    pub fn is_human_turn(&self) -> bool {
        self.phase == Phase::InProgress && !self.paused && self.current_actor_index == HUMAN_INDEX
    }
}

/// One ongoing game.
#[derive(Debug)]
pub struct MatchSession {
    mode: MatchMode,
    actors: Vec<Actor>,
    hand: Hand,
    selected_tile: Option<TileId>,
    time_budget: u32,
    clock: Clock,
    sequencer: TurnSequencer,
    resolver: MoveResolver,
    phase: Phase,
    outcome: Option<MatchEnded>,
}

impl MatchSession {
    /// Starts a match, seeding the resolver from the config.
    pub fn new(config: MatchConfig) -> Self {
        let rng = MoveResolver::rng_from_seed(config.seed);
        Self::with_rng(config, rng)
    }

    /// Starts a match drawing moves from the given random source.
    #[instrument(skip(config, rng), fields(mode = %config.mode, time_budget = config.time_budget))]
    pub fn with_rng(config: MatchConfig, rng: Box<dyn RngCore + Send>) -> Self {
        let count = config.mode.actor_count();
        let mut actors: Vec<Actor> = (0..count)
            .map(|index| {
                let name = config
                    .actor_names
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_ACTOR_NAMES[index].to_string());
                let kind = if index == HUMAN_INDEX {
                    ActorKind::Human
                } else {
                    ActorKind::Automated
                };
                Actor::new(ActorId::new(format!("player{}", index + 1)), name, kind)
            })
            .collect();
        actors[HUMAN_INDEX].set_current_turn(true);

        let sequencer = TurnSequencer::new(actors.iter().map(|a| a.id().clone()).collect());

        let (min_ms, max_ms) = if config.automated_delay_min_ms <= config.automated_delay_max_ms {
            (config.automated_delay_min_ms, config.automated_delay_max_ms)
        } else {
            (config.automated_delay_max_ms, config.automated_delay_min_ms)
        };
        let resolver = MoveResolver::new(
            rng,
            config.mode.human_score_range(),
            config.mode.automated_score_range(),
            min_ms..=max_ms,
        );

        let mut clock = Clock::new();
        clock.start(config.time_budget);

        info!(actors = count, "Match session started");

        Self {
            mode: config.mode,
            actors,
            hand: Hand::starter(),
            selected_tile: None,
            time_budget: config.time_budget,
            clock,
            sequencer,
            resolver,
            phase: Phase::InProgress,
            outcome: None,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Applies one clock second.
    #[instrument(skip(self), fields(mode = %self.mode, seconds_remaining = self.clock.seconds_remaining()))]
    pub fn tick(&mut self) -> Result<Vec<MatchEvent>, TransitionError> {
        self.ensure_in_progress()?;
        if self.clock.is_paused() {
            return Err(TransitionError::Paused);
        }

        match self.clock.tick() {
            ClockTick::Idle => Ok(Vec::new()),
            ClockTick::Ticked(seconds_remaining) => Ok(vec![MatchEvent::Ticked { seconds_remaining }]),
            ClockTick::Expired => {
                let winner = self.leading_actor_index();
                let mut events = vec![MatchEvent::Ticked {
                    seconds_remaining: 0,
                }];
                events.push(self.finish(winner, EndReason::TimeExpired));
                Ok(events)
            }
        }
    }

    /// Selects a tile from the human's hand, or clears the selection when
    /// the same tile is selected again.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn select_tile(&mut self, tile: TileId) -> Result<Vec<MatchEvent>, TransitionError> {
        self.ensure_human_can_act()?;
        if !self.hand.contains(tile) {
            return Err(self.reject(TransitionError::TileNotInHand { tile }));
        }

        self.selected_tile = if self.selected_tile == Some(tile) {
            None
        } else {
            Some(tile)
        };
        debug!(selected = ?self.selected_tile, "Selection changed");
        Ok(vec![MatchEvent::TileSelected {
            tile: self.selected_tile,
        }])
    }

    /// Plays the selected tile for the human.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn confirm_tile(&mut self, tile: TileId) -> Result<Vec<MatchEvent>, TransitionError> {
        self.ensure_human_can_act()?;
        match self.selected_tile {
            None => return Err(self.reject(TransitionError::NoTileSelected)),
            Some(selected) if selected != tile => {
                return Err(self.reject(TransitionError::TileNotSelected { tile }));
            }
            Some(_) => {}
        }
        if self.hand.remove(tile).is_none() {
            return Err(self.reject(TransitionError::TileNotInHand { tile }));
        }
        self.selected_tile = None;

        let outcome = self
            .resolver
            .resolve_human_move(&mut self.actors[HUMAN_INDEX]);
        info!(tile, score_delta = outcome.score_delta, "Human move confirmed");

        let mut events = vec![MatchEvent::MoveResolved(outcome)];
        events.push(self.after_move(HUMAN_INDEX));
        Ok(events)
    }

    /// Plays the automated actor holding `turn`, once its delay has elapsed.
    ///
    /// Pausing only suspends the clock, so automated actors still move
    /// while paused.
    #[instrument(skip(self), fields(mode = %self.mode, current = self.sequencer.current_index()))]
    pub fn automated_turn_elapsed(
        &mut self,
        turn: TurnNumber,
    ) -> Result<Vec<MatchEvent>, TransitionError> {
        self.ensure_in_progress()?;
        if turn != self.sequencer.turn() {
            return Err(self.reject(TransitionError::StaleTurn {
                expected: self.sequencer.turn(),
                got: turn,
            }));
        }
        let index = self.sequencer.current_index();
        if self.actors[index].is_human() {
            return Err(self.reject(TransitionError::NotYourTurn {
                actor: self.actors[index].id().clone(),
            }));
        }

        let outcome = self.resolver.resolve_automated_move(&mut self.actors[index]);
        let mut events = vec![MatchEvent::MoveResolved(outcome)];
        events.push(self.after_move(index));
        Ok(events)
    }

    /// Suspends the clock. Pausing twice is harmless.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn pause(&mut self) -> Result<Vec<MatchEvent>, TransitionError> {
        self.ensure_in_progress()?;
        if self.clock.is_paused() {
            return Ok(Vec::new());
        }
        self.clock.pause();
        info!("Match paused");
        Ok(vec![MatchEvent::Paused])
    }

    /// Resumes a paused clock.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn resume(&mut self) -> Result<Vec<MatchEvent>, TransitionError> {
        self.ensure_in_progress()?;
        if !self.clock.is_paused() {
            return Ok(Vec::new());
        }
        self.clock.resume();
        info!("Match resumed");
        Ok(vec![MatchEvent::Resumed])
    }

    /// Walks away from the match. The clock is stopped, no result is
    /// produced, and the session is consumed.
    #[instrument(skip(self), fields(mode = %self.mode, phase = %self.phase))]
    pub fn leave(mut self) -> MatchSnapshot {
        self.clock.stop();
        info!(
            seconds_remaining = self.clock.seconds_remaining(),
            "Left match"
        );
        self.snapshot()
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Copies the session state for rendering.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            mode: self.mode,
            actors: self.actors.clone(),
            seconds_remaining: self.clock.seconds_remaining(),
            phase: self.phase,
            current_actor_index: self.sequencer.current_index(),
            turn: self.sequencer.turn(),
            paused: self.clock.is_paused(),
            hand: self.hand.tiles().to_vec(),
            selected_tile: self.selected_tile,
            outcome: self.outcome.clone(),
        }
    }

    /// Turn an automated actor is waiting to play, if any.
    pub fn pending_automated_turn(&self) -> Option<TurnNumber> {
        let current = &self.actors[self.sequencer.current_index()];
        (self.phase == Phase::InProgress && !current.is_human()).then(|| self.sequencer.turn())
    }

    /// Draws the think time for the next automated move.
    pub fn draw_automated_delay(&mut self) -> Duration {
        self.resolver.automated_delay()
    }

    /// Table mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Actors in seat order.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// The locally controlled actor.
    pub fn human(&self) -> &Actor {
        &self.actors[HUMAN_INDEX]
    }

    /// Actor holding the turn.
    pub fn current_actor(&self) -> &Actor {
        &self.actors[self.sequencer.current_index()]
    }

    /// Seat index holding the turn.
    pub fn current_actor_index(&self) -> usize {
        self.sequencer.current_index()
    }

    /// Turns taken so far.
    pub fn turn(&self) -> TurnNumber {
        self.sequencer.turn()
    }

    /// Seconds left on the clock.
    pub fn seconds_remaining(&self) -> u32 {
        self.clock.seconds_remaining()
    }

    /// Seconds the clock has run.
    pub fn elapsed_seconds(&self) -> u32 {
        self.time_budget.saturating_sub(self.clock.seconds_remaining())
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true once the match has ended.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Returns true while the clock is suspended.
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Human's remaining tiles.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Human's pending selection.
    pub fn selected_tile(&self) -> Option<TileId> {
        self.selected_tile
    }

    /// Terminal result, once finished.
    pub fn outcome(&self) -> Option<&MatchEnded> {
        self.outcome.as_ref()
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn ensure_in_progress(&self) -> Result<(), TransitionError> {
        if self.phase == Phase::Finished {
            debug!("Transition on finished session ignored");
            return Err(TransitionError::SessionFinished);
        }
        Ok(())
    }

    fn ensure_human_can_act(&self) -> Result<(), TransitionError> {
        self.ensure_in_progress()?;
        if self.clock.is_paused() {
            return Err(self.reject(TransitionError::Paused));
        }
        let current = self.current_actor();
        if !current.is_human() {
            return Err(self.reject(TransitionError::NotYourTurn {
                actor: current.id().clone(),
            }));
        }
        Ok(())
    }

    fn reject(&self, error: TransitionError) -> TransitionError {
        warn!(error = %error, turn = self.sequencer.turn(), "Transition rejected");
        error
    }

    /// Ends the match on an emptied hand, otherwise passes the turn.
    fn after_move(&mut self, mover: usize) -> MatchEvent {
        if self.actors[mover].hand_is_empty() {
            return self.finish(mover, EndReason::HandEmptied);
        }

        self.actors[mover].set_current_turn(false);
        let next = self.sequencer.advance().clone();
        let index = self.sequencer.current_index();
        self.actors[index].set_current_turn(true);
        MatchEvent::TurnPassed {
            actor: next,
            index,
            turn: self.sequencer.turn(),
        }
    }

    /// Highest score wins; ties go to the lower seat.
    fn leading_actor_index(&self) -> usize {
        let mut best = 0;
        for (index, actor) in self.actors.iter().enumerate().skip(1) {
            if actor.score() > self.actors[best].score() {
                best = index;
            }
        }
        best
    }

    fn finish(&mut self, winner: usize, reason: EndReason) -> MatchEvent {
        self.clock.stop();
        self.phase = Phase::Finished;
        self.selected_tile = None;
        for actor in &mut self.actors {
            actor.set_current_turn(false);
        }

        let ended = MatchEnded {
            winner: self.actors[winner].id().clone(),
            reason,
            final_scores: self
                .actors
                .iter()
                .map(|a| (a.id().clone(), *a.score()))
                .collect(),
            elapsed_seconds: self.elapsed_seconds(),
        };
        info!(
            winner = %ended.winner,
            reason = %reason,
            elapsed_seconds = ended.elapsed_seconds,
            "Match ended"
        );
        self.outcome = Some(ended.clone());
        MatchEvent::MatchEnded(ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(mode: MatchMode) -> MatchSession {
        MatchSession::with_rng(MatchConfig::new(mode), Box::new(StdRng::seed_from_u64(3)))
    }

    #[test]
    fn starts_with_human_holding_turn() {
        let session = session(MatchMode::FourPlayer);
        assert_eq!(session.actors().len(), 4);
        assert!(*session.human().is_current_turn());
        assert_eq!(
            session
                .actors()
                .iter()
                .filter(|a| *a.is_current_turn())
                .count(),
            1
        );
        assert_eq!(session.seconds_remaining(), 480);
        assert_eq!(session.pending_automated_turn(), None);
    }

    #[test]
    fn select_toggles_selection() {
        let mut session = session(MatchMode::OneOnOne);
        session.select_tile(2).unwrap();
        assert_eq!(session.selected_tile(), Some(2));
        session.select_tile(2).unwrap();
        assert_eq!(session.selected_tile(), None);
        assert_eq!(
            session.select_tile(99),
            Err(TransitionError::TileNotInHand { tile: 99 })
        );
    }

    #[test]
    fn confirm_requires_matching_selection() {
        let mut session = session(MatchMode::OneOnOne);
        assert_eq!(session.confirm_tile(1), Err(TransitionError::NoTileSelected));
        session.select_tile(1).unwrap();
        assert_eq!(
            session.confirm_tile(2),
            Err(TransitionError::TileNotSelected { tile: 2 })
        );
        let events = session.confirm_tile(1).unwrap();
        assert!(matches!(events[0], MatchEvent::MoveResolved(_)));
        assert!(matches!(events[1], MatchEvent::TurnPassed { index: 1, .. }));
        assert!(!session.hand().contains(1));
        assert_eq!(session.pending_automated_turn(), Some(1));
    }

    #[test]
    fn stale_automated_timer_is_rejected() {
        let mut session = session(MatchMode::FourPlayer);
        session.select_tile(1).unwrap();
        session.confirm_tile(1).unwrap();
        let before = session.snapshot();
        assert_eq!(
            session.automated_turn_elapsed(0),
            Err(TransitionError::StaleTurn {
                expected: 1,
                got: 0
            })
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn paused_session_rejects_moves_and_ticks() {
        let mut session = session(MatchMode::OneOnOne);
        assert_eq!(session.pause().unwrap(), vec![MatchEvent::Paused]);
        assert!(session.pause().unwrap().is_empty());
        assert_eq!(session.tick(), Err(TransitionError::Paused));
        assert_eq!(session.select_tile(1), Err(TransitionError::Paused));
        assert_eq!(session.seconds_remaining(), 245);
        assert_eq!(session.resume().unwrap(), vec![MatchEvent::Resumed]);
        session.tick().unwrap();
        assert_eq!(session.seconds_remaining(), 244);
    }

    #[test]
    fn automated_turn_plays_while_paused() {
        let mut session = session(MatchMode::OneOnOne);
        session.select_tile(1).unwrap();
        session.confirm_tile(1).unwrap();
        session.pause().unwrap();

        let events = session.automated_turn_elapsed(1).unwrap();
        assert!(matches!(events[0], MatchEvent::MoveResolved(_)));
        assert_eq!(*session.actors()[1].tiles_remaining(), 6);
        assert_eq!(session.current_actor_index(), HUMAN_INDEX);
        assert!(session.is_paused());
        assert_eq!(session.seconds_remaining(), 245);
    }

    #[test]
    fn leading_actor_tie_goes_to_lower_seat() {
        let mut session = session(MatchMode::FourPlayer);
        for (index, score) in [20, 35, 35, 10].into_iter().enumerate() {
            session.actors[index].apply_move(score);
        }
        assert_eq!(session.leading_actor_index(), 1);

        session.actors[3].apply_move(25);
        assert_eq!(session.leading_actor_index(), 1);
        session.actors[3].apply_move(1);
        assert_eq!(session.leading_actor_index(), 3);
    }

    #[test]
    fn time_expiry_picks_highest_score() {
        let config = MatchConfig::new(MatchMode::OneOnOne).with_time_budget(3);
        let mut session = MatchSession::with_rng(config, Box::new(StdRng::seed_from_u64(5)));
        session.select_tile(1).unwrap();
        session.confirm_tile(1).unwrap();
        session.tick().unwrap();
        session.tick().unwrap();
        let events = session.tick().unwrap();
        let ended = events
            .iter()
            .find_map(MatchEvent::as_match_ended)
            .cloned()
            .unwrap();
        assert_eq!(ended.winner.as_str(), "player1");
        assert_eq!(ended.reason, EndReason::TimeExpired);
        assert_eq!(ended.elapsed_seconds, 3);
        assert!(session.actors().iter().all(|a| !*a.is_current_turn()));
    }

    #[test]
    fn leave_stops_clock() {
        let session = session(MatchMode::OneOnOne);
        let snapshot = session.leave();
        assert_eq!(snapshot.phase, Phase::InProgress);
        assert_eq!(snapshot.seconds_remaining, 245);
        assert!(snapshot.outcome.is_none());
    }
}

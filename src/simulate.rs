//! Headless match with an autopilot in the human seat.

use anyhow::{Result, bail};
use domino_match::{MatchReport, MatchSession, TurnNumber};
use tracing::{debug, info, instrument};

use crate::runner::{Command, MatchRunner, Pacing, RunOutcome};

/// Plays a full match, confirming the human's first tile on every human turn.
#[instrument(skip_all, fields(mode = %session.mode()))]
pub async fn simulate(session: MatchSession, pacing: Pacing) -> Result<MatchReport> {
    let mode = session.mode();
    let human = session.human().id().clone();
    let mut handle = MatchRunner::spawn(session, pacing);
    let mut acted_on: Option<TurnNumber> = None;

    while let Some(update) = handle.next_update().await {
        let snapshot = &update.snapshot;
        if !snapshot.is_human_turn() || acted_on == Some(snapshot.turn) {
            continue;
        }
        let Some(tile) = snapshot.hand.first() else {
            continue;
        };

        debug!(turn = snapshot.turn, %tile, "Autopilot playing tile");
        acted_on = Some(snapshot.turn);
        handle.send(Command::Select(tile.id));
        handle.send(Command::Confirm(tile.id));
    }

    match handle.finish().await? {
        RunOutcome::Ended(ended) => {
            let report = MatchReport::new(mode, &ended, &human);
            info!(won = report.won, game_time = report.game_time, "Simulation finished");
            Ok(report)
        }
        RunOutcome::Left(_) => bail!("Simulated match stopped before it ended"),
    }
}

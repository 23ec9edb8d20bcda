//! Interactive terminal match.

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use domino_match::{ActorId, MatchEvent, MatchReport, MatchSession, MatchSnapshot, Phase};
use ratatui::DefaultTerminal;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::runner::{Command, MatchRunner, Pacing, RunOutcome};
use crate::screen::{command_for_key, draw_match, draw_report};

/// Plays one match in the terminal.
///
/// Returns the report when the match ran to its end, `None` when the
/// player left early. The terminal is restored on every exit path.
#[instrument(skip_all, fields(mode = %session.mode()))]
pub async fn play(session: MatchSession, pacing: Pacing) -> Result<Option<MatchReport>> {
    let mut terminal = ratatui::init();
    let result = run_match_screen(&mut terminal, session, pacing).await;
    ratatui::restore();
    result
}

async fn run_match_screen(
    terminal: &mut DefaultTerminal,
    session: MatchSession,
    pacing: Pacing,
) -> Result<Option<MatchReport>> {
    let mode = session.mode();
    let human: ActorId = session.human().id().clone();
    let mut snapshot = session.snapshot();
    let mut status = String::new();

    let mut handle = MatchRunner::spawn(session, pacing);

    loop {
        while let Some(update) = handle.try_update() {
            if let Some(message) = describe(&update.events, &update.snapshot) {
                status = message;
            }
            snapshot = update.snapshot;
        }

        terminal.draw(|frame| draw_match(frame, &snapshot, &status))?;

        if snapshot.phase == Phase::Finished {
            break;
        }

        // Poll for input with short timeout to keep the loop responsive.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if let Some(command) = command_for_key(key.code, &snapshot) {
                debug!(?command, "Key mapped to command");
                if command == Command::Leave {
                    handle.leave().await?;
                    info!("Player left the match");
                    return Ok(None);
                }
                handle.send(command);
            }
        }

        sleep(Duration::from_millis(10)).await;
    }

    let ended = match handle.finish().await? {
        RunOutcome::Ended(ended) => ended,
        RunOutcome::Left(_) => return Ok(None),
    };
    let report = MatchReport::new(mode, &ended, &human);
    info!(won = report.won, "Showing match report");

    loop {
        terminal.draw(|frame| draw_report(frame, &report))?;
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }

    Ok(Some(report))
}

/// One-line status for the footer.
fn describe(events: &[MatchEvent], snapshot: &MatchSnapshot) -> Option<String> {
    let name_of = |id: &ActorId| {
        snapshot
            .actors
            .iter()
            .find(|a| a.id() == id)
            .map(|a| a.display_name().clone())
            .unwrap_or_else(|| id.to_string())
    };

    events.iter().rev().find_map(|event| match event {
        MatchEvent::MatchEnded(ended) => {
            Some(format!("{} wins ({})", name_of(&ended.winner), ended.reason))
        }
        MatchEvent::MoveResolved(outcome) => Some(format!(
            "{} scored +{}",
            name_of(&outcome.actor),
            outcome.score_delta
        )),
        MatchEvent::Paused => Some("Paused - press p to resume".to_string()),
        MatchEvent::Resumed => Some(String::new()),
        _ => None,
    })
}

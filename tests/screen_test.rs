//! Tests for match screen rendering and key mapping.

use crossterm::event::KeyCode;
use domino_cafe::{Command, command_for_key, draw_match, draw_report};
use domino_match::{EndReason, MatchConfig, MatchEnded, MatchMode, MatchReport, MatchSession};
use ratatui::{Terminal, backend::TestBackend};

fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn session() -> MatchSession {
    MatchSession::new(MatchConfig::new(MatchMode::OneOnOne).with_seed(Some(1)))
}

#[test]
fn test_match_screen_shows_clock_actors_and_hand() {
    let snapshot = session().snapshot();
    let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
    terminal
        .draw(|frame| draw_match(frame, &snapshot, ""))
        .unwrap();

    let text = rendered_text(&terminal);
    assert!(text.contains("4:05"));
    assert!(text.contains("You"));
    assert!(text.contains("Ahmad K."));
    assert!(text.contains("[6|4]"));
    assert!(text.contains("You's turn"));
}

#[test]
fn test_report_screen_shows_outcome() {
    let ended = MatchEnded {
        winner: "player1".into(),
        reason: EndReason::HandEmptied,
        final_scores: vec![("player1".into(), 127), ("player2".into(), 85)],
        elapsed_seconds: 245,
    };
    let report = MatchReport::new(MatchMode::OneOnOne, &ended, &"player1".into());
    let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
    terminal.draw(|frame| draw_report(frame, &report)).unwrap();

    let text = rendered_text(&terminal);
    assert!(text.contains("Victory!"));
    assert!(text.contains("+350"));
    assert!(text.contains("4:05"));
}

#[test]
fn test_keys_map_to_commands() {
    let mut session = session();
    let snapshot = session.snapshot();
    assert_eq!(
        command_for_key(KeyCode::Char('1'), &snapshot),
        Some(Command::Select(1))
    );
    assert_eq!(command_for_key(KeyCode::Char('8'), &snapshot), None);
    assert_eq!(command_for_key(KeyCode::Char('0'), &snapshot), None);
    assert_eq!(command_for_key(KeyCode::Enter, &snapshot), None);
    assert_eq!(
        command_for_key(KeyCode::Char('p'), &snapshot),
        Some(Command::Pause)
    );
    assert_eq!(
        command_for_key(KeyCode::Char('q'), &snapshot),
        Some(Command::Leave)
    );

    session.select_tile(3).unwrap();
    session.pause().unwrap();
    let snapshot = session.snapshot();
    assert_eq!(
        command_for_key(KeyCode::Enter, &snapshot),
        Some(Command::Confirm(3))
    );
    assert_eq!(
        command_for_key(KeyCode::Char('p'), &snapshot),
        Some(Command::Resume)
    );
}

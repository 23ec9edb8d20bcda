//! Stateless terminal rendering of a match snapshot.

use crossterm::event::KeyCode;
use domino_match::{MatchReport, MatchSnapshot, Phase, format_clock};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::runner::Command;

/// Key help shown under the hand.
pub const KEY_HELP: &str = "1-7 select  Enter play  p pause  q leave";

/// Renders the match screen.
pub fn draw_match(frame: &mut Frame, snapshot: &MatchSnapshot, status: &str) {
    let [header, table, hand, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_header(frame, header, snapshot);
    draw_table(frame, table, snapshot);
    draw_hand(frame, hand, snapshot);

    let footer_text = if status.is_empty() { KEY_HELP } else { status };
    let footer_widget = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::bordered());
    frame.render_widget(footer_widget, footer);
}

fn draw_header(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot) {
    let mut spans = vec![
        Span::styled(
            format!("Domino Café - {}", snapshot.mode),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format_clock(snapshot.seconds_remaining),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if snapshot.paused {
        spans.push(Span::styled("  PAUSED", Style::default().fg(Color::Red)));
    }
    if snapshot.phase == Phase::Finished {
        spans.push(Span::styled("  FINISHED", Style::default().fg(Color::Magenta)));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::bordered());
    frame.render_widget(header, area);
}

fn draw_table(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot) {
    let lines: Vec<Line> = snapshot
        .actors
        .iter()
        .map(|actor| {
            let marker = if *actor.is_current_turn() { "▶ " } else { "  " };
            let style = if *actor.is_current_turn() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{:<12}", actor.display_name()), style),
                Span::raw(format!(
                    "  score {:>4}  tiles {}",
                    actor.score(),
                    actor.tiles_remaining()
                )),
            ])
        })
        .collect();

    let title = match snapshot.current_actor() {
        Some(actor) if snapshot.phase == Phase::InProgress => {
            format!(" {}'s turn ", actor.display_name())
        }
        _ => " Table ".to_string(),
    };
    let table = Paragraph::new(lines).block(Block::bordered().title(title));
    frame.render_widget(table, area);
}

fn draw_hand(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot) {
    let spans: Vec<Span> = snapshot
        .hand
        .iter()
        .enumerate()
        .flat_map(|(slot, tile)| {
            let style = if snapshot.selected_tile == Some(tile.id) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if snapshot.is_human_turn() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::raw(format!("{}:", slot + 1)),
                Span::styled(tile.to_string(), style),
                Span::raw(" "),
            ]
        })
        .collect();

    let hand = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::bordered().title(" Your tiles "));
    frame.render_widget(hand, area);
}

/// Renders the results screen.
pub fn draw_report(frame: &mut Frame, report: &MatchReport) {
    let headline_style = if report.won {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::styled(
        if report.won { "Victory!" } else { "Defeat" },
        headline_style,
    )];
    lines.extend(
        report
            .to_string()
            .lines()
            .skip(1)
            .map(|line| Line::raw(line.to_string())),
    );
    lines.push(Line::raw(""));
    lines.push(Line::raw("Press any key to return"));

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::bordered().title(" Match over "));
    frame.render_widget(widget, frame.area());
}

/// Maps a key press to a runner command for the current snapshot.
pub fn command_for_key(code: KeyCode, snapshot: &MatchSnapshot) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Leave),
        KeyCode::Char('p') => Some(if snapshot.paused {
            Command::Resume
        } else {
            Command::Pause
        }),
        KeyCode::Enter => snapshot.selected_tile.map(Command::Confirm),
        KeyCode::Char(c) => {
            let slot = c.to_digit(10)? as usize;
            let tile = snapshot.hand.get(slot.checked_sub(1)?)?;
            Some(Command::Select(tile.id))
        }
        _ => None,
    }
}

//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use rewind_tictactoe::{Phase, Player, Position, Snapshot, Square, Standing};

use super::app::{App, NameEntry};

/// Draws the whole screen from the app's latest snapshot.
pub fn draw(frame: &mut Frame, app: &App) {
    let snapshot = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Board and side panels
            Constraint::Length(3), // Status
            Constraint::Length(3), // Message and help
        ])
        .split(frame.area());

    let title = Paragraph::new("Rewind - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(42),
            Constraint::Length(24),
            Constraint::Length(30),
        ])
        .split(chunks[1]);

    draw_board(frame, middle[0], snapshot, app.cursor());
    draw_moves(frame, middle[1], snapshot);
    match app.editing() {
        Some(entry) => draw_name_entry(frame, middle[2], snapshot, entry),
        None => draw_scores(frame, middle[2], snapshot),
    }

    let status = if *snapshot.phase() == Phase::NotStarted {
        "Not started".to_string()
    } else {
        snapshot.status_text().clone()
    };
    let status = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(app.message(), Style::default().fg(Color::White))),
        Line::from(Span::styled(
            "arrows/1-9 move  enter place  [ ] history  0 start  s begin  r reset  tab names  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: Position) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, positions) in Position::ALL.chunks(3).enumerate() {
        draw_row(frame, rows[row * 2], snapshot, cursor, positions);
        if row < 2 {
            let sep = Paragraph::new("─".repeat(38)).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    cursor: Position,
    positions: &[Position],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (i, pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[i * 2], snapshot, cursor, *pos);
        if i < 2 {
            let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: Position, pos: Position) {
    let (symbol, base_style) = match snapshot.board().get(pos) {
        Square::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Square::Occupied(Player::X) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let winning = snapshot
        .winning_line()
        .as_ref()
        .is_some_and(|win| win.contains(pos));

    let style = if pos == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else if winning {
        base_style.bg(Color::Green).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(symbol, style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_moves(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let items: Vec<ListItem> = snapshot
        .moves()
        .iter()
        .map(|label| {
            let style = if *label.current() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(label.text().clone(), style))
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Moves").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn draw_scores(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let lines: Vec<Line> = snapshot
        .seats()
        .iter()
        .map(|seat| {
            let color = match seat.standing() {
                Standing::Leading => Color::Green,
                Standing::Trailing => Color::Red,
                Standing::Level => Color::White,
            };
            let marker = if *snapshot.phase() != Phase::NotStarted
                && seat.seat() == snapshot.seat_to_move()
            {
                "> "
            } else {
                "  "
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(seat.score_text(), Style::default().fg(color)),
                Span::styled(
                    format!(" [{}]", seat.symbol()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let scores = Paragraph::new(lines).block(Block::default().title("Score").borders(Borders::ALL));
    frame.render_widget(scores, area);
}

fn draw_name_entry(frame: &mut Frame, area: Rect, snapshot: &Snapshot, entry: &NameEntry) {
    let lines: Vec<Line> = snapshot
        .seats()
        .iter()
        .map(|seat| {
            if *seat.seat() == entry.seat {
                Line::from(Span::styled(
                    format!("> {}_", entry.buffer),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", seat.name()))
            }
        })
        .collect();

    let panel =
        Paragraph::new(lines).block(Block::default().title("Names").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

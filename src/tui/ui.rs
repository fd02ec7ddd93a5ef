//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::app::App;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_habits(frame, app, body[0]);
    render_streaks(frame, app, body[1]);
    render_status_bar(frame, app, chunks[2]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let title = format!(
        " {} - {}/{} habits done ",
        app.today.format("%A %b %d"),
        app.completed_count(),
        app.entries.len()
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render today's habit checklist.
fn render_habits(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == app.selected;

            let checkbox = if entry.completed { "[x]" } else { "[ ]" };

            let mut spans = vec![
                Span::styled(
                    format!("{checkbox} "),
                    Style::default().fg(if entry.completed {
                        Color::Green
                    } else {
                        Color::White
                    }),
                ),
                Span::raw(format!("{} ", entry.emoji)),
                Span::styled(
                    &entry.name,
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format!("  {}", entry.time_of_day),
                    Style::default().fg(Color::DarkGray),
                ),
            ];

            if !entry.category.name.is_empty() {
                spans.push(Span::styled(
                    format!("  [{}]", entry.category.name),
                    Style::default().fg(Color::Blue),
                ));
            }

            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Today ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    // Create list state for scrolling
    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the streak side panel.
fn render_streaks(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let lines: Vec<Line<'_>> = app
        .templates
        .iter()
        .filter_map(|template| {
            let streak = app.streaks.get(&template.id)?;
            let flame = if streak.current_streak > 0 {
                Span::styled(
                    format!("🔥 {:>3}", streak.current_streak),
                    Style::default().fg(Color::Green),
                )
            } else {
                Span::styled("    0", Style::default().fg(Color::DarkGray))
            };
            Some(Line::from(vec![
                flame,
                Span::raw(format!("  best {:>3}  ", streak.longest_streak)),
                Span::raw(template.name.clone()),
            ]))
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Streaks ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    frame.render_widget(panel, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("j/k:nav | space:toggle | r:refresh | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

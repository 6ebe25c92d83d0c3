//! UI rendering logic

use pidscout_core::host::PICK_PROMPT;
use pidscout_core::Candidate;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::picker::PickerState;

const HELP_TEXT: &str = "Type to filter | ↑/↓ PgUp/PgDn:Navigate | Enter:Attach | Esc:Cancel";

/// Draw the picker
pub fn draw(frame: &mut Frame, state: &mut PickerState, candidates: &[Candidate])
{
    let constraints: Box<[Constraint]> = Box::new([
        Constraint::Length(3), // Query input
        Constraint::Min(0),    // Candidates
        Constraint::Length(3), // Footer
    ]);
    let chunks = Layout::vertical(constraints).split(frame.area());

    draw_query(frame, chunks[0], state);
    draw_candidates(frame, chunks[1], state, candidates);
    draw_footer(frame, chunks[2], state, candidates.len());
}

/// Draw the query input line
fn draw_query(frame: &mut Frame, area: Rect, state: &PickerState)
{
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(state.query.as_str()),
    ]);
    let input = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(PICK_PROMPT));

    frame.render_widget(input, area);

    // Place the cursor after the typed text (inside the border)
    let typed = u16::try_from(state.query.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(3).saturating_add(typed).min(area.right().saturating_sub(2));
    frame.set_cursor_position((x, area.y + 1));
}

/// Draw the table of candidates matching the query
fn draw_candidates(frame: &mut Frame, area: Rect, state: &mut PickerState, candidates: &[Candidate])
{
    if state.visible.is_empty() {
        let empty = Paragraph::new("No matching processes")
            .block(Block::default().borders(Borders::ALL).title("Processes"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = state
        .visible
        .iter()
        .filter_map(|&index| candidates.get(index))
        .map(|candidate| {
            Row::new(vec![
                Cell::from(candidate.pid().to_string()),
                Cell::from(candidate.short_name.as_str()),
                Cell::from(candidate.description()),
                Cell::from(candidate.detail()).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Percentage(25),
        Constraint::Percentage(30),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Processes"))
        .header(Row::new(vec![
            Cell::from("PID").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Name").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Title").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Path").style(Style::default().add_modifier(Modifier::BOLD)),
        ]))
        .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Draw the footer with help text and match count
fn draw_footer(frame: &mut Frame, area: Rect, state: &PickerState, total: usize)
{
    let footer = Paragraph::new(HELP_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{}/{} processes", state.visible.len(), total)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(footer, area);
}

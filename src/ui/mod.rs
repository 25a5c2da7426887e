//! User interface rendering.
//!
//! Draws the sermon document with citations highlighted, plus a status bar
//! showing the corpus state and the latest substitution outcome.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, CorpusState};
use crate::services::editor::Atom;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // Status bar at bottom
        ])
        .split(f.size());

    draw_document(f, app, chunks[0]);
    draw_status_bar(f, app, chunks[1]);
}

/// Text shown for one atom.
fn atom_text(atom: &Atom) -> String {
    match atom {
        Atom::Char('\t') => "    ".to_string(),
        Atom::Char(c) => c.to_string(),
        Atom::Citation(node) => node.plain_text(),
    }
}

fn citation_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Rgb(229, 231, 235))
        .add_modifier(Modifier::ITALIC)
}

fn styled_line(atoms: &[Atom]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut plain = String::new();

    for atom in atoms {
        match atom {
            Atom::Char(_) => plain.push_str(&atom_text(atom)),
            Atom::Citation(_) => {
                if !plain.is_empty() {
                    spans.push(Span::raw(std::mem::take(&mut plain)));
                }
                spans.push(Span::styled(atom_text(atom), citation_style()));
            }
        }
    }
    if !plain.is_empty() {
        spans.push(Span::raw(plain));
    }
    Line::from(spans)
}

#[allow(clippy::cast_possible_truncation)]
fn draw_document(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} {} ", app.config.app_name(), app.config.app_version()),
            Style::default().fg(Color::Yellow),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = app.document.lines();
    let (cursor_line, cursor_col) = app.document.cursor_line_col();
    let height = inner.height as usize;
    let scroll = if height == 0 { 0 } else { cursor_line.saturating_sub(height - 1) };

    let visible: Vec<Line> = lines
        .iter()
        .skip(scroll)
        .take(height)
        .map(|atoms| styled_line(atoms))
        .collect();
    f.render_widget(Paragraph::new(visible), inner);

    // Cursor column is the display width of everything before it on the line.
    let before: String = lines
        .get(cursor_line)
        .map(|atoms| atoms[..cursor_col.min(atoms.len())].iter().map(atom_text).collect::<String>())
        .unwrap_or_default();
    let x = inner.x.saturating_add(before.width() as u16).min(inner.right().saturating_sub(1));
    let y = inner.y + (cursor_line - scroll) as u16;
    if height > 0 {
        f.set_cursor(x, y);
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (message, style) = if let Some(error) = &app.error_message {
        (error.clone(), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        (status.clone(), Style::default().fg(Color::Green))
    } else {
        let color = match app.corpus_state {
            CorpusState::Loaded(_) => Color::Gray,
            CorpusState::Loading(_) => Color::Yellow,
            CorpusState::Unconfigured | CorpusState::Failed(_) => Color::Red,
        };
        (app.corpus_state.label(), Style::default().fg(color))
    };

    let line = Line::from(vec![
        Span::styled(message, style),
        Span::styled(
            "  |  /창1:1 + space  Ctrl-Z undo  Ctrl-Y redo  Esc quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

//! Terminal UI rendering with ratatui

use crate::app::{App, StatusLine};
use crate::game::Action;
use crate::input::key_label;
use crate::piece::Piece;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Total width needed: containers(44) + menu(52)
const SCREEN_WIDTH: u16 = 96;
/// Total height needed: title(3) + panels(16) + status(4) + history(7)
const SCREEN_HEIGHT: u16 = 30;

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = center_rect(frame.area(), SCREEN_WIDTH, SCREEN_HEIGHT);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(16), // Containers + menu
            Constraint::Length(4),  // Status line
            Constraint::Min(3),     // History
        ])
        .split(area);

    let title_lines = vec![
        Line::styled("TETRS RESERVE", Style::default().fg(Color::Cyan).bold()),
        Line::styled("current game state", Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(
        Paragraph::new(title_lines).alignment(Alignment::Center),
        layout[0],
    );

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(40)])
        .split(layout[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Queue, wraps once ids grow
            Constraint::Length(4), // Reserve
            Constraint::Min(4),    // Stats
        ])
        .split(middle[0]);

    let queue = app.game.queue();
    let queue_title = format!(" QUEUE {}/{} ", queue.len(), queue.capacity());
    render_pieces(frame, left[0], &queue_title, queue.iter(), app.show_colors);
    let stack = app.game.stack();
    let stack_title = format!(" RESERVE {}/{} ", stack.len(), stack.capacity());
    render_pieces(frame, left[1], &stack_title, stack.iter(), app.show_colors);
    render_stats(frame, left[2], app);

    render_menu(frame, middle[1], app);
    render_status(frame, layout[2], app.status());
    render_history(frame, layout[3], app);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
}

/// One `[K-id]` chip per piece, or `(empty)`
fn piece_spans<'a>(pieces: impl Iterator<Item = &'a Piece>, show_colors: bool) -> Line<'static> {
    let spans: Vec<Span<'static>> = pieces
        .map(|piece| {
            let style = if show_colors {
                Style::default().fg(piece.kind().color()).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(format!("{} ", piece), style)
        })
        .collect();

    if spans.is_empty() {
        Line::styled("(empty)", Style::default().fg(Color::DarkGray))
    } else {
        Line::from(spans)
    }
}

fn render_pieces<'a>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    pieces: impl Iterator<Item = &'a Piece>,
    show_colors: bool,
) {
    let block = panel(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(piece_spans(pieces, show_colors)).wrap(Wrap { trim: false }),
        inner,
    );
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel(" STATS ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stats = &app.game.stats;
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Yellow).bold();
    let row = |name: &'static str, n: u64| {
        Line::from(vec![
            Span::styled(format!("{:<10}", name), label),
            Span::styled(n.to_string(), value),
        ])
    };

    let lines = vec![
        row("Dealt", app.game.generator().generated()),
        row("Played", stats.played),
        row("Reserved", stats.reserved),
        row("Used", stats.used),
        row("Swaps", stats.swaps),
        row("Refused", stats.refused),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_menu(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel(" MENU ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key_style = Style::default().fg(Color::Yellow).bold();
    let mut lines = vec![Line::raw("")];
    for action in Action::all() {
        lines.push(menu_line(
            &keys_text(app.bindings.keys_for(*action)),
            &format!("{}. {}", action.choice(), action.description()),
            key_style,
        ));
    }
    lines.push(menu_line(&keys_text(&app.bindings.quit), "0. Quit", key_style));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn menu_line(keys: &str, text: &str, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:>7}  ", keys), key_style),
        Span::styled(text.to_string(), Style::default().fg(Color::White)),
    ])
}

fn keys_text(keys: &[crossterm::event::KeyCode]) -> String {
    keys.iter().map(|&k| key_label(k)).collect::<Vec<_>>().join("/")
}

fn status_style(status: &StatusLine) -> Style {
    if status.success {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&StatusLine>) {
    let block = panel(" STATUS ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match status {
        Some(status) => Line::styled(status.text.clone(), status_style(status).bold()),
        None => Line::styled("Choose an action", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);
}

fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel(" HISTORY ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // The newest entry is already on the status line
    let lines: Vec<Line> = app
        .history()
        .skip(1)
        .map(|status| Line::styled(status.text.clone(), status_style(status).dim()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crate::settings::Settings;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(SCREEN_WIDTH, SCREEN_HEIGHT)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_queue_and_empty_reserve() {
        let app = App::with_game(GameState::with_seed(1), &Settings::default());
        let text = screen_text(&app);
        assert!(text.contains("QUEUE 5/5"));
        assert!(text.contains("-0]"));
        assert!(text.contains("-4]"));
        assert!(text.contains("(empty)"));
        assert!(text.contains("Choose an action"));
    }

    #[test]
    fn test_renders_status_after_action() {
        let mut app = App::with_game(GameState::with_seed(1), &Settings::default());
        app.handle_command(crate::input::Command::Act(Action::Reserve));
        let text = screen_text(&app);
        assert!(text.contains("RESERVE 1/3"));
        assert!(text.contains("reserved on the stack"));
    }

    #[test]
    fn test_long_ids_stay_visible() {
        let mut app = App::with_game(GameState::with_seed(1), &Settings::default());
        for _ in 0..1000 {
            app.handle_command(crate::input::Command::Act(Action::Play));
        }
        for _ in 0..3 {
            app.handle_command(crate::input::Command::Act(Action::Reserve));
        }
        app.handle_command(crate::input::Command::Act(Action::SwapBlock));

        let text = screen_text(&app);
        // Queue holds 1002, 1001, 1000, 1006, 1007; the stack 1003, 1004, 1005
        for id in 1000..=1007 {
            let chip = format!("-{}]", id);
            assert!(text.contains(&chip), "{} missing from\n{}", chip, text);
        }
        assert!(text.contains("stack ["));
    }
}

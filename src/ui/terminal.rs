//! Full-screen chat front-end
//!
//! The rendering thread owns `ChatUI` and the terminal. Submissions go out
//! through a `Dispatcher`; completions are drained between frames.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;

use crate::core::error::Result;
use crate::session::{Dispatcher, Session};
use crate::ui::colors;
use crate::ui::state::{ChatUI, Speaker, QUICK_COMMANDS};

const FRAME_POLL: Duration = Duration::from_millis(50);

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the chat screen until the user quits
///
/// Must be called from outside the runtime; workers are spawned onto
/// `runtime` while this thread keeps drawing.
pub fn run(session: Arc<Session>, runtime: Handle, bot_name: &str) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let (dispatcher, mut completions) = Dispatcher::new(session, runtime);

    let mut ui = ChatUI::new();
    ui.welcome(bot_name);
    tracing::info!("Chat screen started");

    while !ui.should_quit {
        while let Ok(completion) = completions.try_recv() {
            tracing::debug!("Completed {}", completion.id);
            ui.complete(completion);
        }

        guard.terminal.draw(|frame| draw(frame, &ui, bot_name))?;

        if !event::poll(FRAME_POLL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(utterance) = ui.on_key(key) {
                ui.begin_request(&utterance);
                dispatcher.submit(utterance);
            }
        }
    }

    tracing::info!("Chat screen closed ({} requests still running)", ui.in_flight);
    Ok(())
}

/// Draw one frame: header, message log, input line, quick-command bar
pub fn draw(frame: &mut Frame, ui: &ChatUI, bot_name: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], ui, bot_name);
    render_log(frame, chunks[1], ui, bot_name);
    render_input(frame, chunks[2], ui);
    render_quick_bar(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, ui: &ChatUI, bot_name: &str) {
    let status = ui.status();
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", bot_name),
            Style::default()
                .fg(colors::HEADER_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Neural Omni Virtual Assistant   ", Style::default().fg(colors::MUTED)),
        Span::styled(status.label(), Style::default().fg(colors::status_color(status))),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_log(frame: &mut Frame, area: Rect, ui: &ChatUI, bot_name: &str) {
    // Wrapped here rather than by `Paragraph`, so the scroll offset counts screen rows
    let text_width = (area.width as usize).saturating_sub(2).max(1);
    let mut lines: Vec<Line> = Vec::new();
    for entry in &ui.log {
        let name = match entry.speaker {
            Speaker::User => "You",
            Speaker::Assistant => bot_name,
        };
        lines.push(Line::from(Span::styled(
            name.to_string(),
            Style::default()
                .fg(colors::speaker_color(entry.speaker))
                .add_modifier(Modifier::BOLD),
        )));
        for text in entry.message.lines() {
            for row in wrap_text(text, text_width) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", row),
                    Style::default().fg(colors::TEXT),
                )));
            }
        }
        lines.push(Line::default());
    }

    let visible = area.height as usize;
    let bottom = lines.len().saturating_sub(visible) as u16;
    let scroll = bottom.saturating_sub(ui.scroll_back);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

/// Greedy word wrap to `width` columns; words longer than a row are split
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        let needed = if row_len == 0 { chars.len() } else { row_len + 1 + chars.len() };
        if needed > width && row_len > 0 {
            rows.push(std::mem::take(&mut row));
            row_len = 0;
        }
        while chars.len() > width {
            let rest = chars.split_off(width);
            rows.push(chars.into_iter().collect());
            chars = rest;
        }
        if row_len > 0 {
            row.push(' ');
            row_len += 1;
        }
        row.extend(chars.iter());
        row_len += chars.len();
    }

    if row_len > 0 || rows.is_empty() {
        rows.push(row);
    }
    rows
}

fn render_input(frame: &mut Frame, area: Rect, ui: &ChatUI) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::INPUT_BORDER))
        .title(" Message (Enter to send, Esc to quit) ");
    let widget = Paragraph::new(ui.input.as_str())
        .style(Style::default().fg(colors::TEXT))
        .block(block);
    frame.render_widget(widget, area);

    let width = ui.input.chars().count() as u16;
    let max = area.width.saturating_sub(2);
    frame.set_cursor(area.x + 1 + width.min(max), area.y + 1);
}

fn render_quick_bar(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::with_capacity(QUICK_COMMANDS.len() * 2);
    for (i, command) in QUICK_COMMANDS.iter().enumerate() {
        spans.push(Span::styled(
            format!(" F{} ", i + 1),
            Style::default()
                .fg(colors::HEADER_ACCENT)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{} ", command),
            Style::default().fg(colors::QUICK_FG),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

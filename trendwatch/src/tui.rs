//! # Terminal User Interface (TUI)
//!
//! The render surface: one thread owning the terminal and the [`AppModel`],
//! redrawing at 10 Hz. Worker updates are drained from a crossbeam channel
//! before every frame; user actions go out as [`Command`]s over a tokio
//! mpsc sender.
//!
//! ## Input contract
//!
//! - typing edits the search input, `Enter` submits
//! - empty/whitespace input is dropped here, before any command or busy
//!   state exists
//! - a busy trigger ignores re-dispatch until its release arrives
//! - `Esc` or `Ctrl-C` quits; quitting drops the command sender, which is
//!   what tells the worker the session is over

use anyhow::Result;
use crossbeam_channel::Receiver;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

pub mod diagnostics;
pub mod keywords;
mod theme;

use diagnostics::DiagnosticsPanel;
use keywords::{PopularPanel, RecentPanel};
use theme::{severity_color, ACCENT, DIM, TEXT};

use crate::domain::Trigger;
use crate::model::{AppModel, Command, Update};

const STYLE_HEADING: Style = Style::new().fg(ACCENT).add_modifier(Modifier::BOLD);
const STYLE_DIM: Style = Style::new().fg(DIM);
const STYLE_KEY: Style = Style::new().fg(ACCENT);

/// Redraw cadence.
const UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// TUI application state: the model plus the command channel out.
pub struct App {
    pub model: AppModel,
    commands: UnboundedSender<Command>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(commands: UnboundedSender<Command>) -> Self {
        Self { model: AppModel::new(), commands, should_quit: false }
    }

    /// Process one key press.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit_search(),
            KeyCode::Backspace => {
                self.model.input.pop();
            }
            KeyCode::F(2) => self.dispatch(Command::GenerateData),
            KeyCode::F(3) => self.dispatch(Command::ClearCache),
            KeyCode::F(4) => self.dispatch(Command::Status),
            KeyCode::F(5) => self.dispatch(Command::Compare),
            KeyCode::Char(c) => self.model.input.push(c),
            _ => {}
        }
    }

    /// Validate and submit the current input. Empty or whitespace-only
    /// input aborts silently: no command, no busy state, nothing rendered.
    fn submit_search(&mut self) {
        let keyword = self.model.input.trim();
        if keyword.is_empty() {
            return;
        }
        self.dispatch(Command::Search(keyword.to_string()));
    }

    /// Send a command unless its trigger is already busy.
    fn dispatch(&mut self, command: Command) {
        if self.model.is_busy(command.trigger()) {
            return;
        }
        let _ = self.commands.send(command);
    }
}

/// Run the TUI until the user quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(
    updates: &Receiver<Update>,
    commands: UnboundedSender<Command>,
    base_url: &str,
) -> Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(commands);
    let mut last_draw: Option<Instant> = None;

    loop {
        // Drain worker updates before rendering (non-blocking)
        let now = Instant::now();
        while let Ok(update) = updates.try_recv() {
            app.model.apply(update, now);
        }
        app.model.tick(now);

        if last_draw.is_none_or(|t| t.elapsed() >= UPDATE_INTERVAL) {
            terminal.draw(|f| draw(f, &app.model, base_url))?;
            last_draw = Some(Instant::now());
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn draw(f: &mut ratatui::Frame, model: &AppModel, base_url: &str) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Keyword + diagnostics panels
            Constraint::Length(3), // Status bar / toast
        ])
        .split(f.area());

    render_header(f, outer[0], model, base_url);
    render_input(f, outer[1], model);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer[2]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(cols[1]);

    PopularPanel::render(f, cols[0], &model.popular);
    RecentPanel::render(f, right[0], &model.recent);
    DiagnosticsPanel::render(f, right[1], &model.diagnostics);

    render_status_bar(f, outer[3], model);
}

fn render_header(f: &mut ratatui::Frame, area: Rect, model: &AppModel, base_url: &str) {
    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled("TRENDWATCH", STYLE_HEADING),
        Span::styled(" | ", STYLE_DIM),
        Span::styled(base_url.to_string(), Style::new().fg(TEXT)),
        Span::styled(" | ", STYLE_DIM),
        Span::styled(format!("인기 {}", model.popular.len()), Style::new().fg(TEXT)),
        Span::styled(" | ", STYLE_DIM),
        Span::styled(format!("최근 {}", model.recent.len()), Style::new().fg(TEXT)),
    ])])
    .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(ACCENT)));
    f.render_widget(header, area);
}

fn render_input(f: &mut ratatui::Frame, area: Rect, model: &AppModel) {
    let title = if model.is_busy(Trigger::Search) {
        model.trigger_label(Trigger::Search)
    } else {
        "검색어 입력"
    };
    let input = Paragraph::new(format!("{}_", model.input))
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(TEXT));
    f.render_widget(input, area);
}

fn render_status_bar(f: &mut ratatui::Frame, area: Rect, model: &AppModel) {
    // The toast region replaces the keybind line while a message is shown;
    // newest message wins, expiry is handled by the model tick.
    let line = if let Some(toast) = &model.toast {
        Line::from(Span::styled(
            toast.message.clone(),
            Style::default().fg(severity_color(toast.severity)).add_modifier(Modifier::BOLD),
        ))
    } else {
        let mut spans = Vec::new();
        for trigger in [
            Trigger::Search,
            Trigger::GenerateData,
            Trigger::ClearCache,
            Trigger::Status,
            Trigger::Compare,
        ] {
            spans.push(Span::styled(trigger.key_hint(), STYLE_KEY));
            spans.push(Span::styled(format!(":{} ", model.trigger_label(trigger)), STYLE_DIM));
        }
        spans.push(Span::styled("Esc", STYLE_KEY));
        spans.push(Span::styled(":종료", STYLE_DIM));
        Line::from(spans)
    };

    let status = Paragraph::new(vec![line])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(DIM)));
    f.render_widget(status, area);
}

//! Terminal UI: file explorer, tabbed editor, terminal pane and status bar.

#![allow(missing_docs)]

use std::io;
use std::time::{Duration as StdDuration, Instant};

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use devfolio_core::attribution::UtmParameters;
use devfolio_core::config::AppConfig;
use devfolio_core::content::Portfolio;
use devfolio_core::markup::{self, Tone};
use devfolio_core::Workbench;
use ratatui::backend::CrosstermBackend;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Terminal,
};
use tracing::{debug, info};

mod input;
mod render;
mod state;

use input::handle_key;
use render::render_ui;
use state::PromptState;

const COLOR_TEAL: Color = Color::Rgb(0, 168, 150);
const COLOR_GREEN: Color = Color::Rgb(46, 204, 113);
const COLOR_RED: Color = Color::Rgb(231, 76, 60);
const COLOR_INFO: Color = Color::Rgb(142, 142, 147);
const COLOR_YELLOW: Color = Color::Rgb(245, 196, 66);
const COLOR_CYAN: Color = Color::Rgb(64, 212, 255);
const COLOR_BLUE: Color = Color::Rgb(86, 156, 214);
const COLOR_MAGENTA: Color = Color::Rgb(191, 90, 242);
const COLOR_PROMPT_BG: Color = Color::Rgb(24, 24, 24);

const EXPLORER_WIDTH: u16 = 26;
const POLL_INTERVAL: StdDuration = StdDuration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Explorer,
    Editor,
    Terminal,
}

impl Focus {
    fn label(self) -> &'static str {
        match self {
            Focus::Explorer => "EXPLORER",
            Focus::Editor => "EDITOR",
            Focus::Terminal => "TERMINAL",
        }
    }
}

#[derive(Debug, Clone)]
struct PromptLine {
    segments: Vec<(String, Style)>,
}

impl PromptLine {
    fn plain(text: impl Into<String>, style: Style) -> Self {
        Self {
            segments: vec![(text.into(), style)],
        }
    }

    /// Converts inline color markers into styled segments.
    fn from_markup(text: &str) -> Self {
        Self {
            segments: markup::parse(text)
                .into_iter()
                .map(|segment| (segment.text, tone_style(segment.tone)))
                .collect(),
        }
    }
}

struct UiState {
    workbench: Workbench,
    focus: Focus,
    prompt: PromptState,
    prompt_label: String,
    attribution: UtmParameters,
}

impl UiState {
    fn new(portfolio: Portfolio, config: &AppConfig, attribution: UtmParameters) -> Self {
        let terminal = &config.terminal;
        Self {
            workbench: Workbench::new(portfolio, config, Local::now()),
            focus: Focus::Explorer,
            prompt: PromptState::default(),
            prompt_label: format!("{}@{}:{}$ ", terminal.user, terminal.host, terminal.cwd),
            attribution,
        }
    }
}

/// Everything the UI needs, already loaded and validated.
#[derive(Debug, Clone)]
pub struct UiOptions {
    pub portfolio: Portfolio,
    pub config: AppConfig,
    pub attribution: UtmParameters,
}

pub fn run_ui(options: UiOptions) -> anyhow::Result<()> {
    let UiOptions {
        portfolio,
        config,
        attribution,
    } = options;
    let mut state = UiState::new(portfolio, &config, attribution);
    info!(name = %state.workbench.portfolio().profile.name, "starting ui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = (|| {
        loop {
            state.workbench.pump(Instant::now());
            terminal.draw(|frame| render_ui(frame.size(), frame, &state))?;

            let timeout = state
                .workbench
                .pending_signals()
                .next_due()
                .map(|due| due.saturating_duration_since(Instant::now()).min(POLL_INTERVAL))
                .unwrap_or(POLL_INTERVAL);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if handle_key(key, &mut state, Instant::now())? {
                        break;
                    }
                }
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    debug!("ui closed");
    result
}

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Default => None,
        Tone::Red => Some(COLOR_RED),
        Tone::Green => Some(COLOR_GREEN),
        Tone::Yellow => Some(COLOR_YELLOW),
        Tone::Blue => Some(COLOR_BLUE),
        Tone::Magenta => Some(COLOR_MAGENTA),
        Tone::Cyan => Some(COLOR_CYAN),
        Tone::White => Some(Color::White),
    }
}

fn tone_style(tone: Tone) -> Style {
    match tone_color(tone) {
        Some(color) => Style::default().fg(color),
        None => Style::default(),
    }
}

fn prompt_line_to_line(line: &PromptLine) -> Line<'static> {
    let spans = line
        .segments
        .iter()
        .map(|(text, style)| Span::styled(text.clone(), *style))
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(COLOR_TEAL)
    } else {
        Style::default().fg(COLOR_INFO)
    };
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(COLOR_YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(border_style)
}

fn label_style() -> Style {
    Style::default().fg(COLOR_INFO)
}

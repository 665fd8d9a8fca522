//! The workbench owns the terminal and the open-panel set and routes every
//! navigation request (terminal signal, explorer row, tab bar) into the same
//! `OpenPanelSet`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::config::{AppConfig, MAX_TERMINAL_HEIGHT, MIN_TERMINAL_HEIGHT};
use crate::content::Portfolio;
use crate::explorer::{ExplorerState, RowKind, ROOT_FOLDER};
use crate::navigation::{breadcrumb, Breadcrumb, OpenPanelSet, PanelId};
use crate::panels::{render_panel, welcome_lines, PanelKind, WELCOME_FILE};
use crate::terminal::{NavigationSignal, SignalSink, TerminalEngine};

#[derive(Debug, Clone)]
struct PendingSignal {
    due: Instant,
    sequence: u64,
    signal: NavigationSignal,
}

/// Navigation signals waiting for their delay to pass.
#[derive(Debug, Clone)]
pub struct SignalQueue {
    now: Instant,
    pending: VecDeque<PendingSignal>,
    next_sequence: u64,
}

impl SignalQueue {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            pending: VecDeque::new(),
            next_sequence: 0,
        }
    }

    /// Time that following `emit` calls are scheduled relative to.
    pub fn set_now(&mut self, now: Instant) {
        self.now = now;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|item| item.due)
    }

    /// Removes and returns every signal due at `now`, oldest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<NavigationSignal> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|item| item.due <= now) {
            if let Some(item) = self.pending.pop_front() {
                due.push(item.signal);
            }
        }
        due
    }
}

impl SignalSink for SignalQueue {
    fn emit(&mut self, signal: NavigationSignal, delay: Duration) {
        let due = self.now + delay;
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        let index = self
            .pending
            .partition_point(|item| (item.due, item.sequence) <= (due, sequence));
        self.pending.insert(
            index,
            PendingSignal {
                due,
                sequence,
                signal,
            },
        );
    }
}

#[derive(Debug, Clone)]
pub struct Workbench {
    portfolio: Portfolio,
    terminal: TerminalEngine,
    panels: OpenPanelSet,
    explorer: ExplorerState,
    signals: SignalQueue,
    terminal_open: bool,
    terminal_height: u16,
    content_scroll: usize,
}

impl Workbench {
    pub fn new(portfolio: Portfolio, config: &AppConfig, now: DateTime<Local>) -> Self {
        let terminal = TerminalEngine::for_portfolio(&portfolio, &config.terminal, now);
        Self {
            portfolio,
            terminal,
            panels: OpenPanelSet::new(config.navigation.cycle),
            explorer: ExplorerState::default(),
            signals: SignalQueue::new(Instant::now()),
            terminal_open: config.terminal.open,
            terminal_height: config
                .terminal
                .height
                .clamp(MIN_TERMINAL_HEIGHT, MAX_TERMINAL_HEIGHT),
            content_scroll: 0,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn terminal(&self) -> &TerminalEngine {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut TerminalEngine {
        &mut self.terminal
    }

    pub fn panels(&self) -> &OpenPanelSet {
        &self.panels
    }

    pub fn explorer(&self) -> &ExplorerState {
        &self.explorer
    }

    pub fn explorer_mut(&mut self) -> &mut ExplorerState {
        &mut self.explorer
    }

    pub fn pending_signals(&self) -> &SignalQueue {
        &self.signals
    }

    /// Runs a terminal line, then applies any navigation that is already due.
    pub fn submit_command(&mut self, raw: &str, now: Instant) -> bool {
        self.signals.set_now(now);
        let ran = self.terminal.submit(raw, &mut self.signals);
        self.pump(now);
        ran
    }

    /// Applies queued navigation signals whose delay has passed. Returns how
    /// many were applied.
    pub fn pump(&mut self, now: Instant) -> usize {
        let due = self.signals.take_due(now);
        let count = due.len();
        for signal in due {
            match signal {
                NavigationSignal::OpenFile(id) => {
                    debug!(panel = %id, "navigation signal");
                    self.open_file(id);
                }
            }
        }
        count
    }

    pub fn open_file(&mut self, id: PanelId) {
        let changed = !self.panels.is_active(&id);
        if let Some(kind) = PanelKind::from_id(&id) {
            self.explorer.reveal(kind);
        }
        let inserted = self.panels.open(id);
        debug!(inserted, "open panel");
        if changed {
            self.content_scroll = 0;
        }
    }

    /// Acts on the selected explorer row: folders toggle, files open.
    pub fn open_selected(&mut self) {
        let Some(row) = self.explorer.selected_row() else {
            return;
        };
        match row.kind {
            RowKind::Folder { .. } => self.explorer.toggle_folder(&row.label),
            RowKind::File(kind) => self.open_file(kind.id()),
        }
    }

    pub fn activate_tab(&mut self, id: &PanelId) -> bool {
        self.track_active(|panels| panels.activate(id))
    }

    pub fn close_tab(&mut self, id: &PanelId) -> bool {
        debug!(panel = %id, "close panel");
        self.track_active(|panels| panels.close(id))
    }

    pub fn close_active(&mut self) -> bool {
        match self.panels.active().cloned() {
            Some(id) => self.close_tab(&id),
            None => false,
        }
    }

    pub fn next_tab(&mut self) -> bool {
        self.track_active(OpenPanelSet::next)
    }

    pub fn previous_tab(&mut self) -> bool {
        self.track_active(OpenPanelSet::previous)
    }

    /// Closes every tab, returning to the welcome panel.
    pub fn close_all(&mut self) {
        debug!("close all panels");
        self.panels.close_all();
        self.content_scroll = 0;
    }

    fn track_active(&mut self, op: impl FnOnce(&mut OpenPanelSet) -> bool) -> bool {
        let before = self.panels.active().cloned();
        let changed = op(&mut self.panels);
        if self.panels.active() != before.as_ref() {
            self.content_scroll = 0;
            if let Some(kind) = self.active_kind() {
                self.explorer.reveal(kind);
            }
        }
        changed
    }

    pub fn breadcrumb(&self) -> Option<Breadcrumb> {
        breadcrumb(ROOT_FOLDER, self.panels.active())
    }

    pub fn active_kind(&self) -> Option<PanelKind> {
        self.panels.active().and_then(PanelKind::from_id)
    }

    /// File name shown above the content pane.
    pub fn active_title(&self) -> &str {
        match self.active_kind() {
            Some(kind) => kind.file_name(),
            None => WELCOME_FILE,
        }
    }

    /// Lines of the active panel, or the welcome panel when nothing (or an
    /// unknown identifier) is active.
    pub fn active_lines(&self) -> Vec<String> {
        match self.active_kind() {
            Some(kind) => render_panel(kind, &self.portfolio),
            None => welcome_lines(&self.portfolio),
        }
    }

    pub fn content_scroll(&self) -> usize {
        self.content_scroll
    }

    pub fn scroll_content_up(&mut self, lines: usize) {
        self.content_scroll = self.content_scroll.saturating_sub(lines);
    }

    pub fn scroll_content_down(&mut self, lines: usize) {
        let max = self.active_lines().len().saturating_sub(1);
        self.content_scroll = (self.content_scroll + lines).min(max);
    }

    pub fn is_terminal_open(&self) -> bool {
        self.terminal_open
    }

    pub fn toggle_terminal(&mut self) {
        self.terminal_open = !self.terminal_open;
    }

    pub fn open_terminal(&mut self) {
        self.terminal_open = true;
    }

    pub fn terminal_height(&self) -> u16 {
        self.terminal_height
    }

    pub fn resize_terminal(&mut self, delta: i16) {
        let height = i32::from(self.terminal_height) + i32::from(delta);
        let height = height.clamp(
            i32::from(MIN_TERMINAL_HEIGHT),
            i32::from(MAX_TERMINAL_HEIGHT),
        );
        self.terminal_height = u16::try_from(height).unwrap_or(MIN_TERMINAL_HEIGHT);
    }
}

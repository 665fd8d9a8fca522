//! Simulated terminal: command resolution, output log, scrollback and
//! command-history recall.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::commands::CommandTable;
use crate::config::TerminalConfig;
use crate::content::Portfolio;
use crate::markup::{paint, Tone};
use crate::navigation::PanelId;
use crate::panels::{render_panel, PanelKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Command,
    Output,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub kind: LineKind,
    pub content: String,
    pub timestamp: Option<DateTime<Local>>,
}

impl TerminalLine {
    fn new(kind: LineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: (kind == LineKind::Command).then(Local::now),
        }
    }
}

/// Signal from the terminal to whoever owns the navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationSignal {
    OpenFile(PanelId),
}

/// Receiver of navigation signals. `delay` is how long the receiver should
/// wait before acting so the command output is seen first.
pub trait SignalSink {
    fn emit(&mut self, signal: NavigationSignal, delay: Duration);
}

impl SignalSink for Vec<NavigationSignal> {
    fn emit(&mut self, signal: NavigationSignal, _delay: Duration) {
        self.push(signal);
    }
}

/// Recall cursor over previously submitted commands.
#[derive(Debug, Clone, Default)]
pub struct HistoryCursor {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl HistoryCursor {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// `None` while editing a fresh line.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        self.cursor = None;
    }

    /// Steps toward the oldest entry and returns it. Stays on the oldest entry
    /// once reached; returns `None` only when there is no history.
    pub fn recall_older(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(index) => index.saturating_sub(1),
        };
        self.cursor = Some(index);
        Some(self.entries[index].as_str())
    }

    /// Steps toward the newest entry. Moving past it leaves history browsing
    /// and returns an empty string; `None` means nothing changed.
    pub fn recall_newer(&mut self) -> Option<&str> {
        let index = self.cursor?;
        if index + 1 < self.entries.len() {
            self.cursor = Some(index + 1);
            Some(self.entries[index + 1].as_str())
        } else {
            self.cursor = None;
            Some("")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    None,
    Unique(String),
    Ambiguous(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct TerminalEngine {
    table: CommandTable,
    files: Vec<(PanelKind, Vec<String>)>,
    log: Vec<TerminalLine>,
    history: HistoryCursor,
    scroll_back: usize,
    navigation_delay: Duration,
}

impl TerminalEngine {
    pub fn new(
        table: CommandTable,
        files: Vec<(PanelKind, Vec<String>)>,
        navigation_delay: Duration,
    ) -> Self {
        Self {
            table,
            files,
            log: Vec::new(),
            history: HistoryCursor::default(),
            scroll_back: 0,
            navigation_delay,
        }
    }

    /// Engine for `portfolio`, with the welcome banner already in the log.
    pub fn for_portfolio(
        portfolio: &Portfolio,
        config: &TerminalConfig,
        now: DateTime<Local>,
    ) -> Self {
        let table = CommandTable::for_portfolio(portfolio, config, now);
        let files = PanelKind::ALL
            .into_iter()
            .map(|kind| (kind, render_panel(kind, portfolio)))
            .collect();
        let mut engine = Self::new(table, files, config.navigation_delay);
        engine.push_lines(
            LineKind::Output,
            [
                paint(
                    Tone::Cyan,
                    format!(
                        "Welcome to {}'s portfolio terminal!",
                        portfolio.profile.name
                    ),
                ),
                paint(Tone::Yellow, "Type \"help\" to see available commands."),
                String::new(),
            ],
        );
        engine
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn log(&self) -> &[TerminalLine] {
        &self.log
    }

    pub fn history(&self) -> &HistoryCursor {
        &self.history
    }

    /// Runs one input line. Returns false for blank input, which changes
    /// nothing.
    pub fn submit(&mut self, raw: &str, sink: &mut dyn SignalSink) -> bool {
        let line = raw.trim();
        if line.is_empty() {
            return false;
        }
        self.push_line(LineKind::Command, line);
        self.history.push(line);

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim_start()),
            None => (line, ""),
        };
        let command = keyword.to_ascii_lowercase();
        debug!(command = %command, "terminal command");

        match command.as_str() {
            "clear" => self.clear(),
            "echo" => self.push_line(LineKind::Output, rest),
            "cat" => self.cat(rest),
            _ => match self.table.lookup(&command) {
                Some(entry) => {
                    let lines = entry.output_lines.clone();
                    let opens = entry.opens_file.clone();
                    self.push_lines(LineKind::Output, lines);
                    if let Some(panel) = opens {
                        debug!(panel = %panel, "terminal requests panel");
                        sink.emit(NavigationSignal::OpenFile(panel), self.navigation_delay);
                    }
                }
                None => self.push_lines(
                    LineKind::Error,
                    [
                        paint(Tone::Red, format!("Command not found: {keyword}")),
                        paint(Tone::Yellow, "Type \"help\" to see available commands."),
                    ],
                ),
            },
        }
        true
    }

    pub fn recall_older(&mut self) -> Option<&str> {
        self.history.recall_older()
    }

    pub fn recall_newer(&mut self) -> Option<&str> {
        self.history.recall_newer()
    }

    /// Empties the output log. History is kept.
    pub fn clear(&mut self) {
        self.log.clear();
        self.scroll_back = 0;
    }

    /// Lines scrolled back from the bottom of the log; zero follows new output.
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_back == 0
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = (self.scroll_back + lines).min(self.log.len().saturating_sub(1));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// Completes the command keyword typed so far.
    pub fn complete(&self, input: &str) -> Completion {
        let prefix = input.trim_start();
        if prefix.is_empty() || prefix.contains(char::is_whitespace) {
            return Completion::None;
        }
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = self
            .table
            .keywords()
            .into_iter()
            .filter(|keyword| keyword.starts_with(&prefix))
            .map(str::to_string)
            .collect::<Vec<_>>();
        match matches.len() {
            0 => Completion::None,
            1 => Completion::Unique(matches.remove(0)),
            _ => {
                matches.sort_unstable();
                Completion::Ambiguous(matches)
            }
        }
    }

    fn cat(&mut self, args: &str) {
        let mut operands = args.split_whitespace();
        let hint = paint(
            Tone::Yellow,
            "Try \"cat [filename]\" or \"ls\" to see available files.",
        );
        let Some(name) = operands.next() else {
            self.push_lines(
                LineKind::Error,
                [paint(Tone::Red, "cat: missing file operand"), hint],
            );
            return;
        };
        if let Some(extra) = operands.next() {
            self.push_lines(
                LineKind::Error,
                [paint(Tone::Red, format!("cat: extra operand '{extra}'")), hint],
            );
            return;
        }
        let found = PanelKind::lookup(name)
            .and_then(|kind| self.files.iter().find(|(file, _)| *file == kind))
            .map(|(_, lines)| lines.clone());
        match found {
            Some(lines) => self.push_lines(LineKind::Output, lines),
            None => self.push_line(
                LineKind::Error,
                paint(Tone::Red, format!("cat: {name}: No such file or directory")),
            ),
        }
    }

    fn push_line(&mut self, kind: LineKind, content: impl Into<String>) {
        if self.scroll_back > 0 {
            self.scroll_back += 1;
        }
        self.log.push(TerminalLine::new(kind, content));
    }

    fn push_lines<I, S>(&mut self, kind: LineKind, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.push_line(kind, line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::strip;
    use chrono::TimeZone;

    fn engine() -> TerminalEngine {
        let portfolio = Portfolio::builtin().expect("builtin content");
        let now = Local
            .with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
            .single()
            .expect("valid local time");
        let mut engine = TerminalEngine::for_portfolio(&portfolio, &TerminalConfig::default(), now);
        engine.clear();
        engine
    }

    fn contents(engine: &TerminalEngine) -> Vec<String> {
        engine.log().iter().map(|line| strip(&line.content)).collect()
    }

    #[test]
    fn banner_greets_by_name() {
        let portfolio = Portfolio::builtin().expect("builtin content");
        let engine =
            TerminalEngine::for_portfolio(&portfolio, &TerminalConfig::default(), Local::now());
        assert_eq!(
            contents(&engine),
            vec![
                "Welcome to Your Name's portfolio terminal!",
                "Type \"help\" to see available commands.",
                "",
            ]
        );
    }

    #[test]
    fn every_table_command_appends_its_lines_and_signals_once() {
        let mut engine = engine();
        let entries = engine.table().entries().cloned().collect::<Vec<_>>();
        for entry in entries {
            engine.clear();
            let mut signals: Vec<NavigationSignal> = Vec::new();
            assert!(engine.submit(&entry.keyword, &mut signals));
            let log = engine.log();
            assert_eq!(log[0].kind, LineKind::Command);
            assert_eq!(log[0].content, entry.keyword.as_str());
            let output = log[1..]
                .iter()
                .map(|line| line.content.clone())
                .collect::<Vec<_>>();
            assert_eq!(output, entry.output_lines, "output of {}", entry.keyword);
            let expected = entry
                .opens_file
                .clone()
                .map(NavigationSignal::OpenFile)
                .into_iter()
                .collect::<Vec<_>>();
            assert_eq!(signals, expected, "signals of {}", entry.keyword);
        }
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        assert!(!engine.submit("", &mut signals));
        assert!(!engine.submit("   ", &mut signals));
        assert!(engine.log().is_empty());
        assert!(engine.history().entries().is_empty());
        assert!(signals.is_empty());
    }

    #[test]
    fn keywords_are_case_insensitive_and_trimmed() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("  AbOuT  ", &mut signals);
        assert_eq!(contents(&engine), vec!["AbOuT", "Opening About.java..."]);
        assert_eq!(signals, vec![NavigationSignal::OpenFile("About.java".into())]);
        assert_eq!(engine.history().entries(), ["AbOuT".to_string()]);
    }

    #[test]
    fn clear_wipes_the_log_but_keeps_history() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("ls", &mut signals);
        engine.submit("clear", &mut signals);
        assert!(engine.log().is_empty());
        assert_eq!(
            engine.history().entries(),
            ["ls".to_string(), "clear".to_string()]
        );
    }

    #[test]
    fn cat_without_operand_prints_usage_and_never_navigates() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("cat", &mut signals);
        assert_eq!(
            contents(&engine)[1..],
            [
                "cat: missing file operand".to_string(),
                "Try \"cat [filename]\" or \"ls\" to see available files.".to_string(),
            ]
        );
        assert!(engine.log()[1..].iter().all(|line| line.kind == LineKind::Error));
        assert!(signals.is_empty());
    }

    #[test]
    fn cat_prints_panel_lines() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("cat about.java", &mut signals);
        let lines = contents(&engine);
        assert_eq!(lines[1], "// About.java");
        assert_eq!(lines[2], "public class About {");
        assert!(signals.is_empty());
    }

    #[test]
    fn cat_reports_unknown_files_and_extra_operands() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("cat secrets.txt", &mut signals);
        engine.submit("cat Work.css skills.json", &mut signals);
        assert_eq!(
            contents(&engine),
            vec![
                "cat secrets.txt",
                "cat: secrets.txt: No such file or directory",
                "cat Work.css skills.json",
                "cat: extra operand 'skills.json'",
                "Try \"cat [filename]\" or \"ls\" to see available files.",
            ]
        );
        assert!(signals.is_empty());
    }

    #[test]
    fn echo_repeats_the_rest_of_the_line() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("echo hello   wide  world", &mut signals);
        engine.submit("echo", &mut signals);
        assert_eq!(
            contents(&engine),
            vec!["echo hello   wide  world", "hello   wide  world", "echo", ""]
        );
    }

    #[test]
    fn unknown_command_reports_not_found_with_hint() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("foobar", &mut signals);
        assert_eq!(
            contents(&engine),
            vec![
                "foobar",
                "Command not found: foobar",
                "Type \"help\" to see available commands.",
            ]
        );
        assert!(signals.is_empty());
        assert_eq!(engine.history().entries(), ["foobar".to_string()]);
    }

    #[test]
    fn recall_older_walks_back_and_stops_at_oldest() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        for command in ["ls", "pwd", "whoami"] {
            engine.submit(command, &mut signals);
        }
        assert_eq!(engine.recall_older(), Some("whoami"));
        assert_eq!(engine.recall_older(), Some("pwd"));
        assert_eq!(engine.recall_older(), Some("ls"));
        assert_eq!(engine.recall_older(), Some("ls"));
        assert_eq!(engine.history().cursor(), Some(0));
    }

    #[test]
    fn recall_newer_returns_to_fresh_line() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        assert_eq!(engine.recall_older(), None);
        assert_eq!(engine.recall_newer(), None);
        engine.submit("ls", &mut signals);
        engine.submit("pwd", &mut signals);
        engine.recall_older();
        engine.recall_older();
        assert_eq!(engine.recall_newer(), Some("pwd"));
        assert_eq!(engine.recall_newer(), Some(""));
        assert_eq!(engine.history().cursor(), None);
        assert_eq!(engine.recall_newer(), None);
        assert_eq!(engine.recall_newer(), None);
    }

    #[test]
    fn submit_resets_history_browsing() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("ls", &mut signals);
        engine.recall_older();
        engine.submit("pwd", &mut signals);
        assert_eq!(engine.history().cursor(), None);
        assert_eq!(engine.recall_older(), Some("pwd"));
    }

    #[test]
    fn output_follows_only_when_at_bottom() {
        let mut engine = engine();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        engine.submit("ls", &mut signals);
        assert!(engine.is_at_bottom());

        engine.scroll_up(3);
        assert_eq!(engine.scroll_back(), 3);
        engine.submit("pwd", &mut signals);
        assert_eq!(engine.scroll_back(), 5);

        engine.scroll_to_bottom();
        engine.submit("whoami", &mut signals);
        assert!(engine.is_at_bottom());

        engine.scroll_up(1_000);
        assert_eq!(engine.scroll_back(), engine.log().len() - 1);
        engine.clear();
        assert!(engine.is_at_bottom());
    }

    #[test]
    fn completion_matches_keyword_prefixes() {
        let engine = engine();
        assert_eq!(engine.complete("wh"), Completion::Unique("whoami".to_string()));
        assert_eq!(
            engine.complete("e"),
            Completion::Ambiguous(vec![
                "echo".to_string(),
                "education".to_string(),
                "experience".to_string(),
            ])
        );
        assert_eq!(engine.complete("CA"), Completion::Unique("cat".to_string()));
        assert_eq!(engine.complete("zz"), Completion::None);
        assert_eq!(engine.complete("cat a"), Completion::None);
        assert_eq!(engine.complete(""), Completion::None);
    }
}

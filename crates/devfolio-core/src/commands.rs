//! Static command table of the simulated terminal.

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::config::TerminalConfig;
use crate::content::Portfolio;
use crate::error::FolioError;
use crate::markup::{paint, Tone};
use crate::navigation::PanelId;
use crate::panels::PanelKind;

/// Commands the engine handles itself instead of looking them up.
pub const ENGINE_COMMANDS: &[&str] = &["clear", "echo", "cat"];

const HELP: &[(&str, &str)] = &[
    ("help", "Show this help message"),
    ("clear", "Clear terminal"),
    ("about", "Open About section"),
    ("work", "Open Work Experience"),
    ("experience", "Open Work Experience"),
    ("education", "Open Education section"),
    ("projects", "Open Projects section"),
    ("skills", "Open Skills section"),
    ("contact", "Open Contact section"),
    ("resume", "Open Resume"),
    ("whoami", "Show user info"),
    ("ls", "List available files"),
    ("pwd", "Show current directory"),
    ("date", "Show current date"),
    ("echo <msg>", "Echo a message"),
    ("cat <file>", "Show file contents"),
];

const NAVIGATION: &[(&str, PanelKind)] = &[
    ("about", PanelKind::About),
    ("work", PanelKind::Work),
    ("experience", PanelKind::Work),
    ("education", PanelKind::Education),
    ("projects", PanelKind::Projects),
    ("skills", PanelKind::Skills),
    ("contact", PanelKind::Contact),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub keyword: SmolStr,
    pub output_lines: Vec<String>,
    pub opens_file: Option<PanelId>,
}

impl CommandEntry {
    pub fn new(keyword: &str, output_lines: Vec<String>) -> Self {
        Self {
            keyword: SmolStr::new(keyword.to_ascii_lowercase()),
            output_lines,
            opens_file: None,
        }
    }

    pub fn opening(mut self, panel: PanelId) -> Self {
        self.opens_file = Some(panel);
        self
    }
}

/// Keyword -> output mapping, keywords unique ignoring ASCII case.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: IndexMap<SmolStr, CommandEntry>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: CommandEntry) -> Result<(), FolioError> {
        if self.entries.contains_key(&entry.keyword) {
            return Err(FolioError::InvalidContent(
                format!("duplicate command keyword '{}'", entry.keyword).into(),
            ));
        }
        self.entries.insert(entry.keyword.clone(), entry);
        Ok(())
    }

    pub fn lookup(&self, keyword: &str) -> Option<&CommandEntry> {
        self.entries.get(keyword.to_ascii_lowercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.values()
    }

    /// Table keywords followed by the engine-level commands.
    pub fn keywords(&self) -> Vec<&str> {
        let mut keywords = self
            .entries
            .keys()
            .map(SmolStr::as_str)
            .collect::<Vec<_>>();
        for &command in ENGINE_COMMANDS {
            if !keywords.contains(&command) {
                keywords.push(command);
            }
        }
        keywords
    }

    /// The portfolio's command set. `now` is captured for `date`.
    pub fn for_portfolio(
        portfolio: &Portfolio,
        terminal: &TerminalConfig,
        now: DateTime<Local>,
    ) -> Self {
        let profile = &portfolio.profile;
        let mut entries = vec![CommandEntry::new("help", help_lines())];
        for (keyword, kind) in NAVIGATION {
            entries.push(
                CommandEntry::new(keyword, vec![format!("Opening {}...", kind.file_name())])
                    .opening(kind.id()),
            );
        }
        entries.push(
            CommandEntry::new(
                "resume",
                vec![
                    paint(Tone::Green, "Resume download initiated..."),
                    paint(Tone::Cyan, portfolio.resume_download_name()),
                    String::new(),
                    format!("Opening {}...", PanelKind::Resume.file_name()),
                ],
            )
            .opening(PanelKind::Resume.id()),
        );
        entries.push(CommandEntry::new(
            "whoami",
            vec![format!(
                "{}@{}:~$ {} - {}",
                terminal.user, terminal.host, profile.name, profile.title
            )],
        ));
        entries.push(CommandEntry::new(
            "ls",
            PanelKind::ALL
                .iter()
                .map(|kind| kind.file_name().to_string())
                .collect(),
        ));
        entries.push(CommandEntry::new("pwd", vec![terminal.home.clone()]));
        entries.push(CommandEntry::new(
            "date",
            vec![now.format("%a %b %d %Y %H:%M:%S").to_string()],
        ));

        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.keyword.clone(), entry))
                .collect(),
        }
    }
}

fn help_lines() -> Vec<String> {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        HELP.iter()
            .map(|(usage, description)| format!("  {usage:<10} - {description}")),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use expect_test::expect;

    fn table() -> CommandTable {
        let portfolio = Portfolio::builtin().expect("builtin content");
        let now = Local
            .with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
            .single()
            .expect("valid local time");
        CommandTable::for_portfolio(&portfolio, &TerminalConfig::default(), now)
    }

    #[test]
    fn lookup_ignores_case() {
        let table = table();
        assert_eq!(
            table.lookup("ABOUT").map(|entry| entry.keyword.as_str()),
            Some("about")
        );
        assert!(table.lookup("nope").is_none());
    }

    #[test]
    fn duplicate_keywords_are_rejected() {
        let mut table = CommandTable::new();
        table
            .insert(CommandEntry::new("ls", vec![]))
            .expect("first insert");
        assert!(table.insert(CommandEntry::new("LS", vec![])).is_err());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn navigation_commands_open_their_panels() {
        let table = table();
        let opens = |keyword: &str| {
            table
                .lookup(keyword)
                .and_then(|entry| entry.opens_file.as_ref())
                .map(|id| id.to_string())
        };
        assert_eq!(opens("about").as_deref(), Some("About.java"));
        assert_eq!(opens("work").as_deref(), Some("Work.css"));
        assert_eq!(opens("experience").as_deref(), Some("Work.css"));
        assert_eq!(opens("education").as_deref(), Some("education.yml"));
        assert_eq!(opens("projects").as_deref(), Some("projects.ts"));
        assert_eq!(opens("skills").as_deref(), Some("skills.json"));
        assert_eq!(opens("contact").as_deref(), Some("Contact.html"));
        assert_eq!(opens("resume").as_deref(), Some("resume.pdf"));
        assert_eq!(opens("ls"), None);
        assert_eq!(opens("help"), None);
    }

    #[test]
    fn keywords_cover_the_full_command_surface() {
        let table = table();
        let mut keywords = table.keywords();
        keywords.sort_unstable();
        assert_eq!(
            keywords,
            vec![
                "about",
                "cat",
                "clear",
                "contact",
                "date",
                "echo",
                "education",
                "experience",
                "help",
                "ls",
                "projects",
                "pwd",
                "resume",
                "skills",
                "whoami",
                "work",
            ]
        );
    }

    #[test]
    fn portfolio_table_keys_each_entry_by_its_keyword() {
        let table = table();
        assert_eq!(table.len(), 13);
        for entry in table.entries() {
            assert_eq!(
                table.lookup(&entry.keyword).map(|found| &found.keyword),
                Some(&entry.keyword)
            );
            assert!(!ENGINE_COMMANDS.contains(&entry.keyword.as_str()));
        }
    }

    #[test]
    fn date_is_captured_when_the_table_is_built() {
        let table = table();
        assert_eq!(
            table.lookup("date").map(|entry| entry.output_lines.clone()),
            Some(vec!["Sat Mar 14 2026 09:26:53".to_string()])
        );
    }

    #[test]
    fn help_and_listing_output() {
        let table = table();
        let render = |keyword: &str| {
            table
                .lookup(keyword)
                .map(|entry| entry.output_lines.join("\n"))
                .unwrap_or_default()
        };
        expect![[r#"
            Available commands:
              help       - Show this help message
              clear      - Clear terminal
              about      - Open About section
              work       - Open Work Experience
              experience - Open Work Experience
              education  - Open Education section
              projects   - Open Projects section
              skills     - Open Skills section
              contact    - Open Contact section
              resume     - Open Resume
              whoami     - Show user info
              ls         - List available files
              pwd        - Show current directory
              date       - Show current date
              echo <msg> - Echo a message
              cat <file> - Show file contents"#]]
        .assert_eq(&render("help"));
        expect![[r#"
            About.java
            Work.css
            education.yml
            projects.ts
            skills.json
            Contact.html
            resume.pdf"#]]
        .assert_eq(&render("ls"));
        expect!["dev@portfolio:~$ Your Name - Full Stack Developer & UI/UX Designer"]
            .assert_eq(&render("whoami"));
        expect!["/home/dev/portfolio"].assert_eq(&render("pwd"));
    }
}

//! Content panels ("files") and the code-styled lines each one renders.

use crate::content::Portfolio;
use crate::markup::{paint, Tone};
use crate::navigation::PanelId;

/// File name of the welcome panel shown when no tab is active.
pub const WELCOME_FILE: &str = "Home.jsx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    About,
    Work,
    Education,
    Projects,
    Skills,
    Contact,
    Resume,
}

impl PanelKind {
    pub const ALL: [PanelKind; 7] = [
        PanelKind::About,
        PanelKind::Work,
        PanelKind::Education,
        PanelKind::Projects,
        PanelKind::Skills,
        PanelKind::Contact,
        PanelKind::Resume,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            PanelKind::About => "About.java",
            PanelKind::Work => "Work.css",
            PanelKind::Education => "education.yml",
            PanelKind::Projects => "projects.ts",
            PanelKind::Skills => "skills.json",
            PanelKind::Contact => "Contact.html",
            PanelKind::Resume => "resume.pdf",
        }
    }

    pub fn id(self) -> PanelId {
        PanelId::new(self.file_name())
    }

    /// Accent tone of the file in the explorer and tab bar.
    pub fn tone(self) -> Tone {
        match self {
            PanelKind::About => Tone::Blue,
            PanelKind::Work => Tone::Cyan,
            PanelKind::Education => Tone::Magenta,
            PanelKind::Projects => Tone::Green,
            PanelKind::Skills => Tone::Yellow,
            PanelKind::Contact | PanelKind::Resume => Tone::Red,
        }
    }

    pub fn from_id(id: &PanelId) -> Option<Self> {
        Self::from_file_name(id.as_str())
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.file_name() == name)
    }

    /// Case-insensitive lookup used by `cat`.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.file_name().eq_ignore_ascii_case(name))
    }
}

/// Lines shown for `kind`, with inline color markers.
pub fn render_panel(kind: PanelKind, portfolio: &Portfolio) -> Vec<String> {
    match kind {
        PanelKind::About => about_lines(portfolio),
        PanelKind::Work => work_lines(portfolio),
        PanelKind::Education => education_lines(portfolio),
        PanelKind::Projects => projects_lines(portfolio),
        PanelKind::Skills => skills_lines(portfolio),
        PanelKind::Contact => contact_lines(portfolio),
        PanelKind::Resume => resume_lines(portfolio),
    }
}

/// Lines shown when nothing is open, or for an identifier with no panel.
pub fn welcome_lines(portfolio: &Portfolio) -> Vec<String> {
    let profile = &portfolio.profile;
    let mut lines = vec![
        comment(format!("// {WELCOME_FILE}")),
        String::new(),
        format!("Welcome, I'm {}", paint(Tone::Cyan, &profile.name)),
        paint(Tone::Yellow, &profile.title),
    ];
    if !profile.tagline.is_empty() {
        lines.push(comment(format!("// {}", profile.tagline)));
    }
    lines.push(String::new());
    lines.push("Open a file from the explorer, or type a command in the terminal:".to_string());
    let shortcuts = PanelKind::ALL
        .iter()
        .map(|kind| paint(kind.tone(), kind.file_name()))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("  {shortcuts}"));
    lines.push(String::new());
    lines.push(comment(
        "Tab: focus  Enter: open  Left/Right: tabs  w: close tab  h: home  t: terminal  q: quit",
    ));
    lines
}

fn comment(text: impl AsRef<str>) -> String {
    paint(Tone::Green, text)
}

fn keyword(text: impl AsRef<str>) -> String {
    paint(Tone::Blue, text)
}

fn string(text: impl AsRef<str>) -> String {
    paint(Tone::Yellow, format!("\"{}\"", text.as_ref()))
}

fn property(text: impl AsRef<str>) -> String {
    paint(Tone::Cyan, text)
}

fn slug(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn about_lines(portfolio: &Portfolio) -> Vec<String> {
    let profile = &portfolio.profile;
    let field = |name: &str, value: &str| {
        format!(
            "    {} {} {} = {};",
            keyword("private final"),
            property("String"),
            name,
            string(value)
        )
    };
    let mut lines = vec![
        comment("// About.java"),
        format!("{} About {{", keyword("public class")),
        field("name", &profile.name),
        field("title", &profile.title),
        field("location", &profile.location),
    ];
    if !profile.total_experience.is_empty() {
        lines.push(field(
            "experience",
            &format!("{} years", profile.total_experience),
        ));
    }
    lines.push(String::new());
    lines.push(comment("    /**"));
    for paragraph in &profile.bio {
        lines.push(comment(format!("     * {paragraph}")));
    }
    lines.push(comment("     */"));
    lines.push(format!("    {} String tagline() {{", keyword("public")));
    lines.push(format!(
        "        {} {};",
        keyword("return"),
        string(&profile.tagline)
    ));
    lines.push("    }".to_string());
    lines.push("}".to_string());
    lines
}

fn work_lines(portfolio: &Portfolio) -> Vec<String> {
    let mut lines = vec![comment("/* Work.css */")];
    for job in &portfolio.experience {
        let company = slug(&job.company);
        lines.push(String::new());
        lines.push(format!("{} {{", paint(Tone::Yellow, format!(".{company}"))));
        lines.push(format!("  {}: {};", property("company"), string(&job.company)));
        lines.push(format!("  {}: {};", property("period"), string(&job.period)));
        if !job.location.is_empty() {
            lines.push(format!("  {}: {};", property("location"), string(&job.location)));
        }
        lines.push("}".to_string());
        for role in &job.roles {
            lines.push(format!(
                "{} {{",
                paint(Tone::Yellow, format!(".{company} .{}", slug(&role.title)))
            ));
            lines.push(format!("  {}: {};", property("title"), string(&role.title)));
            lines.push(format!("  {}: {};", property("period"), string(&role.period)));
            if !role.technologies.is_empty() {
                lines.push(format!(
                    "  {}: {};",
                    property("stack"),
                    role.technologies.join(", ")
                ));
            }
            for highlight in &role.highlights {
                lines.push(comment(format!("  /* {highlight} */")));
            }
            lines.push("}".to_string());
        }
    }
    lines
}

fn education_lines(portfolio: &Portfolio) -> Vec<String> {
    let mut lines = vec![comment("# education.yml"), format!("{}:", property("education"))];
    for entry in &portfolio.education {
        lines.push(format!("  - {}: {}", property("degree"), string(&entry.degree)));
        lines.push(format!("    {}: {}", property("institution"), string(&entry.institution)));
        lines.push(format!("    {}: {}", property("period"), string(&entry.period)));
        if let Some(gpa) = entry.gpa.as_deref() {
            lines.push(format!("    {}: {}", property("gpa"), string(gpa)));
        }
        if !entry.description.is_empty() {
            lines.push(format!("    {}: >", property("description")));
            lines.push(format!("      {}", entry.description));
        }
    }
    if !portfolio.certificates.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}:", property("certificates")));
        for cert in &portfolio.certificates {
            lines.push(format!("  - {}: {}", property("name"), string(&cert.name)));
            lines.push(format!("    {}: {}", property("issuer"), string(&cert.issuer)));
            if let Some(date) = cert.date.as_deref() {
                lines.push(format!("    {}: {}", property("date"), string(date)));
            }
            if let Some(credential) = cert.credential.as_deref() {
                lines.push(format!("    {}: {}", property("credential"), string(credential)));
            }
        }
    }
    lines
}

fn projects_lines(portfolio: &Portfolio) -> Vec<String> {
    let mut lines = vec![
        comment("// projects.ts"),
        format!("{} projects: Project[] = [", keyword("export const")),
    ];
    for project in &portfolio.projects {
        lines.push("  {".to_string());
        lines.push(format!("    {}: {},", property("name"), string(&project.name)));
        lines.push(format!(
            "    {}: {},",
            property("description"),
            string(&project.description)
        ));
        let technologies = project
            .technologies
            .iter()
            .map(string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("    {}: [{technologies}],", property("technologies")));
        if let Some(github) = project.github.as_deref() {
            lines.push(format!("    {}: {},", property("github"), string(github)));
        }
        if let Some(demo) = project.demo.as_deref() {
            lines.push(format!("    {}: {},", property("demo"), string(demo)));
        }
        lines.push("  },".to_string());
    }
    lines.push("];".to_string());
    lines
}

fn skill_bar(score: u8) -> String {
    let filled = usize::from(score.min(10));
    format!("{}{} {score}/10", "#".repeat(filled), ".".repeat(10 - filled))
}

fn skills_lines(portfolio: &Portfolio) -> Vec<String> {
    let groups = portfolio.skills_by_category();
    let mut lines = vec!["{".to_string()];
    let group_count = groups.len();
    for (group_index, (category, skills)) in groups.iter().enumerate() {
        lines.push(format!("  {}: {{", string(category)));
        for (index, skill) in skills.iter().enumerate() {
            let comma = if index + 1 < skills.len() { "," } else { "" };
            lines.push(format!(
                "    {}: {}{comma}",
                string(&skill.name),
                string(skill_bar(skill.score))
            ));
        }
        let comma = if group_index + 1 < group_count { "," } else { "" };
        lines.push(format!("  }}{comma}"));
    }
    lines.push("}".to_string());
    lines
}

fn contact_lines(portfolio: &Portfolio) -> Vec<String> {
    let profile = &portfolio.profile;
    let socials = &portfolio.socials;
    let tag = |name: &str| paint(Tone::Blue, name);
    let mut lines = vec![
        comment("<!-- Contact.html -->"),
        format!("<{} id={}>", tag("section"), string("contact")),
        format!("  <{}>Get in touch</{}>", tag("h1"), tag("h1")),
    ];
    if !profile.email.is_empty() {
        lines.push(format!(
            "  <{} href={}>{}</{}>",
            tag("a"),
            string(format!("mailto:{}", profile.email)),
            profile.email,
            tag("a")
        ));
    }
    if !profile.phone.is_empty() {
        lines.push(format!(
            "  <{} class={}>{}</{}>",
            tag("p"),
            string("phone"),
            profile.phone,
            tag("p")
        ));
    }
    if !profile.location.is_empty() {
        lines.push(format!(
            "  <{} class={}>{}</{}>",
            tag("p"),
            string("location"),
            profile.location,
            tag("p")
        ));
    }
    let links = [
        ("GitHub", Some(socials.github.as_str())),
        ("LinkedIn", Some(socials.linkedin.as_str())),
        ("Twitter", socials.twitter.as_deref()),
        ("Website", socials.website.as_deref()),
    ];
    for (label, url) in links {
        let Some(url) = url.filter(|url| !url.is_empty()) else {
            continue;
        };
        lines.push(format!(
            "  <{} href={}>{label}</{}>",
            tag("a"),
            string(url),
            tag("a")
        ));
    }
    lines.push(format!("</{}>", tag("section")));
    lines
}

fn resume_lines(portfolio: &Portfolio) -> Vec<String> {
    let profile = &portfolio.profile;
    let heading = |text: &str| paint(Tone::Cyan, text);
    let mut lines = vec![
        comment(format!("%PDF {}", profile.resume)),
        String::new(),
        format!("{} | {}", paint(Tone::White, &profile.name), profile.title),
        [profile.email.as_str(), profile.phone.as_str(), profile.location.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" | "),
        String::new(),
        heading("Experience"),
    ];
    for job in &portfolio.experience {
        lines.push(format!("  {} ({})", job.company, job.period));
        for role in &job.roles {
            lines.push(format!("    {}, {}", role.title, role.period));
        }
    }
    lines.push(String::new());
    lines.push(heading("Education"));
    for entry in &portfolio.education {
        lines.push(format!(
            "  {}, {} ({})",
            entry.degree, entry.institution, entry.period
        ));
    }
    if !portfolio.skills.is_empty() {
        lines.push(String::new());
        lines.push(heading("Skills"));
        let names = portfolio
            .skills
            .iter()
            .map(|skill| skill.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  {names}"));
    }
    lines.push(String::new());
    lines.push(paint(
        Tone::Yellow,
        format!(
            "Run `resume` in the terminal to download {}",
            portfolio.resume_download_name()
        ),
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::strip;

    fn portfolio() -> Portfolio {
        Portfolio::builtin().expect("builtin content")
    }

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines.iter().map(|line| strip(line)).collect()
    }

    #[test]
    fn panel_kinds_round_trip_through_file_names() {
        for kind in PanelKind::ALL {
            assert_eq!(PanelKind::from_id(&kind.id()), Some(kind));
        }
        assert_eq!(PanelKind::from_file_name(WELCOME_FILE), None);
        assert_eq!(PanelKind::lookup("ABOUT.JAVA"), Some(PanelKind::About));
    }

    #[test]
    fn about_panel_reads_like_a_java_class() {
        let lines = plain(render_panel(PanelKind::About, &portfolio()));
        assert_eq!(lines[0], "// About.java");
        assert_eq!(lines[1], "public class About {");
        assert!(lines.contains(&"    private final String name = \"Your Name\";".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("}"));
    }

    #[test]
    fn skills_panel_is_grouped_json() {
        let lines = plain(render_panel(PanelKind::Skills, &portfolio()));
        assert_eq!(lines[0], "{");
        assert_eq!(lines[1], "  \"Programming Languages\": {");
        assert_eq!(lines[2], "    \"JavaScript\": \"#######... 7/10\",");
        assert_eq!(lines.last().map(String::as_str), Some("}"));
        let closing = lines.iter().filter(|line| line.starts_with("  }")).count();
        assert_eq!(closing, portfolio().skills_by_category().len());
        assert_eq!(lines[lines.len() - 2], "  }");
    }

    #[test]
    fn work_panel_lists_every_role() {
        let lines = plain(render_panel(PanelKind::Work, &portfolio()));
        assert!(lines.contains(&".techcorp-solutions {".to_string()));
        assert!(lines.contains(&".techcorp-solutions .senior-full-stack-developer {".to_string()));
        assert!(lines.contains(&".digital-agency .frontend-developer {".to_string()));
    }

    #[test]
    fn contact_panel_skips_missing_links() {
        let lines = plain(render_panel(PanelKind::Contact, &portfolio()));
        assert!(lines.iter().any(|line| line.contains("mailto:you@example.com")));
        assert!(!lines.iter().any(|line| line.contains("Twitter")));
        assert_eq!(lines.last().map(String::as_str), Some("</section>"));
    }

    #[test]
    fn welcome_mentions_every_file() {
        let text = plain(welcome_lines(&portfolio())).join("\n");
        for kind in PanelKind::ALL {
            assert!(text.contains(kind.file_name()), "missing {}", kind.file_name());
        }
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slug("Full Stack Developer & UI/UX"), "full-stack-developer-ui-ux");
        assert_eq!(slug("  Lead  "), "lead");
    }
}

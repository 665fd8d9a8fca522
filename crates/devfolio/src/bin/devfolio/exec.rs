//! Headless mode: feed lines to the terminal engine and print the log.

use std::io::Write;

use chrono::Local;
use devfolio_core::config::TerminalConfig;
use devfolio_core::content::Portfolio;
use devfolio_core::markup;
use devfolio_core::terminal::{LineKind, NavigationSignal, TerminalEngine};
use tracing::debug;

use crate::style;

pub fn run(
    portfolio: &Portfolio,
    config: &TerminalConfig,
    lines: &[String],
    plain: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut engine = TerminalEngine::for_portfolio(portfolio, config, Local::now());
    let prompt = format!("{}@{}:{}$ ", config.user, config.host, config.cwd);
    let render = |text: &str| {
        if plain {
            markup::strip(text)
        } else {
            style::colorize(text)
        }
    };

    for line in lines {
        let start = engine.log().len();
        let mut signals: Vec<NavigationSignal> = Vec::new();
        if !engine.submit(line, &mut signals) {
            continue;
        }
        // `clear` leaves the log shorter than before.
        let start = start.min(engine.log().len());
        for entry in &engine.log()[start..] {
            match entry.kind {
                LineKind::Command if plain => writeln!(out, "{prompt}{}", entry.content)?,
                LineKind::Command => writeln!(out, "{}{}", style::prompt(&prompt), entry.content)?,
                LineKind::Output | LineKind::Error => writeln!(out, "{}", render(&entry.content))?,
            }
        }
        for signal in signals {
            match signal {
                NavigationSignal::OpenFile(panel) => {
                    debug!(panel = %panel, "exec navigation");
                    let text = format!("-> open {panel}");
                    if plain {
                        writeln!(out, "{text}")?;
                    } else {
                        writeln!(out, "{}", style::signal(&text))?;
                    }
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn run_plain(lines: &[&str]) -> String {
        let portfolio = Portfolio::builtin().expect("builtin content");
        let lines = lines.iter().map(|line| line.to_string()).collect::<Vec<_>>();
        let mut out = Vec::new();
        run(&portfolio, &TerminalConfig::default(), &lines, true, &mut out).expect("exec");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn prints_output_and_navigation() {
        let output = run_plain(&["about", "  ", "foobar", "cat"]);
        expect![[r#"
            dev@portfolio:~/portfolio$ about
            Opening About.java...
            -> open About.java
            dev@portfolio:~/portfolio$ foobar
            Command not found: foobar
            Type "help" to see available commands.
            dev@portfolio:~/portfolio$ cat
            cat: missing file operand
            Try "cat [filename]" or "ls" to see available files.
        "#]]
        .assert_eq(&output);
    }

    #[test]
    fn clear_prints_nothing() {
        let output = run_plain(&["ls", "clear", "pwd"]);
        expect![[r#"
            dev@portfolio:~/portfolio$ ls
            About.java
            Work.css
            education.yml
            projects.ts
            skills.json
            Contact.html
            resume.pdf
            dev@portfolio:~/portfolio$ pwd
            /home/dev/portfolio
        "#]]
        .assert_eq(&output);
    }
}

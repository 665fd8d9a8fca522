use devfolio_core::explorer::RowKind;
use devfolio_core::terminal::LineKind;

use super::*;

pub(super) fn render_ui(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let workbench = &state.workbench;
    let terminal_height = if workbench.is_terminal_open() {
        workbench
            .terminal_height()
            .min(area.height.saturating_sub(4))
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(terminal_height),
            Constraint::Length(1),
        ])
        .split(area);

    if workbench.explorer().is_collapsed() {
        render_editor(rows[0], frame, state);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(EXPLORER_WIDTH), Constraint::Min(10)])
            .split(rows[0]);
        render_explorer(cols[0], frame, state);
        render_editor(cols[1], frame, state);
    }
    if terminal_height > 0 {
        render_terminal(rows[1], frame, state);
    }
    render_status_bar(rows[2], frame, state);
}

fn render_explorer(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let focused = state.focus == Focus::Explorer;
    let explorer = state.workbench.explorer();
    let active = state.workbench.active_kind();
    let lines = explorer
        .rows()
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let indent = "  ".repeat(row.depth);
            let (marker, style) = match row.kind {
                RowKind::Folder { expanded } => (
                    if expanded { "▾ " } else { "▸ " },
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                RowKind::File(kind) => {
                    let mut style = tone_style(kind.tone());
                    if active == Some(kind) {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    ("• ", style)
                }
            };
            let mut line = Line::from(vec![
                Span::raw(indent),
                Span::styled(marker, style),
                Span::styled(row.label, style),
            ]);
            if focused && index == explorer.selected() {
                line.style = Style::default()
                    .bg(COLOR_PROMPT_BG)
                    .add_modifier(Modifier::BOLD);
            }
            line
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(lines).block(pane_block("EXPLORER", focused)),
        area,
    );
}

fn render_editor(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let workbench = &state.workbench;
    let block = pane_block(workbench.active_title(), state.focus == Focus::Editor);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new(tab_line(state)), parts[0]);
    frame.render_widget(Paragraph::new(breadcrumb_line(state)), parts[1]);

    let lines = workbench.active_lines();
    let width = lines.len().to_string().len().max(3);
    let content = lines
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", index + 1),
                label_style(),
            )];
            spans.extend(prompt_line_to_line(&PromptLine::from_markup(text)).spans);
            Line::from(spans)
        })
        .collect::<Vec<_>>();
    let scroll = u16::try_from(workbench.content_scroll()).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(content).scroll((scroll, 0)), parts[2]);
}

fn tab_line(state: &UiState) -> Line<'static> {
    let panels = state.workbench.panels();
    if panels.is_empty() {
        return Line::from(Span::styled(
            " no open files (h: home) ",
            label_style().add_modifier(Modifier::DIM),
        ));
    }
    let mut spans = Vec::new();
    for id in panels.iter() {
        let style = if panels.is_active(id) {
            Style::default()
                .fg(COLOR_TEAL)
                .bg(COLOR_PROMPT_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            label_style()
        };
        spans.push(Span::styled(format!(" {id} "), style));
        spans.push(Span::styled("│", label_style()));
    }
    Line::from(spans)
}

fn breadcrumb_line(state: &UiState) -> Line<'static> {
    let Some(crumb) = state.workbench.breadcrumb() else {
        return Line::from(Span::styled(
            format!(
                "{} > {}",
                devfolio_core::explorer::ROOT_FOLDER,
                state.workbench.active_title()
            ),
            label_style(),
        ));
    };
    Line::from(vec![
        Span::styled(crumb.segments.join(" > "), label_style()),
        Span::raw("  "),
        Span::styled(crumb.category, Style::default().fg(COLOR_CYAN)),
    ])
}

fn render_terminal(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let focused = state.focus == Focus::Terminal;
    let block = pane_block("TERMINAL", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let hint_rows = u16::from(state.prompt.hint.is_some());
    let log_height = inner.height.saturating_sub(1 + hint_rows);
    let engine = state.workbench.terminal();
    let log = engine.log();
    let end = log.len().saturating_sub(engine.scroll_back());
    let start = end.saturating_sub(usize::from(log_height));
    let prompt_style = Style::default()
        .fg(COLOR_GREEN)
        .add_modifier(Modifier::BOLD);
    let mut lines = log[start..end]
        .iter()
        .map(|line| match line.kind {
            LineKind::Command => Line::from(vec![
                Span::styled(state.prompt_label.clone(), prompt_style),
                Span::raw(line.content.clone()),
            ]),
            LineKind::Output | LineKind::Error => {
                prompt_line_to_line(&PromptLine::from_markup(&line.content))
            }
        })
        .collect::<Vec<_>>();
    if let Some(hint) = &state.prompt.hint {
        lines.push(prompt_line_to_line(hint));
    }
    let log_area = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        height: log_height + hint_rows,
    };
    frame.render_widget(Paragraph::new(lines), log_area);

    let prompt_area = Rect {
        x: inner.x,
        y: inner.y + log_height + hint_rows,
        width: inner.width,
        height: 1,
    };
    let prompt = Line::from(vec![
        Span::styled(state.prompt_label.clone(), prompt_style),
        Span::raw(state.prompt.input().to_string()),
    ]);
    frame.render_widget(
        Paragraph::new(prompt).style(Style::default().bg(COLOR_PROMPT_BG)),
        prompt_area,
    );
    if focused {
        let column = state.prompt_label.chars().count() + state.prompt.cursor_column();
        let column = u16::try_from(column)
            .unwrap_or(u16::MAX)
            .min(inner.width.saturating_sub(1));
        frame.set_cursor(inner.x + column, prompt_area.y);
    }
}

fn render_status_bar(area: Rect, frame: &mut ratatui::Frame<'_>, state: &UiState) {
    let workbench = &state.workbench;
    let bar = Style::default().fg(Color::Black).bg(COLOR_TEAL);
    let count = workbench.panels().len();
    let category = workbench
        .breadcrumb()
        .map(|crumb| crumb.category)
        .unwrap_or("Welcome");
    let mut spans = vec![
        Span::styled(" ⎇ main ", bar.add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {} ", devfolio_core::explorer::ROOT_FOLDER), bar),
        Span::styled(format!(" {category} "), bar),
        Span::styled(
            format!(" {count} tab{} ", if count == 1 { "" } else { "s" }),
            bar,
        ),
        Span::styled(format!(" {} ", state.focus.label()), bar),
    ];
    if let Some(source) = &state.attribution.utm_source {
        spans.push(Span::styled(format!(" via {source} "), bar));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
}

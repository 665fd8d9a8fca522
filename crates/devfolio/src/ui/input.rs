use devfolio_core::terminal::Completion;

use super::state::{cycle_focus, focus_terminal, settle_focus};
use super::*;

const PAGE_LINES: usize = 10;

/// Returns `Ok(true)` when the UI should exit.
pub(super) fn handle_key(
    key: KeyEvent,
    state: &mut UiState,
    now: Instant,
) -> anyhow::Result<bool> {
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }
    if state.focus == Focus::Terminal {
        return handle_terminal_key(key, state, now);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Char('c') if ctrl => return Ok(true),
        KeyCode::Tab => cycle_focus(state, true),
        KeyCode::BackTab => cycle_focus(state, false),
        KeyCode::Char('/') | KeyCode::Char(':') => focus_terminal(state),
        KeyCode::Char('t') => {
            state.workbench.toggle_terminal();
            settle_focus(state);
        }
        KeyCode::Char('b') => {
            state.workbench.explorer_mut().toggle_collapsed();
            settle_focus(state);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => state.workbench.resize_terminal(2),
        KeyCode::Char('-') => state.workbench.resize_terminal(-2),
        KeyCode::Char('h') => state.workbench.close_all(),
        _ => match state.focus {
            Focus::Explorer => handle_explorer_key(key, state),
            Focus::Editor => handle_editor_key(key, state),
            Focus::Terminal => {}
        },
    }
    Ok(false)
}

fn handle_explorer_key(key: KeyEvent, state: &mut UiState) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.workbench.explorer_mut().select_previous(),
        KeyCode::Down | KeyCode::Char('j') => state.workbench.explorer_mut().select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => state.workbench.open_selected(),
        _ => {}
    }
}

fn handle_editor_key(key: KeyEvent, state: &mut UiState) {
    let workbench = &mut state.workbench;
    match key.code {
        KeyCode::Left => {
            workbench.previous_tab();
        }
        KeyCode::Right => {
            workbench.next_tab();
        }
        KeyCode::Char('w') => {
            workbench.close_active();
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = ('1'..='9').position(|key| key == digit).unwrap_or_default();
            let target = workbench.panels().iter().nth(index).cloned();
            if let Some(id) = target {
                workbench.activate_tab(&id);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => workbench.scroll_content_up(1),
        KeyCode::Down | KeyCode::Char('j') => workbench.scroll_content_down(1),
        KeyCode::PageUp => workbench.scroll_content_up(PAGE_LINES),
        KeyCode::PageDown => workbench.scroll_content_down(PAGE_LINES),
        KeyCode::Home => workbench.scroll_content_up(usize::MAX),
        _ => {}
    }
}

fn handle_terminal_key(key: KeyEvent, state: &mut UiState, now: Instant) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('d') => return Ok(true),
            KeyCode::Char('c') => state.prompt.clear(),
            KeyCode::Char('l') => state.workbench.terminal_mut().clear(),
            _ => {}
        }
        return Ok(false);
    }

    let page = usize::from(state.workbench.terminal_height().saturating_sub(3)).max(1);
    match key.code {
        KeyCode::Esc => state.focus = Focus::Editor,
        KeyCode::Enter => {
            let line = state.prompt.take();
            state.workbench.submit_command(&line, now);
        }
        KeyCode::Up => {
            if let Some(entry) = state.workbench.terminal_mut().recall_older() {
                let entry = entry.to_string();
                state.prompt.set_input(&entry);
            }
        }
        KeyCode::Down => {
            if let Some(entry) = state.workbench.terminal_mut().recall_newer() {
                let entry = entry.to_string();
                state.prompt.set_input(&entry);
            }
        }
        KeyCode::Tab => complete_input(state),
        KeyCode::PageUp => state.workbench.terminal_mut().scroll_up(page),
        KeyCode::PageDown => state.workbench.terminal_mut().scroll_down(page),
        KeyCode::Backspace => state.prompt.backspace(),
        KeyCode::Delete => state.prompt.delete(),
        KeyCode::Left => state.prompt.move_left(),
        KeyCode::Right => state.prompt.move_right(),
        KeyCode::Home => state.prompt.move_home(),
        KeyCode::End => state.prompt.move_end(),
        KeyCode::Char(ch) => state.prompt.insert(ch),
        _ => {}
    }
    Ok(false)
}

fn complete_input(state: &mut UiState) {
    match state.workbench.terminal().complete(state.prompt.input()) {
        Completion::Unique(keyword) => state.prompt.set_input(&keyword),
        Completion::Ambiguous(candidates) => {
            state.prompt.hint = Some(PromptLine::plain(
                candidates.join("  "),
                Style::default().fg(COLOR_INFO),
            ));
        }
        Completion::None => {}
    }
}

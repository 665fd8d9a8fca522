use super::*;

/// The terminal pane's input line.
#[derive(Debug, Clone, Default)]
pub(super) struct PromptState {
    input: String,
    cursor: usize,
    pub(super) hint: Option<PromptLine>,
}

impl PromptState {
    pub(super) fn input(&self) -> &str {
        &self.input
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub(super) fn cursor_column(&self) -> usize {
        self.input[..self.cursor].chars().count()
    }

    pub(super) fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
        self.cursor = self.input.len();
        self.hint = None;
    }

    pub(super) fn clear(&mut self) {
        self.set_input("");
    }

    pub(super) fn take(&mut self) -> String {
        let line = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.hint = None;
        line
    }

    pub(super) fn insert(&mut self, ch: char) {
        self.input.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.hint = None;
    }

    pub(super) fn backspace(&mut self) {
        if let Some(ch) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
            self.input.remove(self.cursor);
        }
    }

    pub(super) fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    pub(super) fn move_left(&mut self) {
        if let Some(ch) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    pub(super) fn move_right(&mut self) {
        if let Some(ch) = self.input[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub(super) fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub(super) fn move_end(&mut self) {
        self.cursor = self.input.len();
    }
}

/// Moves focus to the next visible surface.
pub(super) fn cycle_focus(state: &mut UiState, forward: bool) {
    let mut order = Vec::with_capacity(3);
    if !state.workbench.explorer().is_collapsed() {
        order.push(Focus::Explorer);
    }
    order.push(Focus::Editor);
    if state.workbench.is_terminal_open() {
        order.push(Focus::Terminal);
    }
    let current = order
        .iter()
        .position(|focus| *focus == state.focus)
        .unwrap_or(0);
    let next = if forward {
        (current + 1) % order.len()
    } else {
        (current + order.len() - 1) % order.len()
    };
    state.focus = order[next];
}

pub(super) fn focus_terminal(state: &mut UiState) {
    state.workbench.open_terminal();
    state.focus = Focus::Terminal;
}

/// Falls back to the editor when the focused surface was hidden.
pub(super) fn settle_focus(state: &mut UiState) {
    let hidden = match state.focus {
        Focus::Explorer => state.workbench.explorer().is_collapsed(),
        Focus::Terminal => !state.workbench.is_terminal_open(),
        Focus::Editor => false,
    };
    if hidden {
        state.focus = Focus::Editor;
    }
}

//! File explorer tree and its selection/expansion state.

use std::collections::HashSet;

use crate::panels::PanelKind;

/// Name of the workspace folder at the root of the explorer.
pub const ROOT_FOLDER: &str = "my-portfolio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNode {
    Folder {
        name: String,
        children: Vec<FileNode>,
    },
    File(PanelKind),
}

impl FileNode {
    /// The explorer tree: one workspace folder holding every panel file.
    pub fn portfolio_tree() -> Vec<FileNode> {
        vec![FileNode::Folder {
            name: ROOT_FOLDER.to_string(),
            children: PanelKind::ALL.into_iter().map(FileNode::File).collect(),
        }]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Folder { expanded: bool },
    File(PanelKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerRow {
    pub depth: usize,
    pub label: String,
    pub kind: RowKind,
}

#[derive(Debug, Clone)]
pub struct ExplorerState {
    tree: Vec<FileNode>,
    expanded: HashSet<String>,
    collapsed: bool,
    selected: usize,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new(FileNode::portfolio_tree())
    }
}

impl ExplorerState {
    pub fn new(tree: Vec<FileNode>) -> Self {
        let expanded = tree
            .iter()
            .filter_map(|node| match node {
                FileNode::Folder { name, .. } => Some(name.clone()),
                FileNode::File(_) => None,
            })
            .collect();
        Self {
            tree,
            expanded,
            collapsed: false,
            selected: 0,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn is_expanded(&self, folder: &str) -> bool {
        self.expanded.contains(folder)
    }

    /// Flips a folder between expanded and folded, keeping the selection on a
    /// visible row.
    pub fn toggle_folder(&mut self, folder: &str) {
        if !self.expanded.remove(folder) {
            self.expanded.insert(folder.to_string());
        }
        let visible = self.rows().len();
        self.selected = self.selected.min(visible.saturating_sub(1));
    }

    /// Visible rows in display order.
    pub fn rows(&self) -> Vec<ExplorerRow> {
        let mut rows = Vec::new();
        self.collect_rows(&self.tree, 0, &mut rows);
        rows
    }

    fn collect_rows(&self, nodes: &[FileNode], depth: usize, rows: &mut Vec<ExplorerRow>) {
        for node in nodes {
            match node {
                FileNode::Folder { name, children } => {
                    let expanded = self.is_expanded(name);
                    rows.push(ExplorerRow {
                        depth,
                        label: name.clone(),
                        kind: RowKind::Folder { expanded },
                    });
                    if expanded {
                        self.collect_rows(children, depth + 1, rows);
                    }
                }
                FileNode::File(kind) => rows.push(ExplorerRow {
                    depth,
                    label: kind.file_name().to_string(),
                    kind: RowKind::File(*kind),
                }),
            }
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<ExplorerRow> {
        self.rows().into_iter().nth(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.rows().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the selection onto the row of `kind` when it is visible.
    pub fn reveal(&mut self, kind: PanelKind) {
        if let Some(index) = self
            .rows()
            .iter()
            .position(|row| row.kind == RowKind::File(kind))
        {
            self.selected = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_folder_starts_expanded() {
        let explorer = ExplorerState::default();
        let rows = explorer.rows();
        assert_eq!(rows.len(), 1 + PanelKind::ALL.len());
        assert_eq!(rows[0].label, ROOT_FOLDER);
        assert_eq!(rows[0].kind, RowKind::Folder { expanded: true });
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[1].kind, RowKind::File(PanelKind::About));
    }

    #[test]
    fn folding_hides_children_and_clamps_selection() {
        let mut explorer = ExplorerState::default();
        for _ in 0..4 {
            explorer.select_next();
        }
        assert_eq!(explorer.selected(), 4);
        explorer.toggle_folder(ROOT_FOLDER);
        assert_eq!(explorer.rows().len(), 1);
        assert_eq!(explorer.selected(), 0);
        explorer.toggle_folder(ROOT_FOLDER);
        assert_eq!(explorer.rows().len(), 8);
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut explorer = ExplorerState::default();
        explorer.select_previous();
        assert_eq!(explorer.selected(), 0);
        for _ in 0..20 {
            explorer.select_next();
        }
        assert_eq!(explorer.selected(), 7);
        assert_eq!(
            explorer.selected_row().map(|row| row.kind),
            Some(RowKind::File(PanelKind::Resume))
        );
    }

    #[test]
    fn reveal_moves_selection_to_file() {
        let mut explorer = ExplorerState::default();
        explorer.reveal(PanelKind::Skills);
        assert_eq!(
            explorer.selected_row().map(|row| row.label),
            Some("skills.json".to_string())
        );
    }
}

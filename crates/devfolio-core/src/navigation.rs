//! Open-panel (tab) navigation state and the breadcrumb derived from it.

use std::fmt;

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::error::FolioError;

/// Identifier of a logical content panel, e.g. `About.java`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(SmolStr);

impl PanelId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Extension including the leading dot, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.as_str();
        let dot = name.rfind('.')?;
        (dot > 0).then(|| &name[dot..])
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PanelId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Boundary behavior of `next` / `previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Stop at the first and last tab.
    #[default]
    Clamp,
    /// Step from the last tab to the first and back.
    Wrap,
}

impl CyclePolicy {
    pub fn parse(text: &str) -> Result<Self, FolioError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "wrap" => Ok(Self::Wrap),
            _ => Err(FolioError::InvalidConfig(
                format!("invalid navigation.cycle '{text}' (expected clamp or wrap)").into(),
            )),
        }
    }
}

/// Ordered set of open panels plus the active one.
///
/// The active panel is always a member of the set, and the set is empty exactly
/// when nothing is active.
#[derive(Debug, Clone, Default)]
pub struct OpenPanelSet {
    open: IndexSet<PanelId>,
    active: Option<PanelId>,
    policy: CyclePolicy,
}

impl OpenPanelSet {
    pub fn new(policy: CyclePolicy) -> Self {
        Self {
            open: IndexSet::new(),
            active: None,
            policy,
        }
    }

    pub fn policy(&self) -> CyclePolicy {
        self.policy
    }

    pub fn active(&self) -> Option<&PanelId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &PanelId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn contains(&self, id: &PanelId) -> bool {
        self.open.contains(id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelId> + '_ {
        self.open.iter()
    }

    pub fn position(&self, id: &PanelId) -> Option<usize> {
        self.open.get_index_of(id)
    }

    /// Opens `id` (appending it when absent) and activates it. Returns true when
    /// the panel was not open before.
    pub fn open(&mut self, id: PanelId) -> bool {
        let (_, inserted) = self.open.insert_full(id.clone());
        self.active = Some(id);
        inserted
    }

    /// Removes `id`. When it was active, the tab before it becomes active (or the
    /// new first tab when it was first). Returns false when `id` was not open.
    pub fn close(&mut self, id: &PanelId) -> bool {
        let Some(index) = self.open.get_index_of(id) else {
            return false;
        };
        self.open.shift_remove_index(index);
        if self.is_active(id) {
            self.active = self
                .open
                .get_index(index.saturating_sub(1))
                .cloned();
        }
        true
    }

    /// Activates an already open panel. Returns false (and changes nothing) when
    /// `id` is not open.
    pub fn activate(&mut self, id: &PanelId) -> bool {
        if !self.open.contains(id) {
            return false;
        }
        self.active = Some(id.clone());
        true
    }

    pub fn close_all(&mut self) {
        self.open.clear();
        self.active = None;
    }

    /// Moves the active tab one step right. Returns true if it changed.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Moves the active tab one step left. Returns true if it changed.
    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        let Some(current) = self.active.as_ref().and_then(|id| self.position(id)) else {
            return false;
        };
        let len = self.open.len() as isize;
        let mut target = current as isize + delta;
        if target < 0 || target >= len {
            match self.policy {
                CyclePolicy::Clamp => return false,
                CyclePolicy::Wrap => target = target.rem_euclid(len),
            }
        }
        let target = target as usize;
        if target == current {
            return false;
        }
        self.active = self.open.get_index(target).cloned();
        true
    }
}

const CATEGORIES: &[(&str, &str)] = &[
    (".jsx", "JavaScript React"),
    (".java", "Java"),
    (".css", "CSS"),
    (".yml", "YAML"),
    (".ts", "TypeScript"),
    (".json", "JSON"),
    (".html", "HTML"),
    (".pdf", "PDF"),
];

/// Language category shown for a file extension.
pub fn category_for(id: &PanelId) -> &'static str {
    id.extension()
        .and_then(|ext| {
            CATEGORIES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, category)| *category)
        })
        .unwrap_or("Plain Text")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub segments: Vec<String>,
    pub category: &'static str,
}

/// Path segments from the workspace folder down to the active panel.
pub fn breadcrumb(root: &str, active: Option<&PanelId>) -> Option<Breadcrumb> {
    let active = active?;
    Some(Breadcrumb {
        segments: vec![root.to_string(), active.to_string()],
        category: category_for(active),
    })
}

use std::fmt;

use serde::Serialize;

/// The two independently laid out panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    Pending,
    Queue,
}

impl PanelId {
    /// Layout order within a tick.
    pub const ALL: [PanelId; 2] = [PanelId::Pending, PanelId::Queue];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelId::Pending => "pending",
            PanelId::Queue => "queue",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            PanelId::Pending => 0,
            PanelId::Queue => 1,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dirty flag per panel.
///
/// Both panels start dirty so the first tick produces an initial layout.
#[derive(Debug, Clone)]
pub struct DirtyPanels {
    flags: [bool; 2],
}

impl Default for DirtyPanels {
    fn default() -> Self {
        Self { flags: [true; 2] }
    }
}

impl DirtyPanels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, panel: PanelId) {
        self.flags[panel.slot()] = true;
    }

    pub fn clear(&mut self, panel: PanelId) {
        self.flags[panel.slot()] = false;
    }

    pub fn is_dirty(&self, panel: PanelId) -> bool {
        self.flags[panel.slot()]
    }

    pub fn has_dirty(&self) -> bool {
        self.flags.iter().any(|flag| *flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_panels_start_dirty() {
        let mut dirty = DirtyPanels::new();
        assert!(dirty.is_dirty(PanelId::Pending));
        assert!(dirty.is_dirty(PanelId::Queue));
        for panel in PanelId::ALL {
            dirty.clear(panel);
        }
        assert!(!dirty.has_dirty());
    }

    #[test]
    fn flags_are_independent() {
        let mut dirty = DirtyPanels::new();
        dirty.clear(PanelId::Pending);
        dirty.clear(PanelId::Queue);

        dirty.mark(PanelId::Queue);
        assert!(dirty.is_dirty(PanelId::Queue));
        assert!(!dirty.is_dirty(PanelId::Pending));
        dirty.clear(PanelId::Queue);

        dirty.mark(PanelId::Pending);
        dirty.mark(PanelId::Pending);
        dirty.clear(PanelId::Pending);
        assert!(!dirty.has_dirty());
    }
}

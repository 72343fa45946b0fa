//! Selector panels - one checkable list per axis.
//!
//! Each panel shows the axis entries as the catalog exposes them (the "all"
//! wildcard or the climatology aggregates first) and turns the checked
//! entries back into a [`Selection`].

pub mod ui;

use crate::data::{AxisCatalog, AxisKind, ALL, ALL_MONTHS, ALL_SEASONS};
use crate::pipeline::{Selection, Selections};

fn is_group_entry(name: &str) -> bool {
    matches!(name, ALL | ALL_SEASONS | ALL_MONTHS)
}

/// One axis selector.
#[derive(Debug, Clone)]
pub struct SelectorPanel {
    /// Axis this panel selects on.
    pub axis: AxisKind,
    /// Entries in display order.
    pub entries: Vec<String>,
    /// Check state, parallel to `entries`.
    pub checked: Vec<bool>,
    /// Cursor position.
    pub cursor: usize,
    /// Scroll offset.
    pub scroll: usize,
}

impl SelectorPanel {
    /// Create a panel showing `entries`, pre-checked from `initial`.
    pub fn new(axis: AxisKind, entries: Vec<String>, initial: &Selection) -> Self {
        let checked = entries
            .iter()
            .map(|entry| match initial {
                Selection::All => entry == ALL || (axis == AxisKind::Clim && entry == ALL_SEASONS),
                Selection::Aggregate(token) => entry == token,
                Selection::Explicit(names) => names.contains(entry),
            })
            .collect();
        Self {
            axis,
            entries,
            checked,
            cursor: 0,
            scroll: 0,
        }
    }

    /// Move cursor up.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Toggle the entry under the cursor.
    ///
    /// Checking a wildcard or aggregate clears everything else; checking a
    /// plain category clears any wildcard or aggregate.
    pub fn toggle_current(&mut self) {
        let Some(entry) = self.entries.get(self.cursor) else {
            return;
        };
        let now_checked = !self.checked[self.cursor];
        if now_checked {
            let group = is_group_entry(entry);
            for (name, checked) in self.entries.iter().zip(self.checked.iter_mut()) {
                if group || is_group_entry(name) {
                    *checked = false;
                }
            }
        }
        self.checked[self.cursor] = now_checked;
    }

    /// Check only the entry under the cursor.
    pub fn select_only_current(&mut self) {
        if self.cursor >= self.entries.len() {
            return;
        }
        self.checked.iter_mut().for_each(|c| *c = false);
        self.checked[self.cursor] = true;
    }

    /// Names of the checked entries, in display order.
    pub fn checked_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .zip(&self.checked)
            .filter(|(_, &c)| c)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// The selection the checked entries stand for.
    pub fn selection(&self) -> Selection {
        let names = self.checked_names();
        if let Some(group) = names.iter().find(|n| is_group_entry(n)) {
            return match *group {
                ALL => Selection::All,
                token => Selection::Aggregate(token.to_string()),
            };
        }
        Selection::explicit(names)
    }

    /// Adjust scroll to keep cursor visible.
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        if self.cursor >= self.scroll + viewport_height {
            self.scroll = self.cursor.saturating_sub(viewport_height - 1);
        }
    }
}

/// All six selector panels and which one has focus.
#[derive(Debug, Clone)]
pub struct SelectorState {
    /// Panels in axis storage order.
    pub panels: Vec<SelectorPanel>,
    /// Index of the focused panel.
    pub focus: usize,
}

impl SelectorState {
    /// Build panels for every axis of `catalog`, reflecting `selections`.
    pub fn new(catalog: &AxisCatalog, selections: &Selections) -> Self {
        let panels = AxisKind::ALL
            .iter()
            .map(|&axis| SelectorPanel::new(axis, catalog.entries(axis), selections.get(axis)))
            .collect();
        Self { panels, focus: 0 }
    }

    /// Focused panel.
    pub fn focused(&self) -> &SelectorPanel {
        &self.panels[self.focus]
    }

    /// Focused panel, mutably.
    pub fn focused_mut(&mut self) -> &mut SelectorPanel {
        &mut self.panels[self.focus]
    }

    /// Focus the next panel.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.panels.len();
    }

    /// Focus the previous panel.
    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.panels.len() - 1) % self.panels.len();
    }

    /// Current selections of every panel.
    pub fn selections(&self) -> Selections {
        let mut selections = Selections::default();
        for panel in &self.panels {
            *selections.get_mut(panel.axis) = panel.selection();
        }
        selections
    }
}

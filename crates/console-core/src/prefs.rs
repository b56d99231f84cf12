// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Operator preferences remembered across console sessions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::ViewId;
use crate::view::SortState;

/// Saved state of one list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPagePrefs {
    /// Last sort column and direction.
    #[serde(default)]
    pub sort: SortState,
}

/// All saved console preferences, keyed by list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolePrefs {
    /// Per-page state.
    #[serde(default)]
    pub pages: BTreeMap<ViewId, ListPagePrefs>,
}

impl ConsolePrefs {
    /// Saved state for `page`, if any.
    pub fn page(&self, page: &ViewId) -> Option<&ListPagePrefs> {
        self.pages.get(page)
    }

    /// Replace the saved state for `page`.
    pub fn set_page(&mut self, page: ViewId, prefs: ListPagePrefs) {
        self.pages.insert(page, prefs);
    }

    /// Replace only the saved sort for `page`.
    pub fn set_sort(&mut self, page: ViewId, sort: SortState) {
        self.pages.entry(page).or_default().sort = sort;
    }
}

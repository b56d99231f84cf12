// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dual-pane association editor: available vs. selected children of one owner.

use crate::matcher::TextMatcher;
use crate::membership::{MembershipSet, SelfReference};
use crate::record::{FieldName, Record, RecordId};
use crate::view::SearchState;

/// The two panes derived from a reference collection.
///
/// Both keep reference order and never share a record.
#[derive(Debug)]
pub struct Partition<'a, R> {
    /// Candidates not yet associated (narrowed by the search term).
    pub available: Vec<&'a R>,
    /// Candidates currently associated (never narrowed by search).
    pub selected: Vec<&'a R>,
}

/// Edit state behind a mapping page.
#[derive(Debug, Clone)]
pub struct AssociationSetEditor {
    membership: MembershipSet,
    search: SearchState,
    name_fields: Vec<FieldName>,
}

impl AssociationSetEditor {
    /// Editor over `membership`, searching candidates by `name_fields`.
    pub fn new(
        membership: MembershipSet,
        name_fields: impl IntoIterator<Item = FieldName>,
    ) -> Self {
        Self {
            membership,
            search: SearchState::default(),
            name_fields: name_fields.into_iter().collect(),
        }
    }

    /// Empty editor with no owner.
    pub fn empty(
        self_reference: SelfReference,
        name_fields: impl IntoIterator<Item = FieldName>,
    ) -> Self {
        Self::new(MembershipSet::new(self_reference), name_fields)
    }

    /// Current members.
    pub const fn membership(&self) -> &MembershipSet {
        &self.membership
    }

    /// Current search state for the available pane.
    pub const fn search(&self) -> &SearchState {
        &self.search
    }

    /// Selected owner, if any.
    pub fn owner_id(&self) -> Option<&str> {
        self.membership.owner_id()
    }

    /// Split `reference` into available and selected panes.
    pub fn partition<'a, R: Record>(&self, reference: &'a [R]) -> Partition<'a, R> {
        let matcher = TextMatcher::new(&self.search.term);
        let owner = self.membership.owner_id();
        let mut available = Vec::new();
        let mut selected = Vec::new();
        for r in reference {
            let id = r.id();
            if self.membership.contains(id) {
                selected.push(r);
            } else if owner != Some(id) && matcher.matches(r, &self.name_fields) {
                available.push(r);
            }
        }
        Partition { available, selected }
    }

    /// Replace the available-pane search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search.term = term.into();
    }

    /// Re-point the mapping. Members carry over.
    pub fn set_owner(&mut self, owner_id: impl Into<RecordId>) {
        self.membership.set_owner(owner_id);
    }

    /// Move `id` into the selected pane and reset the search box.
    pub fn pick_from_available(&mut self, id: &str) -> bool {
        let changed = self.membership.add(id);
        self.search.clear();
        changed
    }

    /// Move `id` back to the available pane.
    pub fn drop_from_selected(&mut self, id: &str) -> bool {
        self.membership.remove(id)
    }

    /// Checkbox click on `id`.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.membership.toggle(id)
    }

    /// Associate every record of `reference`, replacing the current members.
    pub fn select_all_candidates<R: Record>(&mut self, reference: &[R]) {
        self.membership.select_all(reference.iter().map(Record::id));
    }

    /// Associate exactly `ids`, replacing the current members.
    pub fn select_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<RecordId>,
    {
        self.membership.select_all(ids);
    }

    /// Drop every member.
    pub fn clear_selection(&mut self) {
        self.membership.clear();
    }
}

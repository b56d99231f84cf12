// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Set of child ids associated with one owner record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::RecordId;

/// Whether the owner may appear among its own members.
///
/// Mappings between same-typed records (company to company entity) exclude
/// the owner; mappings across types have nothing to exclude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelfReference {
    /// Owner and members are different record types.
    Allowed,
    /// Owner and members share a type; the owner is never a member.
    Excluded,
}

/// Members currently associated with an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipSet {
    owner_id: Option<RecordId>,
    member_ids: BTreeSet<RecordId>,
    self_reference: SelfReference,
}

impl MembershipSet {
    /// Empty set with no owner yet.
    pub const fn new(self_reference: SelfReference) -> Self {
        Self {
            owner_id: None,
            member_ids: BTreeSet::new(),
            self_reference,
        }
    }

    /// Set loaded from an existing mapping.
    pub fn with_members<I, S>(
        owner_id: impl Into<RecordId>,
        members: I,
        self_reference: SelfReference,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RecordId>,
    {
        let mut set = Self::new(self_reference);
        set.owner_id = Some(owner_id.into());
        for id in members {
            set.add(id);
        }
        set
    }

    /// Current owner, if one is selected.
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// Self-reference policy.
    pub const fn self_reference(&self) -> SelfReference {
        self.self_reference
    }

    fn is_owner(&self, id: &str) -> bool {
        self.self_reference == SelfReference::Excluded && self.owner_id.as_deref() == Some(id)
    }

    /// Re-point to a different owner. Members are kept; under
    /// [`SelfReference::Excluded`] the new owner is dropped from them.
    pub fn set_owner(&mut self, owner_id: impl Into<RecordId>) {
        let owner_id = owner_id.into();
        if self.self_reference == SelfReference::Excluded {
            self.member_ids.remove(&owner_id);
        }
        self.owner_id = Some(owner_id);
    }

    /// True if `id` is a member.
    pub fn contains(&self, id: &str) -> bool {
        self.member_ids.contains(id)
    }

    /// Insert `id`. Returns whether the set changed.
    pub fn add(&mut self, id: impl Into<RecordId>) -> bool {
        let id = id.into();
        if self.is_owner(&id) {
            return false;
        }
        self.member_ids.insert(id)
    }

    /// Delete `id`. Returns whether the set changed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.member_ids.remove(id)
    }

    /// Remove `id` if present, otherwise add it.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.remove(id)
        } else {
            self.add(id)
        }
    }

    /// Replace the members with `candidates` (not a union with prior members).
    pub fn select_all<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<RecordId>,
    {
        self.member_ids.clear();
        for id in candidates {
            self.add(id);
        }
    }

    /// Remove every member.
    pub fn clear(&mut self) {
        self.member_ids.clear();
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    /// True when there are no members.
    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }

    /// Members in id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.member_ids.iter().map(String::as_str)
    }

    /// Members as an owned list, id order.
    pub fn to_vec(&self) -> Vec<RecordId> {
        self.member_ids.iter().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn owned(owner: &str) -> MembershipSet {
        let mut set = MembershipSet::new(SelfReference::Excluded);
        set.set_owner(owner);
        set
    }

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut set = MembershipSet::new(SelfReference::Allowed);
        assert!(set.add("b1"));
        let once = set.clone();
        assert!(!set.add("b1"));
        assert_eq!(set, once);

        assert!(set.remove("b1"));
        let removed = set.clone();
        assert!(!set.remove("b1"));
        assert_eq!(set, removed);
    }

    #[test]
    fn double_toggle_is_a_no_op() {
        let mut set = MembershipSet::with_members("c1", ["x"], SelfReference::Allowed);
        let before = set.clone();
        set.toggle("y");
        set.toggle("y");
        assert_eq!(set, before);
        set.toggle("x");
        assert!(!set.contains("x"));
        set.toggle("x");
        assert_eq!(set, before);
    }

    #[test]
    fn owner_never_joins_its_own_set() {
        let mut set = owned("c1");
        assert!(!set.add("c1"));
        assert!(!set.toggle("c1"));
        assert!(set.is_empty());

        set.select_all(["c1", "c2", "c3"]);
        assert_eq!(set.to_vec(), ["c2", "c3"]);
    }

    #[test]
    fn owner_may_be_a_member_across_types() {
        let mut set =
            MembershipSet::with_members("7", Vec::<String>::new(), SelfReference::Allowed);
        assert!(set.add("7"));
        assert!(set.contains("7"));
    }

    #[test]
    fn select_all_replaces_prior_edits() {
        let mut set = MembershipSet::with_members("c1", ["old"], SelfReference::Allowed);
        set.select_all(["a", "b"]);
        assert_eq!(set.to_vec(), ["a", "b"]);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn changing_owner_keeps_members_but_drops_new_owner() {
        let mut set = owned("c1");
        set.add("c2");
        set.add("c3");
        set.set_owner("c2");
        assert_eq!(set.owner_id(), Some("c2"));
        assert_eq!(set.to_vec(), ["c3"]);
    }
}

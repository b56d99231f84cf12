// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mapping-page session: one editing pass over an owner's associations.
//!
//! `Idle` (no owner) moves to `Editing` once an owner is chosen; `save` and
//! `cancel` end the session in `Saved` or `Cancelled`. All edits go through
//! [`MappingSession::apply`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::association::{AssociationSetEditor, Partition};
use crate::error::ConsoleError;
use crate::membership::{MembershipSet, SelfReference};
use crate::ports::{NavigatePort, PersistPort};
use crate::record::{AuditInfo, FieldName, Record, RecordId, ViewId};

/// Persisted shape of a mapping: one owner, many members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationRecord {
    /// Mapping id; `None` until the host has stored it once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Parent record.
    pub owner_id: RecordId,
    /// Associated children.
    pub member_ids: Vec<RecordId>,
    /// Active flag.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Host-supplied audit trail, passed through untouched.
    #[serde(default)]
    pub audit: AuditInfo,
}

/// Static description of a mapping page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPage {
    /// List view to return to after save or cancel.
    pub list_view: ViewId,
    /// Candidate fields searched in the available pane.
    pub name_fields: Vec<FieldName>,
    /// Whether owner and members share a record type.
    pub self_reference: SelfReference,
}

/// Lifecycle of a mapping session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No owner selected yet.
    Idle,
    /// Owner selected; membership mutable.
    Editing,
    /// Persisted. Terminal.
    Saved,
    /// Discarded without persisting. Terminal.
    Cancelled,
}

impl SessionPhase {
    /// True for `Saved` and `Cancelled`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Saved | Self::Cancelled)
    }
}

/// Boolean fields of a mapping record editable from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagField {
    /// `is_active`.
    Active,
    /// `is_deleted`.
    Deleted,
}

/// Operator edits on a mapping page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingEdit {
    /// Choose or change the owner record.
    SetOwner(RecordId),
    /// Type into the available-pane search box.
    SetSearchTerm(String),
    /// Pick a candidate from the available pane.
    Pick(RecordId),
    /// Drop a member from the selected pane.
    Drop(RecordId),
    /// Checkbox click.
    Toggle(RecordId),
    /// "Select all": members become exactly these ids.
    SelectAll(Vec<RecordId>),
    /// Remove every member.
    ClearSelection,
    /// Set a flag field.
    SetField(FlagField, bool),
}

/// State of one mapping page.
#[derive(Debug, Clone)]
pub struct MappingSession {
    page: MappingPage,
    phase: SessionPhase,
    record_id: Option<RecordId>,
    is_active: bool,
    is_deleted: bool,
    audit: AuditInfo,
    editor: AssociationSetEditor,
}

impl MappingSession {
    /// New mapping: no owner, no members, active.
    pub fn create(page: MappingPage) -> Self {
        let editor = AssociationSetEditor::empty(page.self_reference, page.name_fields.clone());
        Self {
            page,
            phase: SessionPhase::Idle,
            record_id: None,
            is_active: true,
            is_deleted: false,
            audit: AuditInfo::default(),
            editor,
        }
    }

    /// Edit an existing mapping.
    pub fn open(page: MappingPage, record: AssociationRecord) -> Self {
        let membership =
            MembershipSet::with_members(record.owner_id, record.member_ids, page.self_reference);
        let editor = AssociationSetEditor::new(membership, page.name_fields.clone());
        Self {
            page,
            phase: SessionPhase::Editing,
            record_id: record.id,
            is_active: record.is_active,
            is_deleted: record.is_deleted,
            audit: record.audit,
            editor,
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Page descriptor.
    pub const fn page(&self) -> &MappingPage {
        &self.page
    }

    /// Underlying editor (membership, search term).
    pub const fn editor(&self) -> &AssociationSetEditor {
        &self.editor
    }

    /// Audit metadata for display.
    pub const fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    /// Active flag as edited.
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Soft-delete flag as edited.
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Available/selected panes over `reference`.
    pub fn partition<'a, R: Record>(&self, reference: &'a [R]) -> Partition<'a, R> {
        self.editor.partition(reference)
    }

    /// Apply one operator edit. Returns false when the edit was ignored in
    /// the current phase.
    pub fn apply(&mut self, edit: MappingEdit) -> bool {
        if self.phase.is_terminal() {
            debug!(?edit, phase = ?self.phase, "edit after session end ignored");
            return false;
        }
        match edit {
            MappingEdit::SetOwner(owner) => {
                self.editor.set_owner(owner);
                self.phase = SessionPhase::Editing;
            }
            MappingEdit::SetSearchTerm(term) => self.editor.set_search_term(term),
            edit if self.phase == SessionPhase::Idle => {
                debug!(?edit, "edit before owner selection ignored");
                return false;
            }
            MappingEdit::Pick(id) => {
                self.editor.pick_from_available(&id);
            }
            MappingEdit::Drop(id) => {
                self.editor.drop_from_selected(&id);
            }
            MappingEdit::Toggle(id) => {
                self.editor.toggle(&id);
            }
            MappingEdit::SelectAll(ids) => self.editor.select_ids(ids),
            MappingEdit::ClearSelection => self.editor.clear_selection(),
            MappingEdit::SetField(FlagField::Active, value) => self.is_active = value,
            MappingEdit::SetField(FlagField::Deleted, value) => self.is_deleted = value,
        }
        true
    }

    /// Pick `id` from the available pane.
    pub fn pick_from_available(&mut self, id: impl Into<RecordId>) -> bool {
        self.apply(MappingEdit::Pick(id.into()))
    }

    /// Drop `id` from the selected pane.
    pub fn drop_from_selected(&mut self, id: impl Into<RecordId>) -> bool {
        self.apply(MappingEdit::Drop(id.into()))
    }

    /// Select every record of `reference`.
    pub fn select_all_candidates<R: Record>(&mut self, reference: &[R]) -> bool {
        let ids = reference.iter().map(|r| r.id().to_owned()).collect();
        self.apply(MappingEdit::SelectAll(ids))
    }

    /// Choose or change the owner.
    pub fn set_owner(&mut self, owner: impl Into<RecordId>) -> bool {
        self.apply(MappingEdit::SetOwner(owner.into()))
    }

    /// Replace the available-pane search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        self.apply(MappingEdit::SetSearchTerm(term.into()))
    }

    /// Record as it would be saved now; `None` while no owner is selected.
    pub fn draft(&self) -> Option<AssociationRecord> {
        let owner_id = self.editor.owner_id()?.to_owned();
        Some(AssociationRecord {
            id: self.record_id.clone(),
            owner_id,
            member_ids: self.editor.membership().to_vec(),
            is_active: self.is_active,
            is_deleted: self.is_deleted,
            audit: self.audit.clone(),
        })
    }

    /// Validate, persist once, then return to the list view.
    ///
    /// On persist failure the session stays in `Editing` with every edit
    /// intact; nothing is retried.
    #[instrument(skip_all, fields(list = %self.page.list_view))]
    pub fn save<P, N>(
        &mut self,
        persist: &mut P,
        navigate: &mut N,
    ) -> Result<AssociationRecord, ConsoleError>
    where
        P: PersistPort<AssociationRecord> + ?Sized,
        N: NavigatePort + ?Sized,
    {
        if self.phase.is_terminal() {
            return Err(ConsoleError::validation(
                "session",
                "this mapping session has already ended",
            ));
        }
        let record = self
            .draft()
            .ok_or_else(|| ConsoleError::validation("owner", "select an owner before saving"))?;

        if let Err(err) = persist.persist(&record) {
            warn!(error = %err, owner = %record.owner_id, "persist failed; edits kept");
            return Err(ConsoleError::Collaborator(err));
        }

        self.phase = SessionPhase::Saved;
        info!(owner = %record.owner_id, members = record.member_ids.len(), "mapping saved");
        navigate.navigate(&self.page.list_view);
        Ok(record)
    }

    /// Discard the session without persisting and return to the list view.
    pub fn cancel<N: NavigatePort + ?Sized>(&mut self, navigate: &mut N) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = SessionPhase::Cancelled;
        info!(list = %self.page.list_view, "mapping edit cancelled");
        navigate.navigate(&self.page.list_view);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PersistError;

    fn page() -> MappingPage {
        MappingPage {
            list_view: ViewId::from_static("company-billing-types"),
            name_fields: vec![FieldName::from_static("name")],
            self_reference: SelfReference::Allowed,
        }
    }

    #[test]
    fn idle_until_owner_chosen() {
        let mut s = MappingSession::create(page());
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(!s.pick_from_available("b1"));
        assert!(s.set_search_term("ret"));
        assert!(s.set_owner("c1"));
        assert_eq!(s.phase(), SessionPhase::Editing);
        assert!(s.pick_from_available("b1"));
        assert!(s.editor().membership().contains("b1"));
    }

    #[test]
    fn idle_rejects_membership_and_flag_edits() {
        let mut s = MappingSession::create(page());
        assert!(!s.apply(MappingEdit::Toggle("b1".into())));
        assert!(!s.apply(MappingEdit::SelectAll(vec!["b1".into()])));
        assert!(!s.apply(MappingEdit::ClearSelection));
        assert!(!s.apply(MappingEdit::SetField(FlagField::Active, false)));
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(s.is_active());

        assert!(s.apply(MappingEdit::SetOwner("c1".into())));
        assert!(s.apply(MappingEdit::SetSearchTerm("ret".into())));
        assert_eq!(s.editor().search().term, "ret");
        let both = vec!["b1".to_owned(), "b2".to_owned()];
        assert!(s.apply(MappingEdit::SelectAll(both)));
        assert!(s.apply(MappingEdit::Drop("b2".into())));
        assert_eq!(s.editor().membership().to_vec(), ["b1"]);
        assert!(s.apply(MappingEdit::ClearSelection));
        assert!(s.editor().membership().is_empty());
    }

    #[test]
    fn set_field_goes_through_reducer() {
        let mut s = MappingSession::create(page());
        s.set_owner("c1");
        s.apply(MappingEdit::SetField(FlagField::Active, false));
        s.apply(MappingEdit::SetField(FlagField::Deleted, true));
        let draft = s.draft().expect("owner set");
        assert!(!draft.is_active);
        assert!(draft.is_deleted);
    }

    #[test]
    fn open_preserves_id_and_audit() {
        let audit = AuditInfo {
            created_by: Some("ops".into()),
            ..AuditInfo::default()
        };
        let record = AssociationRecord {
            id: Some("m-9".into()),
            owner_id: "c1".into(),
            member_ids: vec!["b2".into(), "b1".into()],
            is_active: true,
            is_deleted: false,
            audit: audit.clone(),
        };
        let s = MappingSession::open(page(), record);
        assert_eq!(s.phase(), SessionPhase::Editing);
        let draft = s.draft().expect("owner set");
        assert_eq!(draft.id.as_deref(), Some("m-9"));
        assert_eq!(draft.member_ids, ["b1", "b2"]);
        assert_eq!(draft.audit, audit);
    }

    #[test]
    fn cancel_navigates_without_persisting() {
        let mut s = MappingSession::create(page());
        s.set_owner("c1");
        let mut went = Vec::new();
        s.cancel(&mut |v: &ViewId| went.push(v.clone()));
        assert_eq!(s.phase(), SessionPhase::Cancelled);
        assert_eq!(went, [ViewId::from_static("company-billing-types")]);
        assert!(!s.set_owner("c2"));
        let mut ok = |_: &AssociationRecord| -> Result<(), PersistError> { Ok(()) };
        let err = s
            .save(&mut ok, &mut |_: &ViewId| {})
            .expect_err("session ended");
        assert_eq!(err.field(), Some("session"));
    }

    #[test]
    fn record_json_is_camel_case() {
        let record = AssociationRecord {
            id: None,
            owner_id: "c1".into(),
            member_ids: vec!["b1".into()],
            is_active: true,
            is_deleted: false,
            audit: AuditInfo::default(),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["ownerId"], "c1");
        assert_eq!(json["memberIds"][0], "b1");
        assert!(json.get("id").is_none());
    }
}

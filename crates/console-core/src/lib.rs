// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Interaction engines behind the admin console's list and mapping pages.
//!
//! Every list page is a [`view::CollectionView`] over an already-fetched
//! collection; every many-to-many mapping page is a
//! [`session::MappingSession`] wrapping an [`association::AssociationSetEditor`].
//! Both are pure derivations over caller-owned data. Persistence and
//! navigation are reached only through the traits in [`ports`].

pub mod association;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod membership;
pub mod ports;
pub mod prefs;
pub mod record;
pub mod session;
pub mod view;

pub use association::{AssociationSetEditor, Partition};
pub use error::{ConsoleError, PersistError};
pub use matcher::{matches, TextMatcher};
pub use membership::{MembershipSet, SelfReference};
pub use record::{AuditInfo, FieldName, FieldValue, Record, RecordId, ViewId};
pub use session::{
    AssociationRecord, FlagField, MappingEdit, MappingPage, MappingSession, SessionPhase,
};
pub use view::{
    derive_view, derive_view_with, field_order, CollectionView, SearchState, SortDirection,
    SortState,
};

// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collection view engine: filter + stable single-column sort for list pages.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matcher::TextMatcher;
use crate::prefs::{ConsolePrefs, ListPagePrefs};
use crate::record::{FieldName, Record, ViewId};

/// Current search box contents. An empty term filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    /// Raw term as typed by the operator.
    pub term: String,
}

impl SearchState {
    /// Search state for `term`.
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    /// True when no term is set.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Reset the term.
    pub fn clear(&mut self) {
        self.term.clear();
    }
}

/// Sort direction of the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Active sort column, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortState {
    /// Natural (insertion) order.
    #[default]
    Unset,
    /// Sorted by a single column.
    By {
        /// Column key.
        key: FieldName,
        /// Direction.
        direction: SortDirection,
    },
}

impl SortState {
    /// Ascending sort on `key`.
    pub fn ascending(key: impl Into<FieldName>) -> Self {
        Self::By {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `key`.
    pub fn descending(key: impl Into<FieldName>) -> Self {
        Self::By {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// State after a click on the `key` column header.
    ///
    /// Same column while ascending flips to descending; anything else
    /// selects `key` ascending. There is no way back to `Unset`.
    pub fn toggled(&self, key: &FieldName) -> Self {
        match self {
            Self::By {
                key: current,
                direction: SortDirection::Ascending,
            } if current == key => Self::By {
                key: key.clone(),
                direction: SortDirection::Descending,
            },
            _ => Self::By {
                key: key.clone(),
                direction: SortDirection::Ascending,
            },
        }
    }

    /// Active key, if any.
    pub const fn key(&self) -> Option<&FieldName> {
        match self {
            Self::Unset => None,
            Self::By { key, .. } => Some(key),
        }
    }

    /// Active direction, if any.
    pub const fn direction(&self) -> Option<SortDirection> {
        match self {
            Self::Unset => None,
            Self::By { direction, .. } => Some(*direction),
        }
    }
}

/// Default column comparator: [`FieldValue::total_cmp`](crate::record::FieldValue::total_cmp)
/// on the named field, missing values first.
pub fn field_order<R: Record + ?Sized>(key: &FieldName, a: &R, b: &R) -> Ordering {
    match (a.field(key), b.field(key)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter `collection` by `search` over `search_fields`, then sort by `sort`
/// using `compare` for the active key.
///
/// Filtering keeps collection order; sorting is stable in both directions.
pub fn derive_view_with<'a, R, F>(
    collection: &'a [R],
    search: &SearchState,
    sort: &SortState,
    search_fields: &[FieldName],
    compare: F,
) -> Vec<&'a R>
where
    R: Record,
    F: Fn(&FieldName, &R, &R) -> Ordering,
{
    let matcher = TextMatcher::new(&search.term);
    let mut rows: Vec<&R> = collection
        .iter()
        .filter(|r| matcher.matches(*r, search_fields))
        .collect();

    if let SortState::By { key, direction } = sort {
        match direction {
            SortDirection::Ascending => rows.sort_by(|a, b| compare(key, *a, *b)),
            SortDirection::Descending => rows.sort_by(|a, b| compare(key, *a, *b).reverse()),
        }
    }
    rows
}

/// [`derive_view_with`] using [`field_order`].
pub fn derive_view<'a, R: Record>(
    collection: &'a [R],
    search: &SearchState,
    sort: &SortState,
    search_fields: &[FieldName],
) -> Vec<&'a R> {
    derive_view_with(collection, search, sort, search_fields, field_order::<R>)
}

/// Per-page list state: search box, sort header and the searched columns.
#[derive(Debug, Clone)]
pub struct CollectionView {
    page: ViewId,
    search_fields: Vec<FieldName>,
    search: SearchState,
    sort: SortState,
}

impl CollectionView {
    /// Fresh view for `page`: empty search, natural order.
    pub fn new(page: ViewId, search_fields: impl IntoIterator<Item = FieldName>) -> Self {
        Self {
            page,
            search_fields: search_fields.into_iter().collect(),
            search: SearchState::default(),
            sort: SortState::Unset,
        }
    }

    /// Start from the sort remembered for this page, if any.
    pub fn with_prefs(mut self, prefs: &ConsolePrefs) -> Self {
        if let Some(page) = prefs.page(&self.page) {
            self.sort = page.sort.clone();
        }
        self
    }

    /// Page this view belongs to.
    pub const fn page(&self) -> &ViewId {
        &self.page
    }

    /// Searched columns.
    pub fn search_fields(&self) -> &[FieldName] {
        &self.search_fields
    }

    /// Current search state.
    pub const fn search(&self) -> &SearchState {
        &self.search
    }

    /// Current sort state.
    pub const fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Replace the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search.term = term.into();
    }

    /// Header click on `key`.
    pub fn toggle_sort(&mut self, key: impl Into<FieldName>) {
        let key = key.into();
        self.sort = self.sort.toggled(&key);
        debug!(page = %self.page, key = %key, direction = ?self.sort.direction(), "sort toggled");
    }

    /// Derived rows for the current search and sort.
    pub fn derive<'a, R: Record>(&self, collection: &'a [R]) -> Vec<&'a R> {
        derive_view(collection, &self.search, &self.sort, &self.search_fields)
    }

    /// Derived rows using a caller comparator for the sort key.
    pub fn derive_with<'a, R, F>(&self, collection: &'a [R], compare: F) -> Vec<&'a R>
    where
        R: Record,
        F: Fn(&FieldName, &R, &R) -> Ordering,
    {
        derive_view_with(
            collection,
            &self.search,
            &self.sort,
            &self.search_fields,
            compare,
        )
    }

    /// Write this page's sort into `prefs`.
    pub fn remember(&self, prefs: &mut ConsolePrefs) {
        prefs.set_page(
            self.page.clone(),
            ListPagePrefs {
                sort: self.sort.clone(),
            },
        );
    }
}

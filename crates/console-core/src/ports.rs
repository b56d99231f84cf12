// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports the host application implements for sessions to save, leave the page,
//! and remember list preferences, without the core knowing about transport or
//! routing.

use crate::error::PersistError;
use crate::prefs::ConsolePrefs;
use crate::record::ViewId;

/// Hands a completed record to the host's persistence layer.
pub trait PersistPort<T: ?Sized> {
    /// Persist `record`. Called once per explicit save.
    fn persist(&mut self, record: &T) -> Result<(), PersistError>;
}

impl<T: ?Sized, F> PersistPort<T> for F
where
    F: FnMut(&T) -> Result<(), PersistError>,
{
    fn persist(&mut self, record: &T) -> Result<(), PersistError> {
        self(record)
    }
}

/// Moves the host to another view (list page after save/cancel).
pub trait NavigatePort {
    /// Navigate to `view`.
    fn navigate(&mut self, view: &ViewId);
}

impl<F> NavigatePort for F
where
    F: FnMut(&ViewId),
{
    fn navigate(&mut self, view: &ViewId) {
        self(view);
    }
}

/// Loads/saves list-page preferences.
pub trait PrefsPort {
    /// Load preferences (None if missing or unreadable).
    fn load_prefs(&self) -> Option<ConsolePrefs>;
    /// Persist preferences (best-effort; impl logs failures).
    fn save_prefs(&self, prefs: &ConsolePrefs);
}

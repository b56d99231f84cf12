// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use console_core::catalog::{BillingType, Company};
use console_core::{AssociationRecord, FieldName, FieldValue, PersistError, Record, ViewId};

/// Minimal record used by property tests: index-derived id, a text name and
/// a small numeric rank so equal sort keys are common.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: String,
    pub name: String,
    pub note: String,
    pub rank: f64,
}

impl Record for Row {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>> {
        match name.as_str() {
            "name" => Some(FieldValue::Text(&self.name)),
            "note" => Some(FieldValue::Text(&self.note)),
            "rank" => Some(FieldValue::Number(self.rank)),
            _ => None,
        }
    }
}

pub fn rows(specs: Vec<(String, String, u8)>) -> Vec<Row> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (name, note, rank))| Row {
            id: format!("r{i}"),
            name,
            note,
            rank: f64::from(rank),
        })
        .collect()
}

pub fn field(name: &'static str) -> FieldName {
    FieldName::from_static(name)
}

pub fn company(id: &str, name: &str) -> Company {
    Company {
        id: id.into(),
        name: name.into(),
        code: id.to_uppercase(),
        city: "Pune".into(),
        is_active: true,
    }
}

pub fn billing_types() -> Vec<BillingType> {
    [("a", "Prepaid"), ("b", "Postpaid"), ("c", "Invoice")]
        .into_iter()
        .map(|(id, name)| BillingType {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            is_active: true,
        })
        .collect()
}

pub fn ids<R: Record>(rows: &[&R]) -> Vec<String> {
    rows.iter().map(|r| r.id().to_owned()).collect()
}

/// Persist adapter that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    pub saved: Vec<AssociationRecord>,
    pub fail_with: Option<&'static str>,
}

impl RecordingStore {
    pub fn failing(msg: &'static str) -> Self {
        Self {
            saved: Vec::new(),
            fail_with: Some(msg),
        }
    }

    pub fn calls(&self) -> usize {
        self.saved.len()
    }
}

impl console_core::ports::PersistPort<AssociationRecord> for RecordingStore {
    fn persist(&mut self, record: &AssociationRecord) -> Result<(), PersistError> {
        self.saved.push(record.clone());
        match self.fail_with {
            Some(msg) => Err(msg.into()),
            None => Ok(()),
        }
    }
}

/// Navigation adapter that remembers where it was sent.
#[derive(Default)]
pub struct Router {
    pub visited: Vec<ViewId>,
}

impl console_core::ports::NavigatePort for Router {
    fn navigate(&mut self, view: &ViewId) {
        self.visited.push(view.clone());
    }
}

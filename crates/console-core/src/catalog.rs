// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Master records managed by the console and the page descriptors that bind
//! them to the generic list and mapping engines.

use serde::{Deserialize, Serialize};

use crate::membership::SelfReference;
use crate::record::{FieldName, FieldValue, Record, RecordId, ViewId};
use crate::session::MappingPage;
use crate::view::CollectionView;

const NAME: FieldName = FieldName::from_static("name");
const CODE: FieldName = FieldName::from_static("code");
const CITY: FieldName = FieldName::from_static("city");
const DESCRIPTION: FieldName = FieldName::from_static("description");
const EMAIL: FieldName = FieldName::from_static("email");
const PHONE: FieldName = FieldName::from_static("phone");
const PRICE: FieldName = FieldName::from_static("price");
const SUBJECT: FieldName = FieldName::from_static("subject");
const STATUS: FieldName = FieldName::from_static("status");
const CUSTOMER_NAME: FieldName = FieldName::from_static("customerName");
const IS_ACTIVE: FieldName = FieldName::from_static("isActive");

/// A company (also the owner of every mapping page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Record id.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Short company code.
    pub code: String,
    /// Head office city.
    pub city: String,
    /// Active flag.
    pub is_active: bool,
}

impl Record for Company {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>> {
        Some(match name.as_str() {
            "name" => FieldValue::Text(&self.name),
            "code" => FieldValue::Text(&self.code),
            "city" => FieldValue::Text(&self.city),
            "isActive" => FieldValue::Flag(self.is_active),
            _ => return None,
        })
    }
}

/// A way a company can be billed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingType {
    /// Record id.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Active flag.
    pub is_active: bool,
}

impl Record for BillingType {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>> {
        Some(match name.as_str() {
            "name" => FieldValue::Text(&self.name),
            "description" => FieldValue::Text(&self.description),
            "isActive" => FieldValue::Flag(self.is_active),
            _ => return None,
        })
    }
}

/// A customer contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Record id.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Active flag.
    pub is_active: bool,
}

impl Record for Customer {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>> {
        Some(match name.as_str() {
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::Text(&self.email),
            "phone" => FieldValue::Text(&self.phone),
            "isActive" => FieldValue::Flag(self.is_active),
            _ => return None,
        })
    }
}

/// A sellable package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Record id.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// List price.
    pub price: f64,
    /// Active flag.
    pub is_active: bool,
}

impl Record for Package {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>> {
        Some(match name.as_str() {
            "name" => FieldValue::Text(&self.name),
            "price" => FieldValue::Number(self.price),
            "isActive" => FieldValue::Flag(self.is_active),
            _ => return None,
        })
    }
}

/// An inbound sales enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    /// Record id.
    pub id: RecordId,
    /// Who asked.
    pub customer_name: String,
    /// Subject line.
    pub subject: String,
    /// Workflow status (open, quoted, closed...).
    pub status: String,
}

impl Record for Enquiry {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>> {
        Some(match name.as_str() {
            "customerName" => FieldValue::Text(&self.customer_name),
            "subject" => FieldValue::Text(&self.subject),
            "status" => FieldValue::Text(&self.status),
            _ => return None,
        })
    }
}

/// A level of a company's organizational hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgLevel {
    /// Record id.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Depth in the hierarchy (1 = top).
    pub level: f64,
}

impl Record for OrgLevel {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>> {
        Some(match name.as_str() {
            "name" => FieldValue::Text(&self.name),
            "level" => FieldValue::Number(self.level),
            _ => return None,
        })
    }
}

/// Master-record list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListPage {
    /// Companies.
    Companies,
    /// Billing types.
    BillingTypes,
    /// Customers.
    Customers,
    /// Packages.
    Packages,
    /// Enquiries.
    Enquiries,
}

impl ListPage {
    /// Every list page.
    pub const ALL: [Self; 5] = [
        Self::Companies,
        Self::BillingTypes,
        Self::Customers,
        Self::Packages,
        Self::Enquiries,
    ];

    /// Host view id.
    pub const fn view_id(self) -> ViewId {
        ViewId::from_static(match self {
            Self::Companies => "companies",
            Self::BillingTypes => "billing-types",
            Self::Customers => "customers",
            Self::Packages => "packages",
            Self::Enquiries => "enquiries",
        })
    }

    /// Columns the search box looks at.
    pub fn search_fields(self) -> Vec<FieldName> {
        match self {
            Self::Companies => vec![NAME, CODE, CITY],
            Self::BillingTypes => vec![NAME, DESCRIPTION],
            Self::Customers => vec![NAME, EMAIL, PHONE],
            Self::Packages => vec![NAME],
            Self::Enquiries => vec![CUSTOMER_NAME, SUBJECT, STATUS],
        }
    }

    /// Columns with a clickable sort header.
    pub fn sortable_columns(self) -> Vec<FieldName> {
        match self {
            Self::Companies => vec![NAME, CODE, CITY, IS_ACTIVE],
            Self::BillingTypes => vec![NAME, IS_ACTIVE],
            Self::Customers => vec![NAME, EMAIL, IS_ACTIVE],
            Self::Packages => vec![NAME, PRICE, IS_ACTIVE],
            Self::Enquiries => vec![CUSTOMER_NAME, SUBJECT, STATUS],
        }
    }

    /// Fresh list state for this page.
    pub fn collection_view(self) -> CollectionView {
        CollectionView::new(self.view_id(), self.search_fields())
    }
}

/// Many-to-many mapping pages, all owned by a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    /// Company to billing types.
    CompanyBillingTypes,
    /// Company to the business entities (other companies) it groups.
    CompanyEntities,
    /// Company to organizational levels.
    CompanyOrgLevels,
}

impl MappingKind {
    /// Every mapping page.
    pub const ALL: [Self; 3] = [
        Self::CompanyBillingTypes,
        Self::CompanyEntities,
        Self::CompanyOrgLevels,
    ];

    /// List view of existing mappings of this kind.
    pub const fn list_view(self) -> ViewId {
        ViewId::from_static(match self {
            Self::CompanyBillingTypes => "company-billing-types",
            Self::CompanyEntities => "company-entities",
            Self::CompanyOrgLevels => "company-org-levels",
        })
    }

    /// Members share the owner's record type only for entity mappings.
    pub const fn self_reference(self) -> SelfReference {
        match self {
            Self::CompanyEntities => SelfReference::Excluded,
            Self::CompanyBillingTypes | Self::CompanyOrgLevels => SelfReference::Allowed,
        }
    }

    /// Page descriptor for [`MappingSession`](crate::session::MappingSession).
    pub fn page(self) -> MappingPage {
        let name_fields = match self {
            Self::CompanyEntities => vec![NAME, CODE],
            Self::CompanyBillingTypes | Self::CompanyOrgLevels => vec![NAME],
        };
        MappingPage {
            list_view: self.list_view(),
            name_fields,
            self_reference: self.self_reference(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::view::SortState;

    fn packages() -> Vec<Package> {
        [
            ("p1", "Gold", 300.0),
            ("p2", "Bronze", 100.0),
            ("p3", "Silver", 200.0),
        ]
        .into_iter()
        .map(|(id, name, price)| Package {
            id: id.into(),
            name: name.into(),
            price,
            is_active: true,
        })
        .collect()
    }

    #[test]
    fn price_column_sorts_numerically() {
        let data = packages();
        let mut view = ListPage::Packages.collection_view();
        view.toggle_sort(PRICE);
        let names: Vec<_> = view.derive(&data).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Bronze", "Silver", "Gold"]);
        assert_eq!(view.sort(), &SortState::ascending(PRICE));
    }

    #[test]
    fn sortable_columns_exist_on_records() {
        let company = Company {
            id: "c1".into(),
            name: "Acme".into(),
            code: "AC".into(),
            city: "Pune".into(),
            is_active: true,
        };
        for key in ListPage::Companies.sortable_columns() {
            assert!(company.field(&key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn view_ids_are_distinct() {
        let mut ids: Vec<_> = ListPage::ALL.iter().map(|p| p.view_id()).collect();
        ids.extend(MappingKind::ALL.iter().map(|k| k.list_view()));
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn org_levels_pair_with_their_mapping_page() {
        let levels: Vec<OrgLevel> = [
            ("l3", "Branch", 3.0),
            ("l1", "Head Office", 1.0),
            ("l2", "Region", 2.0),
        ]
        .into_iter()
        .map(|(id, name, level)| OrgLevel {
            id: id.into(),
            name: name.into(),
            level,
        })
        .collect();
        let by_level = crate::view::derive_view(
            &levels,
            &crate::view::SearchState::default(),
            &SortState::ascending("level"),
            &[],
        );
        let ids: Vec<_> = by_level.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["l1", "l2", "l3"]);

        let mut session =
            crate::session::MappingSession::create(MappingKind::CompanyOrgLevels.page());
        session.set_owner("c1");
        session.set_search_term("office");
        let panes = session.partition(&levels);
        assert_eq!(panes.available.len(), 1);
        assert_eq!(panes.available[0].id, "l1");
    }

    #[test]
    fn only_entity_mapping_excludes_owner() {
        assert_eq!(
            MappingKind::CompanyEntities.page().self_reference,
            SelfReference::Excluded
        );
        assert_eq!(
            MappingKind::CompanyBillingTypes.page().self_reference,
            SelfReference::Allowed
        );
    }
}

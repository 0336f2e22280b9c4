//! Static registry of the CRM object types the pipeline can query.
//!
//! One entry per object type, built once at startup and never mutated.
//! Lookups by raw type name fall back to the deals entry so that a
//! misinterpreted object type still produces a well-formed request.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectType {
    Deals,
    Contacts,
    Companies,
}

impl ObjectType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "deals" => Some(Self::Deals),
            "contacts" => Some(Self::Contacts),
            "companies" => Some(Self::Companies),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deals => "deals",
            Self::Contacts => "contacts",
            Self::Companies => "companies",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    pub object_type: ObjectType,
    pub path: &'static str,
    pub default_properties: &'static [&'static str],
    pub filterable_properties: &'static [&'static str],
}

static ENTRIES: [CatalogEntry; 3] = [
    CatalogEntry {
        object_type: ObjectType::Deals,
        path: "/crm/v3/objects/deals",
        default_properties: &[
            "dealname",
            "amount",
            "dealstage",
            "closedate",
            "pipeline",
            "hubspot_owner_id",
        ],
        filterable_properties: &["dealstage", "pipeline", "amount"],
    },
    CatalogEntry {
        object_type: ObjectType::Contacts,
        path: "/crm/v3/objects/contacts",
        default_properties: &["firstname", "lastname", "email", "phone", "company", "jobtitle"],
        filterable_properties: &["email", "company"],
    },
    CatalogEntry {
        object_type: ObjectType::Companies,
        path: "/crm/v3/objects/companies",
        default_properties: &[
            "name",
            "domain",
            "industry",
            "city",
            "state",
            "country",
            "numberofemployees",
        ],
        filterable_properties: &["industry", "city", "state"],
    },
];

#[derive(Clone, Copy, Debug, Default)]
pub struct Catalog;

impl Catalog {
    pub fn new() -> Self {
        Self
    }

    /// Resolve an entry by raw object type name. Unknown names fall back
    /// to the deals entry; this never fails.
    pub fn entry_for(&self, raw: &str) -> &'static CatalogEntry {
        ObjectType::parse(raw)
            .and_then(|object_type| {
                ENTRIES.iter().find(|entry| entry.object_type == object_type)
            })
            .unwrap_or(&ENTRIES[0])
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        &ENTRIES
    }
}

//! Normalized descriptor record.

use serde::{Deserialize, Serialize};

/// Cleaned metadata extracted from one unit's descriptor.
///
/// Fields missing from the source document are empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub date_stamp: String,
    pub reference_system_code: String,
    pub title: String,
    pub date: String,
    pub cited_parties: Vec<CitedParty>,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub keywords: Vec<String>,
    pub bounding_box: BoundingBox,
}

/// A responsible party cited by the descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CitedParty {
    Person { name: String, role: String },
    Organization { name: String, role: String },
}

impl CitedParty {
    pub fn person(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self::Person {
            name: name.into(),
            role: role.into(),
        }
    }

    pub fn organization(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self::Organization {
            name: name.into(),
            role: role.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Person { name, .. } | Self::Organization { name, .. } => name,
        }
    }

    /// Role code (`codeListValue` of `CI_RoleCode`).
    pub fn role(&self) -> &str {
        match self {
            Self::Person { role, .. } | Self::Organization { role, .. } => role,
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(self, Self::Person { .. })
    }
}

/// A `citedResponsibleParty` as read from the XML, before cleanup.
///
/// Both name fields come from alternative paths; usually only one is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCitedParty {
    pub person: String,
    pub organization: String,
    pub role: String,
}

/// Geographic bounding box, kept as the source's decimal strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundingBox {
    pub west: String,
    pub east: String,
    pub south: String,
    pub north: String,
}

impl BoundingBox {
    /// Parse all four sides as `[west, east, south, north]`.
    ///
    /// Returns `None` if any side is missing or not a number.
    pub fn to_degrees(&self) -> Option<[f64; 4]> {
        let parse = |s: &str| s.trim().parse::<f64>().ok();
        Some([
            parse(&self.west)?,
            parse(&self.east)?,
            parse(&self.south)?,
            parse(&self.north)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_accessors() {
        let party = CitedParty::organization("SHOM", "originator");
        assert_eq!(party.name(), "SHOM");
        assert_eq!(party.role(), "originator");
        assert!(!party.is_person());
    }

    #[test]
    fn test_party_serializes_with_kind_tag() {
        let party = CitedParty::person("Jane Doe", "author");
        let json = serde_json::to_value(&party).unwrap();
        assert_eq!(json["kind"], "person");
        assert_eq!(json["name"], "Jane Doe");
        assert_eq!(json["role"], "author");
    }

    #[test]
    fn test_bounding_box_degrees() {
        let bbox = BoundingBox {
            west: "-5.2".into(),
            east: "-4.1".into(),
            south: "47.5".into(),
            north: " 48.9 ".into(),
        };
        assert_eq!(bbox.to_degrees(), Some([-5.2, -4.1, 47.5, 48.9]));
        assert_eq!(BoundingBox::default().to_degrees(), None);
    }
}

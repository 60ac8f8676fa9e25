// src/metadata/cleanup.rs

//! Cited-party repair.
//!
//! A raw party carries a person name and an organisation name read from two
//! alternative paths. Each non-empty name becomes its own cleaned party with
//! the raw party's role:
//!
//! - person only: one `Person`
//! - organisation only: one `Organization`
//! - both: a `Person` then an `Organization`, same role
//! - neither: dropped
//!
//! Whether "both" is a source artifact or a real dual-role party is not known,
//! so both are kept.

use crate::models::{CitedParty, RawCitedParty};

/// Turn raw parties into tagged ones, preserving document order.
pub fn clean_cited_parties(raw: Vec<RawCitedParty>) -> Vec<CitedParty> {
    let mut cleaned = Vec::with_capacity(raw.len());

    for party in raw {
        let person = party.person.trim();
        let organization = party.organization.trim();

        if !person.is_empty() {
            cleaned.push(CitedParty::person(person, party.role.as_str()));
        }
        if !organization.is_empty() {
            cleaned.push(CitedParty::organization(organization, party.role.as_str()));
        }
        if person.is_empty() && organization.is_empty() {
            log::debug!("Dropping cited party without a name (role {:?})", party.role);
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(person: &str, organization: &str, role: &str) -> RawCitedParty {
        RawCitedParty {
            person: person.into(),
            organization: organization.into(),
            role: role.into(),
        }
    }

    #[test]
    fn test_person_only() {
        let cleaned = clean_cited_parties(vec![raw("Jane Doe", "", "author")]);
        assert_eq!(cleaned, vec![CitedParty::person("Jane Doe", "author")]);
    }

    #[test]
    fn test_empty_party_dropped() {
        assert!(clean_cited_parties(vec![raw("", "", "author")]).is_empty());
        assert!(clean_cited_parties(vec![raw("  ", "\n", "")]).is_empty());
    }

    #[test]
    fn test_both_names_yield_two_parties() {
        let cleaned = clean_cited_parties(vec![raw("Jane Doe", "Acme", "author")]);
        assert_eq!(
            cleaned,
            vec![
                CitedParty::person("Jane Doe", "author"),
                CitedParty::organization("Acme", "author"),
            ]
        );
    }

    #[test]
    fn test_order_preserved() {
        let cleaned = clean_cited_parties(vec![
            raw("", "SHOM", "publisher"),
            raw("", "", "pointOfContact"),
            raw("Jean Martin", "", "author"),
        ]);
        let names: Vec<&str> = cleaned.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["SHOM", "Jean Martin"]);
    }
}

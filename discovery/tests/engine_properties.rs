//! End-to-end behaviour of the discovery engine over API-shaped fixtures.

use chrono::{TimeZone, Utc};
use serde_json::json;

use discovery::{
    CategorySelection, CertificationRecord, DiscoveryEngine, FilterState, LabDescriptor,
    MasteryEntry, MasteryMap, MicroDrill, NextAction,
};

fn catalog() -> Vec<CertificationRecord> {
    let listing = json!({
        "exams": [
            {
                "id": "c1", "code": "AZ-900", "title": "Microsoft Azure Fundamentals",
                "description": "Foundational knowledge of cloud services",
                "skills": ["Describe cloud concepts", "Describe Azure architecture"],
                "product": ["Azure"], "role": ["Administrator", "Developer"],
                "topicCount": 24
            },
            {
                "id": "c2", "code": "AZ-104", "title": "Azure Administrator Associate",
                "skills": ["Manage Azure identities", "Implement storage"],
                "product": ["Azure"], "role": ["Administrator"],
                "topicCount": 48
            },
            {
                "id": "c3", "code": "AZ-204", "title": "Azure Developer Associate",
                "product": ["Azure"], "role": ["Developer"],
                "credentialType": "Certification",
                "topicCount": 40
            },
            {
                "id": "c4", "code": "PL-300", "title": "Power BI Data Analyst Associate",
                "category": "associate",
                "product": ["Power BI", "Microsoft Fabric"], "role": ["Data Analyst"],
                "topicCount": 30
            },
            {
                "id": "c5", "code": "AZ-305", "title": "Azure Solutions Architect Expert",
                "product": ["Azure"], "role": ["Solution Architect"],
                "topicCount": 52
            },
            {
                "id": "c6", "code": "APL-1003", "title": "Secure Azure services",
                "product": ["Azure", "Microsoft Defender"], "role": ["Security Engineer"],
                "credentialType": "Applied Skill",
                "topicCount": 9
            },
            {
                "id": "c7", "code": "MB-910", "title": "Dynamics 365 Fundamentals (CRM)",
                "product": ["Dynamics 365"],
                "topicCount": 18
            }
        ]
    });
    DiscoveryEngine::decode_catalog(&listing.to_string()).unwrap()
}

fn ids(records: &[CertificationRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn unconstrained_filter_is_identity() {
    let engine = DiscoveryEngine::new();
    let records = catalog();
    assert_eq!(engine.apply_filters(&records, &FilterState::new()), records);
}

#[test]
fn facet_index_is_sorted_distinct_and_stable() {
    let engine = DiscoveryEngine::new();
    let records = catalog();
    let index = engine.compute_facet_index(&records);

    assert_eq!(
        index.products,
        vec!["Azure", "Dynamics 365", "Microsoft Defender", "Microsoft Fabric", "Power BI"]
    );
    assert_eq!(
        index.roles,
        vec![
            "Administrator",
            "Data Analyst",
            "Developer",
            "Security Engineer",
            "Solution Architect",
        ]
    );
    assert_eq!(index.credential_types, vec!["Applied Skill", "Certification"]);

    let again = engine.compute_facet_index(&records);
    assert_eq!(index, again);
    assert_eq!(index.fingerprint(), again.fingerprint());
}

#[test]
fn empty_catalog_is_not_an_error() {
    let engine = DiscoveryEngine::new();
    let records = DiscoveryEngine::decode_catalog(r#"{"exams": []}"#).unwrap();
    assert!(engine.compute_facet_index(&records).is_empty());
    assert!(engine
        .apply_filters(&records, &FilterState::new().with_search("azure"))
        .is_empty());
}

#[test]
fn second_product_widens_within_facet() {
    let engine = DiscoveryEngine::new();
    let records = catalog();

    let one = FilterState::new().with_product("Power BI");
    let two = one.toggle_product("Dynamics 365");

    let narrow = engine.apply_filters(&records, &one);
    let wide = engine.apply_filters(&records, &two);
    assert_eq!(ids(&narrow), vec!["c4"]);
    assert_eq!(ids(&wide), vec!["c4", "c7"]);
    assert!(narrow.iter().all(|r| wide.contains(r)));
}

#[test]
fn new_facet_group_narrows_overall() {
    let engine = DiscoveryEngine::new();
    let records = catalog();

    let products = FilterState::new().with_product("Azure");
    let with_roles = products.toggle_role("Developer");

    let before = engine.apply_filters(&records, &products);
    let after = engine.apply_filters(&records, &with_roles);
    assert_eq!(ids(&before), vec!["c1", "c2", "c3", "c5", "c6"]);
    assert_eq!(ids(&after), vec!["c1", "c3"]);
    assert!(after.iter().all(|r| before.contains(r)));
}

#[test]
fn category_uses_explicit_value_then_code_heuristic() {
    let engine = DiscoveryEngine::new();
    let records = catalog();

    let associate = FilterState::new().with_category(CategorySelection::only("associate"));
    assert_eq!(ids(&engine.apply_filters(&records, &associate)), vec!["c2", "c3", "c4"]);

    let fundamentals = FilterState::new().with_category(CategorySelection::only("fundamentals"));
    // MB-910 has no "900" substring and falls through to specialty
    assert_eq!(ids(&engine.apply_filters(&records, &fundamentals)), vec!["c1"]);

    let specialty = FilterState::new().with_category(CategorySelection::only("specialty"));
    assert_eq!(ids(&engine.apply_filters(&records, &specialty)), vec!["c6", "c7"]);
}

#[test]
fn credential_type_filter_applies_default() {
    let engine = DiscoveryEngine::new();
    let records = catalog();
    let state = FilterState::new().toggle_credential_type("Certification");
    let visible = engine.apply_filters(&records, &state);
    assert_eq!(visible.len(), 6);
    assert!(visible.iter().all(|r| r.id != "c6"));
}

#[test]
fn search_combines_with_facets() {
    let engine = DiscoveryEngine::new();
    let records = catalog();
    let state = FilterState::new()
        .with_search("IMPLEMENT storage")
        .with_role("Administrator");
    assert_eq!(ids(&engine.apply_filters(&records, &state)), vec!["c2"]);

    let cleared = state.cleared();
    assert!(!cleared.has_active_filters());
    assert_eq!(engine.apply_filters(&records, &cleared).len(), records.len());
}

#[test]
fn first_matching_category_rule_wins() {
    let engine = DiscoveryEngine::new();
    assert_eq!(engine.infer_category("XY-900-305"), "fundamentals");
    assert_eq!(discovery::infer_category("XY-305-900"), "fundamentals");
}

#[test]
fn summary_without_assessment() {
    let engine = DiscoveryEngine::new();
    let summary = engine.summarize_coaching(None, &[], None);

    assert_eq!(summary.average_mastery, 0.0);
    assert!(summary.weakest_skills.is_empty());
    assert_eq!(summary.next_actions, vec![NextAction::RevisitClip]);
    assert_eq!(summary.confidence_label, "Low");
}

#[test]
fn weakest_skills_break_ties_by_insertion_order() {
    let engine = DiscoveryEngine::new();
    // Keys deliberately out of alphabetical order
    let payload = r#"{
        "mastery": {
            "z": {"masteryScore": 90, "confidence": "High", "lastAssessedAt": null},
            "m": {"masteryScore": 40, "confidence": "Low", "lastAssessedAt": null},
            "b": {"masteryScore": 40, "confidence": "Medium", "lastAssessedAt": null},
            "a": {"masteryScore": 95, "confidence": "Medium", "lastAssessedAt": null}
        },
        "labs": [],
        "drill": null
    }"#;

    let summary = engine.summarize_payload(payload).unwrap();
    let weakest: Vec<(&str, f64)> = summary
        .weakest_skills
        .iter()
        .map(|s| (s.skill_id.as_str(), s.mastery_score))
        .collect();
    assert_eq!(weakest, vec![("m", 40.0), ("b", 40.0), ("z", 90.0)]);
    assert_eq!(summary.confidence_label, "High");
    assert_eq!(summary.mastery_percent(), 66);
}

#[test]
fn next_actions_have_fixed_order() {
    let engine = DiscoveryEngine::new();
    let labs = vec![LabDescriptor::new("lab-7", "Configure endpoint")];
    let drill = MicroDrill::new("drill-3").with_question("q1", ["a1", "a2"]);

    let summary = engine.summarize_coaching(None, &labs, Some(&drill));
    assert_eq!(summary.next_actions.len(), 3);
    assert_eq!(
        summary.action_labels(),
        vec![
            "Watch this clip again or related clip",
            "Do lab: Configure endpoint",
            "Take micro-drill",
        ]
    );
}

#[test]
fn mastery_timestamps_survive_decoding() {
    let mut mastery = MasteryMap::new();
    mastery.insert(
        "networking",
        MasteryEntry::new(35.0, "Low").assessed_at(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()),
    );

    let json = serde_json::to_string(&json!({ "mastery": mastery })).unwrap();
    let engine = DiscoveryEngine::new();
    let summary = engine.summarize_payload(&json).unwrap();
    assert_eq!(summary.weakest_skills[0].skill_id, "networking");
    assert_eq!(summary.mastery_percent(), 35);
}

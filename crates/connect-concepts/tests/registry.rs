use connect_concepts::paths::{CODES, SCHEMA};
use connect_concepts::{ConceptError, ConceptMap, EMBEDDED_CONCEPTS, default_concepts};
use connect_model::ConceptId;
use proptest::prelude::*;

#[test]
fn suffix_label_round_trips() {
    let map = default_concepts();
    let jr = map.resolve("jr").unwrap();
    assert_eq!(jr, ConceptId::new(612166858));
    assert_eq!(map.label(jr), Some("Jr."));
}

#[test]
fn historical_alias_is_preserved() {
    let map = default_concepts();
    let follow_up = map.resolve("biospecimenFollowUp").unwrap();
    let baseline = map.resolve("baselinePayment").unwrap();
    assert_eq!(follow_up, ConceptId::new(266600170));
    assert_eq!(baseline, follow_up);
    assert!(map.fields().iter().any(|(name, _)| *name == "baselinePayment"));
    assert!(map.fields().iter().any(|(name, _)| *name == "biospecimenFollowUp"));
}

#[test]
fn legacy_spellings_resolve() {
    let map = default_concepts();
    for name in ["lawStausFlag1", "biosepcimenBloodCollection", "hippaDate", "hipaaVersion"] {
        assert!(map.resolve(name).is_ok(), "{name} should resolve");
    }
}

#[test]
fn unknown_names_fail_fast() {
    let map = default_concepts();
    let err = map.resolve("notAField").unwrap_err();
    assert!(matches!(err, ConceptError::UnknownField { ref name } if name == "notAField"));
    assert_eq!(err.to_string(), "unknown concept field: notAField");
}

#[test]
fn nested_enumerations_are_maps() {
    let map = default_concepts();
    let kit_status = map.child_map("kitStatus").expect("kitStatus group");
    assert_eq!(
        kit_status.resolve("received").unwrap(),
        ConceptId::new(375535639)
    );
    assert_eq!(kit_status.label(ConceptId::new(375535639)), Some("Received"));
    assert!(map.child_map("bloodFlag").is_none());
    assert!(map.child_map("missing").is_none());

    let survey = map.child_map("surveyStatus").unwrap();
    assert!(matches!(
        map.resolve("surveyStatus"),
        Err(ConceptError::NotAField { .. })
    ));
    assert_eq!(
        survey.resolve("submitted").unwrap(),
        ConceptId::new(231311385)
    );
}

#[test]
fn every_schema_path_resolves() {
    let map = default_concepts();
    for path in SCHEMA {
        let ids = map
            .resolve_path(path)
            .unwrap_or_else(|e| panic!("{} ({path}) failed: {e}", path.name()));
        assert_eq!(ids.len(), path.segments().len());
    }
    for code in CODES {
        assert!(map.resolve_ref(code).is_ok(), "{code} should resolve");
    }
}

#[test]
fn enrollment_codes_have_labels() {
    let map = default_concepts();
    let enrollment = map.child_map("enrollmentStatus").unwrap();
    for (name, id) in enrollment.fields() {
        assert!(map.label(id).is_some(), "{name} has no label");
    }
}

#[test]
fn embedded_map_loads_from_disk() {
    let dir = std::env::temp_dir().join(format!("connect-concepts-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("concepts.toml");
    std::fs::write(&path, EMBEDDED_CONCEPTS).unwrap();

    let (map, summary) = ConceptMap::verify_and_load(&path).unwrap();
    assert_eq!(map.resolve("bloodFlag").unwrap(), ConceptId::new(878865966));
    assert_eq!(summary.origin, path.display().to_string());
    assert_eq!(summary.release.as_deref(), Some("2024-06-03"));

    let missing = ConceptMap::verify_and_load(&dir.join("missing.toml")).unwrap_err();
    assert!(matches!(missing, ConceptError::Io { .. }));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn invalid_label_codes_are_rejected() {
    let text = EMBEDDED_CONCEPTS.replace("\"612166858\" = \"Jr.\"", "\"jr\" = \"Jr.\"");
    let err = ConceptMap::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, ConceptError::InvalidLabelCode { ref code } if code == "jr"));
}

#[test]
fn alias_shadowing_a_field_is_rejected() {
    let text = EMBEDDED_CONCEPTS.replace(
        "baselinePayment = \"biospecimenFollowUp\"",
        "bloodFlag = \"biospecimenFollowUp\"",
    );
    let err = ConceptMap::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, ConceptError::InvalidAlias { ref alias, .. } if alias == "bloodFlag"));
}

proptest! {
    #[test]
    fn resolve_is_deterministic(index in 0usize..1000) {
        let map = default_concepts();
        let fields = map.fields();
        let (name, id) = fields[index % fields.len()];
        prop_assert_eq!(map.resolve(name).unwrap(), id);
        prop_assert_eq!(map.resolve(name).unwrap(), map.resolve(name).unwrap());
    }

    #[test]
    fn unregistered_names_never_resolve(name in "[a-z]{3,12}Zz[0-9]{1,3}") {
        let map = default_concepts();
        let unknown = matches!(map.resolve(&name), Err(ConceptError::UnknownField { .. }));
        prop_assert!(unknown);
    }
}

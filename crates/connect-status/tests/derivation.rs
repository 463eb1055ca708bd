//! End-to-end derivation over the embedded concept map.

use connect_concepts::{ConceptMap, default_concepts};
use connect_model::{
    ActivityStatus, ConceptId, Icon, NOT_AVAILABLE, ParticipantRecord, RefusedFlag, Severity,
};
use connect_status::{
    DerivationContext, IncentiveGate, default_registry, derive_all, summarize,
};

const YES: ConceptId = ConceptId::new(353358909);
const NO: ConceptId = ConceptId::new(104430631);
const BLOOD_FLAG: ConceptId = ConceptId::new(878865966);
const MOUTHWASH_FLAG: ConceptId = ConceptId::new(684635302);
const REFUSALS: ConceptId = ConceptId::new(685002411);
const REFUSED_BLOOD: ConceptId = ConceptId::new(949501163);
const DETAIL: ConceptId = ConceptId::new(173836415);
const FOLLOW_UP: ConceptId = ConceptId::new(266600170);
const BLOOD_SETTING: ConceptId = ConceptId::new(650516960);
const BLOOD_RESEARCH_DATE: ConceptId = ConceptId::new(561681068);
const RESEARCH: ConceptId = ConceptId::new(534621077);
const KIT: ConceptId = ConceptId::new(319972665);
const KIT_TYPE: ConceptId = ConceptId::new(379252329);
const KIT_STATUS: ConceptId = ConceptId::new(221592017);
const KIT_RECEIVED_DATE: ConceptId = ConceptId::new(826941471);
const HOME_MOUTHWASH: ConceptId = ConceptId::new(976461859);
const RECEIVED: ConceptId = ConceptId::new(375535639);
const SHIPPED: ConceptId = ConceptId::new(277438316);

fn derive(item: &str, record: &ParticipantRecord) -> ActivityStatus {
    let ctx = DerivationContext::new(record, default_concepts());
    default_registry()
        .get(item)
        .expect("registered activity")
        .derive(&ctx)
        .expect("derive")
}

#[test]
fn research_blood_collection() {
    let record = ParticipantRecord::new()
        .with(&[BLOOD_FLAG], YES)
        .with(&[DETAIL, FOLLOW_UP, BLOOD_SETTING], RESEARCH)
        .with(&[DETAIL, FOLLOW_UP, BLOOD_RESEARCH_DATE], "2024-01-02T00:00:00Z");
    let row = derive("Blood", &record);
    assert_eq!(row.item, "Blood");
    assert_eq!(row.status_text, "Collected");
    assert_eq!(row.setting, "Research");
    assert_eq!(row.date, "01/02/2024");
    assert_eq!(row.refused, RefusedFlag::No);
}

#[test]
fn blood_refusal_beats_positive_flag() {
    let record = ParticipantRecord::new()
        .with(&[BLOOD_FLAG], YES)
        .with(&[REFUSALS, REFUSED_BLOOD], YES);
    let row = derive("Blood", &record);
    assert_eq!(row.status_text, "Not Collected");
    assert_eq!(row.refused, RefusedFlag::Yes);
}

#[test]
fn absent_survey_flag_is_not_available() {
    let row = derive("BOH", &ParticipantRecord::new());
    assert_eq!(row.status_text, NOT_AVAILABLE);
    assert_eq!(row.severity, Severity::Error);
    assert_eq!(row.icon, Icon::Times);
}

#[test]
fn received_home_kit_beats_negative_flag() {
    let record = ParticipantRecord::new()
        .with(&[MOUTHWASH_FLAG], NO)
        .with(&[KIT, KIT_TYPE], HOME_MOUTHWASH)
        .with(&[KIT, KIT_STATUS], RECEIVED)
        .with(&[KIT, KIT_RECEIVED_DATE], "2024-02-14T10:00:00Z");
    let row = derive("Mouthwash", &record);
    assert_eq!(row.status_text, "Collected");
    assert_eq!(row.setting, "Home");
    assert_eq!(row.date, "02/14/2024");
}

#[test]
fn received_home_kit_without_generic_flag() {
    let record = ParticipantRecord::new()
        .with(&[KIT, KIT_TYPE], HOME_MOUTHWASH)
        .with(&[KIT, KIT_STATUS], RECEIVED);
    let row = derive("Mouthwash", &record);
    assert_eq!(row.status_text, "Collected");
    assert_eq!(row.setting, "Home");
    assert_eq!(row.date, NOT_AVAILABLE);
}

#[test]
fn pending_home_kit_beats_positive_flag() {
    let record = ParticipantRecord::new()
        .with(&[MOUTHWASH_FLAG], YES)
        .with(&[KIT, KIT_TYPE], HOME_MOUTHWASH)
        .with(&[KIT, KIT_STATUS], SHIPPED);
    let row = derive("Mouthwash", &record);
    assert_eq!(row.status_text, "Not Collected");
    assert_eq!(row.setting, "Home");
}

#[test]
fn unknown_field_names_propagate() {
    let text = connect_concepts::EMBEDDED_CONCEPTS.replace("bloodFlag = 878865966\n", "");
    let concepts = ConceptMap::from_toml_str(&text).unwrap();
    let err = derive_all(&ParticipantRecord::new(), &concepts).unwrap_err();
    assert_eq!(err.to_string(), "unknown concept field: bloodFlag");
}

#[test]
fn incentive_gate_reads_baseline_round() {
    let record = ParticipantRecord::from_json(include_str!("fixtures/participant.json")).unwrap();
    let ctx = DerivationContext::new(&record, default_concepts());
    assert_eq!(
        IncentiveGate::evaluate(&ctx).unwrap(),
        IncentiveGate::AlreadyEligible {
            date: "01/02/2024".to_string()
        }
    );
}

#[test]
fn fixture_summary_snapshot() {
    let record = ParticipantRecord::from_json(include_str!("fixtures/participant.json")).unwrap();
    let summary = summarize(&record, default_concepts()).unwrap();

    assert_eq!(summary.connect_id.as_deref(), Some("1234567890"));
    assert_eq!(summary.display_name().as_deref(), Some("Lovelace, Ada"));

    let rows: Vec<String> = summary
        .activities
        .iter()
        .map(|row| {
            format!(
                "{} | {} | {} | {} | {} | {} | {}",
                row.item,
                row.status_text,
                row.severity,
                row.date,
                row.setting,
                row.refused,
                row.extra
            )
        })
        .collect();

    insta::assert_json_snapshot!(rows, @r#"
    [
      "User Profile | Submitted | ok | 10/01/2023 | N/A | N | N/A",
      "Verification | Verified | ok | 10/03/2023 | N/A | N | N/A",
      "Enrollment Status | Verified Minimally Enrolled | ok | N/A | N/A | N | N/A",
      "Withdrawal | No Refusal | ok | N/A | N/A | N | N/A",
      "BOH | Submitted | ok | 10/05/2023 | N/A | N | N/A",
      "MRE | Started | warning | 10/06/2023 | N/A | N | N/A",
      "SAS | Not Started | error | N/A | N/A | N | N/A",
      "LAW | N/A | error | N/A | N/A | N | N/A",
      "SSN | Partial SSN Received | ok | 10/07/2023 | N/A | N | N/A",
      "COVID | Not Yet Eligible | warning | N/A | N/A | N | N/A",
      "Biospecimen Survey | Not Started | error | N/A | N/A | Y | N/A",
      "Menstrual Cycle | N/A | error | N/A | N/A | N | N/A",
      "Blood | Collected | ok | 01/02/2024 | Research | N | N/A",
      "Urine | Not Collected | error | N/A | N/A | N | N/A",
      "Mouthwash | Collected | ok | 02/14/2024 | Home | N | N/A",
      "EMR | N/A | error | N/A | N/A | N | N/A",
      "Payment | Eligible | ok | 01/02/2024 | N/A | N | Declined 01/20/2024",
      "PROMIS | N/A | error | N/A | N/A | N | N/A"
    ]
    "#);
}

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{debug, info, warn};

use connect_cli::logging::redact_value;
use connect_cli::render::{
    concept_table, doctor_table, participant_heading, status_footer, status_table,
};
use connect_client::{
    DashboardClient, DashboardConfig, EditSession, IncentiveEligibilityRequest, ParticipantQuery,
    ResetSurveyRequest, parse_participants,
};
use connect_concepts::{ConceptMap, DoctorReport, VerifySummary, load_concepts};
use connect_model::{ConceptId, ParticipantRecord, ParticipantSummary};
use connect_status::{DerivationContext, IncentiveGate, summarize};

use crate::cli::{
    Cli, ConceptsArgs, DoctorArgs, EditArgs, IncentiveArgs, LookupArgs, ResetSurveyArgs,
    SummaryArgs,
};

/// Configuration and concept map shared by every command.
pub struct Environment {
    pub config: DashboardConfig,
    pub concepts: ConceptMap,
    pub concepts_summary: VerifySummary,
}

impl Environment {
    /// Resolve configuration (file, then environment, then flags) and load
    /// the concept map it names.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config =
            DashboardConfig::resolve(cli.config.as_deref()).context("load configuration")?;
        if let Some(base) = &cli.api_base {
            config.api_base_url = Some(base.clone());
        }
        if let Some(path) = &cli.concepts {
            config.concepts_path = Some(path.clone());
        }
        let (concepts, concepts_summary) =
            load_concepts(config.concepts_path.as_deref()).context("load concept map")?;
        debug!(
            origin = %concepts_summary.origin,
            fields = concepts_summary.field_count,
            "concept map loaded"
        );
        Ok(Self {
            config,
            concepts,
            concepts_summary,
        })
    }

    fn client(&self) -> Result<DashboardClient> {
        DashboardClient::from_config(&self.config).context("configure backend client")
    }
}

pub fn run_summary(env: &Environment, args: &SummaryArgs) -> Result<()> {
    let json = read_file(&args.file)?;
    let records = parse_participants(&json)
        .with_context(|| format!("parse participants from {}", args.file.display()))?;
    if records.is_empty() {
        bail!("{} holds no participants", args.file.display());
    }
    print_participants(&env.concepts, &records, args.json)
}

pub fn run_lookup(env: &Environment, args: &LookupArgs) -> Result<()> {
    let query = args.filters.to_query();
    let client = env.client()?;
    let records = client
        .find_participants(&query)
        .context("look up participants")?;
    info!(count = records.len(), "participants found");
    if records.is_empty() {
        println!("No participants match.");
        return Ok(());
    }
    print_participants(&env.concepts, &records, args.json)
}

pub fn run_concepts(env: &Environment, args: &ConceptsArgs) -> Result<()> {
    let concepts = &env.concepts;
    let rows: Vec<(String, u64)> = if args.names.is_empty() {
        concepts
            .fields()
            .into_iter()
            .map(|(name, id)| (name.to_string(), id.get()))
            .collect()
    } else {
        args.names
            .iter()
            .map(|name| resolve_name(concepts, name).map(|id| (name.clone(), id.get())))
            .collect::<Result<_>>()?
    };
    println!("{}", concept_table(concepts, &rows));
    Ok(())
}

/// Returns whether the concept map is healthy.
pub fn run_doctor(env: &Environment, args: &DoctorArgs) -> Result<bool> {
    let report = DoctorReport::from_verify_summary(&env.concepts_summary, &env.concepts);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize doctor report")?;
        println!("{json}");
    } else {
        println!("{}", doctor_table(&report));
    }
    if !report.is_healthy() {
        warn!(unresolved = report.unresolved.len(), "concept map is missing fields");
    }
    Ok(report.is_healthy())
}

pub fn run_incentive(env: &Environment, args: &IncentiveArgs) -> Result<()> {
    let client = env.client()?;
    let record = fetch_one(&client, args.connect_id)?;
    let ctx = DerivationContext::new(&record, &env.concepts);
    let gate = IncentiveGate::evaluate(&ctx).context("evaluate incentive gate")?;
    println!("{}", gate.note());

    if !should_submit_incentive(&gate)? || args.dry_run {
        return Ok(());
    }
    let eligible_on = args
        .eligibility_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let request = IncentiveEligibilityRequest::baseline(args.connect_id, eligible_on);
    let updated = client
        .update_incentive_eligibility(&request)
        .context("update incentive eligibility")?;
    info!(
        connect_id = redact_value(&args.connect_id.to_string()),
        "incentive eligibility updated"
    );
    println!("Marked eligible on {}.", eligible_on.format("%m/%d/%Y"));
    if let Some(record) = updated {
        print_participants(&env.concepts, &[record], false)?;
    }
    Ok(())
}

/// Whether the update goes out; an unavailable gate is an error, an
/// existing eligibility is not.
fn should_submit_incentive(gate: &IncentiveGate) -> Result<bool> {
    match gate {
        IncentiveGate::Permitted => Ok(true),
        IncentiveGate::AlreadyEligible { .. } => Ok(false),
        IncentiveGate::Unavailable => {
            bail!("incentive eligibility cannot be updated for this participant")
        }
    }
}

pub fn run_reset_survey(env: &Environment, args: &ResetSurveyArgs) -> Result<()> {
    let client = env.client()?;
    let request = ResetSurveyRequest {
        connect_id: args.connect_id,
        survey: args.survey,
    };
    let updated = client
        .reset_participant_survey(&request)
        .with_context(|| format!("reset {} survey", args.survey))?;
    info!(
        connect_id = redact_value(&args.connect_id.to_string()),
        survey = %args.survey,
        "survey reset"
    );
    println!("Reset the {} survey.", args.survey);
    if let Some(record) = updated {
        print_participants(&env.concepts, &[record], false)?;
    }
    Ok(())
}

pub fn run_edit(env: &Environment, args: &EditArgs) -> Result<()> {
    let client = env.client()?;
    let record = fetch_one(&client, args.connect_id)?;
    let mut session = EditSession::new(record);
    for assignment in &args.set {
        let changed = session
            .stage(&env.concepts, &assignment.field, assignment.value.clone())
            .with_context(|| format!("stage {}", assignment.field))?;
        if !changed {
            println!("{} already holds that value; skipped.", assignment.field);
        }
    }
    if !session.has_unsaved_changes() {
        println!("Nothing to save.");
        return Ok(());
    }

    let payload = session.to_payload().context("build update request")?;
    if args.dry_run {
        let json = serde_json::to_string_pretty(&payload).context("serialize update request")?;
        println!("{json}");
        return Ok(());
    }
    client
        .update_participant_data(&payload)
        .context("update participant data")?;
    info!(
        connect_id = redact_value(&args.connect_id.to_string()),
        fields = session.changed_fields().len(),
        "participant data updated"
    );
    println!("Saved {}.", session.changed_fields().join(", "));

    let fresh = fetch_one(&client, args.connect_id)?;
    session.commit(fresh);
    print_participants(&env.concepts, &[session.snapshot().clone()], false)
}

fn fetch_one(client: &DashboardClient, connect_id: u64) -> Result<ParticipantRecord> {
    let query = ParticipantQuery::by_connect_id(connect_id.to_string());
    let mut records = client
        .find_participants(&query)
        .context("look up participant")?;
    match records.len() {
        0 => bail!("no participant with Connect ID {connect_id}"),
        1 => Ok(records.remove(0)),
        n => bail!("{n} participants share Connect ID {connect_id}"),
    }
}

/// `name`, or `group.value` for a code inside a group.
fn resolve_name(concepts: &ConceptMap, name: &str) -> Result<ConceptId> {
    let resolved = match name.split_once('.') {
        Some((group, value)) => concepts.resolve_code(group, value),
        None => concepts.resolve(name),
    };
    resolved.with_context(|| format!("resolve '{name}'"))
}

fn print_participants(
    concepts: &ConceptMap,
    records: &[ParticipantRecord],
    json: bool,
) -> Result<()> {
    let summaries = records
        .iter()
        .map(|record| summarize(record, concepts))
        .collect::<Result<Vec<ParticipantSummary>, _>>()
        .context("derive participant status")?;

    if json {
        let json = serde_json::to_string_pretty(&summaries).context("serialize summaries")?;
        println!("{json}");
        return Ok(());
    }
    for (record, summary) in records.iter().zip(&summaries) {
        debug!(
            connect_id = redact_value(summary.connect_id.as_deref().unwrap_or_default()),
            "rendering participant"
        );
        println!("{}", participant_heading(summary));
        println!("{}", status_table(summary));
        println!("{}", status_footer(summary));
        let ctx = DerivationContext::new(record, concepts);
        let gate = IncentiveGate::evaluate(&ctx).context("evaluate incentive gate")?;
        println!("{}\n", gate.note());
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_eligible_is_not_a_failure() {
        let gate = IncentiveGate::AlreadyEligible {
            date: "05/06/2024".to_string(),
        };
        assert!(!should_submit_incentive(&gate).unwrap());
    }

    #[test]
    fn only_an_unavailable_gate_fails() {
        assert!(should_submit_incentive(&IncentiveGate::Permitted).unwrap());
        assert!(should_submit_incentive(&IncentiveGate::Unavailable).is_err());
    }
}

use crate::commands::{print_json, read_event, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use dedupe_config::AppConfig;
use dedupe_core::{ContactId, DedupeKeyResolver};
use dedupe_crm::{DedupeOutcome, DedupeWorkflow, HttpContactApi, HttpOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::error;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// CRM id of the enrolled contact
    pub contact_id: Option<String>,
    /// Workflow event JSON file ("-" reads stdin)
    #[arg(long, conflicts_with = "contact_id")]
    pub event: Option<PathBuf>,
    #[arg(long, help = "Resolve the merge target without merging")]
    pub dry_run: bool,
    #[arg(long, help = "Log CRM failures and exit successfully without output")]
    pub swallow_errors: bool,
}

pub fn run_dedupe(ctx: &Context<'_>, args: RunArgs) -> Result<()> {
    let subject = resolve_subject(&args)?;
    let resolver = DedupeKeyResolver::new(ctx.config.dedupe.clone())?;
    let api = build_api(ctx.config)?;

    let result = DedupeWorkflow::new(&api, &resolver)
        .dry_run(args.dry_run)
        .run(subject);
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) if args.swallow_errors => {
            error!(contact_id = %subject, error = %err, "dedupe process failed");
            return Ok(());
        }
        Err(err) => return Err(err).with_context(|| format!("dedupe contact {subject}")),
    };

    if ctx.json {
        if let Some(payload) = outcome.callback() {
            print_json(&payload)?;
        }
        return Ok(());
    }

    println!("{}", describe_outcome(subject, &outcome));
    Ok(())
}

fn resolve_subject(args: &RunArgs) -> Result<ContactId> {
    if let Some(raw) = args.contact_id.as_deref() {
        return ContactId::from_str(raw).map_err(|err| invalid_input(err.to_string()));
    }
    if let Some(path) = args.event.as_deref() {
        let event = read_event(path)?;
        return event
            .subject_id()
            .ok_or_else(|| invalid_input("event has no object id"));
    }
    Err(invalid_input("provide a contact id or --event"))
}

fn build_api(config: &AppConfig) -> Result<HttpContactApi> {
    let access_token = config.crm.resolve_access_token()?;
    let api = HttpContactApi::new(HttpOptions {
        base_url: config.crm.base_url.clone(),
        access_token,
        timeout: Duration::from_secs(config.crm.timeout_secs),
        connect_timeout: Duration::from_secs(config.crm.connect_timeout_secs),
        user_agent: config.crm.user_agent.clone(),
    })?;
    Ok(api)
}

fn describe_outcome(subject: ContactId, outcome: &DedupeOutcome) -> String {
    match outcome {
        DedupeOutcome::Skipped(reason) => {
            format!("Skipped contact {subject}: {}", reason.as_str())
        }
        DedupeOutcome::NoMatch { key } => format!(
            "No matching contact for {} {}",
            key.field.as_str(),
            key.value
        ),
        DedupeOutcome::DryRun { key, target } => format!(
            "Would merge contact {subject} into {target} (matched on {} {})",
            key.field.as_str(),
            key.value
        ),
        DedupeOutcome::Merged {
            key,
            target,
            merged,
        } => format!(
            "Merged contact {merged} into {target} (matched on {} {})",
            key.field.as_str(),
            key.value
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{describe_outcome, resolve_subject, RunArgs};
    use dedupe_core::{ContactId, DedupeField, DedupeKey};
    use dedupe_crm::{DedupeOutcome, SkipReason};

    fn args(contact_id: Option<&str>) -> RunArgs {
        RunArgs {
            contact_id: contact_id.map(str::to_string),
            event: None,
            dry_run: false,
            swallow_errors: false,
        }
    }

    #[test]
    fn resolve_subject_parses_contact_id() {
        let id = resolve_subject(&args(Some(" 512 "))).expect("subject");
        assert_eq!(id, ContactId(512));
    }

    #[test]
    fn resolve_subject_requires_some_input() {
        assert!(resolve_subject(&args(None)).is_err());
        assert!(resolve_subject(&args(Some("abc"))).is_err());
    }

    #[test]
    fn describe_outcome_mentions_target() {
        let outcome = DedupeOutcome::Merged {
            key: DedupeKey {
                field: DedupeField::Phone,
                value: "5551234567".to_string(),
            },
            target: ContactId(202),
            merged: ContactId(7),
        };
        assert_eq!(
            describe_outcome(ContactId(7), &outcome),
            "Merged contact 7 into 202 (matched on phone 5551234567)"
        );
        assert_eq!(
            describe_outcome(
                ContactId(7),
                &DedupeOutcome::Skipped(SkipReason::NoDedupeKey)
            ),
            "Skipped contact 7: no-dedupe-key"
        );
    }
}

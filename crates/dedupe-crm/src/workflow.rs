use crate::api::ContactApi;
use crate::event::{CallbackPayload, InputFields};
use crate::Result;
use dedupe_core::{select_normalized_phone, ContactId, DedupeKey, DedupeKeyResolver, MatchDecision};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The CRM returned the record without properties.
    MissingProperties,
    /// Neither a 10-digit phone nor an address was available.
    NoDedupeKey,
}

impl SkipReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            SkipReason::MissingProperties => "missing-properties",
            SkipReason::NoDedupeKey => "no-dedupe-key",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupeOutcome {
    Skipped(SkipReason),
    NoMatch {
        key: DedupeKey,
    },
    Merged {
        key: DedupeKey,
        target: ContactId,
        merged: ContactId,
    },
    /// A single match was found but the merge was not requested.
    DryRun {
        key: DedupeKey,
        target: ContactId,
    },
}

impl DedupeOutcome {
    /// Only a completed merge reports back to the host.
    pub fn callback(&self) -> Option<CallbackPayload> {
        match self {
            DedupeOutcome::Merged { .. } => Some(CallbackPayload::merge_status()),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&DedupeKey> {
        match self {
            DedupeOutcome::Skipped(_) => None,
            DedupeOutcome::NoMatch { key }
            | DedupeOutcome::Merged { key, .. }
            | DedupeOutcome::DryRun { key, .. } => Some(key),
        }
    }
}

/// Fetch, search, and merge for one enrolled contact. Each step runs only
/// after the previous one succeeded.
pub struct DedupeWorkflow<'a, A: ContactApi> {
    api: &'a A,
    resolver: &'a DedupeKeyResolver,
    dry_run: bool,
}

impl<'a, A: ContactApi> DedupeWorkflow<'a, A> {
    pub fn new(api: &'a A, resolver: &'a DedupeKeyResolver) -> Self {
        Self {
            api,
            resolver,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self, subject: ContactId) -> Result<DedupeOutcome> {
        info!(contact_id = %subject, "dedupe workflow started");

        let properties = self.resolver.contact_properties();
        let Some(bag) = self.api.fetch_contact(subject, &properties)? else {
            warn!(contact_id = %subject, "could not retrieve contact properties");
            return Ok(DedupeOutcome::Skipped(SkipReason::MissingProperties));
        };
        let fields = self.resolver.contact_fields(&bag);
        debug!(contact_id = %subject, ?fields, "contact properties");

        let selection = self.resolver.select_key(&fields);
        if let Some(source) = selection.phone_source {
            debug!(source = source.as_str(), "using phone for deduplication");
        }
        debug!(
            normalized_phone = %selection.normalized_phone,
            normalized_address = %selection.normalized_address,
            "normalized dedupe inputs"
        );

        let Some(key) = selection.key else {
            info!(contact_id = %subject, "neither phone nor address suitable for deduplication");
            return Ok(DedupeOutcome::Skipped(SkipReason::NoDedupeKey));
        };
        let property = self.resolver.property_name(&key);
        info!(
            field = key.field.as_str(),
            property,
            value = %key.value,
            "looking for duplicates"
        );

        let query = self.resolver.search_query(&key);
        let found = self.api.search_contacts(&query)?;
        debug!(count = found.len(), ids = ?found, "search results");

        let decision = match self.resolver.resolve(subject, found) {
            Ok(decision) => decision,
            Err(err) => {
                warn!(contact_id = %subject, error = %err, "refusing to merge");
                return Err(err.into());
            }
        };

        match decision {
            MatchDecision::NoMatch => {
                info!(contact_id = %subject, "no matching contact, nothing to merge");
                Ok(DedupeOutcome::NoMatch { key })
            }
            MatchDecision::MergeInto(target) if self.dry_run => {
                info!(contact_id = %subject, target = %target, "dry run, merge not applied");
                Ok(DedupeOutcome::DryRun { key, target })
            }
            MatchDecision::MergeInto(target) => {
                info!(contact_id = %subject, target = %target, "merging enrolled contact");
                self.api.merge_contacts(target, subject)?;
                info!(contact_id = %subject, target = %target, "contacts merged");
                Ok(DedupeOutcome::Merged {
                    key,
                    target,
                    merged: subject,
                })
            }
        }
    }
}

/// Builds the normalized phone property update for a workflow event.
pub fn normalize_phone_fields(input: &InputFields, property: &str) -> CallbackPayload {
    let normalized = select_normalized_phone(input.phone.as_deref(), input.mobilephone.as_deref());
    info!(
        contact_id = ?input.hs_object_id,
        raw_phone = input.phone.as_deref().unwrap_or(""),
        raw_mobile = input.mobilephone.as_deref().unwrap_or(""),
        normalized = %normalized,
        "phone normalized"
    );
    CallbackPayload::default().with_field(property, normalized)
}

use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use dedupe_core::{ContactFields, DedupeKeyResolver, SearchQuery};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct KeyArgs {
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub mobilephone: Option<String>,
    /// Street line of the postal address
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
}

#[derive(Debug, Serialize)]
struct KeyReport {
    field: Option<&'static str>,
    property: Option<String>,
    value: Option<String>,
    phone_source: Option<&'static str>,
    normalized_phone: String,
    normalized_address: String,
    query: Option<SearchQuery>,
}

pub fn show_key(ctx: &Context<'_>, args: KeyArgs) -> Result<()> {
    let resolver = DedupeKeyResolver::new(ctx.config.dedupe.clone())?;
    let fields = ContactFields {
        phone: args.phone,
        mobilephone: args.mobilephone,
        address: args.address,
        city: args.city,
        state: args.state,
        zip: args.zip,
    };
    let selection = resolver.select_key(&fields);
    let report = KeyReport {
        field: selection.key.as_ref().map(|key| key.field.as_str()),
        property: selection
            .key
            .as_ref()
            .map(|key| resolver.property_name(key).to_string()),
        value: selection.key.as_ref().map(|key| key.value.clone()),
        phone_source: selection.phone_source.map(|source| source.as_str()),
        normalized_phone: selection.normalized_phone,
        normalized_address: selection.normalized_address,
        query: selection.key.as_ref().map(|key| resolver.search_query(key)),
    };

    if ctx.json {
        return print_json(&report);
    }

    match (&report.field, &report.value, &report.query) {
        (Some(field), Some(value), Some(query)) => {
            println!("{field} {value}");
            println!("search: {}", format_query(query));
        }
        _ => println!("No dedupe key: neither phone nor address is usable."),
    }
    Ok(())
}

fn format_query(query: &SearchQuery) -> String {
    query
        .filter_groups
        .iter()
        .map(|group| {
            group
                .filters
                .iter()
                .map(|filter| format!("{} = {}", filter.property_name, filter.value))
                .collect::<Vec<_>>()
                .join(" AND ")
        })
        .collect::<Vec<_>>()
        .join(" OR ")
}

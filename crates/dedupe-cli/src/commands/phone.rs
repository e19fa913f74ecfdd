use crate::commands::{print_json, read_event, Context};
use anyhow::Result;
use clap::Args;
use dedupe_crm::{normalize_phone_fields, InputFields};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NormalizePhoneArgs {
    /// Workflow event JSON file ("-" reads stdin); its inputFields are used
    #[arg(long, conflicts_with_all = ["phone", "mobilephone"])]
    pub event: Option<PathBuf>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub mobilephone: Option<String>,
}

pub fn normalize_phone(ctx: &Context<'_>, args: NormalizePhoneArgs) -> Result<()> {
    let input = match args.event.as_deref() {
        Some(path) => read_event(path)?.input_fields,
        None => InputFields {
            hs_object_id: None,
            phone: args.phone,
            mobilephone: args.mobilephone,
        },
    };
    let property = ctx.config.normalized_phone_property.as_str();
    let payload = normalize_phone_fields(&input, property);

    if ctx.json {
        return print_json(&payload);
    }

    println!("{}", payload.field(property).unwrap_or_default());
    Ok(())
}

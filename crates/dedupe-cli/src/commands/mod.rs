use anyhow::{Context as _, Result};
use dedupe_config::AppConfig;
use dedupe_crm::WorkflowEvent;
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

pub mod completions;
pub mod dedupe;
pub mod key;
pub mod phone;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Reads a workflow event from a file, or from stdin when the path is `-`.
pub fn read_event(path: &Path) -> Result<WorkflowEvent> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| "read event from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("read event file {}", path.display()))?
    };
    Ok(WorkflowEvent::parse(&raw)?)
}

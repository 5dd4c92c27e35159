use crate::cli::SearchArgs;
use crate::error::Result;
use crate::output;
use protmod::registry::ModificationRegistry;
use std::io::Write;
use tracing::warn;

pub fn run(args: &SearchArgs, registry: &ModificationRegistry, out: &mut dyn Write) -> Result<()> {
    let found = registry.search(&args.query);
    if found.is_empty() {
        warn!("No modification matches '{}'.", args.query);
    }
    for m in found {
        writeln!(out, "{}", output::summary_line(m))?;
    }
    Ok(())
}

use crate::cli::ExportArgs;
use crate::error::Result;
use protmod::core::io::export::write_csv;
use protmod::registry::ModificationRegistry;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub fn run(args: &ExportArgs, registry: &ModificationRegistry) -> Result<usize> {
    let mut modifications: Vec<_> = registry.modifications().collect();
    modifications.sort_by(|a, b| a.id().cmp(b.id()));

    info!(
        "Writing {} modification(s) to {:?}",
        modifications.len(),
        &args.output
    );
    let writer = BufWriter::new(File::create(&args.output)?);
    let rows = write_csv(modifications, writer)?;
    Ok(rows)
}

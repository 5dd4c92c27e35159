use crate::cli::{IdKind, IdsArgs};
use crate::error::Result;
use protmod::registry::ModificationRegistry;
use std::io::Write;

pub fn run(args: &IdsArgs, registry: &ModificationRegistry, out: &mut dyn Write) -> Result<()> {
    let mut ids: Vec<&str> = match args.scheme {
        IdKind::Id => registry.ids().collect(),
        IdKind::Resid => registry.resid_ids().collect(),
        IdKind::Psimod => registry.psimod_ids().collect(),
        IdKind::Pdbcc => registry.pdbcc_ids().collect(),
    };
    ids.sort_unstable();
    for id in ids {
        writeln!(out, "{}", id)?;
    }
    Ok(())
}

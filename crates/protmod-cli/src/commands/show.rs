use crate::cli::{IdKind, ShowArgs};
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output;
use protmod::registry::ModificationRegistry;
use std::io::Write;

pub fn run(
    args: &ShowArgs,
    registry: &ModificationRegistry,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let key = args.key.trim();
    let found = match args.by {
        IdKind::Id => registry.get_by_id(key).into_iter().collect(),
        IdKind::Resid => registry.get_by_resid_id(key).into_iter().collect(),
        IdKind::Psimod => registry.get_by_psimod_id(key).into_iter().collect(),
        IdKind::Pdbcc => registry.get_by_pdbcc_id(key),
    };
    if found.is_empty() {
        return Err(CliError::NotFound(format!("{:?} '{}'", args.by, key)));
    }

    output::emit(out, &found, args.format.unwrap_or(config.format), true)
}

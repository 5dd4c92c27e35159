use crate::cli::ListArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output;
use protmod::registry::ModificationRegistry;
use std::io::Write;
use tracing::info;

pub fn run(
    args: &ListArgs,
    registry: &ModificationRegistry,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let mut selected: Vec<_> = registry
        .modifications()
        .filter(|m| args.category.is_none_or(|c| m.category() == c))
        .filter(|m| args.occurrence.is_none_or(|o| m.occurrence_type() == o))
        .collect();
    selected.sort_by(|a, b| a.id().cmp(b.id()));
    info!(
        "Listing {} of {} modification(s).",
        selected.len(),
        registry.len()
    );

    output::emit(out, &selected, args.format.unwrap_or(config.format), false)
}

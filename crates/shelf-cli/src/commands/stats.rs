//! Statistics and category command handlers

use anyhow::Result;

use shelf_core::RecordStore;

use crate::output::Output;

/// Show aggregate statistics and the per-category breakdown
pub fn show(store: &RecordStore, output: &Output) -> Result<()> {
    let stats = store.statistics();
    let distribution = store.category_distribution();
    output.print_statistics(&stats, &distribution);
    Ok(())
}

/// List distinct categories
pub fn categories(store: &RecordStore, output: &Output) -> Result<()> {
    output.print_categories(&store.categories());
    Ok(())
}

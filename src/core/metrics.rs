use crate::core::format::format_value;
use crate::domain::model::{HeadlineMetric, SectorAggregate};

/// 總覽圖上方的五項指標
pub fn headline_metrics(aggregate: &SectorAggregate) -> Vec<HeadlineMetric> {
    let entries = [
        ("Sales", aggregate.total_output()),
        ("Exports", aggregate.total_exports()),
        ("Imports", aggregate.total_imports()),
        ("Consumer Sales", aggregate.final_consumption()),
        ("B2B Sales (Raw Material)", aggregate.total_intermediate()),
    ];

    entries
        .into_iter()
        .map(|(label, value)| HeadlineMetric {
            label,
            value,
            formatted: format_value(value),
            percentage: aggregate.pct(value),
        })
        .collect()
}

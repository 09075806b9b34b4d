//! 可選部門清單，依消費銷售排序

use crate::core::aggregator::io_total;
use crate::core::format::format_value;
use crate::domain::model::{sanitize_value, SectorCategory, SectorSummary, SourceTables, Table, TableSchema};
use std::collections::BTreeSet;

pub const DEFAULT_FEATURED_SECTORS: [&str; 22] = [
    "Manufacture of coke and refined petroleum products",
    "Manufacture of food products",
    "Manufacture of chemicals and chemical products",
    "Manufacture of motor vehicles, trailers and semi-trailers",
    "Manufacture of machinery and equipment n.e.c.",
    "Manufacture of electrical equipment",
    "Manufacture of basic metals",
    "Manufacture of computer, electronic and optical products",
    "Manufacture of fabricated metal products, except machinery and equipment",
    "Manufacture of other transport equipment",
    "Manufacture of other non-metallic mineral products",
    "Manufacture of wearing apparel",
    "Manufacture of furniture",
    "Manufacture of rubber and plastics products",
    "Manufacture of basic pharmaceutical products and pharmaceutical preparations",
    "Other manufacturing",
    "Manufacture of beverages",
    "Manufacture of paper and paper products",
    "Manufacture of textiles",
    "Printing and reproduction of recorded media",
    "Manufacture of leather and related products",
    "Manufacture of woods, wood products and cork, except furniture",
];

impl SectorCategory {
    /// 以第一個符合的關鍵字為準，"Food and oil" 歸類為 Food
    pub fn classify(sector: &str) -> Self {
        let lower = sector.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if has(&["food", "agriculture"]) {
            SectorCategory::Food
        } else if has(&["oil", "petroleum"]) {
            SectorCategory::Petroleum
        } else if has(&["construction"]) {
            SectorCategory::Construction
        } else if has(&["transport"]) {
            SectorCategory::Transport
        } else if has(&["finance"]) {
            SectorCategory::Finance
        } else if has(&["health"]) {
            SectorCategory::Health
        } else if has(&["education"]) {
            SectorCategory::Education
        } else if has(&["technology", "telecom"]) {
            SectorCategory::Technology
        } else {
            SectorCategory::Industry
        }
    }
}

/// 兩張貿易表中出現的部門名稱（去重、排序）
pub fn trade_sectors(tables: &SourceTables, schema: &TableSchema) -> Vec<String> {
    let mut sectors = BTreeSet::new();
    for table in [&tables.imports, &tables.exports] {
        let Some(col) = table.column(&schema.trade_sector_column) else {
            continue;
        };
        for row in table.rows() {
            let sector = Table::cell(row, col);
            if !sector.trim().is_empty() {
                sectors.insert(sector.to_string());
            }
        }
    }
    sectors.into_iter().collect()
}

pub fn sector_catalog(
    tables: &SourceTables,
    schema: &TableSchema,
    featured: Option<&[String]>,
) -> Vec<SectorSummary> {
    let mut summaries: Vec<SectorSummary> = trade_sectors(tables, schema)
        .into_iter()
        .filter(|sector| featured.map_or(true, |list| list.iter().any(|f| f == sector)))
        .map(|sector| {
            let consumer_sales = sanitize_value(io_total(
                &tables.io,
                &sector,
                &schema.io_description_column,
                &schema.io_final_consumption_column,
            ));
            SectorSummary {
                category: SectorCategory::classify(&sector),
                formatted: format_value(consumer_sales),
                consumer_sales,
                sector_id: sector,
            }
        })
        .collect();

    // 穩定排序，同值維持字母順序
    summaries.sort_by(|a, b| b.consumer_sales.total_cmp(&a.consumer_sales));
    tracing::debug!("Sector catalog holds {} sectors", summaries.len());
    summaries
}

pub fn default_featured_sectors() -> Vec<String> {
    DEFAULT_FEATURED_SECTORS.iter().map(|s| s.to_string()).collect()
}

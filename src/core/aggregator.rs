//! 部門比對與總額彙整
//!
//! 貿易表的部門欄位是標準名稱，須完全相符；IO 表是較長的經濟活動描述，以不分大小寫的包含比對。

use crate::core::tables::{flow_records, parse_cell, CellValue};
use crate::domain::model::{SectorAggregate, SourceTables, Table, TableSchema};

/// IO 表以千元為單位
pub const UNIT_MULTIPLIER: f64 = 1000.0;

pub fn trade_row_matches(sector_description: &str, sector_id: &str) -> bool {
    sector_description == sector_id
}

pub fn io_row_matches(activity_description: &str, sector_id: &str) -> bool {
    activity_description
        .to_lowercase()
        .contains(&sector_id.to_lowercase())
}

/// 加總符合條件的列之 `column` 欄位
///
/// 欄位不存在或任一非空儲存格無法解析時回傳 `None`，空白儲存格略過。
fn strict_column_sum<F>(table: &Table, key_column: usize, column: &str, matches: F) -> Option<f64>
where
    F: Fn(&str) -> bool,
{
    let value_col = table.column(column)?;
    let mut total = 0.0;
    for row in table.rows() {
        if !matches(Table::cell(row, key_column)) {
            continue;
        }
        match parse_cell(Table::cell(row, value_col)) {
            CellValue::Number(v) => total += v,
            CellValue::Empty => {}
            CellValue::Invalid => return None,
        }
    }
    Some(total)
}

fn degrade(total: Option<f64>, what: &str, sector_id: &str) -> f64 {
    match total {
        Some(v) if v.is_finite() => v,
        _ => {
            tracing::warn!("⚠️ {} for '{}' unavailable, using 0", what, sector_id);
            0.0
        }
    }
}

/// 貿易總額：逐格轉成非負數值後加總，與 [`flow_records`] 的商品值一致
pub fn trade_total(table: &Table, sector_id: &str, schema: &TableSchema, period: &str) -> f64 {
    flow_records(table, sector_id, schema, period)
        .iter()
        .map(|record| record.value)
        .sum()
}

/// IO 表欄位加總（乘上 [`UNIT_MULTIPLIER`]），任一格無法解析即整欄視為 0
pub fn io_total(table: &Table, sector_id: &str, key_column: &str, column: &str) -> f64 {
    let total = table.column(key_column).and_then(|key| {
        strict_column_sum(table, key, column, |desc| io_row_matches(desc, sector_id))
    });
    degrade(total.map(|v| v * UNIT_MULTIPLIER), column, sector_id)
}

/// 計算部門總額，不會失敗：無法讀取的資料以 0 計
pub fn aggregate(
    sector_id: &str,
    tables: &SourceTables,
    schema: &TableSchema,
    period: &str,
) -> SectorAggregate {
    let total_intermediate = io_total(
        &tables.io,
        sector_id,
        &schema.io_description_column,
        &schema.io_intermediate_column,
    );
    let final_consumption = io_total(
        &tables.io,
        sector_id,
        &schema.io_description_column,
        &schema.io_final_consumption_column,
    );
    let total_exports = trade_total(&tables.exports, sector_id, schema, period);
    let total_imports = trade_total(&tables.imports, sector_id, schema, period);

    let aggregate = SectorAggregate::new(
        sector_id,
        total_intermediate,
        final_consumption,
        total_exports,
        total_imports,
    );
    tracing::debug!(
        "Aggregated '{}': output={} exports={} imports={}",
        sector_id,
        aggregate.total_output(),
        aggregate.total_exports(),
        aggregate.total_imports()
    );
    aggregate
}

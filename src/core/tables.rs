//! 讀取原始資料表：CSV 解析、儲存格轉換與期間判斷

use crate::domain::model::{sanitize_value, FlowRecord, Table, TableSchema};
use crate::core::aggregator::trade_row_matches;
use crate::utils::error::Result;

/// 數值轉換後的儲存格
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Invalid,
}

pub fn parse_cell(text: &str) -> CellValue {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => CellValue::Empty,
        Ok(v) => CellValue::Number(v),
        Err(_) => CellValue::Invalid,
    }
}

/// 寬鬆轉換：無法使用的數值一律為 0
pub fn coerce_value(text: &str) -> f64 {
    match parse_cell(text) {
        CellValue::Number(v) => sanitize_value(v),
        CellValue::Empty | CellValue::Invalid => 0.0,
    }
}

/// 將 CSV 解析為 [`Table`]，允許列長度與標題不一致
pub fn parse_table(data: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!("Parsed table with {} columns and {} rows", headers.len(), rows.len());
    Ok(Table::new(headers, rows))
}

fn header_year(header: &str) -> Option<u32> {
    let trimmed = header.trim();
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        trimmed.parse().ok()
    } else {
        None
    }
}

/// 各資料表中最新的年份欄位
pub fn latest_period(tables: &[&Table]) -> Option<String> {
    tables
        .iter()
        .flat_map(|t| t.headers().iter())
        .filter_map(|h| header_year(h).map(|year| (year, h.trim().to_string())))
        .max_by_key(|(year, _)| *year)
        .map(|(_, label)| label)
}

/// 取出貿易表中屬於 `sector_id` 的列，轉為單一期間的商品資料
pub fn flow_records(
    table: &Table,
    sector_id: &str,
    schema: &TableSchema,
    period: &str,
) -> Vec<FlowRecord> {
    let Some(sector_col) = table.column(&schema.trade_sector_column) else {
        tracing::warn!(
            "Trade table has no '{}' column, no records for {}",
            schema.trade_sector_column,
            sector_id
        );
        return Vec::new();
    };
    let commodity_col = table.column(&schema.trade_commodity_column);
    let value_col = table.column(period);
    if value_col.is_none() {
        tracing::warn!("Trade table has no '{}' period column, values read as 0", period);
    }

    table
        .rows()
        .iter()
        .filter(|row| trade_row_matches(Table::cell(row, sector_col), sector_id))
        .map(|row| {
            let name = commodity_col.map(|c| Table::cell(row, c)).unwrap_or("");
            let value = value_col.map(|c| coerce_value(Table::cell(row, c))).unwrap_or(0.0);
            FlowRecord::new(sector_id, name, value)
        })
        .collect()
}

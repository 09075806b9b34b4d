//! 前 K 名排序與其餘項目彙總

use crate::domain::model::{sanitize_value, FlowRecord, RankedPartition};

pub const DEFAULT_TOP_K: usize = 10;

/// 依數值排序 `records`，並在前 `k` 筆之後切分
///
/// 同值保持輸入順序；總和不大於 0 時回傳空的分割結果。
pub fn partition(records: &[FlowRecord], k: usize) -> RankedPartition {
    let mut ranked: Vec<FlowRecord> = records
        .iter()
        .map(|r| FlowRecord {
            value: sanitize_value(r.value),
            ..r.clone()
        })
        .collect();

    let total: f64 = ranked.iter().map(|r| r.value).sum();
    if total <= 0.0 {
        return RankedPartition::default();
    }

    // sort_by 為穩定排序
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));

    let residual_items = ranked.split_off(k.min(ranked.len()));
    let residual_total = residual_items.iter().map(|r| r.value).sum();

    RankedPartition {
        top_items: ranked,
        residual_items,
        residual_total,
    }
}

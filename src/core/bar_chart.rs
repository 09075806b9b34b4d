//! 單一流向中主要商品的水平長條圖

use crate::core::format::{format_compact, format_percentage};
use crate::domain::model::{percentage_of, sanitize_value, Bar, BarChartSpec, FlowRecord, TextPosition};

pub const DEFAULT_BAR_LIMIT: usize = 15;
/// 短於最長長條此比例者，以此長度繪製
pub const MIN_VISIBLE_SHARE: f64 = 0.02;
/// 短於最長長條此比例者，文字標在長條外
pub const INSIDE_TEXT_SHARE: f64 = 0.15;
pub const AXIS_HEADROOM: f64 = 1.25;

fn bar_text(value: f64, shown_total: f64) -> String {
    if value == 0.0 {
        return "0 (0.0%)".to_string();
    }
    format!(
        "{} ({})",
        format_compact(value),
        format_percentage(percentage_of(value, shown_total))
    )
}

/// 沒有可繪製的資料時回傳 `None`
pub fn build_bar_chart(records: &[FlowRecord], title: &str, limit: usize) -> Option<BarChartSpec> {
    if records.is_empty() {
        return None;
    }

    let mut largest: Vec<(String, f64)> = records
        .iter()
        .map(|r| (r.commodity_name.clone(), sanitize_value(r.value)))
        .collect();
    largest.sort_by(|a, b| b.1.total_cmp(&a.1));
    largest.truncate(limit);
    largest.reverse();

    let shown_total: f64 = largest.iter().map(|(_, v)| v).sum();
    let max_value = largest.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    if shown_total == 0.0 || max_value == 0.0 {
        return None;
    }

    let min_visible = MIN_VISIBLE_SHARE * max_value;
    let bars = largest
        .into_iter()
        .map(|(label, value)| Bar {
            text: bar_text(value, shown_total),
            display_value: value.max(min_visible),
            text_position: if value < INSIDE_TEXT_SHARE * max_value {
                TextPosition::Outside
            } else {
                TextPosition::Inside
            },
            label,
            value,
        })
        .collect();

    Some(BarChartSpec {
        title: title.to_string(),
        axis_max: max_value * AXIS_HEADROOM,
        bars,
    })
}

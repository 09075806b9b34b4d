//! 前 K 名以外項目的固定欄數強度格

use crate::core::format::{format_percentage, format_value, truncate_label};
use crate::core::palette::intensity_scale;
use crate::domain::model::{percentage_of, FlowRecord, FlowType, GridCell, GridLayout};

pub const DEFAULT_COLUMN_COUNT: usize = 4;
pub const CELL_LABEL_LIMIT: usize = 30;

/// 將 `residual_items` 依列排入格子，每列 `column_count` 格
///
/// 項目須已由大到小排序（即分割器的輸出）。列以相反順序輸出，最大的項目在最後一列。
/// 百分比以 `flow_total`（分割前的整體流量）為分母。
pub fn build_grid(
    residual_items: &[FlowRecord],
    residual_total: f64,
    flow_total: f64,
    flow_type: FlowType,
    column_count: usize,
) -> GridLayout {
    let column_count = column_count.max(1);
    let max_value = residual_items
        .iter()
        .map(|r| r.value)
        .fold(0.0_f64, f64::max);

    let mut rows: Vec<Vec<GridCell>> = residual_items
        .chunks(column_count)
        .map(|chunk| {
            let mut row: Vec<GridCell> = chunk
                .iter()
                .map(|item| GridCell {
                    relative_intensity: percentage_of(item.value, max_value),
                    label: format!(
                        "{}\n{}\n({})",
                        truncate_label(&item.commodity_name, CELL_LABEL_LIMIT),
                        format_value(item.value),
                        format_percentage(percentage_of(item.value, flow_total))
                    ),
                    is_padding: false,
                })
                .collect();
            row.resize_with(column_count, GridCell::padding);
            row
        })
        .collect();
    rows.reverse();

    GridLayout {
        title: format!("Remaining {} {} Items", residual_items.len(), flow_type.label()),
        column_count,
        residual_total,
        residual_share: percentage_of(residual_total, flow_total),
        color_scale: intensity_scale(flow_type),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[f64]) -> Vec<FlowRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| FlowRecord::new("Chemicals", format!("Item {}", i), *v))
            .collect()
    }

    #[test]
    fn test_grid_shape_with_padding() {
        let residual = items(&[50.0, 40.0, 30.0, 20.0, 10.0]);
        let grid = build_grid(&residual, 150.0, 1500.0, FlowType::Exports, 4);

        assert_eq!(grid.rows.len(), 2);
        assert!(grid.rows.iter().all(|r| r.len() == 4));
        assert_eq!(grid.filled_cells(), 5);

        // 反轉後不滿的列在最前面
        let first = &grid.rows[0];
        assert!(!first[0].is_padding);
        assert!(first[1..].iter().all(|c| c.is_padding && c.label.is_empty() && c.relative_intensity == 0.0));
        assert_eq!(grid.rows[1][0].relative_intensity, 100.0);
        assert_eq!(first[0].relative_intensity, 20.0);
    }

    #[test]
    fn test_grid_labels_and_summary() {
        let residual = items(&[25.0]);
        let grid = build_grid(&residual, 25.0, 1000.0, FlowType::Imports, 4);
        assert_eq!(grid.title, "Remaining 1 Imports Items");
        assert_eq!(grid.residual_share, 2.5);
        assert!(grid.rows[0][0].label.ends_with("(2.5%)"));
        assert_eq!(grid.color_scale.len(), 6);
        assert_eq!(grid.color_scale[5].color, "#93c5fd");
    }

    #[test]
    fn test_all_zero_residual_has_zero_intensity() {
        let grid = build_grid(&items(&[0.0, 0.0]), 0.0, 10.0, FlowType::Exports, 4);
        assert!(grid.rows[0].iter().all(|c| c.relative_intensity == 0.0));
    }

    #[test]
    fn test_empty_residual_has_no_rows() {
        let grid = build_grid(&[], 0.0, 0.0, FlowType::Exports, 4);
        assert!(grid.rows.is_empty());
        assert_eq!(grid.residual_share, 0.0);
    }

    #[test]
    fn test_zero_columns_treated_as_one() {
        let grid = build_grid(&items(&[3.0, 2.0]), 5.0, 5.0, FlowType::Exports, 0);
        assert_eq!(grid.column_count, 1);
        assert_eq!(grid.rows.len(), 2);
    }
}

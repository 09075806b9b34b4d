//! 單一部門的五節點總覽流向圖

use crate::core::format::{format_percentage, format_value};
use crate::domain::model::{FlowGraphSpec, GraphLink, GraphNode, SectorAggregate};

pub const MIN_PADDING: f64 = 15.0;
pub const MAX_PADDING: f64 = 80.0;
pub const NEUTRAL_PADDING: f64 = 40.0;

pub const OUTPUT: usize = 0;
pub const EXPORTS: usize = 1;
pub const FINAL_CONSUMPTION: usize = 2;
pub const INTERMEDIATE: usize = 3;
pub const IMPORTS: usize = 4;

const NODE_NAMES: [&str; 5] = [
    "Sales",
    "Exports",
    "Consumer Sales",
    "B2B Sales (Raw Material)",
    "Imports",
];
const NODE_COLORS: [&str; 5] = ["#3b82f6", "#fb923c", "#34d399", "#a78bfa", "#60a5fa"];

const LINKS: [(usize, usize, &str); 4] = [
    (OUTPUT, EXPORTS, "rgba(251, 146, 60, 0.6)"),
    (OUTPUT, FINAL_CONSUMPTION, "rgba(52, 211, 153, 0.6)"),
    (OUTPUT, INTERMEDIATE, "rgba(167, 139, 250, 0.6)"),
    (IMPORTS, OUTPUT, "rgba(96, 165, 250, 0.6)"),
];

/// 將各值由 `[min, max]` 映射到 `[MAX_PADDING, MIN_PADDING]` 後取平均
///
/// 最大值對應最小間距；所有值相等時結果為 `MIN_PADDING`。
pub fn interpolated_padding(values: &[f64]) -> f64 {
    if values.is_empty() {
        return NEUTRAL_PADDING;
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let pads = values.iter().map(|&v| {
        if hi > lo {
            MAX_PADDING + (v - lo) / (hi - lo) * (MIN_PADDING - MAX_PADDING)
        } else {
            MIN_PADDING
        }
    });
    pads.sum::<f64>() / values.len() as f64
}

pub fn build_overview(
    sector_id: &str,
    aggregate: &SectorAggregate,
    period_exports_total: f64,
    period_imports_total: f64,
) -> FlowGraphSpec {
    let values = [
        aggregate.total_output(),
        period_exports_total.max(0.0),
        aggregate.final_consumption(),
        aggregate.total_intermediate(),
        period_imports_total.max(0.0),
    ];

    let nodes: Vec<GraphNode> = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let percentage = aggregate.pct(value);
            GraphNode {
                label: format!(
                    "{}\n{}\n({})",
                    NODE_NAMES[i],
                    format_value(value),
                    format_percentage(percentage)
                ),
                value,
                percentage,
                color: NODE_COLORS[i].to_string(),
            }
        })
        .collect();

    // 連結值不超過兩端節點的值
    let links = LINKS
        .iter()
        .map(|&(source, target, color)| {
            let flow = if source == OUTPUT { values[target] } else { values[source] };
            GraphLink {
                source,
                target,
                value: flow.min(values[source]).min(values[target]),
                color: color.to_string(),
            }
        })
        .collect();

    let node_padding = if aggregate.total_output() > 0.0 {
        interpolated_padding(&values)
    } else {
        NEUTRAL_PADDING
    };

    FlowGraphSpec {
        title: format!("Economic Flow Analysis - {}", sector_id),
        node_padding,
        nodes,
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_shape_and_order() {
        let agg = SectorAggregate::new("Textiles", 400.0, 600.0, 250.0, 300.0);
        let spec = build_overview("Textiles", &agg, 250.0, 300.0);

        assert_eq!(spec.nodes.len(), 5);
        assert_eq!(spec.links.len(), 4);
        let values: Vec<f64> = spec.nodes.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![1000.0, 250.0, 600.0, 400.0, 300.0]);
        assert_eq!(spec.nodes[OUTPUT].percentage, 100.0);
        assert_eq!(spec.nodes[EXPORTS].percentage, 25.0);
        assert!(spec.nodes[INTERMEDIATE].label.starts_with("B2B Sales (Raw Material)\n"));
        assert!(spec.nodes[INTERMEDIATE].label.ends_with("(40.0%)"));

        let pairs: Vec<(usize, usize)> = spec.links.iter().map(|l| (l.source, l.target)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (4, 0)]);
        assert_eq!(spec.links[3].value, 300.0);
    }

    #[test]
    fn test_padding_interpolation_mean() {
        // 1000 -> 15, 250 -> 80, 600 -> 80 - 350/750*65, 400 -> 80 - 150/750*65, 300 -> 80 - 50/750*65
        let agg = SectorAggregate::new("Textiles", 400.0, 600.0, 250.0, 300.0);
        let spec = build_overview("Textiles", &agg, 250.0, 300.0);
        let pads = [15.0, 80.0, 80.0 - 350.0 / 750.0 * 65.0, 80.0 - 150.0 / 750.0 * 65.0, 80.0 - 50.0 / 750.0 * 65.0];
        let expected = pads.iter().sum::<f64>() / 5.0;
        assert!((spec.node_padding - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_output_uses_neutral_padding() {
        let agg = SectorAggregate::zero("Empty");
        let spec = build_overview("Empty", &agg, 0.0, 0.0);
        assert_eq!(spec.node_padding, NEUTRAL_PADDING);
        assert!(spec.nodes.iter().all(|n| n.percentage == 0.0));
        assert!(spec.links.iter().all(|l| l.value == 0.0));
    }

    #[test]
    fn test_links_are_clamped_to_endpoints() {
        let agg = SectorAggregate::new("Petroleum", 10.0, 10.0, 0.0, 0.0);
        let spec = build_overview("Petroleum", &agg, 500.0, 90.0);
        assert_eq!(spec.links[0].value, 20.0);
        assert_eq!(spec.links[3].value, 20.0);
        for link in &spec.links {
            assert!(link.value <= spec.nodes[link.source].value);
            assert!(link.value <= spec.nodes[link.target].value);
        }
    }

    #[test]
    fn test_equal_values_pad_at_minimum() {
        assert_eq!(interpolated_padding(&[5.0, 5.0, 5.0]), MIN_PADDING);
        assert_eq!(interpolated_padding(&[]), NEUTRAL_PADDING);
    }
}

//! 單一貿易流向的一對多流向圖

use crate::core::format::{format_percentage, format_value, truncate_label};
use crate::core::palette::{flow_palette, ROOT_NODE_COLOR};
use crate::core::partition::partition;
use crate::domain::model::{percentage_of, FlowGraphSpec, FlowRecord, FlowType, GraphLink, GraphNode};

pub const NODE_LABEL_LIMIT: usize = 40;
pub const EXPANDED_PADDING: f64 = 35.0;
/// 其餘項目合計不足一元時不繪製
pub const MIN_OTHER_VALUE: f64 = 1.0;

pub fn build_expanded(
    sector_id: &str,
    flow_type: FlowType,
    records: &[FlowRecord],
    k: usize,
) -> FlowGraphSpec {
    let ranked = partition(records, k);
    if ranked.is_empty() {
        return FlowGraphSpec::default();
    }

    let total = ranked.total();
    let palette = flow_palette(flow_type);

    let mut nodes = vec![GraphNode {
        label: format!("{}\n{}\n{}", sector_id, flow_type.label(), format_value(total)),
        value: total,
        percentage: 100.0,
        color: ROOT_NODE_COLOR.to_string(),
    }];
    let mut links = Vec::with_capacity(ranked.top_items.len() + 1);

    for item in &ranked.top_items {
        let percentage = percentage_of(item.value, total);
        nodes.push(GraphNode {
            label: format!(
                "{}\n{}\n({})",
                truncate_label(&item.commodity_name, NODE_LABEL_LIMIT),
                format_value(item.value),
                format_percentage(percentage)
            ),
            value: item.value,
            percentage,
            color: palette.base.to_string(),
        });
        links.push(GraphLink {
            source: 0,
            target: nodes.len() - 1,
            value: item.value,
            color: palette.base.to_string(),
        });
    }

    if ranked.residual_total >= MIN_OTHER_VALUE {
        let percentage = percentage_of(ranked.residual_total, total);
        nodes.push(GraphNode {
            label: format!(
                "Other {}\n{}\n({})\n({} items)",
                flow_type.label(),
                format_value(ranked.residual_total),
                format_percentage(percentage),
                ranked.residual_items.len()
            ),
            value: ranked.residual_total,
            percentage,
            color: palette.light.to_string(),
        });
        links.push(GraphLink {
            source: 0,
            target: nodes.len() - 1,
            value: ranked.residual_total,
            color: palette.light.to_string(),
        });
    } else if !ranked.residual_items.is_empty() {
        tracing::debug!(
            "Dropping residual bucket of {} {} items ({} < {})",
            ranked.residual_items.len(),
            flow_type,
            ranked.residual_total,
            MIN_OTHER_VALUE
        );
    }

    FlowGraphSpec {
        title: format!("{} Breakdown - {}", flow_type.label(), sector_id),
        node_padding: EXPANDED_PADDING,
        nodes,
        links,
    }
}

use crate::domain::model::{ColorStop, FlowType};

pub const ROOT_NODE_COLOR: &str = "#3b82f6";

/// 每個流向使用同色系的深淺兩色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowPalette {
    pub base: &'static str,
    pub light: &'static str,
}

pub fn flow_palette(flow_type: FlowType) -> FlowPalette {
    match flow_type {
        FlowType::Exports => FlowPalette {
            base: "rgba(251, 146, 60, 0.7)",
            light: "rgba(251, 146, 60, 0.4)",
        },
        FlowType::Imports => FlowPalette {
            base: "rgba(96, 165, 250, 0.7)",
            light: "rgba(96, 165, 250, 0.4)",
        },
    }
}

const EXPORT_SCALE: [(f64, &str); 6] = [
    (0.0, "#1e293b"),
    (0.1, "#78350f"),
    (0.3, "#d97706"),
    (0.5, "#f59e0b"),
    (0.7, "#fbbf24"),
    (1.0, "#fcd34d"),
];

const IMPORT_SCALE: [(f64, &str); 6] = [
    (0.0, "#1e293b"),
    (0.1, "#1e3a8a"),
    (0.3, "#2563eb"),
    (0.5, "#3b82f6"),
    (0.7, "#60a5fa"),
    (1.0, "#93c5fd"),
];

pub fn intensity_scale(flow_type: FlowType) -> Vec<ColorStop> {
    let stops = match flow_type {
        FlowType::Exports => &EXPORT_SCALE,
        FlowType::Imports => &IMPORT_SCALE,
    };
    stops
        .iter()
        .map(|&(position, color)| ColorStop { position, color })
        .collect()
}

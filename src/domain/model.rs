use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 貿易流向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FlowType {
    Exports,
    Imports,
}

impl FlowType {
    pub fn label(&self) -> &'static str {
        match self {
            FlowType::Exports => "Exports",
            FlowType::Imports => "Imports",
        }
    }
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FlowType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exports" | "export" => Ok(FlowType::Exports),
            "imports" | "import" => Ok(FlowType::Imports),
            other => Err(format!("unknown flow type: {}", other)),
        }
    }
}

/// 管道要產生的報告部分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ViewKind {
    Catalog,
    Overview,
    Expanded,
    #[default]
    All,
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catalog" => Ok(ViewKind::Catalog),
            "overview" => Ok(ViewKind::Overview),
            "expanded" => Ok(ViewKind::Expanded),
            "all" => Ok(ViewKind::All),
            other => Err(format!("unknown view: {}", other)),
        }
    }
}

/// 貿易表中單一期間的一筆商品資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub sector_id: String,
    pub commodity_name: String,
    pub value: f64,
}

impl FlowRecord {
    pub fn new(sector_id: impl Into<String>, commodity_name: impl Into<String>, value: f64) -> Self {
        Self {
            sector_id: sector_id.into(),
            commodity_name: commodity_name.into(),
            value: sanitize_value(value),
        }
    }
}

/// 將數值限制為非負的有限值，所有總額皆適用
pub fn sanitize_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 部門總額；總產出一律由中間消費與最終消費相加而得
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorAggregate {
    sector_id: String,
    total_output: f64,
    total_intermediate: f64,
    final_consumption: f64,
    total_exports: f64,
    total_imports: f64,
}

impl SectorAggregate {
    pub fn new(
        sector_id: impl Into<String>,
        total_intermediate: f64,
        final_consumption: f64,
        total_exports: f64,
        total_imports: f64,
    ) -> Self {
        let total_intermediate = sanitize_value(total_intermediate);
        let final_consumption = sanitize_value(final_consumption);
        Self {
            sector_id: sector_id.into(),
            total_output: total_intermediate + final_consumption,
            total_intermediate,
            final_consumption,
            total_exports: sanitize_value(total_exports),
            total_imports: sanitize_value(total_imports),
        }
    }

    pub fn zero(sector_id: impl Into<String>) -> Self {
        Self::new(sector_id, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn sector_id(&self) -> &str {
        &self.sector_id
    }

    pub fn total_output(&self) -> f64 {
        self.total_output
    }

    pub fn total_intermediate(&self) -> f64 {
        self.total_intermediate
    }

    pub fn final_consumption(&self) -> f64 {
        self.final_consumption
    }

    pub fn total_exports(&self) -> f64 {
        self.total_exports
    }

    pub fn total_imports(&self) -> f64 {
        self.total_imports
    }

    /// `value` 佔總產出的百分比，無產出時為 0
    pub fn pct(&self, value: f64) -> f64 {
        percentage_of(value, self.total_output)
    }
}

pub fn percentage_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        100.0 * value / total
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RankedPartition {
    pub top_items: Vec<FlowRecord>,
    pub residual_items: Vec<FlowRecord>,
    pub residual_total: f64,
}

impl RankedPartition {
    pub fn is_empty(&self) -> bool {
        self.top_items.is_empty() && self.residual_items.is_empty()
    }

    pub fn top_total(&self) -> f64 {
        self.top_items.iter().map(|r| r.value).sum()
    }

    pub fn total(&self) -> f64 {
        self.top_total() + self.residual_total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub color: String,
}

/// 流向圖規格：節點與以索引連接的連結
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FlowGraphSpec {
    pub title: String,
    pub node_padding: f64,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl FlowGraphSpec {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub relative_intensity: f64,
    pub label: String,
    pub is_padding: bool,
}

impl GridCell {
    pub fn padding() -> Self {
        Self {
            relative_intensity: 0.0,
            label: String::new(),
            is_padding: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLayout {
    pub title: String,
    pub column_count: usize,
    pub residual_total: f64,
    pub residual_share: f64,
    pub color_scale: Vec<ColorStop>,
    pub rows: Vec<Vec<GridCell>>,
}

impl GridLayout {
    pub fn filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_padding)
            .count()
    }
}

/// 原始資料表，儲存格皆為字串，以標題名稱讀取
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 儲存格文字，列長度不足時回傳空字串
    pub fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub exports: Table,
    pub imports: Table,
    pub io: Table,
}

impl SourceTables {
    pub fn trade(&self, flow_type: FlowType) -> &Table {
        match flow_type {
            FlowType::Exports => &self.exports,
            FlowType::Imports => &self.imports,
        }
    }
}

/// 讀取資料表時使用的欄位名稱
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSchema {
    pub trade_sector_column: String,
    pub trade_commodity_column: String,
    pub io_description_column: String,
    pub io_intermediate_column: String,
    pub io_final_consumption_column: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            trade_sector_column: "CC_DESC_EN".to_string(),
            trade_commodity_column: "COMM_NAME_EN".to_string(),
            io_description_column: "Input-Output Tables (IOTs) 2018 (Thousands of Saudi riyals) - Economic Activities (ISIC Rev. 4)".to_string(),
            io_intermediate_column: "Total Intermediate Consumption".to_string(),
            io_final_consumption_column: "Final consumption expenditures".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorCategory {
    Food,
    Petroleum,
    Construction,
    Transport,
    Finance,
    Health,
    Education,
    Technology,
    Industry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSummary {
    pub sector_id: String,
    pub consumer_sales: f64,
    pub formatted: String,
    pub category: SectorCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineMetric {
    pub label: &'static str,
    pub value: f64,
    pub formatted: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Inside,
    Outside,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub display_value: f64,
    pub text: String,
    pub text_position: TextPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub axis_max: f64,
    pub bars: Vec<Bar>,
}

/// 單次執行為所選部門產生的全部結果
#[derive(Debug, Clone, Serialize)]
pub struct FlowReport {
    pub sector_id: Option<String>,
    pub period: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub catalog: Option<Vec<SectorSummary>>,
    pub aggregate: Option<SectorAggregate>,
    pub metrics: Option<Vec<HeadlineMetric>>,
    pub overview: Option<FlowGraphSpec>,
    pub expanded: Option<FlowGraphSpec>,
    pub grid: Option<GridLayout>,
    pub export_chart: Option<BarChartSpec>,
    pub import_chart: Option<BarChartSpec>,
}

impl FlowReport {
    pub fn new(sector_id: Option<String>, period: Option<String>) -> Self {
        Self {
            sector_id,
            period,
            generated_at: Utc::now(),
            catalog: None,
            aggregate: None,
            metrics: None,
            overview: None,
            expanded: None,
            grid: None,
            export_chart: None,
            import_chart: None,
        }
    }
}

pub mod cli;
pub mod toml_config;

use crate::core::bar_chart::DEFAULT_BAR_LIMIT;
#[cfg(feature = "cli")]
use crate::core::catalog::default_featured_sectors;
use crate::core::grid::DEFAULT_COLUMN_COUNT;
use crate::core::partition::DEFAULT_TOP_K;
use crate::core::ConfigProvider;
use crate::domain::model::{FlowType, TableSchema, ViewKind};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sector-flows")]
#[command(about = "Build flow diagram specs from trade and input-output tables")]
pub struct CliConfig {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long)]
    pub exports: Option<String>,

    #[arg(long)]
    pub imports: Option<String>,

    #[arg(long, help = "Input-output table")]
    pub io: Option<String>,

    #[arg(long)]
    pub sector: Option<String>,

    #[arg(long, value_enum)]
    pub view: Option<ViewKind>,

    #[arg(long, value_enum)]
    pub flow_type: Option<FlowType>,

    #[arg(long, help = "Period column, defaults to the latest year in the trade tables")]
    pub period: Option<String>,

    #[arg(long)]
    pub top_k: Option<usize>,

    #[arg(long)]
    pub column_count: Option<usize>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Limit the catalog to the featured manufacturing sectors")]
    pub featured: bool,

    #[arg(long, help = "Also write a zip archive with one JSON file per spec")]
    pub bundle: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數優先，其次為 TOML 配置，最後為預設值
    pub fn resolve(self, file: Option<TomlConfig>) -> FlowConfig {
        let file = file.unwrap_or_default();
        let featured_sectors = if self.featured {
            Some(default_featured_sectors())
        } else {
            file.layout.featured_sectors
        };

        FlowConfig {
            exports_path: self.exports.or(file.data.exports_path).unwrap_or_default(),
            imports_path: self.imports.or(file.data.imports_path).unwrap_or_default(),
            io_path: self.io.or(file.data.io_path).unwrap_or_default(),
            output_path: self
                .output_path
                .or(file.output.output_path)
                .unwrap_or_else(|| "./output".to_string()),
            sector: self.sector.or(file.selection.sector),
            view: self.view.or(file.selection.view).unwrap_or_default(),
            flow_type: self
                .flow_type
                .or(file.selection.flow_type)
                .unwrap_or(FlowType::Exports),
            period: self.period.or(file.selection.period),
            schema: file.schema,
            top_k: self.top_k.or(file.layout.top_k).unwrap_or(DEFAULT_TOP_K),
            column_count: self
                .column_count
                .or(file.layout.column_count)
                .unwrap_or(DEFAULT_COLUMN_COUNT),
            bar_limit: file.layout.bar_limit.unwrap_or(DEFAULT_BAR_LIMIT),
            featured_sectors,
            bundle: self.bundle || file.output.bundle.unwrap_or(false),
        }
    }
}

/// 單次執行的完整設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    pub exports_path: String,
    pub imports_path: String,
    pub io_path: String,
    pub output_path: String,
    pub sector: Option<String>,
    pub view: ViewKind,
    pub flow_type: FlowType,
    pub period: Option<String>,
    pub schema: TableSchema,
    pub top_k: usize,
    pub column_count: usize,
    pub bar_limit: usize,
    pub featured_sectors: Option<Vec<String>>,
    pub bundle: bool,
}

impl FlowConfig {
    pub fn new(exports_path: &str, imports_path: &str, io_path: &str, output_path: &str) -> Self {
        Self {
            exports_path: exports_path.to_string(),
            imports_path: imports_path.to_string(),
            io_path: io_path.to_string(),
            output_path: output_path.to_string(),
            sector: None,
            view: ViewKind::default(),
            flow_type: FlowType::Exports,
            period: None,
            schema: TableSchema::default(),
            top_k: DEFAULT_TOP_K,
            column_count: DEFAULT_COLUMN_COUNT,
            bar_limit: DEFAULT_BAR_LIMIT,
            featured_sectors: None,
            bundle: false,
        }
    }

    pub fn with_sector(mut self, sector: &str) -> Self {
        self.sector = Some(sector.to_string());
        self
    }

    pub fn with_view(mut self, view: ViewKind) -> Self {
        self.view = view;
        self
    }

    pub fn with_flow_type(mut self, flow_type: FlowType) -> Self {
        self.flow_type = flow_type;
        self
    }
}

impl ConfigProvider for FlowConfig {
    fn exports_path(&self) -> &str {
        &self.exports_path
    }

    fn imports_path(&self) -> &str {
        &self.imports_path
    }

    fn io_path(&self) -> &str {
        &self.io_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn sector(&self) -> Option<&str> {
        self.sector.as_deref()
    }

    fn view(&self) -> ViewKind {
        self.view
    }

    fn flow_type(&self) -> FlowType {
        self.flow_type
    }

    fn period(&self) -> Option<&str> {
        self.period.as_deref()
    }

    fn schema(&self) -> TableSchema {
        self.schema.clone()
    }

    fn top_k(&self) -> usize {
        self.top_k
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn bar_limit(&self) -> usize {
        self.bar_limit
    }

    fn featured_sectors(&self) -> Option<&[String]> {
        self.featured_sectors.as_deref()
    }

    fn bundle(&self) -> bool {
        self.bundle
    }
}

impl Validate for FlowConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_csv_path("data.exports_path", &self.exports_path)?;
        validation::validate_csv_path("data.imports_path", &self.imports_path)?;
        validation::validate_csv_path("data.io_path", &self.io_path)?;
        validation::validate_path("output.output_path", &self.output_path)?;
        validation::validate_positive_number("layout.top_k", self.top_k, 1)?;
        validation::validate_positive_number("layout.column_count", self.column_count, 1)?;
        validation::validate_positive_number("layout.bar_limit", self.bar_limit, 1)?;

        // 除了部門清單以外的視圖都需要指定部門
        if self.view != ViewKind::Catalog {
            let sector = validation::validate_required_field("selection.sector", &self.sector)?;
            validation::validate_non_empty_string("selection.sector", sector)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FlowConfig {
        FlowConfig::new("exports.csv", "imports.csv", "io.csv", "./out")
    }

    #[test]
    fn test_catalog_view_needs_no_sector() {
        assert!(config().with_view(ViewKind::Catalog).validate().is_ok());
        assert!(config().with_view(ViewKind::Overview).validate().is_err());
        assert!(config()
            .with_view(ViewKind::Overview)
            .with_sector("Manufacture of textiles")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validation_rejects_non_csv_tables() {
        let mut cfg = config().with_sector("Manufacture of textiles");
        cfg.io_path = "io.json".to_string();
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_toml() {
        let file = TomlConfig::from_toml_str(
            r#"
[data]
exports_path = "file/exports.csv"
imports_path = "file/imports.csv"
io_path = "file/io.csv"

[selection]
sector = "Manufacture of furniture"
flow_type = "Imports"

[layout]
top_k = 7
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "sector-flows",
            "--exports",
            "cli/exports.csv",
            "--top-k",
            "3",
            "--featured",
        ]);
        let cfg = cli.resolve(Some(file));

        assert_eq!(cfg.exports_path, "cli/exports.csv");
        assert_eq!(cfg.imports_path, "file/imports.csv");
        assert_eq!(cfg.sector.as_deref(), Some("Manufacture of furniture"));
        assert_eq!(cfg.flow_type, FlowType::Imports);
        assert_eq!(cfg.top_k, 3);
        assert_eq!(cfg.column_count, DEFAULT_COLUMN_COUNT);
        assert_eq!(cfg.featured_sectors.as_ref().map(Vec::len), Some(22));
        assert_eq!(cfg.output_path, "./output");
    }
}

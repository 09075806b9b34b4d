use crate::core::aggregator::aggregate;
use crate::core::bar_chart::build_bar_chart;
use crate::core::catalog::sector_catalog;
use crate::core::expanded::build_expanded;
use crate::core::grid::build_grid;
use crate::core::metrics::headline_metrics;
use crate::core::overview::build_overview;
use crate::core::partition::partition;
use crate::core::tables::{flow_records, latest_period, parse_table};
use crate::core::{ConfigProvider, FlowReport, Pipeline, SourceTables, Storage};
use crate::domain::model::{FlowType, Table, ViewKind};
use crate::utils::error::{FlowError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

/// 從三張資料表產生指定部門的流向圖規格
pub struct FlowPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FlowPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn read_table(&self, path: &str) -> Result<Table> {
        tracing::debug!("Reading table from: {}", path);
        let bytes = self.storage.read_file(path).await?;
        parse_table(&bytes)
    }

    fn selected_sector(&self) -> Result<&str> {
        self.config.sector().ok_or_else(|| FlowError::ProcessingError {
            message: format!("view {:?} requires a sector", self.config.view()),
        })
    }

    fn build_sector_views(
        &self,
        sector: &str,
        period: &str,
        tables: &SourceTables,
        report: &mut FlowReport,
    ) {
        let schema = self.config.schema();
        let agg = aggregate(sector, tables, &schema, period);
        if agg.total_output() <= 0.0 && agg.total_exports() <= 0.0 && agg.total_imports() <= 0.0 {
            tracing::warn!("⚠️ No data available for sector '{}'", sector);
        }

        report.overview = Some(build_overview(
            sector,
            &agg,
            agg.total_exports(),
            agg.total_imports(),
        ));
        report.metrics = Some(headline_metrics(&agg));

        let limit = self.config.bar_limit();
        let exports = flow_records(&tables.exports, sector, &schema, period);
        report.export_chart = build_bar_chart(
            &exports,
            &format!("Top Exported Commodities - {}", sector),
            limit,
        );
        let imports = flow_records(&tables.imports, sector, &schema, period);
        report.import_chart = build_bar_chart(
            &imports,
            &format!("Top Imported Commodities - {}", sector),
            limit,
        );
        report.aggregate = Some(agg);
    }

    fn build_flow_views(
        &self,
        sector: &str,
        period: &str,
        tables: &SourceTables,
        report: &mut FlowReport,
    ) {
        let flow_type: FlowType = self.config.flow_type();
        let records = flow_records(tables.trade(flow_type), sector, &self.config.schema(), period);
        if records.is_empty() {
            tracing::warn!("⚠️ No {} data available for '{}'", flow_type, sector);
        }

        let k = self.config.top_k();
        report.expanded = Some(build_expanded(sector, flow_type, &records, k));

        let ranked = partition(&records, k);
        if !ranked.residual_items.is_empty() {
            report.grid = Some(build_grid(
                &ranked.residual_items,
                ranked.residual_total,
                ranked.total(),
                flow_type,
                self.config.column_count(),
            ));
        }
    }

    fn report_stem(report: &FlowReport) -> String {
        report
            .sector_id
            .as_deref()
            .map(slugify)
            .unwrap_or_else(|| "catalog".to_string())
    }
}

/// 轉成小寫英數字，以單一底線連接
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_').to_string();
    if slug.is_empty() {
        "sector".to_string()
    } else {
        slug
    }
}

fn add_entry<T: Serialize, W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    part: &Option<T>,
) -> Result<()> {
    if let Some(part) = part {
        zip.start_file(name, SimpleFileOptions::default())?;
        let json = serde_json::to_vec_pretty(part)?;
        zip.write_all(&json)?;
    }
    Ok(())
}

fn bundle_report(report: &FlowReport) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    add_entry(&mut zip, "catalog.json", &report.catalog)?;
    add_entry(&mut zip, "aggregate.json", &report.aggregate)?;
    add_entry(&mut zip, "metrics.json", &report.metrics)?;
    add_entry(&mut zip, "overview.json", &report.overview)?;
    add_entry(&mut zip, "expanded.json", &report.expanded)?;
    add_entry(&mut zip, "grid.json", &report.grid)?;
    add_entry(&mut zip, "export_chart.json", &report.export_chart)?;
    add_entry(&mut zip, "import_chart.json", &report.import_chart)?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FlowPipeline<S, C> {
    async fn extract(&self) -> Result<SourceTables> {
        let (exports, imports, io) = tokio::try_join!(
            self.read_table(self.config.exports_path()),
            self.read_table(self.config.imports_path()),
            self.read_table(self.config.io_path()),
        )?;

        Ok(SourceTables { exports, imports, io })
    }

    async fn transform(&self, tables: SourceTables) -> Result<FlowReport> {
        let period = self
            .config
            .period()
            .map(str::to_string)
            .or_else(|| latest_period(&[&tables.exports, &tables.imports]));
        if period.is_none() {
            tracing::warn!("⚠️ No period column found in the trade tables, trade totals will be 0");
        }
        let period_label = period.clone().unwrap_or_default();

        let view = self.config.view();
        let sector = match view {
            ViewKind::Catalog => None,
            _ => Some(self.selected_sector()?.to_string()),
        };
        let mut report = FlowReport::new(sector.clone(), period);

        if matches!(view, ViewKind::Catalog | ViewKind::All) {
            report.catalog = Some(sector_catalog(
                &tables,
                &self.config.schema(),
                self.config.featured_sectors(),
            ));
        }

        if let Some(sector) = sector.as_deref() {
            if matches!(view, ViewKind::Overview | ViewKind::All) {
                self.build_sector_views(sector, &period_label, &tables, &mut report);
            }
            if matches!(view, ViewKind::Expanded | ViewKind::All) {
                self.build_flow_views(sector, &period_label, &tables, &mut report);
            }
        }

        Ok(report)
    }

    async fn load(&self, report: FlowReport) -> Result<String> {
        let stem = Self::report_stem(&report);
        let output_dir = Path::new(self.config.output_path());

        let report_path = output_dir.join(format!("{}_report.json", stem));
        let json = serde_json::to_vec_pretty(&report)?;
        tracing::debug!("Writing report ({} bytes)", json.len());
        self.storage
            .write_file(&report_path.to_string_lossy(), &json)
            .await?;

        if self.config.bundle() {
            let zip_path = output_dir.join(format!("{}_specs.zip", stem));
            let zip_data = bundle_report(&report)?;
            tracing::debug!("Writing ZIP bundle ({} bytes)", zip_data.len());
            self.storage
                .write_file(&zip_path.to_string_lossy(), &zip_data)
                .await?;
        }

        Ok(report_path.to_string_lossy().into_owned())
    }
}

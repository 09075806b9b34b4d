use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct FlowEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FlowEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting flow spec generation");

        // 擷取
        let tables = self.pipeline.extract().await?;
        tracing::info!(
            "📥 Loaded tables: {} export rows, {} import rows, {} IO rows",
            tables.exports.len(),
            tables.imports.len(),
            tables.io.len()
        );

        // 轉換
        let report = self.pipeline.transform(tables).await?;
        tracing::info!(
            "🔄 Built report for {}",
            report.sector_id.as_deref().unwrap_or("sector catalog")
        );

        // 載入
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("📁 Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}

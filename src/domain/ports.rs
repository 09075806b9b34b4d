use crate::domain::model::{FlowReport, FlowType, SourceTables, TableSchema, ViewKind};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn exports_path(&self) -> &str;
    fn imports_path(&self) -> &str;
    fn io_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn sector(&self) -> Option<&str>;
    fn view(&self) -> ViewKind;
    fn flow_type(&self) -> FlowType;
    /// 報告期間欄位；`None` 時取貿易表中最新的年份
    fn period(&self) -> Option<&str>;
    fn schema(&self) -> TableSchema;
    fn top_k(&self) -> usize;
    fn column_count(&self) -> usize;
    fn bar_limit(&self) -> usize;
    fn featured_sectors(&self) -> Option<&[String]>;
    fn bundle(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceTables>;
    async fn transform(&self, tables: SourceTables) -> Result<FlowReport>;
    async fn load(&self, report: FlowReport) -> Result<String>;
}

pub mod aggregator;
pub mod bar_chart;
pub mod catalog;
pub mod etl;
pub mod expanded;
pub mod format;
pub mod grid;
pub mod metrics;
pub mod overview;
pub mod palette;
pub mod partition;
pub mod tables;

pub use crate::domain::model::{FlowReport, SourceTables};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

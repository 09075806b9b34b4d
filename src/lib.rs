pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::flow_pipeline::FlowPipeline;
pub use config::{cli::LocalStorage, FlowConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::etl::FlowEngine;
pub use utils::error::{FlowError, Result};

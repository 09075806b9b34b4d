pub mod flow_pipeline;

mod explain_pipeline;

pub use explain_pipeline::ExplainPipeline;

// Analyzer module: prompt, declared schema, output validation and the request builder.

pub mod prompt;
pub mod request_builder;
pub mod schema;
pub mod validation;

pub use request_builder::AnalysisRequestBuilder;

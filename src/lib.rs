pub mod analyzer;
pub mod config;
pub mod llm;
pub mod market;
pub mod model;
pub mod poem;
pub mod server;
pub mod service;
pub mod utils;

#[cfg(test)]
mod test_support;

pub mod analyzers;
pub mod config;
pub mod error;
pub mod file_info;
pub mod output;
pub mod parser;

pub use error::RouteError;

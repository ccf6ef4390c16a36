pub mod attributes;
pub mod dataset;
pub mod errors;
pub mod instance_header;
pub mod instances;

pub use dataset::Dataset;
pub use errors::{ConfigError, DataError, TreeError};

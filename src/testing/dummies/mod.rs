mod datasets;
mod headers;

pub use datasets::{dataset_from_rows, four_row_dataset, random_dataset};
pub use headers::{header_from, header_single_binary_attribute, header_with_unseen_value};

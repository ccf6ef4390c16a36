pub mod arff;
mod stream;

pub use arff::ArffFileStream;
pub use stream::Stream;

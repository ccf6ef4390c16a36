mod scripted_driver;
mod vec_stream;

pub use scripted_driver::{Answer, ScriptedDriver};
pub use vec_stream::VecStream;

use crate::core::errors::DataError;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;

/// Pull-based interface for sources that produce `Instance`s.
///
/// All returned instances conform to the same, immutable [`InstanceHeader`]
/// for the lifetime of the stream.
pub trait Stream {
    /// Returns the stream header (relation name, attributes, class index).
    fn header(&self) -> &InstanceHeader;

    /// Indicates whether the stream *may* produce more instances.
    ///
    /// If it returns `false`, a subsequent call to [`next_instance`] must
    /// return `None`.
    ///
    /// [`next_instance`]: Stream::next_instance
    fn has_more_instances(&self) -> bool;

    /// Produces the next instance, `None` at end of stream.
    ///
    /// A malformed record is returned as `Some(Err(..))`; callers decide
    /// whether to stop. The dataset loader always stops.
    fn next_instance(&mut self) -> Option<Result<Box<dyn Instance>, DataError>>;

    /// Rewinds to the first record. The header is unchanged.
    fn restart(&mut self) -> Result<(), DataError>;
}

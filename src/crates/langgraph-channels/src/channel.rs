//! Channel abstractions for state management

use crate::error::Result;
use std::fmt::Debug;

/// Base trait for single-valued channels
///
/// Channels are typed state containers that manage how state is stored,
/// updated, and checkpointed between supersteps. The scheduler drives every
/// call; a channel never does work on its own.
pub trait Channel: Send + Sync + Debug + Sized {
    /// The declared type of the stored value
    type Value;

    /// The payload produced by [`Channel::checkpoint`]
    type Checkpoint;

    /// Name of the declared value type
    fn value_type(&self) -> &'static str {
        std::any::type_name::<Self::Value>()
    }

    /// Update the channel with the values written during one step
    ///
    /// Returns `true` if the channel was updated, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUpdate` if the sequence of updates is invalid. The
    /// channel is unchanged in that case.
    fn update(&mut self, values: Vec<Self::Value>) -> Result<bool>;

    /// Get the current value of the channel
    ///
    /// # Errors
    ///
    /// Returns `EmptyChannel` if there is no visible value
    fn get(&self) -> Result<&Self::Value>;

    /// Check if the channel has a visible value
    fn is_available(&self) -> bool {
        self.get().is_ok()
    }

    /// Snapshot the channel state
    fn checkpoint(&self) -> Self::Checkpoint;

    /// Build a new channel of the same kind from a checkpoint payload
    ///
    /// The receiver is left untouched.
    #[allow(clippy::wrong_self_convention)]
    fn from_checkpoint(&self, checkpoint: Self::Checkpoint) -> Self;

    /// Independent copy of the channel
    fn copy(&self) -> Self;

    /// Notify the channel that a subscribed task ran
    ///
    /// Returns `true` if the channel was updated, `false` otherwise.
    /// `LastValueChannel` keeps this no-op default.
    fn consume(&mut self) -> bool {
        false
    }

    /// Notify the channel that the run is finishing
    ///
    /// Returns `true` if the channel was updated, `false` otherwise.
    /// `LastValueChannel` keeps this no-op default.
    fn finish(&mut self) -> bool {
        false
    }
}

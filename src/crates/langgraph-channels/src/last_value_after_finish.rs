//! Deferred LastValue channel, readable only after a finish signal

use crate::channel::Channel;
use crate::error::{ChannelError, Result};
use crate::last_value::single_update;
use crate::slot::Slot;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Deferred value channel that becomes available only after explicit finish signal.
///
/// `LastValueAfterFinishChannel` stores values exactly like
/// [`LastValueChannel`](crate::LastValueChannel) but **withholds them from
/// readers** until `finish()` has been called while a value is present.
///
/// # Behavior
///
/// - **Write**: at most one value per step; replaces the stored value
/// - **Finish**: marks channel as finished, only if a value is stored
/// - **Read**: only succeeds if finished and value exists
/// - **Consume**: clears the value; the finished flag is kept
///
/// ```rust
/// use langgraph_channels::{Channel, LastValueAfterFinishChannel};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut channel = LastValueAfterFinishChannel::<i64>::new();
///
/// channel.update(vec![10])?;
/// assert!(channel.get().is_err()); // stored, not yet visible
///
/// channel.finish();
/// assert_eq!(*channel.get()?, 10);
/// # Ok(())
/// # }
/// ```
///
/// # Two-Phase Pattern
///
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │ Phase 1: Pending                             │
/// │   update() → Stores value                    │
/// │   is_available() → false                     │
/// │   get() → Error                              │
/// └─────────────────────────────────────────────┘
///              ↓ finish()
/// ┌─────────────────────────────────────────────┐
/// │ Phase 2: Available                           │
/// │   is_available() → true                      │
/// │   get() → Ok(value)                          │
/// └─────────────────────────────────────────────┘
///              ↓ consume()
/// ┌─────────────────────────────────────────────┐
/// │ Value cleared, finished flag kept            │
/// └─────────────────────────────────────────────┘
/// ```
///
/// An update after `finish()` overwrites the value and keeps the flag, so
/// the new value is immediately visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastValueAfterFinishChannel<T> {
    value: Slot<T>,
    finished: bool,
}

impl<T> LastValueAfterFinishChannel<T> {
    pub fn new() -> Self {
        Self {
            value: Slot::Missing,
            finished: false,
        }
    }

    /// The raw slot, visible or not
    pub fn value(&self) -> &Slot<T> {
        &self.value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<T> Default for LastValueAfterFinishChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Channel for LastValueAfterFinishChannel<T>
where
    T: Clone + Debug + Send + Sync,
{
    type Value = T;
    /// `(value, finished)`, or `Missing` for a channel that never held a value
    type Checkpoint = Slot<(T, bool)>;

    fn update(&mut self, values: Vec<T>) -> Result<bool> {
        match single_update(values, "LastValueAfterFinish")? {
            Some(value) => {
                self.value = Slot::Value(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get(&self) -> Result<&T> {
        if !self.finished {
            return Err(ChannelError::EmptyChannel(
                "LastValueAfterFinish channel not finished".to_string(),
            ));
        }
        self.value.value().ok_or_else(|| {
            ChannelError::EmptyChannel("LastValueAfterFinish channel is empty".to_string())
        })
    }

    fn is_available(&self) -> bool {
        self.finished && self.value.is_present()
    }

    fn checkpoint(&self) -> Slot<(T, bool)> {
        self.value.clone().map(|value| (value, self.finished))
    }

    fn from_checkpoint(&self, checkpoint: Slot<(T, bool)>) -> Self {
        match checkpoint {
            Slot::Missing => Self::new(),
            Slot::Value((value, finished)) => Self {
                value: Slot::Value(value),
                finished,
            },
        }
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    fn consume(&mut self) -> bool {
        self.value.take().is_present()
    }

    fn finish(&mut self) -> bool {
        if !self.finished && self.value.is_present() {
            self.finished = true;
            true
        } else {
            false
        }
    }
}

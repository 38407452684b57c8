//! LastValue channel - stores only the latest value

use crate::channel::Channel;
use crate::error::{ChannelError, Result};
use crate::slot::Slot;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Pull the one value out of a step's batch.
///
/// `Ok(None)` for an empty batch, `InvalidUpdate` for more than one value.
pub(crate) fn single_update<T>(values: Vec<T>, kind: &str) -> Result<Option<T>> {
    if values.len() > 1 {
        return Err(ChannelError::InvalidUpdate(format!(
            "{} channel can receive only one value per step, got {}",
            kind,
            values.len()
        )));
    }
    Ok(values.into_iter().next())
}

/// LastValue channel - stores only the latest value
///
/// Can receive at most one value per step. If multiple values are
/// provided in a single update, it's an error and the stored value is kept.
///
/// ```rust
/// use langgraph_channels::{Channel, LastValueChannel};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut channel = LastValueChannel::<i64>::new();
/// channel.update(vec![10])?;
/// channel.update(vec![20])?;
/// assert_eq!(*channel.get()?, 20);
///
/// assert!(channel.update(vec![30, 40]).is_err());
/// assert_eq!(*channel.get()?, 20);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastValueChannel<T> {
    value: Slot<T>,
}

impl<T> LastValueChannel<T> {
    /// Create a new, empty LastValue channel
    pub fn new() -> Self {
        Self {
            value: Slot::Missing,
        }
    }

    /// Create a new LastValue channel with an initial value
    pub fn with_value(value: T) -> Self {
        Self {
            value: Slot::Value(value),
        }
    }

    /// The raw slot, visible or not
    pub fn value(&self) -> &Slot<T> {
        &self.value
    }
}

impl<T> Default for LastValueChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Channel for LastValueChannel<T>
where
    T: Clone + Debug + Send + Sync,
{
    type Value = T;
    type Checkpoint = Slot<T>;

    fn update(&mut self, values: Vec<T>) -> Result<bool> {
        match single_update(values, "LastValue")? {
            Some(value) => {
                self.value = Slot::Value(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get(&self) -> Result<&T> {
        self.value
            .value()
            .ok_or_else(|| ChannelError::EmptyChannel("LastValue channel is empty".to_string()))
    }

    fn is_available(&self) -> bool {
        self.value.is_present()
    }

    fn checkpoint(&self) -> Slot<T> {
        self.value.clone()
    }

    fn from_checkpoint(&self, checkpoint: Slot<T>) -> Self {
        Self { value: checkpoint }
    }

    fn copy(&self) -> Self {
        self.clone()
    }
}

//! Byte codecs for channel checkpoints.
//!
//! A [`CheckpointCodec`] turns a channel's own [`Channel::Checkpoint`]
//! payload into bytes for a persistence layer and restores a channel from
//! those bytes. Payloads keep their `Slot` shape, so `Missing` and a stored
//! null decode back to what they were.
//!
//! ```rust
//! use langgraph_channels::{BincodeCodec, Channel, CheckpointCodec, LastValueAfterFinishChannel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = BincodeCodec;
//! let mut channel = LastValueAfterFinishChannel::<u32>::new();
//! channel.update(vec![7])?;
//! channel.finish();
//!
//! let bytes = codec.save_channel(&channel)?;
//! let restored = codec.load_channel(&LastValueAfterFinishChannel::<u32>::new(), &bytes)?;
//! assert_eq!(*restored.get()?, 7);
//! # Ok(())
//! # }
//! ```

use crate::channel::Channel;
use crate::channel_set::{ChannelSet, ChannelSnapshot};
use crate::error::{ChannelError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encoding of checkpoint payloads into bytes
pub trait CheckpointCodec: Send + Sync {
    /// Format name used in error messages
    fn format(&self) -> &'static str;

    fn encode<T: Serialize>(&self, payload: &T) -> Result<Vec<u8>>;

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T>;

    /// Encode `channel.checkpoint()`
    fn save_channel<C>(&self, channel: &C) -> Result<Vec<u8>>
    where
        C: Channel,
        C::Checkpoint: Serialize,
    {
        self.encode(&channel.checkpoint())
    }

    /// Restore bytes from [`CheckpointCodec::save_channel`] as a new channel
    /// of `template`'s kind
    ///
    /// # Errors
    ///
    /// Returns `InvalidCheckpoint` when the bytes are not a payload of this
    /// channel kind.
    fn load_channel<C>(&self, template: &C, data: &[u8]) -> Result<C>
    where
        C: Channel,
        C::Checkpoint: DeserializeOwned,
    {
        let payload = self
            .decode::<C::Checkpoint>(data)
            .map_err(|e| corrupt(self.format(), e))?;
        Ok(template.from_checkpoint(payload))
    }
}

fn corrupt(format: &str, err: ChannelError) -> ChannelError {
    tracing::warn!(format, error = %err, "Undecodable checkpoint bytes");
    ChannelError::InvalidCheckpoint(format!("{} payload does not decode: {}", format, err))
}

/// JSON codec
///
/// Also handles whole [`ChannelSet`] snapshots, whose payloads are
/// `serde_json::Value`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Encode the snapshot of every channel in `set`
    pub fn save_set(&self, set: &ChannelSet) -> Result<Vec<u8>> {
        self.encode(&set.checkpoint()?)
    }

    /// Restore bytes from [`JsonCodec::save_set`] into a new set shaped like
    /// `template`
    pub fn load_set(&self, template: &ChannelSet, data: &[u8]) -> Result<ChannelSet> {
        let snapshot: ChannelSnapshot = self
            .decode(data)
            .map_err(|e| corrupt(self.format(), e))?;
        template.restore(&snapshot)
    }
}

impl CheckpointCodec for JsonCodec {
    fn format(&self) -> &'static str {
        "json"
    }

    fn encode<T: Serialize>(&self, payload: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(payload)?)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Compact binary codec using bincode
///
/// Only for statically typed payloads. bincode is not self-describing, so
/// a `serde_json::Value` payload does not decode; use [`JsonCodec`] for those.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl CheckpointCodec for BincodeCodec {
    fn format(&self) -> &'static str {
        "bincode"
    }

    fn encode<T: Serialize>(&self, payload: &T) -> Result<Vec<u8>> {
        Ok(bincode::serialize(payload)?)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        Ok(bincode::deserialize(data)?)
    }
}

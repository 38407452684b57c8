//! Named channel collections for one execution context
//!
//! A [`ChannelSet`] owns one independent channel per state key. It applies a
//! step's writes, answers reads by name, snapshots every channel into a
//! [`ChannelSnapshot`], and copies itself for branched execution.
//!
//! ```rust
//! use langgraph_channels::{ChannelKind, ChannelSet, ChannelsConfig};
//! use serde_json::json;
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChannelsConfig::new()
//!     .with_channel("status", ChannelKind::LastValue)
//!     .with_channel("result", ChannelKind::LastValueAfterFinish);
//! let mut channels = ChannelSet::from_config(&config);
//!
//! let mut writes = BTreeMap::new();
//! writes.insert("status".to_string(), vec![json!("running")]);
//! writes.insert("result".to_string(), vec![json!(42)]);
//! channels.apply_writes(writes)?;
//!
//! assert_eq!(channels.get("status")?, json!("running"));
//! assert!(!channels.is_available("result")?);
//!
//! channels.finish_all();
//! assert_eq!(channels.get("result")?, json!(42));
//! # Ok(())
//! # }
//! ```

use crate::config::{ChannelKind, ChannelsConfig};
use crate::error::{ChannelError, Result};
use crate::json::JsonChannel;
use crate::last_value::LastValueChannel;
use crate::last_value_after_finish::LastValueAfterFinishChannel;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Checkpoint payloads of every non-empty channel in a set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    pub channel_values: BTreeMap<String, Value>,
}

/// Independent channels keyed by name
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    channels: BTreeMap<String, Box<dyn JsonChannel>>,
}

/// Put the channel name into errors raised by one of its operations.
fn scoped(name: &str, err: ChannelError) -> ChannelError {
    match err {
        ChannelError::InvalidUpdate(msg) => {
            ChannelError::InvalidUpdate(format!("channel '{}': {}", name, msg))
        }
        ChannelError::EmptyChannel(msg) => {
            ChannelError::EmptyChannel(format!("channel '{}': {}", name, msg))
        }
        ChannelError::InvalidCheckpoint(msg) => {
            ChannelError::InvalidCheckpoint(format!("channel '{}': {}", name, msg))
        }
        other => other,
    }
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh, empty channel for every declaration
    pub fn from_config(config: &ChannelsConfig) -> Self {
        let mut set = Self::new();
        for (name, def) in &config.channels {
            let channel: Box<dyn JsonChannel> = match def.kind {
                ChannelKind::LastValue => Box::new(LastValueChannel::<Value>::new()),
                ChannelKind::LastValueAfterFinish => {
                    Box::new(LastValueAfterFinishChannel::<Value>::new())
                }
            };
            set.insert(name.clone(), channel);
        }
        set
    }

    /// Register a channel, returning the one it replaces
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        channel: Box<dyn JsonChannel>,
    ) -> Option<Box<dyn JsonChannel>> {
        self.channels.insert(name.into(), channel)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel(&self, name: &str) -> Result<&dyn JsonChannel> {
        self.channels
            .get(name)
            .map(|channel| &**channel)
            .ok_or_else(|| ChannelError::UnknownChannel(name.to_string()))
    }

    fn channel_mut(&mut self, name: &str) -> Result<&mut Box<dyn JsonChannel>> {
        self.channels
            .get_mut(name)
            .ok_or_else(|| ChannelError::UnknownChannel(name.to_string()))
    }

    /// Apply one step's writes, grouped by channel name
    ///
    /// All or nothing: batches are applied to copies of their channels, and
    /// the copies replace the originals only once every batch succeeded. On
    /// error no channel in the set has changed. Returns the names of the
    /// channels that changed.
    pub fn apply_writes(&mut self, writes: BTreeMap<String, Vec<Value>>) -> Result<Vec<String>> {
        if let Some(unknown) = writes.keys().find(|name| !self.contains(name.as_str())) {
            tracing::warn!(channel = %unknown, "Write to undeclared channel");
            return Err(ChannelError::UnknownChannel(unknown.clone()));
        }

        let mut staged = Vec::new();
        for (name, values) in writes {
            let mut channel = self.channel(&name)?.copy_box();
            match channel.update_json(values) {
                Ok(true) => staged.push((name, channel)),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(channel = %name, error = %e, "Channel rejected update");
                    return Err(scoped(&name, e));
                }
            }
        }

        let mut updated = Vec::with_capacity(staged.len());
        for (name, channel) in staged {
            self.channels.insert(name.clone(), channel);
            updated.push(name);
        }

        tracing::debug!(updated = ?updated, "Applied channel writes");
        Ok(updated)
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        self.channel(name)?
            .get_json()
            .map_err(|e| scoped(name, e))
    }

    pub fn is_available(&self, name: &str) -> Result<bool> {
        Ok(self.channel(name)?.is_available())
    }

    /// Send the finish signal to every channel
    ///
    /// Returns the names of the channels that became finished.
    pub fn finish_all(&mut self) -> Vec<String> {
        let finished: Vec<String> = self
            .channels
            .iter_mut()
            .filter_map(|(name, channel)| channel.finish().then_some(name.clone()))
            .collect();
        tracing::trace!(finished = ?finished, "Finish signal delivered");
        finished
    }

    pub fn consume(&mut self, name: &str) -> Result<bool> {
        let consumed = self.channel_mut(name)?.consume();
        tracing::trace!(channel = %name, consumed, "Consume signal delivered");
        Ok(consumed)
    }

    /// Snapshot every channel; empty channels are left out
    pub fn checkpoint(&self) -> Result<ChannelSnapshot> {
        let mut channel_values = BTreeMap::new();
        for (name, channel) in &self.channels {
            if let Some(payload) = channel.checkpoint_json().map_err(|e| scoped(name, e))? {
                channel_values.insert(name.clone(), payload);
            }
        }
        Ok(ChannelSnapshot { channel_values })
    }

    /// Build a new set with this set's channel kinds and the snapshot's state
    ///
    /// Channels missing from the snapshot come back empty.
    pub fn restore(&self, snapshot: &ChannelSnapshot) -> Result<ChannelSet> {
        if let Some(unknown) = snapshot
            .channel_values
            .keys()
            .find(|name| !self.contains(name.as_str()))
        {
            tracing::warn!(channel = %unknown, "Snapshot holds undeclared channel");
            return Err(ChannelError::UnknownChannel(unknown.clone()));
        }

        let mut channels = BTreeMap::new();
        for (name, channel) in &self.channels {
            let payload = snapshot.channel_values.get(name).cloned();
            let restored = channel.restore_json(payload).map_err(|e| scoped(name, e))?;
            channels.insert(name.clone(), restored);
        }
        Ok(ChannelSet { channels })
    }

    /// Deep copy for a branched execution path
    pub fn copy(&self) -> ChannelSet {
        self.clone()
    }
}

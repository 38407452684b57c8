//! # langgraph-channels - Single-Value State Channels for Graph Execution
//!
//! **Typed single-slot channels** that carry state between the supersteps of
//! a Pregel-style graph run. Each channel holds at most one value, accepts one
//! write per step, exposes the latest value to readers, and can be snapshotted
//! into an opaque checkpoint payload and restored as a new instance.
//!
//! ## Channel Types
//!
//! - [`LastValueChannel`] - Single value, visible as soon as it is written
//! - [`LastValueAfterFinishChannel`] - Single value, visible only after the finish signal
//!
//! Both implement [`Channel`]. Their stored value is a [`Slot`], whose
//! [`Slot::Missing`] variant marks "never written" separately from any value
//! of the declared type, nulls included.
//!
//! ## Quick Start
//!
//! ```rust
//! use langgraph_channels::{Channel, LastValueAfterFinishChannel, LastValueChannel, Slot};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut status = LastValueChannel::<String>::new();
//! status.update(vec!["running".to_string()])?;
//! assert_eq!(status.get()?, "running");
//!
//! // One slot: two writes in a step is a contract violation
//! assert!(status.update(vec!["a".into(), "b".into()]).is_err());
//!
//! let mut output = LastValueAfterFinishChannel::<i64>::new();
//! output.update(vec![10])?;
//! assert!(output.get().unwrap_err().is_empty_channel());
//! output.finish();
//! assert_eq!(*output.get()?, 10);
//!
//! // Checkpoints restore into new, independent channels
//! let restored = output.from_checkpoint(output.checkpoint());
//! assert_eq!(restored.checkpoint(), Slot::Value((10, true)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Schedulers
//!
//! A scheduler that mixes channel kinds works through [`JsonChannel`] trait
//! objects, usually grouped in a [`ChannelSet`] built from a
//! [`ChannelsConfig`]. [`ChannelSet::checkpoint`] produces a
//! [`ChannelSnapshot`] for the persistence layer; a [`CheckpointCodec`]
//! turns channel and snapshot payloads into bytes.
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  ChannelSet                      │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐  │
//! │  │  "status"  │  │  "answer"  │  │  "result"  │  │
//! │  │ LastValue  │  │ LastValue  │  │ AfterFinish│  │
//! │  └────────────┘  └────────────┘  └────────────┘  │
//! └──────────────────────────────────────────────────┘
//!                  │ checkpoint()
//!                  ▼
//!      ┌──────────────────────────┐
//!      │     ChannelSnapshot      │
//!      │  (handed to persistence) │
//!      └──────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`slot`] - [`Slot`] and the `Missing` sentinel
//! - [`channel`] - [`Channel`] trait
//! - [`last_value`] / [`last_value_after_finish`] - channel implementations
//! - [`json`] - [`JsonChannel`] object-safe layer
//! - [`channel_set`] - [`ChannelSet`] and [`ChannelSnapshot`]
//! - [`config`] - [`ChannelsConfig`] declarations
//! - [`codec`] - checkpoint byte codecs
//! - [`error`] - [`ChannelError`] types

pub mod channel;
pub mod channel_set;
pub mod codec;
pub mod config;
pub mod error;
pub mod json;
pub mod last_value;
pub mod last_value_after_finish;
pub mod slot;

// Re-export main types
pub use channel::Channel;
pub use channel_set::{ChannelSet, ChannelSnapshot};
pub use codec::{BincodeCodec, CheckpointCodec, JsonCodec};
pub use config::{ChannelDef, ChannelKind, ChannelsConfig};
pub use error::{ChannelError, Result};
pub use json::JsonChannel;
pub use last_value::LastValueChannel;
pub use last_value_after_finish::LastValueAfterFinishChannel;
pub use slot::Slot;

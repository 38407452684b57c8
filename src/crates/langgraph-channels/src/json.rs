//! JSON-erased channels for schedulers that mix channel kinds.
//!
//! [`JsonChannel`] is object safe: a scheduler stores `Box<dyn JsonChannel>`
//! per state key and exchanges plain `serde_json::Value`s with it. Checkpoint
//! payloads are `Option<Value>`, where `None` stands for "nothing stored".
//!
//! | Kind | Payload |
//! |------|---------|
//! | `LastValue` | the value itself |
//! | `LastValueAfterFinish` | `[value, finished]` |

use crate::channel::Channel;
use crate::config::ChannelKind;
use crate::error::{ChannelError, Result};
use crate::last_value::LastValueChannel;
use crate::last_value_after_finish::LastValueAfterFinishChannel;
use crate::slot::Slot;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// Channel operations over `serde_json::Value`
pub trait JsonChannel: Send + Sync + Debug {
    fn kind(&self) -> ChannelKind;

    /// Name of the declared value type
    fn value_type(&self) -> &'static str;

    /// Decode and apply one step's writes
    ///
    /// A value that does not decode into the declared type rejects the whole
    /// batch with `InvalidUpdate`.
    fn update_json(&mut self, values: Vec<Value>) -> Result<bool>;

    fn get_json(&self) -> Result<Value>;

    fn is_available(&self) -> bool;

    /// `None` when there is nothing to restore
    fn checkpoint_json(&self) -> Result<Option<Value>>;

    /// Build a new channel of the same kind and type from a payload
    fn restore_json(&self, checkpoint: Option<Value>) -> Result<Box<dyn JsonChannel>>;

    fn copy_box(&self) -> Box<dyn JsonChannel>;

    fn consume(&mut self) -> bool;

    fn finish(&mut self) -> bool;
}

impl Clone for Box<dyn JsonChannel> {
    fn clone(&self) -> Self {
        self.copy_box()
    }
}

fn decode_values<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|e| ChannelError::InvalidUpdate(format!("value does not decode: {}", e)))
        })
        .collect()
}

fn decode_checkpoint<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "Rejected checkpoint payload");
        ChannelError::InvalidCheckpoint(e.to_string())
    })
}

impl<T> JsonChannel for LastValueChannel<T>
where
    T: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static,
{
    fn kind(&self) -> ChannelKind {
        ChannelKind::LastValue
    }

    fn value_type(&self) -> &'static str {
        Channel::value_type(self)
    }

    fn update_json(&mut self, values: Vec<Value>) -> Result<bool> {
        let values = decode_values::<T>(values)?;
        self.update(values)
    }

    fn get_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.get()?)?)
    }

    fn is_available(&self) -> bool {
        Channel::is_available(self)
    }

    fn checkpoint_json(&self) -> Result<Option<Value>> {
        self.value()
            .value()
            .map(serde_json::to_value)
            .transpose()
            .map_err(Into::into)
    }

    fn restore_json(&self, checkpoint: Option<Value>) -> Result<Box<dyn JsonChannel>> {
        let slot = match checkpoint {
            None => Slot::Missing,
            Some(value) => Slot::Value(decode_checkpoint::<T>(value)?),
        };
        Ok(Box::new(self.from_checkpoint(slot)))
    }

    fn copy_box(&self) -> Box<dyn JsonChannel> {
        Box::new(self.copy())
    }

    fn consume(&mut self) -> bool {
        Channel::consume(self)
    }

    fn finish(&mut self) -> bool {
        Channel::finish(self)
    }
}

impl<T> JsonChannel for LastValueAfterFinishChannel<T>
where
    T: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static,
{
    fn kind(&self) -> ChannelKind {
        ChannelKind::LastValueAfterFinish
    }

    fn value_type(&self) -> &'static str {
        Channel::value_type(self)
    }

    fn update_json(&mut self, values: Vec<Value>) -> Result<bool> {
        let values = decode_values::<T>(values)?;
        self.update(values)
    }

    fn get_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.get()?)?)
    }

    fn is_available(&self) -> bool {
        Channel::is_available(self)
    }

    fn checkpoint_json(&self) -> Result<Option<Value>> {
        match self.checkpoint() {
            Slot::Missing => Ok(None),
            Slot::Value(pair) => Ok(Some(serde_json::to_value(pair)?)),
        }
    }

    fn restore_json(&self, checkpoint: Option<Value>) -> Result<Box<dyn JsonChannel>> {
        let slot = match checkpoint {
            None => Slot::Missing,
            Some(Value::Null) => {
                tracing::warn!("Rejected null LastValueAfterFinish checkpoint");
                return Err(ChannelError::InvalidCheckpoint(
                    "expected a [value, finished] pair, found null".to_string(),
                ));
            }
            Some(value) => Slot::Value(decode_checkpoint::<(T, bool)>(value)?),
        };
        Ok(Box::new(self.from_checkpoint(slot)))
    }

    fn copy_box(&self) -> Box<dyn JsonChannel> {
        Box::new(self.copy())
    }

    fn consume(&mut self) -> bool {
        Channel::consume(self)
    }

    fn finish(&mut self) -> bool {
        Channel::finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn last_value() -> Box<dyn JsonChannel> {
        Box::new(LastValueChannel::<Value>::new())
    }

    fn after_finish() -> Box<dyn JsonChannel> {
        Box::new(LastValueAfterFinishChannel::<Value>::new())
    }

    #[test]
    fn test_last_value_json_roundtrip() {
        let mut channel = last_value();
        assert_eq!(channel.checkpoint_json().unwrap(), None);

        channel.update_json(vec![json!({"status": "active"})]).unwrap();
        let payload = channel.checkpoint_json().unwrap();
        assert_eq!(payload, Some(json!({"status": "active"})));

        let restored = channel.restore_json(payload).unwrap();
        assert_eq!(restored.kind(), ChannelKind::LastValue);
        assert_eq!(restored.get_json().unwrap(), json!({"status": "active"}));
    }

    #[test]
    fn test_last_value_restores_null() {
        let channel = last_value();
        let restored = channel.restore_json(Some(Value::Null)).unwrap();
        assert!(restored.is_available());
        assert_eq!(restored.checkpoint_json().unwrap(), Some(Value::Null));

        let missing = channel.restore_json(None).unwrap();
        assert!(!missing.is_available());
    }

    #[test]
    fn test_typed_update_rejects_wrong_type() {
        let mut channel: Box<dyn JsonChannel> = Box::new(LastValueChannel::<i64>::new());
        let err = channel.update_json(vec![json!("nope")]).unwrap_err();
        assert!(matches!(err, ChannelError::InvalidUpdate(_)));
        assert!(!channel.is_available());
    }

    #[test]
    fn test_typed_restore_rejects_wrong_type() {
        let channel: Box<dyn JsonChannel> = Box::new(LastValueChannel::<i64>::new());
        let err = channel.restore_json(Some(json!("nope"))).unwrap_err();
        assert!(matches!(err, ChannelError::InvalidCheckpoint(_)));
    }

    #[test]
    fn test_after_finish_checkpoint_is_pair() {
        let mut channel = after_finish();
        assert_eq!(channel.checkpoint_json().unwrap(), None);

        channel.update_json(vec![json!(10)]).unwrap();
        assert_eq!(channel.checkpoint_json().unwrap(), Some(json!([10, false])));

        assert!(channel.finish());
        assert_eq!(channel.checkpoint_json().unwrap(), Some(json!([10, true])));

        let restored = channel.restore_json(Some(json!([10, true]))).unwrap();
        assert_eq!(restored.kind(), ChannelKind::LastValueAfterFinish);
        assert_eq!(restored.get_json().unwrap(), json!(10));
    }

    #[test]
    fn test_after_finish_rejects_malformed_payloads() {
        let channel = after_finish();

        let err = channel.restore_json(Some(Value::Null)).unwrap_err();
        assert!(matches!(err, ChannelError::InvalidCheckpoint(_)));

        for bad in [json!(5), json!([1]), json!([1, "yes"]), json!({"value": 1})] {
            assert!(channel.restore_json(Some(bad)).is_err());
        }

        let untouched = channel.restore_json(None).unwrap();
        assert!(!untouched.is_available());
        assert_eq!(untouched.checkpoint_json().unwrap(), None);
    }

    #[test]
    fn test_boxed_clone_is_independent() {
        let mut channel = after_finish();
        channel.update_json(vec![json!("a")]).unwrap();
        channel.finish();

        let mut copied = channel.clone();
        copied.consume();
        assert!(!copied.is_available());
        assert_eq!(channel.get_json().unwrap(), json!("a"));
    }
}

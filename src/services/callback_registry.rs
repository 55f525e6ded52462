use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use serde_json::Value;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

const CALLBACK_PREFIX: &str = "wikiCallback_";

/// Routes callback-wrapped responses (`name({...})`) to the request that named them.
///
/// Each request registers a uniquely named one-shot handler before it is issued.
/// The handler is removed when its [`CallbackSubscription`] is dropped, so success,
/// failure and timeout all release the name.
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: Mutex<HashMap<String, oneshot::Sender<Value>>>,
}

impl CallbackRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn register(self: &Arc<Self>) -> CallbackSubscription {
        let name = format!("{}{}", CALLBACK_PREFIX, Uuid::new_v4().simple());
        let (sender, receiver) = oneshot::channel();
        self.lock().insert(name.clone(), sender);

        CallbackSubscription {
            name,
            receiver,
            registry: Arc::clone(self),
        }
    }

    /// Deliver a raw callback-wrapped body to the handler it names.
    pub fn dispatch(&self, body: &str) -> AppResult<()> {
        let (name, payload) = split_callback_body(body).ok_or_else(|| {
            AppError::NetworkError("Failed to load Wikipedia data: response was not a callback".to_string())
        })?;

        let sender = self.lock().remove(name).ok_or_else(|| {
            AppError::NetworkError(format!("No pending request for callback '{}'", name))
        })?;

        let data: Value = serde_json::from_str(payload).map_err(|e| {
            AppError::NetworkError(format!("Failed to load Wikipedia data: {}", e))
        })?;

        if sender.send(data).is_err() {
            log::debug!("Callback {} resolved after its request was abandoned", name);
        }
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn unregister(&self, name: &str) {
        self.lock().remove(name);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, oneshot::Sender<Value>>> {
        self.handlers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct CallbackSubscription {
    name: String,
    receiver: oneshot::Receiver<Value>,
    registry: Arc<CallbackRegistry>,
}

impl CallbackSubscription {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn recv(&mut self) -> AppResult<Value> {
        (&mut self.receiver).await.map_err(|_| {
            AppError::NetworkError("Callback was unregistered before a response arrived".to_string())
        })
    }
}

impl Drop for CallbackSubscription {
    fn drop(&mut self) {
        self.registry.unregister(&self.name);
    }
}

/// Splits `/**/name({...});` into the handler name and its JSON argument.
fn split_callback_body(body: &str) -> Option<(&str, &str)> {
    let body = body.trim();
    let body = body.strip_prefix("/**/").unwrap_or(body).trim_start();

    let open = body.find('(')?;
    let close = body.rfind(')')?;
    if close <= open {
        return None;
    }

    let name = body[..open].trim();
    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$');
    if !valid_name {
        return None;
    }

    Some((name, &body[open + 1..close]))
}

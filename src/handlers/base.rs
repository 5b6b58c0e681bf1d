use serde_json::{Map, Value};

use crate::error::Result;

/// A parsed request body.
pub type Payload = Map<String, Value>;

/// A handler for one kind of incoming message (`log`, `metric`, ...).
pub trait MessageHandler: Send + Sync {
    /// The message type this handler serves; also its route, `/<type>`.
    fn message_type(&self) -> &'static str;
    fn handle(&self, payload: &Payload) -> Result<()>;
}

/// Looks a field up under its current name first, then under legacy aliases.
pub(crate) fn lookup<'a>(payload: &'a Payload, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| payload.get(*key))
}

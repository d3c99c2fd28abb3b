//! Backend request model.
//!
//! Each backend call is a [`Request`]: a command text, a stale token and a single-use reply
//! handler. A reply for a request whose token went stale is dropped silently, this is the only
//! cancellation mechanism, backend work is never interrupted.

use crate::error::Error;
use crate::fv_debug;
use crate::log::BACKEND;
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

mod exchange;

pub use exchange::{exchange, BackendExchanger, ChannelTransport};

/// Backend reply text or an evaluation error.
pub type Reply = Result<String, Error>;

/// Staleness flag of a tree node. All clones share the same flag.
#[derive(Clone, Default, Debug)]
pub struct StaleToken(Arc<AtomicBool>);

impl StaleToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark node as stale, all pending replies for it will be dropped.
    pub fn mark_stale(&self) {
        self.0.store(true, Ordering::Release)
    }

    pub fn is_stale(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Command text sent to the backend as is.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BackendCommand(String);

impl BackendCommand {
    /// Expand object children by object id: `#<id>.`.
    pub fn dereference(object_id: &str) -> Self {
        Self(format!("#{object_id}."))
    }

    /// Evaluate markup value into its string form.
    pub fn stringify(expression: &str) -> Self {
        Self(format!("{expression}.toXMLString()"))
    }

    /// Assign a new value to an expression.
    pub fn assign(expression: &str, value: &str) -> Self {
        Self(format!("{expression}={value}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BackendCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

type ReplyHandler = Box<dyn FnOnce(Reply) + Send>;

pub struct Request {
    id: Uuid,
    command: BackendCommand,
    token: StaleToken,
    handler: ReplyHandler,
}

impl Debug for Request {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("id", &self.id)
            .field("command", &self.command)
            .field("stale", &self.token.is_stale())
            .finish()
    }
}

impl Request {
    pub fn new(
        command: BackendCommand,
        token: StaleToken,
        handler: impl FnOnce(Reply) + Send + 'static,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            command,
            token,
            handler: Box::new(handler),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn command(&self) -> &BackendCommand {
        &self.command
    }

    pub fn is_stale(&self) -> bool {
        self.token.is_stale()
    }

    /// Pass reply into request handler. Does nothing if request is stale.
    pub fn deliver(self, reply: Reply) {
        if self.token.is_stale() {
            fv_debug!(target: BACKEND, "drop reply for stale request {} `{}`", self.id, self.command);
            return;
        }
        fv_debug!(target: BACKEND, "reply for request {} `{}`", self.id, self.command);
        (self.handler)(reply)
    }
}

/// Channel to the backend process (external collaborator).
pub trait Transport: Send + Sync {
    /// Send request command to the backend. Reply must be delivered through
    /// [`Request::deliver`], at most once, from any thread.
    fn submit(&self, request: Request);
}

/// Backend object id normalization (external collaborator).
pub trait ObjectIdFormatter: Send + Sync {
    fn format(&self, raw_id: &str) -> String;
}

/// Use object id as is, without surrounding whitespaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainObjectId;

impl ObjectIdFormatter for PlainObjectId {
    fn format(&self, raw_id: &str) -> String {
        raw_id.trim().to_string()
    }
}

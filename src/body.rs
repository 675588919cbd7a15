//! Request body handle with optional replay buffering.
//!
//! hyper hands us the body as a one-shot stream. That is the right primitive
//! for a proxy, and the wrong one for a staged pipeline: the moment two
//! stages want the same bytes — an auth stage peeking at form credentials,
//! then the handler echoing the payload — a raw stream leaves the second
//! reader with nothing.
//!
//! [`Body`] wraps the stream in a request-scoped handle with two modes:
//!
//! - **single-read** (default): the first read drains the stream; every
//!   later read returns [`BodyError::Consumed`]. Explicit failure, never
//!   silently empty bytes.
//! - **replay** (enabled via [`Router::buffer_bodies`](crate::Router::buffer_bodies)):
//!   the first read captures the full content into a buffer, and every read
//!   — first or fifteenth — returns the identical bytes.
//!
//! The handle is `Clone`; all clones share one state behind an async mutex,
//! so concurrent readers inside a request cannot tear it.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use http_body_util::combinators::UnsyncBoxBody;
use tokio::sync::Mutex;

/// The raw transport stream before the first read.
type RawBody = UnsyncBoxBody<Bytes, hyper::Error>;

/// Where a request body is in its lifecycle.
///
/// `Pending → Buffered` (replay mode, terminal and idempotent) or
/// `Pending → Drained` (single-read mode; reads from here fail).
enum State {
    Pending(RawBody),
    Buffered(Bytes),
    Drained,
}

/// Handle to one request's body. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Body {
    replay: bool,
    state: Arc<Mutex<State>>,
}

impl Body {
    pub(crate) fn new(raw: RawBody, replay: bool) -> Self {
        Self { replay, state: Arc::new(Mutex::new(State::Pending(raw))) }
    }

    /// Reads the full body as bytes.
    ///
    /// In replay mode every call returns the same bytes. In single-read mode
    /// the second call returns [`BodyError::Consumed`].
    pub async fn bytes(&self) -> Result<Bytes, BodyError> {
        let mut state = self.state.lock().await;
        match std::mem::replace(&mut *state, State::Drained) {
            State::Pending(raw) => {
                let collected = raw.collect().await.map_err(BodyError::Transport)?;
                let bytes = collected.to_bytes();
                if self.replay {
                    *state = State::Buffered(bytes.clone());
                }
                Ok(bytes)
            }
            State::Buffered(bytes) => {
                let copy = bytes.clone();
                *state = State::Buffered(bytes);
                Ok(copy)
            }
            State::Drained => Err(BodyError::Consumed),
        }
    }

    /// Reads the full body as UTF-8 text.
    pub async fn text(&self) -> Result<String, BodyError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.into()).map_err(|_| BodyError::Utf8)
    }

    /// Reads the body as `application/x-www-form-urlencoded` key/value pairs.
    ///
    /// Counts as a read: in single-read mode a later `text()` or `bytes()`
    /// call fails even though this one parsed instead of returning raw text.
    pub async fn form(&self) -> Result<Vec<(String, String)>, BodyError> {
        let bytes = self.bytes().await?;
        serde_urlencoded::from_bytes(&bytes).map_err(|e| BodyError::Decode(e.to_string()))
    }

    /// Whether a read from this handle can still succeed.
    pub async fn is_readable(&self) -> bool {
        !matches!(*self.state.lock().await, State::Drained)
    }

    #[cfg(test)]
    pub(crate) fn for_tests(content: &str, replay: bool) -> Self {
        let full = http_body_util::Full::new(Bytes::copy_from_slice(content.as_bytes()))
            .map_err(|never| match never {});
        Self::new(UnsyncBoxBody::new(full), replay)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").field("replay", &self.replay).finish_non_exhaustive()
    }
}

// ── BodyError ─────────────────────────────────────────────────────────────────

/// Why a body read failed.
///
/// `Consumed` is the interesting one: a prior stage drained the stream and
/// replay buffering was not enabled. The rest are ordinary read/decode
/// failures.
#[derive(Debug)]
pub enum BodyError {
    /// The body was already read once and the router is not buffering.
    Consumed,
    /// The transport stream failed mid-read.
    Transport(hyper::Error),
    /// The body is not valid UTF-8.
    Utf8,
    /// The body is not valid urlencoded form data.
    Decode(String),
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consumed => write!(f, "request body has already been consumed"),
            Self::Transport(e) => write!(f, "body read failed: {e}"),
            Self::Utf8 => write!(f, "request body is not valid utf-8"),
            Self::Decode(msg) => write!(f, "form decode failed: {msg}"),
        }
    }
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

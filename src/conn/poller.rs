//! Readiness demultiplexer.
//!
//! Thin wrapper over [`mio::Poll`] (epoll on Linux, kqueue on the BSDs
//! and macOS) exposing uniform single-socket semantics: one `wait` call
//! returning the aggregated readiness of the connection socket.
//! Interruption by a signal is reported as a wait that produced no
//! events, so harmless signals never break the caller's loop.

use std::io;
use std::time::Duration;

use mio::net::TcpStream;
use mio::{Events, Interest, Poll, Token};

use crate::error::{ClientError, Result};

const CLIENT: Token = Token(0);
const EVENTS_CAPACITY: usize = 8;

/// Aggregated readiness of the connection socket after one wait.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Readiness {
    pub readable: bool,
    pub writable: bool,
    pub read_closed: bool,
    pub error: bool,
}

pub(crate) struct Poller {
    poll: Poll,
    events: Events,
}

impl Poller {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            poll: Poll::new().map_err(ClientError::PollCreate)?,
            events: Events::with_capacity(EVENTS_CAPACITY),
        })
    }

    /// Register a freshly connecting socket for read and write readiness.
    /// The first writable event signals that the TCP handshake completed.
    pub(crate) fn register(&self, stream: &mut TcpStream) -> Result<()> {
        self.poll
            .registry()
            .register(stream, CLIENT, Interest::READABLE | Interest::WRITABLE)
            .map_err(ClientError::PollRegister)
    }

    /// Drop write interest once the handshake has fired; sends are
    /// attempted eagerly, so write readiness carries no further signal.
    pub(crate) fn rearm_readable(&self, stream: &mut TcpStream) -> Result<()> {
        self.poll
            .registry()
            .reregister(stream, CLIENT, Interest::READABLE)
            .map_err(ClientError::PollRegister)
    }

    pub(crate) fn deregister(&self, stream: &mut TcpStream) -> io::Result<()> {
        self.poll.registry().deregister(stream)
    }

    /// Wait up to `timeout` for readiness. `None` waits indefinitely,
    /// `Some(Duration::ZERO)` is a non-blocking poll.
    pub(crate) fn wait(&mut self, timeout: Option<Duration>) -> Result<Readiness> {
        if let Err(err) = self.poll.poll(&mut self.events, timeout) {
            // EINTR: a signal arrived while the syscall was blocked
            // (child exit, window resize, continue). Report no events and
            // let the caller's loop come back around.
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(Readiness::default());
            }
            return Err(ClientError::PollWait(err));
        }

        let mut ready = Readiness::default();
        for event in self.events.iter() {
            if event.token() != CLIENT {
                continue;
            }
            ready.readable |= event.is_readable();
            ready.writable |= event.is_writable();
            ready.read_closed |= event.is_read_closed();
            ready.error |= event.is_error();
        }
        Ok(ready)
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller").finish_non_exhaustive()
    }
}

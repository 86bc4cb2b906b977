//! Error types for the Twitch chat client.
//!
//! This module defines the connection-level error taxonomy surfaced through
//! [`Connection::last_error`](crate::conn::Connection::last_error) and the
//! parse errors produced by the message layer.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Convenience type alias for Results using [`ClientError`].
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Top-level connection and I/O errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Host name did not resolve to any address.
    #[error("failed to resolve {host}:{port}")]
    Resolve {
        /// Host that failed to resolve.
        host: String,
        /// Port the resolution was attempted with.
        port: u16,
    },

    /// Socket creation or connect initiation failed.
    #[error("failed to initiate connect: {0}")]
    SocketConnect(#[source] io::Error),

    /// Outbound write failed. A kernel-buffer-full condition is fatal for
    /// that send; the client keeps no outbound queue.
    #[error("send failed: {0}")]
    SocketSend(#[source] io::Error),

    /// Inbound read failed.
    #[error("recv failed: {0}")]
    SocketRecv(#[source] io::Error),

    /// Readiness queue could not be created.
    #[error("readiness queue creation failed: {0}")]
    PollCreate(#[source] io::Error),

    /// Socket could not be registered with the readiness queue.
    #[error("readiness registration failed: {0}")]
    PollRegister(#[source] io::Error),

    /// The readiness wait itself failed.
    #[error("readiness wait failed: {0}")]
    PollWait(#[source] io::Error),

    /// Peer closed the connection (zero-byte read).
    #[error("connection closed by peer")]
    ConnClosed,

    /// Peer hung up (hangup readiness event without a clean close).
    #[error("connection hung up")]
    ConnHangup,

    /// The socket reported an error condition.
    #[error("socket error: {0}")]
    ConnSocket(#[source] io::Error),

    /// No inbound traffic within the liveness deadline.
    #[error("no inbound traffic for {0:?}")]
    Timeout(Duration),

    /// A single inbound line overflowed the fixed read buffer, so the
    /// framer cannot make forward progress.
    #[error("inbound line exceeds the {0}-byte read buffer")]
    LineOverflow(usize),

    /// Operation requires an established connection.
    #[error("not connected")]
    NotConnected,

    /// An inbound line failed to parse.
    #[error("invalid message: {line}")]
    InvalidMessage {
        /// The raw line that failed to parse.
        line: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

impl ClientError {
    /// The payload-free classification of this error, suitable for storing
    /// in [`Connection::last_error`](crate::conn::Connection::last_error).
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Resolve { .. } => ErrorKind::Resolve,
            Self::SocketConnect(_) => ErrorKind::SocketConnect,
            Self::SocketSend(_) => ErrorKind::SocketSend,
            Self::SocketRecv(_) => ErrorKind::SocketRecv,
            Self::PollCreate(_) => ErrorKind::PollCreate,
            Self::PollRegister(_) => ErrorKind::PollRegister,
            Self::PollWait(_) => ErrorKind::PollWait,
            Self::ConnClosed => ErrorKind::ConnClosed,
            Self::ConnHangup => ErrorKind::ConnHangup,
            Self::ConnSocket(_) => ErrorKind::ConnSocket,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::LineOverflow(_) => ErrorKind::LineOverflow,
            Self::NotConnected => ErrorKind::NotConnected,
            Self::InvalidMessage { .. } => ErrorKind::InvalidMessage,
        }
    }
}

/// Classification of [`ClientError`] without the error payload.
///
/// `io::Error` is not `Clone`, so the connection records the most recent
/// failure as one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// See [`ClientError::Resolve`].
    Resolve,
    /// See [`ClientError::SocketConnect`].
    SocketConnect,
    /// See [`ClientError::SocketSend`].
    SocketSend,
    /// See [`ClientError::SocketRecv`].
    SocketRecv,
    /// See [`ClientError::PollCreate`].
    PollCreate,
    /// See [`ClientError::PollRegister`].
    PollRegister,
    /// See [`ClientError::PollWait`].
    PollWait,
    /// See [`ClientError::ConnClosed`].
    ConnClosed,
    /// See [`ClientError::ConnHangup`].
    ConnHangup,
    /// See [`ClientError::ConnSocket`].
    ConnSocket,
    /// See [`ClientError::Timeout`].
    Timeout,
    /// See [`ClientError::LineOverflow`].
    LineOverflow,
    /// See [`ClientError::NotConnected`].
    NotConnected,
    /// See [`ClientError::InvalidMessage`].
    InvalidMessage,
}

/// Errors encountered when parsing an inbound IRC line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty after stripping the CR-LF terminator.
    #[error("empty message")]
    EmptyMessage,

    /// The line did not match the tagged-IRC grammar.
    #[error("parse error at byte {position} while {context}")]
    Syntax {
        /// Byte offset where parsing failed.
        position: usize,
        /// What was being parsed when the error occurred.
        context: &'static str,
    },

    /// A CTCP envelope carried no space between the CTCP command and its
    /// payload.
    #[error("ctcp payload without a command separator")]
    CtcpMissingSeparator,
}

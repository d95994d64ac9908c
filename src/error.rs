// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Error type shared by the writer, the sinks and the publisher binary.
//!
//! Encoding a frame has no failure path of its own; errors only arise once a
//! message leaves the encoder (serialization, transport, configuration).

use edgefirst_schemas::serde_cdr;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// I/O error (clock, sockets)
    Io(std::io::Error),
    /// CDR serialization of a message failed
    Serialize(serde_cdr::Error),
    /// Zenoh session or publisher error
    Zenoh(zenoh::Error),
    /// System time error
    SystemTime(std::time::SystemTimeError),
    /// Configuration error
    Config(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serialize(err) => write!(f, "serialization error: {:?}", err),
            Error::Zenoh(err) => write!(f, "zenoh error: {}", err),
            Error::SystemTime(err) => write!(f, "system time error: {}", err),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_cdr::Error> for Error {
    fn from(err: serde_cdr::Error) -> Self {
        Error::Serialize(err)
    }
}

impl From<zenoh::Error> for Error {
    fn from(err: zenoh::Error) -> Self {
        Error::Zenoh(err)
    }
}

impl From<std::time::SystemTimeError> for Error {
    fn from(err: std::time::SystemTimeError) -> Self {
        Error::SystemTime(err)
    }
}

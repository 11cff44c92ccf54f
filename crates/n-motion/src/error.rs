//! Error types for the fallible edges of the crate.
//!
//! Motions, parsing and execution never fail. Only loading text and options
//! from outside the process can go wrong.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to build a [`Buffer`](crate::buffer::Buffer).
#[derive(Error, Debug)]
pub enum BufferError {
    #[error("text is empty")]
    Empty,

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to load or apply [`Options`](crate::options::Options).
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown option: {0}")]
    Unknown(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("{0} is a number option; use {0}=N")]
    NotBoolean(String),
}

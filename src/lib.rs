#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod error;
pub mod feed;

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Feed endpoint of the local telemetry backend.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8000/ws";

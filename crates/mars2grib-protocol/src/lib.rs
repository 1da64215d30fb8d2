//! The MARS call-back TCP protocol collaborator (§4.7, §6 "MARS wire
//! framing").
//!
//! This is an external collaborator to the encoder core (§1): the encoder
//! consumes/produces `(request, byte stream)` pairs and never imports this
//! crate. It exists so the workspace has a concrete, idiomatic-Rust answer
//! for the one genuinely concurrent, I/O-bound component the surrounding
//! system needs (§5), rather than leaving it as prose.

pub mod callback;
pub mod client;
pub mod config;
pub mod error;
pub mod nonce;
pub mod task;
pub mod wire;

pub use callback::CallbackConnection;
pub use client::{DhsClient, Outcome};
pub use config::MarsClientConfig;
pub use error::{ConfigError, ProtocolError};
pub use task::ClientTask;

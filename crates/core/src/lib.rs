//! # QBase Core
//!
//! Request construction and response translation for the QuickBase XML API.
//!
//! This crate contains:
//! - Session state and the option merger
//! - The wire encoder for XML bodies and query strings
//! - Response envelope parsing, error classification and decoders
//! - The action registry and the generic dispatcher
//! - The notification channel
//! - The `Transport` port implemented by infrastructure adapters
//!
//! ## Architecture Principles
//! - Only depends on `qbase-domain`
//! - No HTTP or socket code, transports come in through [`ports::Transport`]
//! - Decoders are pure functions over a parsed envelope

pub mod actions;
pub mod classify;
pub mod client;
pub mod decode;
pub mod events;
pub mod options;
pub mod params;
pub mod ports;
pub mod registry;
pub mod session;
pub mod wire;
pub mod xml;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export the public surface
pub use client::QuickBaseClient;
pub use events::{ClientEvent, EventEmitter, ListenerId};
pub use options::{CallDescriptor, CallOptions};
pub use params::ParamValue;
pub use ports::{Transport, TransportRequest, TransportResponse};
pub use registry::{Action, ActionSpec, HttpMethod, ResponseFormat, TargetRule};
pub use session::SessionState;
pub use wire::WirePayload;

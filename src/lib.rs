//! # `PixSecret`
//!
//! Typed action dispatch for the `PixSecret` key-registration and
//! payment-relay contract.
//!
//! ## Architecture
//!
//! - **Actions**: the fixed catalog of user intents, each with an ordered
//!   list of required fields and a builder for its contract message
//! - **Dispatch**: validates a request, sends one query or transaction
//!   through a [`ContractClient`] and normalizes the result into an
//!   [`Outcome`]
//! - **Client**: the seam a chain SDK plugs into; nothing here holds global
//!   client state
//!
//! Contract semantics (ownership, pricing, whitelists) live on-chain and are
//! treated as opaque.

#![forbid(unsafe_code)]
#![deny(clippy::all, rust_2018_idioms)]
#![warn(clippy::pedantic, clippy::nursery, missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::future_not_send,
    // Const fn not always beneficial for complex types
    clippy::missing_const_for_fn,
    // must_use on every fn is excessive
    clippy::must_use_candidate,
    // Field naming matches contract terminology
    clippy::struct_field_names
)]

pub mod actions;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod msg;
pub mod types;

pub use actions::{Action, ActionError, ActionKind, ActionRequest, Field, RemoteCall};
pub use client::{ClientError, ContractClient, ContractRef, ExecuteRequest, TxResponse};
pub use config::{ConfigError, Settings};
pub use dispatch::{dispatch, DispatchError, Dispatcher, Outcome, GAS_LIMIT};
pub use msg::{ExecuteMsg, QueryMsg};
pub use types::{Code, CodeExistenceResponse, Coin, InfoCodeResponse, Permit};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

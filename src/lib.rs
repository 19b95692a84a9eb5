//! Building blocks for a minimal file-editing agent loop.
//!
//! The crate provides a small runtime with:
//! - A model gateway abstraction (`ModelGateway`) over a text-completion endpoint.
//! - A line-oriented tool-call parser (`parse_tool_calls`).
//! - A whitelisted capability interface (`Capability` and `CapabilityRegistry`).
//! - An `Agent` that alternates between the model and capabilities while
//!   growing an append-only transcript.

mod agent;
mod config;
mod error;
mod gateway;
mod message;
mod parser;
mod tool;
mod toolkit;
mod transcript;

pub use agent::Agent;
pub use config::AgentConfig;
pub use error::{EngineError, Result};
pub use gateway::{GatewayError, HttpGateway, ModelGateway, StubGateway, TRANSPORT_FAILURE_REPLY};
pub use message::{Entry, Role};
pub use parser::{parse_tool_calls, ToolCall};
pub use tool::{
    Capability, CapabilityDescription, CapabilityError, CapabilityRegistry, ToolArgs, ToolOutput,
};
pub use toolkit::file_toolkit;
pub use transcript::Transcript;

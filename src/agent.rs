use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::gateway::{ModelGateway, TRANSPORT_FAILURE_REPLY};
use crate::message::Entry;
use crate::parser::parse_tool_calls;
use crate::tool::CapabilityRegistry;
use crate::transcript::Transcript;

/// An agent that alternates between the model gateway and registered
/// capabilities until a reply carries no tool calls.
///
/// One `respond` call resolves one user turn completely, including all nested
/// tool-execution rounds, before the next turn is accepted. Everything runs
/// sequentially; the transcript is the only state threaded through rounds.
pub struct Agent<G: ModelGateway> {
    gateway: Arc<G>,
    capabilities: CapabilityRegistry,
    transcript: Transcript,
    input_limit: usize,
    max_rounds: usize,
}

impl<G: ModelGateway> Agent<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            capabilities: CapabilityRegistry::new(),
            transcript: Transcript::seeded("You are a helpful agent."),
            input_limit: 0,
            max_rounds: 8,
        }
    }

    /// Re-seeds the transcript; call before the first turn.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.transcript = Transcript::seeded(prompt);
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilityRegistry) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Maximum accepted input length in characters. `0` means unlimited.
    pub fn with_input_limit(mut self, limit: usize) -> Self {
        self.input_limit = limit;
        self
    }

    /// Maximum tool-execution rounds per turn. `0` removes the cap.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run one user turn. Returns the final assistant reply.
    ///
    /// Over-length input is rejected before the transcript is touched. A
    /// transport failure substitutes the sentinel reply, which carries no
    /// tool syntax and therefore ends the turn like any final reply.
    pub async fn respond(&mut self, user_input: impl Into<String>) -> Result<String> {
        let user_input = user_input.into();
        if self.input_limit > 0 && user_input.chars().count() > self.input_limit {
            return Err(EngineError::InputTooLong {
                limit: self.input_limit,
            });
        }

        self.transcript.push(Entry::user(user_input));

        let mut rounds = 0usize;
        loop {
            let prompt = self.transcript.render_prompt();
            let reply = match self.gateway.complete(&prompt).await {
                Ok(reply) => reply,
                Err(err) => {
                    warn!(%err, "model gateway failed, substituting sentinel reply");
                    TRANSPORT_FAILURE_REPLY.to_string()
                }
            };

            let calls = parse_tool_calls(&reply);
            if calls.is_empty() {
                self.transcript.push(Entry::assistant(reply.clone()));
                return Ok(reply);
            }

            rounds += 1;
            if self.max_rounds > 0 && rounds > self.max_rounds {
                return Err(EngineError::RoundLimitExceeded {
                    limit: self.max_rounds,
                });
            }

            for call in calls {
                let Some(capability) = self.capabilities.get(&call.name) else {
                    debug!(name = %call.name, "skipping unregistered capability");
                    continue;
                };
                let text = match capability.call(&call.args).await {
                    Ok(result) => serde_json::to_string(&result)?,
                    Err(err) => {
                        debug!(name = %call.name, %err, "capability failed");
                        json!({ "error": err.to_string() }).to_string()
                    }
                };
                self.transcript.push(Entry::tool(text));
            }
        }
    }
}

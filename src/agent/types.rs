// Agent types

/// Chat session configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Most recent history messages sent with each request
    pub history_window: usize,
    /// Ask the model to introduce itself at startup
    pub greeting: bool,
    /// Agent identity
    pub identity: String,
    /// Sent once at startup when `greeting` is set
    pub greeting_prompt: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            history_window: 18,
            greeting: true,
            identity: "Pucky".to_string(),
            greeting_prompt: "Hello! Introduce yourself briefly as Pucky, a helpful coding agent, \
                              and tell the user what you can do."
                .to_string(),
        }
    }
}

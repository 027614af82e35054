use async_trait::async_trait;

/// Seam between the chat front-end and an agent backend.
///
/// One connection carries at most one live session. Methods take `&mut self`
/// because opening, sending, and ending all advance backend-held state; the
/// REPL serializes calls, so no internal locking exists anywhere behind this
/// trait.
#[async_trait]
pub trait AgentConnection: Send {
    /// Opens a session. Returns the agent's greeting, or `None` when the
    /// server sent none.
    async fn open(&mut self) -> Result<Option<String>, String>;

    /// Sends one user message and returns the agent's reply text. `None`
    /// means the reply carried no content, which is not an error.
    async fn send(&mut self, text: &str) -> Result<Option<String>, String>;

    /// Ends the live session. Fails when none is open.
    async fn end(&mut self) -> Result<(), String>;

    fn is_open(&self) -> bool;
}

use async_trait::async_trait;

use crate::connection::AgentConnection;

const GREETING: &str = "Hello! You are chatting with the built-in mock agent.";

/// Deterministic in-process agent. Replies cycle through a fixed script, so
/// the REPL can be exercised without credentials or network access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConnection {
    replies: Vec<String>,
    open: bool,
    sends: usize,
}

impl MockConnection {
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies,
            open: false,
            sends: 0,
        }
    }
}

impl Default for MockConnection {
    fn default() -> Self {
        Self::new(vec![
            "Acknowledged. The mock agent replays a fixed script instead of calling Agentforce."
                .to_string(),
            "Still here. Use /end to end the session or /quit to leave.".to_string(),
            "That is the whole script; replies repeat from the top.".to_string(),
        ])
    }
}

#[async_trait]
impl AgentConnection for MockConnection {
    async fn open(&mut self) -> Result<Option<String>, String> {
        self.open = true;
        self.sends = 0;
        Ok(Some(GREETING.to_string()))
    }

    async fn send(&mut self, _text: &str) -> Result<Option<String>, String> {
        // Lazy session creation, mirroring the real backend.
        if !self.open {
            self.open = true;
            self.sends = 0;
        }

        if self.replies.is_empty() {
            return Ok(None);
        }

        let reply = self.replies[self.sends % self.replies.len()].clone();
        self.sends += 1;
        Ok(Some(reply))
    }

    async fn end(&mut self) -> Result<(), String> {
        if !self.open {
            return Err("no active session".to_string());
        }

        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_cycle_through_the_script() {
        let mut connection = MockConnection::new(vec!["one".to_string(), "two".to_string()]);

        let greeting = connection.open().await.expect("open should succeed");
        assert_eq!(greeting.as_deref(), Some(GREETING));
        assert!(connection.is_open());

        assert_eq!(
            connection.send("first").await.expect("send should succeed"),
            Some("one".to_string())
        );
        assert_eq!(
            connection.send("second").await.expect("send should succeed"),
            Some("two".to_string())
        );
        assert_eq!(
            connection.send("third").await.expect("send should succeed"),
            Some("one".to_string())
        );
    }

    #[tokio::test]
    async fn send_opens_a_session_lazily() {
        let mut connection = MockConnection::new(vec!["one".to_string()]);
        assert!(!connection.is_open());

        let reply = connection.send("hello").await.expect("send should succeed");

        assert_eq!(reply, Some("one".to_string()));
        assert!(connection.is_open());
    }

    #[tokio::test]
    async fn end_requires_a_session_and_open_restarts_the_script() {
        let mut connection = MockConnection::new(vec!["one".to_string(), "two".to_string()]);

        let error = connection.end().await.expect_err("end should need a session");
        assert_eq!(error, "no active session");

        connection.open().await.expect("open should succeed");
        connection.send("hi").await.expect("send should succeed");
        connection.end().await.expect("end should succeed");
        assert!(!connection.is_open());

        connection.open().await.expect("reopen should succeed");
        assert_eq!(
            connection.send("hi").await.expect("send should succeed"),
            Some("one".to_string())
        );
    }
}

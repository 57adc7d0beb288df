use crate::traits::{ChatClient, ChatRequest, ChatResponse};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Deterministic client that replays queued replies and records every request.
///
/// Used by engine tests in place of a real provider.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<ChatResponse, String>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<ChatResponse>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn push(&self, reply: ChatResponse) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Ok(reply));
        }
    }

    /// Queue a provider failure
    pub fn push_error(&self, message: impl Into<String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(message.into()));
        }
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let next = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|_| anyhow::anyhow!("scripted client lock poisoned"))?;
            requests.push(request);

            let mut replies = self
                .replies
                .lock()
                .map_err(|_| anyhow::anyhow!("scripted client lock poisoned"))?;
            replies.pop_front()
        };

        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => anyhow::bail!("scripted client has no replies left"),
        }
    }
}

//! One JSON request per input line, answered with SSE frames.

use anyhow::Result;
use packpal_graph::{streaming::to_sse_frame, Graph};
use packpal_types::{ChatMessage, Item, StreamEvent, Trip, TurnInput};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Chat(ChatTurn),
    History { thread_id: String },
    Resume { thread_id: String },
}

/// A user message with the caller's current trip and packing list
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub user_id: Option<String>,
    /// Defaults to the trip id
    #[serde(default)]
    pub thread_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub trip: Trip,
    #[serde(default)]
    pub packing_list: Vec<Item>,
}

impl ChatTurn {
    pub fn into_turn_input(self) -> TurnInput {
        let mut input = match self.thread_id.filter(|id| !id.trim().is_empty()) {
            Some(thread_id) => TurnInput::new(thread_id, self.message, self.trip, self.packing_list),
            None => TurnInput::for_trip(self.message, self.trip, self.packing_list),
        };
        input.user_id = self.user_id;
        input
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryReply {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub thread_id: String,
    pub chat_history: Vec<ChatMessage>,
}

/// Handle one input line, writing every resulting frame to `out`
pub async fn handle_line<W>(graph: &Graph, line: &str, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let request = match serde_json::from_str::<Request>(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected request line: {}", e);
            let event = StreamEvent::error("invalid_request", e.to_string());
            return write_frame(out, &event).await;
        }
    };

    match request {
        Request::Chat(turn) => {
            let input = turn.into_turn_input();
            tracing::info!(
                "Chat request thread={} user={:?}",
                input.thread_id,
                input.user_id
            );
            forward(graph.spawn_run(input), out).await
        }
        Request::Resume { thread_id } => {
            tracing::info!("Resume request thread={}", thread_id);
            forward(graph.spawn_resume(thread_id), out).await
        }
        Request::History { thread_id } => {
            tracing::info!("History request thread={}", thread_id);
            match graph.get_history(&thread_id).await {
                Ok(chat_history) => {
                    let reply = HistoryReply {
                        kind: "history",
                        thread_id,
                        chat_history,
                    };
                    write_frame(out, &reply).await
                }
                Err(e) => write_frame(out, &StreamEvent::error(e.kind(), e.to_string())).await,
            }
        }
    }
}

async fn forward<W>(mut events: mpsc::Receiver<StreamEvent>, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = events.recv().await {
        write_frame(out, &event).await?;
    }
    Ok(())
}

async fn write_frame<W, T>(out: &mut W, payload: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let frame = to_sse_frame(payload)?;
    out.write_all(frame.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_defaults_to_trip_id() {
        let request: Request = serde_json::from_str(
            r#"{"op":"chat","user_id":"u1","message":"hi","trip":{"id":7,"name":"Oslo"}}"#,
        )
        .unwrap();

        let Request::Chat(turn) = request else {
            panic!("expected chat request");
        };
        let input = turn.into_turn_input();
        assert_eq!(input.thread_id, "7");
        assert_eq!(input.user_id.as_deref(), Some("u1"));
        assert!(input.packing_list.is_empty());
    }

    #[test]
    fn test_explicit_thread_id_wins() {
        let request: Request = serde_json::from_str(
            r#"{"op":"chat","thread_id":"abc","message":"hi","trip":{"id":7}}"#,
        )
        .unwrap();

        let Request::Chat(turn) = request else {
            panic!("expected chat request");
        };
        assert_eq!(turn.into_turn_input().thread_id, "abc");
    }

    #[test]
    fn test_history_request() {
        let request: Request = serde_json::from_str(r#"{"op":"history","thread_id":"7"}"#).unwrap();
        assert!(matches!(request, Request::History { thread_id } if thread_id == "7"));
    }
}

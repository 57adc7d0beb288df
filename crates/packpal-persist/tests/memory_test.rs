use packpal_llm::Message;
use packpal_persist::{Checkpoint, Checkpointer, InMemoryCheckpointer};
use packpal_types::{AssistantState, ChatMessage, Item, NodeType, Trip};

fn state_with(message: &str) -> AssistantState {
    let mut state = AssistantState::new();
    state.messages.push(Message::system("You are PackPal"));
    state.messages.push(Message::human(message));
    state.chat_history.push(ChatMessage::user(message));
    state.trip = Trip::new("Maui").with_id(7);
    state.packing_list = vec![Item::new("Socks", 7)];
    state
}

#[tokio::test]
async fn test_load_unknown_thread_is_none() {
    let store = InMemoryCheckpointer::new();
    assert!(store.load("missing").await.unwrap().is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_save_then_load_roundtrip() {
    let store = InMemoryCheckpointer::new();
    let checkpoint = Checkpoint::new("7", state_with("start a list"), Some(NodeType::LLM), 0);

    store.save(&checkpoint).await.unwrap();

    let loaded = store.load("7").await.unwrap().unwrap();
    assert_eq!(loaded, checkpoint);
    assert!(!loaded.is_finished());
}

#[tokio::test]
async fn test_save_overwrites_per_thread() {
    let store = InMemoryCheckpointer::new();
    store
        .save(&Checkpoint::new("7", state_with("one"), Some(NodeType::LLM), 0))
        .await
        .unwrap();
    store
        .save(&Checkpoint::new("7", state_with("two"), None, 3))
        .await
        .unwrap();
    store
        .save(&Checkpoint::new("8", state_with("other"), None, 1))
        .await
        .unwrap();

    assert_eq!(store.len().await, 2);
    let latest = store.load("7").await.unwrap().unwrap();
    assert!(latest.is_finished());
    assert_eq!(latest.step, 3);
    assert_eq!(latest.state.chat_history, vec![ChatMessage::user("two")]);
}

#[tokio::test]
async fn test_clones_share_storage() {
    let store = InMemoryCheckpointer::new();
    let shared = store.clone();
    store
        .save(&Checkpoint::new("t", AssistantState::new(), None, 0))
        .await
        .unwrap();
    assert!(shared.load("t").await.unwrap().is_some());
}

#[test]
fn test_checkpoint_json_roundtrip_keeps_messages() {
    let checkpoint = Checkpoint::new("7", state_with("pack for rain"), Some(NodeType::Tool), 2);
    let json = serde_json::to_string(&checkpoint).unwrap();
    let back: Checkpoint = serde_json::from_str(&json).unwrap();

    assert_eq!(back.next, Some(NodeType::Tool));
    assert_eq!(back.state.messages, checkpoint.state.messages);
}

use packpal_llm::{
    ChatClient, ChatOptions, ChatRequest, ChatResponse, Message, ScriptedClient, Tool, ToolCall,
    ToolChoice,
};
use serde_json::json;

#[test]
fn test_chat_request_with_options() {
    let options = ChatOptions::new().temperature(0.7).max_tokens(100);
    let request = ChatRequest::new("gpt-4o", vec![Message::human("Hello")]).with_options(options);

    assert_eq!(request.model, "gpt-4o");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.options.temperature, Some(0.7));
    assert_eq!(request.options.max_tokens, Some(100));
}

#[test]
fn test_chat_options_builder() {
    let options = ChatOptions::new()
        .tools(vec![Tool::new("test", "Test tool", json!({"type": "object"}))])
        .tool_choice(ToolChoice::auto());

    assert_eq!(options.tools.as_ref().map(Vec::len), Some(1));
    assert_eq!(options.tool_choice, Some(ToolChoice::auto()));
}

#[test]
fn test_chat_options_default() {
    let options = ChatOptions::default();
    assert_eq!(options.temperature, None);
    assert_eq!(options.max_tokens, None);
    assert_eq!(options.tools, None);
    assert_eq!(options.tool_choice, None);
}

#[test]
fn test_tool_call_response() {
    let call = ToolCall::new("call_1", "remove_item_from_packing_list", json!({"item_name": "Hat"}));
    let response = ChatResponse::with_tool_calls(None, vec![call.clone()]);
    assert!(response.content.is_none());
    assert_eq!(response.tool_calls, Some(vec![call]));
}

#[test]
fn test_text_response_has_no_tool_calls() {
    let response = ChatResponse::text("All packed");
    assert_eq!(response.content.as_deref(), Some("All packed"));
    assert!(response.tool_calls.is_none());
}

#[tokio::test]
async fn test_scripted_client_replays_in_order() {
    let client = ScriptedClient::new(vec![ChatResponse::text("first"), ChatResponse::text("second")]);

    let first = client
        .chat(ChatRequest::new("m", vec![Message::human("a")]))
        .await
        .unwrap();
    let second = client
        .chat(ChatRequest::new("m", vec![Message::human("b")]))
        .await
        .unwrap();

    assert_eq!(first.content.as_deref(), Some("first"));
    assert_eq!(second.content.as_deref(), Some("second"));
    assert_eq!(client.requests().len(), 2);
    assert_eq!(client.requests()[1].messages[0].text(), "b");
    assert!(client
        .chat(ChatRequest::new("m", vec![Message::human("c")]))
        .await
        .is_err());
}

#[tokio::test]
async fn test_scripted_client_errors() {
    let client = ScriptedClient::default();
    client.push_error("rate limited");

    let err = client
        .chat(ChatRequest::new("m", vec![Message::human("a")]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("rate limited"));

    // exhausted script is an error too
    assert!(client
        .chat(ChatRequest::new("m", vec![Message::human("a")]))
        .await
        .is_err());
}

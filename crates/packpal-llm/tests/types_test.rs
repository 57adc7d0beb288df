use packpal_llm::{Content, Message, Tool, ToolCall, ToolChoice};
use serde::Deserialize;
use serde_json::json;

#[test]
fn test_content_text_creation() {
    let content = Content::text("Pack light");
    assert_eq!(content, Content::Text("Pack light".to_string()));
    assert_eq!(content.to_text(), "Pack light");
}

#[test]
fn test_content_parts_flatten() {
    let json = r#"[{"type":"text","text":"Socks "},{"type":"text","text":"added"}]"#;
    let content: Content = serde_json::from_str(json).unwrap();
    assert_eq!(content.to_text(), "Socks added");
}

#[test]
fn test_message_roles() {
    assert_eq!(Message::system("You are PackPal").role(), "system");
    assert_eq!(Message::human("Hello").role(), "user");
    assert_eq!(Message::ai("Hi there!").role(), "assistant");
    assert_eq!(Message::tool_result("call_123", "ok").role(), "tool");
}

#[test]
fn test_message_serialization_human() {
    let msg = Message::human("Hello");
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"role\":\"user\""));
    assert!(json.contains("Hello"));
}

#[test]
fn test_message_deserialization_tool() {
    let json = r#"{"role":"tool","tool_call_id":"call_1","content":"Item was removed"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg.role(), "tool");
    assert_eq!(msg.text(), "Item was removed");
}

#[test]
fn test_ai_without_tools_drops_empty_calls() {
    let msg = Message::ai_with_tools(Some(Content::text("Done")), vec![]);
    assert!(msg.tool_calls().is_empty());
    let json = serde_json::to_value(&msg).unwrap();
    assert!(json.get("tool_calls").is_none());
}

#[test]
fn test_ai_text_empty_when_content_missing() {
    let call = ToolCall::new("call_1", "update_trip_name", json!({"new_name": "Oslo"}));
    let msg = Message::ai_with_tools(None, vec![call]);
    assert_eq!(msg.text(), "");
    assert_eq!(msg.tool_calls().len(), 1);
}

#[test]
fn test_tool_creation() {
    let tool = Tool::new(
        "update_trip_name",
        "Rename the trip",
        json!({"type": "object", "properties": {"new_name": {"type": "string"}}}),
    );
    assert_eq!(tool.tool_type, "function");
    assert_eq!(tool.name(), "update_trip_name");
}

#[derive(Deserialize)]
struct QuantityArgs {
    item_name: String,
    new_quantity: i64,
}

#[test]
fn test_tool_call_parse_arguments() {
    let call = ToolCall::new(
        "call_7",
        "update_item_quantity",
        json!({"item_name": "Socks", "new_quantity": 3}),
    );
    let args: QuantityArgs = call.parse_arguments().unwrap();
    assert_eq!(args.item_name, "Socks");
    assert_eq!(args.new_quantity, 3);
}

#[test]
fn test_tool_call_empty_arguments_as_object() {
    let json = r#"{"id":"call_2","type":"function","function":{"name":"update_trip_dates","arguments":""}}"#;
    let call: ToolCall = serde_json::from_str(json).unwrap();
    let args: serde_json::Value = call.parse_arguments().unwrap();
    assert_eq!(args, json!({}));
}

#[test]
fn test_tool_call_missing_id_defaults_empty() {
    let json = r#"{"function":{"name":"update_trip_name","arguments":"{}"}}"#;
    let call: ToolCall = serde_json::from_str(json).unwrap();
    assert!(call.id.is_empty());
    assert_eq!(call.tool_type, "function");
}

#[test]
fn test_tool_choice_serialization() {
    assert_eq!(serde_json::to_value(ToolChoice::auto()).unwrap(), json!("auto"));
}

//! Server-Sent-Events framing for stream events.

use serde::Serialize;

/// Encode one payload as an SSE frame: `data: <json>\n\n`
pub fn to_sse_frame<T: Serialize + ?Sized>(event: &T) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string(event)?;
    Ok(format!("data: {}\n\n", payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use packpal_types::StreamEvent;

    #[test]
    fn test_done_frame() {
        let frame = to_sse_frame(&StreamEvent::done(2, 15)).unwrap();
        assert!(frame.starts_with("data: {\"type\":\"done\""));
        assert!(frame.ends_with("\n\n"));
        assert_eq!(frame.matches('\n').count(), 2);
    }

    #[test]
    fn test_error_frame_carries_kind() {
        let frame = to_sse_frame(&StreamEvent::error("provider_timeout", "slow")).unwrap();
        assert!(frame.contains("\"kind\":\"provider_timeout\""));
    }
}

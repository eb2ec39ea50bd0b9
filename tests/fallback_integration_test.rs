//! End-to-end send cycles over the mock HTTP client: transport fallback,
//! normalization and history bookkeeping together.

mod common;

use adk_chat::models::{MessageRole, MessageStatus, ALL_ENDPOINTS_FAILED_TEXT};
use adk_chat::presenter::present;
use bytes::Bytes;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_streaming_reply_with_tools() {
    let mock = MockHttpConfig::new()
        .with_sse_response(&url("/run_sse"), &services_sse_chunks())
        .build();
    let mut session = session_with(&mock);

    let reply = session.send("What services do you offer?").await;

    assert_eq!(reply.status, MessageStatus::Ok);
    assert_eq!(reply.final_text, "We offer Web Development and SEO.");
    assert_eq!(reply.tool_names(), vec!["list_services"]);
    assert_eq!(reply.tool_responses.len(), 1);
    assert_eq!(
        reply.tool_responses[0].response["services"][1]["id"],
        json!("seo")
    );
    assert_eq!(reply.events.len(), 3);

    let last = session.last_message().unwrap();
    assert_eq!(last.endpoint_used.as_deref(), Some("POST /run_sse"));
    assert_eq!(last.tools_summary().as_deref(), Some("Tools used: list_services"));
    assert_eq!(mock.requested_urls(), vec![url("/run_sse")]);
}

#[tokio::test]
async fn test_sse_frames_split_across_chunks() {
    let frame = "data: {\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"Preço: 10€\"}]}}\r\n\r\n";
    let bytes = frame.as_bytes();
    // Split inside the multi-byte '€' sequence.
    let cut = frame.find('€').unwrap() + 1;
    let mock = MockHttpClient::new();
    mock.set_response(
        &url("/run_sse"),
        MockResponse::Stream(vec![
            Bytes::copy_from_slice(&bytes[..cut]),
            Bytes::copy_from_slice(&bytes[cut..]),
        ]),
    );

    let mut session = session_with(&mock);
    let reply = session.send("price?").await;
    assert_eq!(reply.final_text, "Preço: 10€");
}

#[tokio::test]
async fn test_broken_stream_falls_back_to_run() {
    let mock = MockHttpClient::new();
    mock.set_response(
        &url("/run_sse"),
        MockResponse::BrokenStream(
            vec![Bytes::from("data: {\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"partial\"}]}}\n\n")],
            HttpError::Io("connection reset".into()),
        ),
    );
    mock.set_response(
        &url("/run"),
        MockResponse::json(200, &services_event_log().to_string()),
    );

    let mut session = session_with(&mock);
    let reply = session.send("services?").await;
    assert_eq!(reply.final_text, "We offer Web Development and SEO.");
    assert_eq!(
        session.last_message().unwrap().endpoint_used.as_deref(),
        Some("POST /run")
    );
}

#[tokio::test]
async fn test_root_direct_is_last_resort() {
    let mock = MockHttpConfig::new()
        .with_default_status(404)
        .with_json_response(&url("/"), 200, r#"{"output": "root answered", "request_id": "r1"}"#)
        .build();
    let mut session = session_with(&mock);

    let reply = session.send("hello").await;
    assert_eq!(reply.final_text, "root answered");
    assert_eq!(
        mock.requested_urls(),
        vec![url("/run_sse"), url("/run"), url("/chat"), url("/")]
    );

    let root_body = mock.get_requests()[3].json_body().unwrap();
    assert_eq!(root_body["query"], "hello");
    assert_eq!(root_body["session_id"], json!(null));
}

#[tokio::test]
async fn test_decode_failure_moves_on() {
    let mock = MockHttpConfig::new()
        .with_default_status(404)
        .with_json_response(&url("/run"), 200, "<html>proxy page</html>")
        .with_json_response(&url("/chat"), 200, r#""plain string reply""#)
        .build();
    let mut session = session_with(&mock);

    let reply = session.send("hi").await;
    assert_eq!(reply.final_text, "plain string reply");
    assert_eq!(
        session.last_message().unwrap().endpoint_used.as_deref(),
        Some("POST /chat")
    );
}

#[tokio::test]
async fn test_total_failure_keeps_session_usable() {
    let mock = MockHttpConfig::new()
        .with_default_error(HttpError::ConnectionFailed("connection refused".into()))
        .build();
    let mut session = session_with(&mock);

    let reply = session.send("anyone there?").await;
    assert_eq!(reply.status, MessageStatus::Error);
    assert_eq!(reply.final_text, ALL_ENDPOINTS_FAILED_TEXT);
    let detail = reply.raw_response["error"].as_str().unwrap();
    for label in ["POST /run_sse", "POST /run:", "POST /chat", "POST /:"] {
        assert!(detail.contains(label), "missing {label} in {detail}");
    }

    // The service comes back; the same session keeps going.
    mock.set_response(&url("/run_sse"), MockResponse::sse(&["data: {\"text\": \"back\"}\n\n"]));
    let reply = session.send("now?").await;
    assert_eq!(reply.status, MessageStatus::Ok);

    let roles: Vec<MessageRole> = session.history().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant
        ]
    );
}

#[tokio::test]
async fn test_nested_object_reply() {
    let mock = MockHttpConfig::new()
        .with_default_status(404)
        .with_json_response(
            &url("/chat"),
            200,
            &json!({
                "response": "summary",
                "events": [
                    {"content": {"role": "model", "parts": [
                        {"functionCall": {"name": "get_section_url", "args": {"section": "contact"}}}
                    ]}},
                    {"content": {"role": "user", "parts": [
                        {"functionResponse": {"name": "get_section_url", "response": {"url": "/contact"}}}
                    ]}}
                ]
            })
            .to_string(),
        )
        .build();
    let mut session = session_with(&mock);

    let reply = session.send("where is contact?").await;
    assert_eq!(reply.final_text, "summary");
    assert_eq!(reply.tool_calls[0].args, json!({"section": "contact"}));
    assert_eq!(reply.tool_responses[0].response, json!({"url": "/contact"}));
}

#[tokio::test]
async fn test_reply_presents_to_exact_text() {
    let long_reply = "We build fast marketing sites, run search campaigns, and maintain \
                      hosting for small teams that want one partner for the whole stack.";
    let mock = MockHttpConfig::new()
        .with_default_status(404)
        .with_json_response(&url("/chat"), 200, &json!({"text": long_reply}).to_string())
        .build();
    let mut session = session_with(&mock);

    let reply = session.send("pitch me").await;
    let steps = present(&reply.final_text);
    assert!(steps.len() > 2);
    assert_eq!(steps.last().unwrap().text_so_far, long_reply);
    assert!(steps.last().unwrap().is_final);
}

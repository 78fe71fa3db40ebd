// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Responses API request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// Body of `POST /responses`.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,

    /// System instructions, sent alongside rather than inside `input`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Ordered conversation input, oldest first.
    pub input: Vec<InputMessage>,

    /// Cap on generated tokens.
    pub max_output_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

/// One `{role, content}` element of the request input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputMessage {
    /// Role: "user" or "assistant".
    pub role: String,
    pub content: String,
}

// --- Response types ---

/// A full response from `POST /responses`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesResponse {
    pub id: String,
    pub model: String,
    /// "completed", "incomplete", "failed", ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub usage: Option<ApiUsage>,
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
    #[serde(default)]
    pub incomplete_details: Option<IncompleteDetails>,
}

impl ResponsesResponse {
    /// Concatenates every `output_text` part of every message item, in order.
    ///
    /// Returns `None` when the response carries no text at all.
    pub fn output_text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => Some(content),
                OutputItem::Other => None,
            })
            .flatten()
            .filter_map(|part| match part {
                OutputContent::OutputText { text } => Some(text.as_str()),
                OutputContent::Other => None,
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }
}

/// An item in the response `output` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum OutputItem {
    #[serde(rename = "message")]
    Message {
        #[serde(default)]
        content: Vec<OutputContent>,
    },
    /// Reasoning traces, tool calls and anything else we do not render.
    #[serde(other)]
    Other,
}

/// A content part inside a message item.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum OutputContent {
    #[serde(rename = "output_text")]
    OutputText { text: String },
    #[serde(other)]
    Other,
}

/// Token usage statistics from the API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Why a response stopped early.
#[derive(Debug, Clone, Deserialize)]
pub struct IncompleteDetails {
    #[serde(default)]
    pub reason: Option<String>,
}

/// API error envelope (non-2xx bodies).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail within an API error envelope or a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_request_with_instructions() {
        let req = ResponsesRequest {
            model: "gpt-4o-mini".into(),
            instructions: Some("You are a coach.".into()),
            input: vec![InputMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            max_output_tokens: 1000,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["instructions"], "You are a coach.");
        assert_eq!(json["max_output_tokens"], 1000);
        assert_eq!(json["input"][0]["role"], "user");
        assert_eq!(json["input"][0]["content"], "Hello");
        let temp = json["temperature"].as_f64().unwrap();
        assert!((temp - 0.7).abs() < 1e-6);
    }

    #[test]
    fn serialize_request_without_instructions_omits_field() {
        let req = ResponsesRequest {
            model: "gpt-4o-mini".into(),
            instructions: None,
            input: vec![],
            max_output_tokens: 10,
            temperature: 0.0,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("instructions").is_none());
    }

    #[test]
    fn output_text_joins_message_parts_and_skips_other_items() {
        let body = serde_json::json!({
            "id": "resp_1",
            "object": "response",
            "model": "gpt-4o-mini",
            "status": "completed",
            "output": [
                {"type": "reasoning", "id": "rs_1", "summary": []},
                {"type": "message", "id": "msg_1", "role": "assistant", "content": [
                    {"type": "output_text", "text": "Hello ", "annotations": []},
                    {"type": "output_text", "text": "there.", "annotations": []}
                ]}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 3, "total_tokens": 15}
        });
        let resp: ResponsesResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.output_text().as_deref(), Some("Hello there."));
        assert_eq!(resp.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn output_text_leaves_out_refusal_parts() {
        let body = serde_json::json!({
            "id": "resp_3",
            "model": "gpt-4o-mini",
            "output": [
                {"type": "message", "id": "msg_1", "role": "assistant", "content": [
                    {"type": "output_text", "text": "Partly.", "annotations": []},
                    {"type": "refusal", "refusal": "I can't help with that."}
                ]}
            ]
        });
        let resp: ResponsesResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.output_text().as_deref(), Some("Partly."));

        let refusal_only = serde_json::json!({
            "id": "resp_4",
            "model": "gpt-4o-mini",
            "output": [
                {"type": "message", "id": "msg_1", "role": "assistant", "content": [
                    {"type": "refusal", "refusal": "No."}
                ]}
            ]
        });
        let resp: ResponsesResponse = serde_json::from_value(refusal_only).unwrap();
        assert!(resp.output_text().is_none());
    }

    #[test]
    fn output_text_is_none_without_message_items() {
        let body = serde_json::json!({
            "id": "resp_2",
            "model": "gpt-4o-mini",
            "output": []
        });
        let resp: ResponsesResponse = serde_json::from_value(body).unwrap();
        assert!(resp.output_text().is_none());
    }

    #[test]
    fn deserialize_error_envelope() {
        let body = r#"{"error": {"message": "Incorrect API key provided: sk-xx", "type": "invalid_request_error", "param": null, "code": "invalid_api_key"}}"#;
        let err: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert!(err.error.message.contains("API key"));
        assert_eq!(err.error.code.as_deref(), Some("invalid_api_key"));
    }
}

#![allow(dead_code, reason = "Models for the YandexGPT completion API")]
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub model_uri: String,
    pub completion_options: CompletionOptions,
    pub messages: Vec<InputMessage>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Serialize, Debug)]
pub struct InputMessage {
    pub role: String,
    pub text: String,
}

#[derive(Deserialize, Debug)]
pub struct CompletionResponse {
    pub result: CompletionResult,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub alternatives: Vec<Alternative>,
    #[serde(default)]
    pub usage: Option<serde_json::Value>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Alternative {
    pub message: OutputMessage,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct OutputMessage {
    pub role: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = CompletionRequest {
            model_uri: "gpt://folder/yandexgpt-lite".to_string(),
            completion_options: CompletionOptions {
                stream: false,
                temperature: 0.1,
                max_tokens: 1000,
            },
            messages: vec![InputMessage {
                role: "system".to_string(),
                text: "prompt".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["modelUri"], "gpt://folder/yandexgpt-lite");
        assert_eq!(json["completionOptions"]["stream"], false);
        assert_eq!(json["completionOptions"]["temperature"], 0.1);
        assert_eq!(json["completionOptions"]["maxTokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn response_deserializes_first_alternative() {
        let raw = r#"{
            "result": {
                "alternatives": [
                    {
                        "message": {"role": "assistant", "text": "{\"text\":\"Buy milk\"}"},
                        "status": "ALTERNATIVE_STATUS_FINAL"
                    }
                ],
                "usage": {"inputTextTokens": "120"},
                "modelVersion": "23.10"
            }
        }"#;

        let response: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.result.alternatives[0].message.text,
            "{\"text\":\"Buy milk\"}"
        );
        assert_eq!(response.result.model_version.as_deref(), Some("23.10"));
    }
}

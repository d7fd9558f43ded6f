//! `/api/generate` request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Options;
use crate::ndjson::StreamItem;

/// Request body for `/api/generate`.
///
/// `stream` is always serialized: the server streams when the field is
/// absent, so the flag must match the operation it is sent with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use for completion.
    pub model: String,
    /// The prompt to generate a completion for.
    pub prompt: String,
    /// Response format; currently the only accepted value is `"json"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Additional model parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    /// System prompt, overriding the one in the Modelfile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Prompt template, overriding the one in the Modelfile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Context returned by a previous response, for short conversational memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
    /// Whether the response is streamed as a sequence of objects.
    #[serde(default)]
    pub stream: bool,
    /// Send the prompt without any templating; no context is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<bool>,
}

impl CompletionRequest {
    /// Creates a single-shot (non-streaming) request.
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            format: None,
            options: None,
            system: None,
            template: None,
            context: None,
            stream: false,
            raw: None,
        }
    }

    /// Creates a streaming request.
    #[must_use]
    pub fn streaming(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, prompt).stream(true)
    }

    /// Sets the stream flag.
    #[must_use]
    pub const fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Asks the server to answer in JSON.
    #[must_use]
    pub fn json_format(mut self) -> Self {
        self.format = Some("json".to_owned());
        self
    }

    /// Sets the model options.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the prompt template.
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Continues from the context of a previous response.
    #[must_use]
    pub fn context(mut self, context: Vec<i64>) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets raw mode.
    #[must_use]
    pub const fn raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// Response from `/api/generate`, either whole or one streamed chunk.
///
/// Durations are in nanoseconds. Timing and count fields, and for some
/// server versions `context`, only appear on the final (`done`) chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The model that produced the response.
    #[serde(default)]
    pub model: String,
    /// When the response was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Generated text; the full text when not streamed, a fragment otherwise.
    #[serde(default)]
    pub response: String,
    /// Whether this is the final response.
    #[serde(default)]
    pub done: bool,
    /// Why generation stopped (`"stop"`, `"length"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    /// Conversation encoding to send back in the next request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
    /// Time spent generating the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    /// Time spent loading the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,
    /// Number of tokens in the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Time spent evaluating the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<u64>,
    /// Number of tokens in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    /// Time spent generating the response tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

impl GenerateResponse {
    /// Generation speed in tokens per second (`eval_count / eval_duration`).
    #[must_use]
    pub fn eval_rate(&self) -> Option<f64> {
        match (self.eval_count, self.eval_duration) {
            (Some(count), Some(nanos)) if nanos > 0 => {
                Some(count as f64 / (nanos as f64 / 1_000_000_000.0))
            }
            _ => None,
        }
    }
}

impl StreamItem for GenerateResponse {
    fn is_final(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINAL_RESPONSE: &str = r#"{
        "model": "llama3",
        "created_at": "2023-08-04T19:22:45.499127Z",
        "response": "The sky is blue because of Rayleigh scattering.",
        "done": true,
        "context": [1, 2, 3],
        "total_duration": 5589157167,
        "load_duration": 3013701500,
        "prompt_eval_count": 46,
        "prompt_eval_duration": 1160282000,
        "eval_count": 13,
        "eval_duration": 1325948000
    }"#;

    mod completion_request {
        use super::*;

        #[test]
        fn minimal_request_omits_absent_fields() {
            let request = CompletionRequest::new("llama3", "Why is the sky blue?");
            let json = serde_json::to_string(&request).expect("serialization should succeed");

            assert_eq!(
                json,
                r#"{"model":"llama3","prompt":"Why is the sky blue?","stream":false}"#
            );
        }

        #[test]
        fn streaming_sets_flag() {
            let request = CompletionRequest::streaming("llama3", "hi");
            let value = serde_json::to_value(&request).expect("serialization should succeed");

            assert_eq!(value["stream"], true);
        }

        #[test]
        fn full_request_round_trips() {
            let request = CompletionRequest::new("llama3", "Tell me a joke")
                .json_format()
                .system("You are terse.")
                .template("{{ .Prompt }}")
                .context(vec![10, 20, 30])
                .raw(false)
                .options(Options::new().temperature(0.2).seed(7).stop(["\n"]));

            let json = serde_json::to_string(&request).expect("serialization should succeed");
            let back: CompletionRequest =
                serde_json::from_str(&json).expect("deserialization should succeed");

            assert_eq!(back, request);
            assert!(json.contains(r#""format":"json""#));
            assert!(json.contains(r#""context":[10,20,30]"#));
        }
    }

    mod generate_response {
        use super::*;

        #[test]
        fn decodes_final_fixture() {
            let response: GenerateResponse =
                serde_json::from_str(FINAL_RESPONSE).expect("deserialization should succeed");

            assert_eq!(response.model, "llama3");
            assert!(response.done);
            assert_eq!(response.context, Some(vec![1, 2, 3]));
            assert_eq!(response.total_duration, Some(5_589_157_167));
            assert_eq!(response.prompt_eval_count, Some(46));
            assert_eq!(response.eval_count, Some(13));
            assert_eq!(
                response.created_at.map(|t| t.timestamp()),
                Some(1_691_176_965)
            );
        }

        #[test]
        fn fixture_round_trips() {
            let response: GenerateResponse =
                serde_json::from_str(FINAL_RESPONSE).expect("deserialization should succeed");
            let json = serde_json::to_string(&response).expect("serialization should succeed");
            let back: GenerateResponse =
                serde_json::from_str(&json).expect("deserialization should succeed");

            assert_eq!(back, response);
        }

        #[test]
        fn streamed_chunk_omits_final_fields() {
            let json = r#"{"model":"llama3","created_at":"2023-08-04T08:52:19.385406-07:00","response":"The","done":false}"#;
            let chunk: GenerateResponse =
                serde_json::from_str(json).expect("deserialization should succeed");

            assert!(!chunk.done);
            assert!(!chunk.is_final());
            assert_eq!(chunk.context, None);
            assert_eq!(chunk.eval_count, None);

            let out = serde_json::to_string(&chunk).expect("serialization should succeed");
            assert!(!out.contains("context"));
            assert!(!out.contains("eval_count"));
        }

        #[test]
        fn eval_rate_in_tokens_per_second() {
            let response = GenerateResponse {
                eval_count: Some(50),
                eval_duration: Some(2_000_000_000),
                ..Default::default()
            };
            assert_eq!(response.eval_rate(), Some(25.0));

            let missing = GenerateResponse {
                eval_count: Some(50),
                eval_duration: Some(0),
                ..Default::default()
            };
            assert_eq!(missing.eval_rate(), None);
        }
    }
}

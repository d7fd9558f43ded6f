//! Model parameters shared by generate and embedding requests.

use serde::{Deserialize, Serialize};

/// Sampling and prediction options, as accepted in a Modelfile `PARAMETER`.
///
/// All fields are optional and sent verbatim; the server validates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Number of tokens from the initial prompt to keep when the context is refreshed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_keep: Option<i32>,
    /// Random seed; a fixed seed makes output reproducible for the same prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Maximum number of tokens to predict (`-1` = infinite, `-2` = fill context).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<i32>,
    /// Top-k sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    /// Top-p (nucleus) sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Tail free sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfs_z: Option<f32>,
    /// Locally typical sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typical_p: Option<f32>,
    /// How far back to look to prevent repetition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_last_n: Option<i32>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Repetition penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
    /// Presence penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    /// Frequency penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    /// Mirostat sampling mode (0 = disabled, 1 = Mirostat, 2 = Mirostat 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirostat: Option<i32>,
    /// Mirostat target entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirostat_tau: Option<f32>,
    /// Mirostat learning rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirostat_eta: Option<f32>,
    /// Whether newlines are penalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalize_newline: Option<bool>,
    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Load-time runner options, sent in the same object.
    #[serde(flatten)]
    pub runner: Runner,
}

impl Options {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets top-k sampling.
    #[must_use]
    pub const fn top_k(mut self, top_k: i32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Sets top-p sampling.
    #[must_use]
    pub const fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the maximum number of tokens to predict.
    #[must_use]
    pub const fn num_predict(mut self, num_predict: i32) -> Self {
        self.num_predict = Some(num_predict);
        self
    }

    /// Sets the stop sequences.
    #[must_use]
    pub fn stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = Some(stop.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the runner options.
    #[must_use]
    pub fn runner(mut self, runner: Runner) -> Self {
        self.runner = runner;
        self
    }
}

/// Runner options, which only take effect when the model is loaded into memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    /// Enable NUMA support.
    #[serde(rename = "numa", skip_serializing_if = "Option::is_none")]
    pub use_numa: Option<bool>,
    /// Context window size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<i32>,
    /// Prompt processing batch size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_batch: Option<i32>,
    /// Number of GQA groups in the transformer layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_gqa: Option<i32>,
    /// Number of layers offloaded to the GPU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_gpu: Option<i32>,
    /// GPU used for small tensors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_gpu: Option<i32>,
    /// Reduce VRAM usage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_vram: Option<bool>,
    /// Use 16-bit floats for the key/value cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f16_kv: Option<bool>,
    /// Return logits for all tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logits_all: Option<bool>,
    /// Load only the vocabulary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocab_only: Option<bool>,
    /// Memory-map the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_mmap: Option<bool>,
    /// Lock the model in memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_mlock: Option<bool>,
    /// Load the model for embeddings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_only: Option<bool>,
    /// RoPE base frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rope_frequency_base: Option<f32>,
    /// RoPE frequency scaling factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rope_frequency_scale: Option<f32>,
    /// Number of threads used for computation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_thread: Option<i32>,
}

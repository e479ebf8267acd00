//! MiniLM sentence embeddings on candle.
//!
//! Loads a BERT-family sentence-transformers model (by default
//! `sentence-transformers/all-MiniLM-L6-v2`, 384 dimensions), runs it on
//! the CPU, mean-pools the token states under the attention mask and
//! L2-normalizes the result.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::ApiBuilder;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use super::embed::{l2_normalize, Embedder};
use crate::error::{Error, Result};

/// Model loaded by [`MiniLmEmbedder::new`].
pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Token limit per text; longer texts are truncated.
const MAX_SEQ_LEN: usize = 256;

/// Sentence embedder backed by a candle BERT model.
pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimensions: usize,
}

impl MiniLmEmbedder {
    /// Load the default model from the HuggingFace hub (cached locally).
    pub fn new() -> Result<Self> {
        Self::from_pretrained(DEFAULT_MODEL_ID)
    }

    /// Load a sentence-transformers model from the HuggingFace hub.
    pub fn from_pretrained(model_id: &str) -> Result<Self> {
        let api = ApiBuilder::new()
            .with_progress(false)
            .build()
            .map_err(model_error)?;
        let repo = api.model(model_id.to_string());

        log::info!("Loading sentence model {}", model_id);
        let config_path = repo.get("config.json").map_err(model_error)?;
        let tokenizer_path = repo.get("tokenizer.json").map_err(model_error)?;
        let weights_path = repo.get("model.safetensors").map_err(model_error)?;

        Self::from_files(&config_path, &tokenizer_path, &weights_path)
    }

    /// Load from a directory holding `config.json`, `tokenizer.json` and
    /// `model.safetensors`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Self::from_files(
            &dir.join("config.json"),
            &dir.join("tokenizer.json"),
            &dir.join("model.safetensors"),
        )
    }

    /// Load from explicit model files.
    pub fn from_files(
        config_path: &Path,
        tokenizer_path: &Path,
        weights_path: &Path,
    ) -> Result<Self> {
        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(config_path)?;
        let config: BertConfig = serde_json::from_str(&config_str).map_err(model_error)?;
        let dimensions = hidden_size(&config_str)?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path).map_err(model_error)?;
        tokenizer.with_padding(Some(PaddingParams::default()));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(model_error)?;

        // Safety: the weights file is not modified while it is mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(model_error)?
        };
        let model = BertModel::load(vb.pp("bert"), &config)
            .or_else(|_| BertModel::load(vb, &config))
            .map_err(model_error)?;

        log::debug!("Sentence model ready ({} dimensions)", dimensions);
        Ok(Self {
            model,
            tokenizer,
            device,
            dimensions,
        })
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(model_error)?;

        let input_ids = stack_rows(encodings.iter().map(|e| e.get_ids()), &self.device)?;
        let attention_mask =
            stack_rows(encodings.iter().map(|e| e.get_attention_mask()), &self.device)?;
        let token_type_ids = input_ids.zeros_like().map_err(model_error)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(model_error)?;
        let pooled = mean_pool(&hidden, &attention_mask).map_err(model_error)?;

        let mut vectors = pooled.to_vec2::<f32>().map_err(model_error)?;
        vectors.iter_mut().for_each(|v| l2_normalize(v));
        Ok(vectors)
    }
}

impl Embedder for MiniLmEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.embed_batch(texts)
    }
}

/// Average token states `[batch, tokens, hidden]` over the tokens the
/// mask `[batch, tokens]` keeps.
fn mean_pool(hidden: &Tensor, mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask = mask.to_dtype(DType::F32)?.unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?;
    summed.broadcast_div(&counts)
}

/// Stack equal-length id rows into a `[rows, len]` tensor.
fn stack_rows<'a>(rows: impl Iterator<Item = &'a [u32]>, device: &Device) -> Result<Tensor> {
    let rows = rows
        .map(|row| Tensor::new(row, device))
        .collect::<candle_core::Result<Vec<_>>>()
        .map_err(model_error)?;
    Tensor::stack(&rows, 0).map_err(model_error)
}

fn hidden_size(config: &str) -> Result<usize> {
    let value: serde_json::Value = serde_json::from_str(config).map_err(model_error)?;
    value["hidden_size"]
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| Error::Embedding("config.json has no hidden_size".to_string()))
}

fn model_error(err: impl std::fmt::Display) -> Error {
    Error::Embedding(err.to_string())
}

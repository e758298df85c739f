use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{CardModel, CardModelError};

const MAX_INPUT_TOKENS: usize = 512;
const MAX_QUESTION_TOKENS: usize = 64;
const MAX_ANSWER_TOKENS: usize = 128;
/// Candidate questions requested per passage.
const QUESTION_CANDIDATES: usize = 2;
/// Temperature for the non-greedy candidates.
const CANDIDATE_TEMPERATURE: f64 = 0.8;
const SAMPLING_SEED: u64 = 299792458;

/// Flashcard generation on local T5 checkpoints: one question-generation
/// model, one question-answering model. Both run on CPU through Candle.
pub struct CandleT5CardModel {
    question_model: T5Generator,
    answer_model: T5Generator,
}

impl CandleT5CardModel {
    pub fn new(
        question_model_id: &str,
        answer_model_id: &str,
    ) -> Result<Self, CardModelError> {
        let device = Device::Cpu;

        tracing::info!(
            question_model = question_model_id,
            answer_model = answer_model_id,
            "Initializing Candle T5 card models"
        );

        let question_model = T5Generator::load(question_model_id, &device)?;
        let answer_model = T5Generator::load(answer_model_id, &device)?;

        tracing::info!("Candle T5 card models loaded successfully");

        Ok(Self {
            question_model,
            answer_model,
        })
    }
}

#[async_trait]
impl CardModel for CandleT5CardModel {
    async fn generate_questions(&self, passage: &str) -> Result<Vec<String>, CardModelError> {
        let input = format!("generate question: {passage}");
        let mut candidates = Vec::with_capacity(QUESTION_CANDIDATES);

        for i in 0..QUESTION_CANDIDATES {
            // first candidate decodes greedily, the rest sample with
            // distinct seeds so the set is not degenerate
            let mut processor = if i == 0 {
                LogitsProcessor::new(SAMPLING_SEED, None, None)
            } else {
                LogitsProcessor::new(
                    SAMPLING_SEED + i as u64,
                    Some(CANDIDATE_TEMPERATURE),
                    None,
                )
            };

            let question = self
                .question_model
                .generate(&input, MAX_QUESTION_TOKENS, &mut processor)
                .await?;

            if !candidates.contains(&question) {
                candidates.push(question);
            }
        }

        Ok(candidates)
    }

    async fn generate_answer(
        &self,
        question: &str,
        passage: &str,
    ) -> Result<String, CardModelError> {
        let input = format!("question: {question} context: {passage}");
        let mut processor = LogitsProcessor::new(SAMPLING_SEED, None, None);

        self.answer_model
            .generate(&input, MAX_ANSWER_TOKENS, &mut processor)
            .await
    }
}

/// One T5 encoder-decoder with its tokenizer. The model is locked per
/// generation because decoding mutates the KV cache.
struct T5Generator {
    model: Mutex<t5::T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    config: t5::Config,
    device: Device,
}

impl T5Generator {
    fn load(model_id: &str, device: &Device) -> Result<Self, CardModelError> {
        let api = Api::new().map_err(|e| CardModelError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| CardModelError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| CardModelError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| CardModelError::ModelLoadFailed(format!("model.safetensors: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| CardModelError::ModelLoadFailed(format!("read config: {}", e)))?;
        let mut config: t5::Config = serde_json::from_str(&config_contents)
            .map_err(|e| CardModelError::ModelLoadFailed(format!("parse config: {}", e)))?;
        config.use_cache = true;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| CardModelError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)
                .map_err(|e| CardModelError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = t5::T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| CardModelError::ModelLoadFailed(format!("model: {}", e)))?;

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config: config.clone(),
            device: device.clone(),
        })
    }

    async fn generate(
        &self,
        input: &str,
        max_tokens: usize,
        processor: &mut LogitsProcessor,
    ) -> Result<String, CardModelError> {
        let encoding = self
            .tokenizer
            .encode(input, true)
            .map_err(|e| CardModelError::TokenizationFailed(e.to_string()))?;
        let mut input_ids: Vec<u32> = encoding.get_ids().to_vec();
        input_ids.truncate(MAX_INPUT_TOKENS);

        let input_tensor = Tensor::new(input_ids.as_slice(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| CardModelError::InferenceFailed(format!("input tensor: {}", e)))?;

        let decoder_start = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;

        let mut model = self.model.lock().await;
        model.clear_kv_cache();

        let encoder_output = model
            .encode(&input_tensor)
            .map_err(|e| CardModelError::InferenceFailed(format!("encode: {}", e)))?;

        let mut output_ids = vec![decoder_start];

        for index in 0..max_tokens {
            let decoder_ids = if index == 0 || !self.config.use_cache {
                Tensor::new(output_ids.as_slice(), &self.device)
            } else {
                let last = *output_ids.last().unwrap_or(&decoder_start);
                Tensor::new(&[last], &self.device)
            }
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| CardModelError::InferenceFailed(format!("decoder tensor: {}", e)))?;

            let logits = model
                .decode(&decoder_ids, &encoder_output)
                .and_then(|t| t.squeeze(0))
                .map_err(|e| CardModelError::InferenceFailed(format!("decode: {}", e)))?;

            let next = processor
                .sample(&logits)
                .map_err(|e| CardModelError::InferenceFailed(format!("sample: {}", e)))?;

            if next as usize == self.config.eos_token_id {
                break;
            }

            output_ids.push(next);
        }

        let text = self
            .tokenizer
            .decode(&output_ids[1..], true)
            .map_err(|e| CardModelError::TokenizationFailed(e.to_string()))?;

        Ok(text.trim().to_string())
    }
}

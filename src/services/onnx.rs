use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use ndarray::{ArrayView1, Ix2};
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;
use serde::Deserialize;
use tokenizers::Tokenizer;
use tokenizers::{PaddingParams, PaddingStrategy, TruncationParams, TruncationStrategy};
use tracing::info;

use crate::error::ClassifierError;
use crate::models::{ModelConfig, Verdict};
use crate::services::Classifier;

pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const MODEL_CONFIG_FILE: &str = "config.json";

/// Labels of SST-2 sentiment heads, used when `config.json` has no `id2label`.
const DEFAULT_LABELS: [&str; 2] = ["NEGATIVE", "POSITIVE"];

#[derive(Debug, Deserialize)]
struct HubModelConfig {
    #[serde(default)]
    id2label: BTreeMap<String, String>,
}

/// Sequence-classification model exported to ONNX (e.g. DistilBERT SST-2).
pub struct OnnxClassifier {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    labels: Vec<String>,
}

impl OnnxClassifier {
    pub fn load(config: &ModelConfig, model_dir: &Path) -> Result<Self, ClassifierError> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound(
                model_path.display().to_string(),
            ));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ClassifierError::LoadError(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e: ort::Error| ClassifierError::LoadError(e.to_string()))?
            .with_intra_threads(num_cpus())
            .map_err(|e: ort::Error| ClassifierError::LoadError(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e: ort::Error| ClassifierError::LoadError(e.to_string()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_tokens as usize,
                strategy: TruncationStrategy::LongestFirst,
                ..Default::default()
            }))
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;

        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));

        let labels = load_labels(&model_dir.join(MODEL_CONFIG_FILE))?;
        info!(model = %model_dir.display(), labels = ?labels, "sentiment model loaded");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            labels,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<Verdict>, ClassifierError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);
        let batch_size = encodings.len();

        let mut input_ids = vec![0i64; batch_size * max_len];
        let mut attention_mask = vec![0i64; batch_size * max_len];

        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            for (j, (&id, &m)) in ids.iter().zip(mask.iter()).enumerate() {
                input_ids[i * max_len + j] = id as i64;
                attention_mask[i * max_len + j] = m as i64;
            }
        }

        let input_ids_tensor = Tensor::from_array(([batch_size, max_len], input_ids))
            .map_err(|e: ort::Error| ClassifierError::InferenceError(e.to_string()))?;
        let attention_mask_tensor = Tensor::from_array(([batch_size, max_len], attention_mask))
            .map_err(|e: ort::Error| ClassifierError::InferenceError(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::InferenceError("session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            ])
            .map_err(|e: ort::Error| ClassifierError::InferenceError(e.to_string()))?;

        let logits = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e: ort::Error| ClassifierError::InferenceError(e.to_string()))?
            .into_dimensionality::<Ix2>()
            .map_err(|e| ClassifierError::InferenceError(format!("unexpected logits shape: {e}")))?;

        if logits.nrows() != batch_size || logits.ncols() != self.labels.len() {
            return Err(ClassifierError::InferenceError(format!(
                "unexpected logits shape: {:?}, expected [{}, {}]",
                logits.shape(),
                batch_size,
                self.labels.len()
            )));
        }

        Ok(logits
            .rows()
            .into_iter()
            .map(|row| {
                let (index, score) = top_class(row);
                Verdict::new(self.labels[index].clone(), score)
            })
            .collect())
    }
}

/// Arg-max class of a logits row and its softmax probability.
fn top_class(logits: ArrayView1<f32>) -> (usize, f32) {
    let max = logits.fold(f32::NEG_INFINITY, |acc, &x| acc.max(x));
    let exp = logits.mapv(|x| (x - max).exp());
    let sum = exp.sum();

    let mut index = 0;
    for (i, &p) in exp.iter().enumerate() {
        if p > exp[index] {
            index = i;
        }
    }

    (index, exp[index] / sum)
}

fn load_labels(path: &Path) -> Result<Vec<String>, ClassifierError> {
    if !path.exists() {
        return Ok(DEFAULT_LABELS.iter().map(ToString::to_string).collect());
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ClassifierError::LoadError(e.to_string()))?;
    let config: HubModelConfig =
        serde_json::from_str(&content).map_err(|e| ClassifierError::LoadError(e.to_string()))?;

    if config.id2label.is_empty() {
        return Ok(DEFAULT_LABELS.iter().map(ToString::to_string).collect());
    }

    let mut indexed = config
        .id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|id| (id, label))
                .map_err(|_| ClassifierError::LoadError(format!("invalid label id: {id}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    indexed.sort_by_key(|(id, _)| *id);

    if indexed.iter().enumerate().any(|(pos, (id, _))| pos != *id) {
        return Err(ClassifierError::LoadError(
            "id2label ids must be contiguous from 0".to_string(),
        ));
    }

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

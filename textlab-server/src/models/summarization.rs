use {
    std::sync::Mutex,
    rust_bert::pipelines::summarization::{SummarizationConfig, SummarizationModel},
    super::{ModelError, SummaryParams, Summarizer},
};

// position budget of the default DistilBART CNN/DailyMail checkpoint
const MODEL_MAX_INPUT_CHARS: usize = 1024;

/// Abstractive summarization through rust-bert. Generation bounds are fixed
/// when the pipeline is built; the per-call params are baked into the model
/// config at load time. The tch-backed model is not `Sync`, hence the lock.
pub struct BartSummarizer {
    model: Mutex<SummarizationModel>,
}

impl BartSummarizer {
    pub fn new(params: SummaryParams) -> Result<Self, ModelError> {
        let mut config = SummarizationConfig::default();
        config.min_length = params.min_length as i64;
        config.max_length = Some(params.max_length as i64);
        config.do_sample = false;

        let model = SummarizationModel::new(config).map_err(|err| ModelError::Summarization {
            message: format!("failed to load summarization model: {}", err),
        })?;

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Summarizer for BartSummarizer {
    fn max_input_chars(&self) -> usize {
        MODEL_MAX_INPUT_CHARS
    }

    fn summarize(&self, text: &str, _params: &SummaryParams) -> Result<String, ModelError> {
        let model = self.model.lock().map_err(|_| ModelError::Summarization {
            message: "summarization model lock poisoned".to_owned(),
        })?;

        model
            .summarize(&[text])
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::Summarization {
                message: "model returned no summary".to_owned(),
            })
    }
}

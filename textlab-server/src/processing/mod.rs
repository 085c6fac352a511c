use {
    std::{str, sync::Arc},
    tracing::info,
    config::Config,
    thiserror::Error,
    crate::{
        entities::{ProcessingMode, ProcessingResult, UploadedDocument},
        models::{ModelError, Summarizer, SummaryParams, TopicModelConfig, TopicModeler},
    },
};

pub const PREVIEW_CHARS: usize = 30;

const NUM_TOPICS: usize = 2;
const TOPIC_SEED: u64 = 42;
const TOPIC_PASSES: usize = 10;
const TERMS_PER_TOPIC: usize = 10;

const DEFAULT_TRUNCATION_MARGIN: usize = 512;
const DEFAULT_SUMMARY_MAX_LENGTH: usize = 150;
const DEFAULT_SUMMARY_MIN_LENGTH: usize = 30;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("uploaded file is not valid utf-8 text")]
    Decode(#[from] str::Utf8Error),

    #[error("upstream model failed: {0}")]
    Upstream(#[from] ModelError),
}

#[derive(Clone, Copy, Debug)]
pub struct ProcessorSettings {
    pub truncation_margin: usize,
    pub summary_max_length: usize,
    pub summary_min_length: usize,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            truncation_margin: DEFAULT_TRUNCATION_MARGIN,
            summary_max_length: DEFAULT_SUMMARY_MAX_LENGTH,
            summary_min_length: DEFAULT_SUMMARY_MIN_LENGTH,
        }
    }
}

impl ProcessorSettings {
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();

        Self {
            truncation_margin: config
                .get_int("processing.truncation_margin")
                .map(|value| value as usize)
                .unwrap_or(defaults.truncation_margin),
            summary_max_length: config
                .get_int("processing.summary_max_length")
                .map(|value| value as usize)
                .unwrap_or(defaults.summary_max_length),
            summary_min_length: config
                .get_int("processing.summary_min_length")
                .map(|value| value as usize)
                .unwrap_or(defaults.summary_min_length),
        }
    }
}

pub struct TextProcessor {
    summarizer: Arc<dyn Summarizer + Send + Sync>,
    topic_modeler: Arc<dyn TopicModeler + Send + Sync>,
    settings: ProcessorSettings,
}

impl TextProcessor {
    pub fn new(
        summarizer: Arc<dyn Summarizer + Send + Sync>,
        topic_modeler: Arc<dyn TopicModeler + Send + Sync>,
        settings: ProcessorSettings,
    ) -> Self {
        Self {
            summarizer,
            topic_modeler,
            settings,
        }
    }

    /// Decodes the document once, dispatches on the mode, and returns the
    /// result text. Errors from decoding or from a collaborator propagate
    /// unrecovered; there is no retry and no partial output.
    pub fn process(&self, document: &UploadedDocument, mode: ProcessingMode) -> Result<ProcessingResult, ProcessingError> {
        let text = str::from_utf8(document.content())?;

        info!("running {} for file: {}", mode, document.name());

        let output = match mode {
            ProcessingMode::Summarize => self.summarize(text)?,
            ProcessingMode::PassthroughProcess => text.to_owned(),
            ProcessingMode::TopicModel => self.model_topics(text)?,
        };

        Ok(ProcessingResult::new(output))
    }

    /// First 30 characters of the decoded text, independent of mode.
    pub fn preview(&self, document: &UploadedDocument) -> Result<String, ProcessingError> {
        let text = str::from_utf8(document.content())?;
        Ok(text.chars().take(PREVIEW_CHARS).collect())
    }

    fn summarize(&self, text: &str) -> Result<String, ProcessingError> {
        let budget = self.summarizer.max_input_chars();
        let truncated = truncate_chars(text, budget, self.settings.truncation_margin);

        let params = SummaryParams {
            max_length: self.settings.summary_max_length,
            min_length: self.settings.summary_min_length,
        };

        Ok(self.summarizer.summarize(truncated, &params)?)
    }

    fn model_topics(&self, text: &str) -> Result<String, ProcessingError> {
        let documents: Vec<&str> = text.lines().collect();

        let config = TopicModelConfig {
            num_topics: NUM_TOPICS,
            seed: TOPIC_SEED,
            passes: TOPIC_PASSES,
            terms_per_topic: TERMS_PER_TOPIC,
        };

        let topics = self.topic_modeler.train_topics(&documents, &config)?;
        Ok(format_topics(&topics))
    }
}

/// Character-based truncation with a safety margin: inputs over `budget`
/// characters are cut to `budget - margin`. The margin compensates for the
/// character/token mismatch of the model's real limit.
fn truncate_chars(text: &str, budget: usize, margin: usize) -> &str {
    let length = text.chars().count();
    if length <= budget {
        return text;
    }

    let keep = budget.saturating_sub(margin);
    match text.char_indices().nth(keep) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

fn format_topics(topics: &[Vec<String>]) -> String {
    topics
        .iter()
        .enumerate()
        .map(|(index, terms)| format!("topic {}: {}", index, terms.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

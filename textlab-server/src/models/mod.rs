use {
    std::sync::Arc,
    thiserror::Error,
};

pub mod extractive;
pub mod lda;
pub mod preprocess;
#[cfg(feature = "tch-inference")]
pub mod summarization;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("summarization failed: {message}")]
    Summarization { message: String },

    #[error("topic modelling failed: {message}")]
    TopicModelling { message: String },
}

#[derive(Clone, Copy, Debug)]
pub struct SummaryParams {
    pub max_length: usize,
    pub min_length: usize,
}

pub trait Summarizer {
    /// Upper bound on accepted input size, in characters.
    fn max_input_chars(&self) -> usize;

    fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String, ModelError>;
}

#[derive(Clone, Copy, Debug)]
pub struct TopicModelConfig {
    pub num_topics: usize,
    pub seed: u64,
    pub passes: usize,
    pub terms_per_topic: usize,
}

pub trait TopicModeler {
    /// Fits a topic model over the given documents and returns the top
    /// terms per topic, one list per topic.
    fn train_topics(&self, documents: &[&str], config: &TopicModelConfig) -> Result<Vec<Vec<String>>, ModelError>;
}

#[cfg(feature = "tch-inference")]
pub fn load_summarizer(params: SummaryParams) -> Arc<dyn Summarizer + Send + Sync> {
    Arc::new(summarization::BartSummarizer::new(params).unwrap())
}

#[cfg(not(feature = "tch-inference"))]
pub fn load_summarizer(_params: SummaryParams) -> Arc<dyn Summarizer + Send + Sync> {
    Arc::new(extractive::FrequencySummarizer::new())
}

pub fn load_topic_modeler() -> Arc<dyn TopicModeler + Send + Sync> {
    Arc::new(lda::LdaTopicModel::new())
}

use {
    std::{fmt, str::FromStr},
    thiserror::Error,
};

pub const DOWNLOAD_FILE_NAME: &str = "processed_data.txt";

/// A file received from the caller. Immutable once constructed, consumed by
/// a single processing request and never persisted.
pub struct UploadedDocument {
    name: String,
    content: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: String, content: Vec<u8>) -> Self {
        Self {
            name,
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessingMode {
    Summarize,
    PassthroughProcess,
    TopicModel,
}

#[derive(Error, Debug)]
#[error("unknown process type: {0}")]
pub struct UnknownProcessType(String);

impl FromStr for ProcessingMode {
    type Err = UnknownProcessType;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_lowercase().as_str() {
            "nlp summarization" | "summarization" | "summarize" => Ok(Self::Summarize),
            "nlp process" | "process" | "passthrough" => Ok(Self::PassthroughProcess),
            "topic modelling" | "topic modeling" | "topics" => Ok(Self::TopicModel),
            other => Err(UnknownProcessType(other.to_owned())),
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Summarize => "summarization",
            Self::PassthroughProcess => "passthrough process",
            Self::TopicModel => "topic modelling",
        })
    }
}

/// Output of one processing request. Holding the text as a `String` keeps
/// the "result bytes are valid utf-8" invariant true by construction.
#[derive(Debug)]
pub struct ProcessingResult {
    text: String,
}

impl ProcessingResult {
    pub fn new(text: String) -> Self {
        Self {
            text,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_original_ui_labels() {
        assert_eq!("NLP Summarization".parse::<ProcessingMode>().unwrap(), ProcessingMode::Summarize);
        assert_eq!("NLP Process".parse::<ProcessingMode>().unwrap(), ProcessingMode::PassthroughProcess);
        assert_eq!("Topic Modelling".parse::<ProcessingMode>().unwrap(), ProcessingMode::TopicModel);
    }

    #[test]
    fn parses_short_labels_case_insensitively() {
        assert_eq!("SUMMARIZE".parse::<ProcessingMode>().unwrap(), ProcessingMode::Summarize);
        assert_eq!(" process ".parse::<ProcessingMode>().unwrap(), ProcessingMode::PassthroughProcess);
        assert_eq!("topics".parse::<ProcessingMode>().unwrap(), ProcessingMode::TopicModel);
    }

    #[test]
    fn rejects_unknown_labels() {
        assert!("NLP Translation".parse::<ProcessingMode>().is_err());
        assert!("".parse::<ProcessingMode>().is_err());
    }
}

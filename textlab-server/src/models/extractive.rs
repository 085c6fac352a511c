use {
    std::{cmp::Ordering, collections::HashMap},
    super::{preprocess, ModelError, SummaryParams, Summarizer},
};

const MAX_INPUT_CHARS: usize = 100_000;

/// Extractive fallback used when the crate is built without the
/// `tch-inference` feature: sentences are scored by stop-word-filtered term
/// frequency and re-emitted in document order under the length bounds.
pub struct FrequencySummarizer;

impl FrequencySummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Summarizer for FrequencySummarizer {
    fn max_input_chars(&self) -> usize {
        MAX_INPUT_CHARS
    }

    fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String, ModelError> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Err(ModelError::Summarization {
                message: "nothing to summarize".to_owned(),
            });
        }

        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for sentence in &sentences {
            for token in preprocess::tokenize(sentence) {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                let tokens = preprocess::tokenize(sentence);
                let score = tokens.iter().map(|token| frequencies[token] as f64).sum::<f64>()
                    / tokens.len().max(1) as f64;
                (index, score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));

        let top = ranked[0].0;
        let mut chosen: Vec<usize> = Vec::new();
        let mut words = 0;

        for (index, _) in ranked {
            if words >= params.min_length {
                break;
            }

            let count = word_count(&sentences[index]);
            if words + count > params.max_length {
                continue;
            }

            chosen.push(index);
            words += count;
        }

        if chosen.is_empty() {
            // every sentence alone exceeds the budget
            let truncated: Vec<&str> = sentences[top].split_whitespace().take(params.max_length).collect();
            return Ok(truncated.join(" "));
        }

        chosen.sort_unstable();
        Ok(chosen
            .into_iter()
            .map(|index| sentences[index].as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

fn word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_owned());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_owned());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SummaryParams {
        SummaryParams {
            max_length: 150,
            min_length: 30,
        }
    }

    #[test]
    fn returns_a_nonempty_summary_within_the_word_bound() {
        let text = "Rust programs compile to fast native code. The compiler checks memory safety. \
                    Crates share code through the registry. Bread needs flour. Bread needs yeast. \
                    The oven must be hot before baking starts. Cooling racks help the crust.";

        let summary = FrequencySummarizer::new().summarize(text, &params()).unwrap();

        assert!(!summary.is_empty());
        assert!(summary.split_whitespace().count() <= params().max_length);
    }

    #[test]
    fn keeps_selected_sentences_in_document_order() {
        let text = "Alpha beta gamma. Delta epsilon. Zeta eta theta.";

        let summary = FrequencySummarizer::new().summarize(text, &params()).unwrap();

        assert_eq!(summary, "Alpha beta gamma. Delta epsilon. Zeta eta theta.");
    }

    #[test]
    fn truncates_a_single_oversized_sentence() {
        let text = format!("{}.", vec!["word"; 400].join(" "));

        let summary = FrequencySummarizer::new()
            .summarize(&text, &SummaryParams { max_length: 20, min_length: 5 })
            .unwrap();

        assert_eq!(summary.split_whitespace().count(), 20);
    }

    #[test]
    fn fails_on_blank_input() {
        assert!(FrequencySummarizer::new().summarize("", &params()).is_err());
        assert!(FrequencySummarizer::new().summarize("   \n\t", &params()).is_err());
    }
}

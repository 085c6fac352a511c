use {
    std::collections::HashMap,
    rand::{rngs::StdRng, Rng, SeedableRng},
    super::{preprocess, ModelError, TopicModelConfig, TopicModeler},
};

const ALPHA: f64 = 0.1;
const BETA: f64 = 0.01;

/// Latent Dirichlet Allocation via collapsed Gibbs sampling. All iteration
/// orders and the RNG are deterministic for a fixed seed, so identical
/// input produces identical topic listings.
pub struct LdaTopicModel;

impl LdaTopicModel {
    pub fn new() -> Self {
        Self
    }
}

/// Term ids are assigned in first-appearance order.
struct Dictionary {
    ids: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Dictionary {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            terms: Vec::new(),
        }
    }

    fn id_for(&mut self, token: &str) -> usize {
        if let Some(id) = self.ids.get(token) {
            return *id;
        }

        let id = self.terms.len();
        self.ids.insert(token.to_owned(), id);
        self.terms.push(token.to_owned());
        id
    }

    fn len(&self) -> usize {
        self.terms.len()
    }

    fn term(&self, id: usize) -> &str {
        &self.terms[id]
    }
}

impl TopicModeler for LdaTopicModel {
    fn train_topics(&self, documents: &[&str], config: &TopicModelConfig) -> Result<Vec<Vec<String>>, ModelError> {
        if config.num_topics == 0 {
            return Err(ModelError::TopicModelling {
                message: "topic count must be positive".to_owned(),
            });
        }

        let mut dictionary = Dictionary::new();
        let mut corpus: Vec<Vec<usize>> = Vec::new();

        for document in documents {
            let tokens = preprocess::tokenize(document);
            if tokens.is_empty() {
                continue;
            }

            corpus.push(tokens.iter().map(|token| dictionary.id_for(token)).collect());
        }

        if corpus.is_empty() {
            return Err(ModelError::TopicModelling {
                message: "no usable terms in the uploaded documents".to_owned(),
            });
        }

        let topic_term = sample(&corpus, dictionary.len(), config);

        let mut topics = Vec::with_capacity(config.num_topics);
        for counts in &topic_term {
            let mut ranked: Vec<(usize, usize)> = counts
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, count)| *count > 0)
                .collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

            topics.push(
                ranked
                    .into_iter()
                    .take(config.terms_per_topic)
                    .map(|(id, _)| dictionary.term(id).to_owned())
                    .collect(),
            );
        }

        Ok(topics)
    }
}

/// Runs the Gibbs sweeps and returns per-topic term counts.
fn sample(corpus: &[Vec<usize>], num_terms: usize, config: &TopicModelConfig) -> Vec<Vec<usize>> {
    let k = config.num_topics;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut topic_term = vec![vec![0usize; num_terms]; k];
    let mut doc_topic = vec![vec![0usize; k]; corpus.len()];
    let mut topic_totals = vec![0usize; k];
    let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(corpus.len());

    for (d, document) in corpus.iter().enumerate() {
        let mut z = Vec::with_capacity(document.len());
        for &term in document {
            let topic = rng.gen_range(0..k);
            topic_term[topic][term] += 1;
            doc_topic[d][topic] += 1;
            topic_totals[topic] += 1;
            z.push(topic);
        }
        assignments.push(z);
    }

    let mut weights = vec![0f64; k];

    for _ in 0..config.passes {
        for (d, document) in corpus.iter().enumerate() {
            for (i, &term) in document.iter().enumerate() {
                let old = assignments[d][i];
                topic_term[old][term] -= 1;
                doc_topic[d][old] -= 1;
                topic_totals[old] -= 1;

                let mut total = 0.0;
                for topic in 0..k {
                    let weight = (doc_topic[d][topic] as f64 + ALPHA)
                        * (topic_term[topic][term] as f64 + BETA)
                        / (topic_totals[topic] as f64 + BETA * num_terms as f64);
                    weights[topic] = weight;
                    total += weight;
                }

                let mut target = rng.gen::<f64>() * total;
                let mut new = k - 1;
                for (topic, weight) in weights.iter().enumerate() {
                    if target < *weight {
                        new = topic;
                        break;
                    }
                    target -= weight;
                }

                topic_term[new][term] += 1;
                doc_topic[d][new] += 1;
                topic_totals[new] += 1;
                assignments[d][i] = new;
            }
        }
    }

    topic_term
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &[&str] = &[
        "rust compilers optimize machine code for fast binaries",
        "the rust borrow checker rejects invalid machine code",
        "compilers translate source code into machine instructions",
        "bread baking needs flour yeast and patient kneading",
        "sourdough bread rises slowly from wild yeast cultures",
        "baking sourdough takes flour water salt and patience",
    ];

    fn config() -> TopicModelConfig {
        TopicModelConfig {
            num_topics: 2,
            seed: 42,
            passes: 10,
            terms_per_topic: 10,
        }
    }

    #[test]
    fn produces_one_term_list_per_topic() {
        let topics = LdaTopicModel::new().train_topics(CORPUS, &config()).unwrap();

        assert_eq!(topics.len(), 2);
        assert!(topics.iter().any(|terms| !terms.is_empty()));
    }

    #[test]
    fn is_deterministic_for_a_fixed_seed() {
        let model = LdaTopicModel::new();

        let first = model.train_topics(CORPUS, &config()).unwrap();
        let second = model.train_topics(CORPUS, &config()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn topic_terms_come_from_the_input_vocabulary() {
        let topics = LdaTopicModel::new().train_topics(CORPUS, &config()).unwrap();

        let vocabulary: Vec<String> = CORPUS.iter().flat_map(|doc| preprocess::tokenize(doc)).collect();
        for terms in &topics {
            for term in terms {
                assert!(vocabulary.contains(term), "unexpected term: {}", term);
            }
        }
    }

    #[test]
    fn fails_when_no_usable_terms_remain() {
        let model = LdaTopicModel::new();

        assert!(model.train_topics(&[], &config()).is_err());
        assert!(model.train_topics(&["the and of", "a an"], &config()).is_err());
    }
}

// Classifier Service
// TF-IDF vectorizer + logistic regression, loaded from two JSON artifacts

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

use crate::models::{ClassifierOutcome, Verdict};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("{} not found!", .path.display())]
    ArtifactMissing { path: PathBuf },
    #[error("Failed to read {}: {source}", .path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Artifact shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("Model classes must be 0 (fake) and 1 (real), got {classes:?}")]
    InvalidClasses { classes: [i64; 2] },
    #[error("Invalid probabilities: fake={fake}, real={real}")]
    InvalidProbabilities { fake: f64, real: f64 },
}

/// Binary fake/real classifier consumed by the analyzer.
pub trait NewsClassifier {
    /// `[p_fake, p_real]`
    fn predict_probability(&self, text: &str) -> Result<[f64; 2], ClassifierError>;

    fn predict(&self, text: &str) -> Result<Verdict, ClassifierError> {
        Ok(self.classify(text)?.predicted_label)
    }

    fn classify(&self, text: &str) -> Result<ClassifierOutcome, ClassifierError> {
        let [probability_fake, probability_real] = self.predict_probability(text)?;
        ClassifierOutcome::from_probabilities(probability_fake, probability_real)
    }
}

// ============ Vectorizer ============

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: HashSet<String>,
}

fn default_true() -> bool { true }
fn default_ngram_range() -> (usize, usize) { (1, 1) }

impl TfidfVectorizer {
    pub fn feature_count(&self) -> usize {
        self.idf.len()
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if let Some(&max_index) = self.vocabulary.values().max() {
            if max_index >= self.idf.len() {
                return Err(ClassifierError::ShapeMismatch {
                    expected: self.idf.len(),
                    actual: max_index + 1,
                });
            }
        }
        Ok(())
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let source = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        token_re()
            .find_iter(&source)
            .map(|m| m.as_str().to_string())
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut out = Vec::new();
        for n in min_n.max(1)..=max_n {
            if tokens.len() < n {
                break;
            }
            out.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        out
    }

    /// Sparse L2-normalized tf-idf vector, keyed by feature index.
    pub fn transform(&self, text: &str) -> BTreeMap<usize, f64> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.ngrams(&self.tokenize(text)) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        for (idx, value) in counts.iter_mut() {
            let tf = if self.sublinear_tf { 1.0 + value.ln() } else { *value };
            *value = tf * self.idf[*idx];
        }

        let norm = counts.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in counts.values_mut() {
                *value /= norm;
            }
        }
        counts
    }
}

// ============ Logistic Model ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Class labels in column order; the sigmoid output is the probability of `classes[1]`.
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

fn default_classes() -> [i64; 2] { [0, 1] }

impl LogisticModel {
    fn validate(&self, feature_count: usize) -> Result<(), ClassifierError> {
        if self.coefficients.len() != feature_count {
            return Err(ClassifierError::ShapeMismatch {
                expected: feature_count,
                actual: self.coefficients.len(),
            });
        }
        if self.classes != [0, 1] && self.classes != [1, 0] {
            return Err(ClassifierError::InvalidClasses { classes: self.classes });
        }
        Ok(())
    }

    fn decision_function(&self, features: &BTreeMap<usize, f64>) -> f64 {
        features
            .iter()
            .map(|(idx, value)| self.coefficients[*idx] * value)
            .sum::<f64>()
            + self.intercept
    }

    /// `[p_fake, p_real]`
    fn predict_probability(&self, features: &BTreeMap<usize, f64>) -> [f64; 2] {
        let positive = sigmoid_clamped(self.decision_function(features));
        if self.classes[1] == 1 {
            [1.0 - positive, positive]
        } else {
            [positive, 1.0 - positive]
        }
    }
}

fn sigmoid_clamped(x: f64) -> f64 {
    if x > 40.0 {
        1.0
    } else if x < -40.0 {
        0.0
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}

// ============ Linear News Classifier ============

#[derive(Debug, Clone)]
pub struct LinearNewsClassifier {
    vectorizer: TfidfVectorizer,
    model: LogisticModel,
}

impl LinearNewsClassifier {
    pub fn from_parts(vectorizer: TfidfVectorizer, model: LogisticModel) -> Result<Self, ClassifierError> {
        vectorizer.validate()?;
        model.validate(vectorizer.feature_count())?;
        Ok(Self { vectorizer, model })
    }

    pub fn feature_count(&self) -> usize {
        self.vectorizer.feature_count()
    }
}

impl NewsClassifier for LinearNewsClassifier {
    fn predict_probability(&self, text: &str) -> Result<[f64; 2], ClassifierError> {
        let features = self.vectorizer.transform(text);
        Ok(self.model.predict_probability(&features))
    }
}

fn read_artifact<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ClassifierError> {
    let content = fs::read_to_string(path).map_err(|source| ClassifierError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ClassifierError::ArtifactParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Verify both artifacts exist (vectorizer first), then load and cross-check them.
pub fn load_classifier(vectorizer_path: &Path, model_path: &Path) -> Result<LinearNewsClassifier, ClassifierError> {
    for path in [vectorizer_path, model_path] {
        if !path.exists() {
            return Err(ClassifierError::ArtifactMissing {
                path: path.to_path_buf(),
            });
        }
    }

    let vectorizer: TfidfVectorizer = read_artifact(vectorizer_path)?;
    let model: LogisticModel = read_artifact(model_path)?;
    let classifier = LinearNewsClassifier::from_parts(vectorizer, model)?;

    info!(
        vectorizer = %vectorizer_path.display(),
        model = %model_path.display(),
        features = classifier.feature_count(),
        "classifier.loaded"
    );
    Ok(classifier)
}

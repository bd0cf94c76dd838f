//! Vectorizer — TF-IDF feature vectors over one shared vocabulary.
//!
//! [`TfidfModel::fit`] builds the vocabulary and idf table once from the whole
//! corpus. The model is immutable afterwards; every downstream stage reads the
//! vectors it produced and nothing recomputes them.

use crate::error::{AnalysisError, Result};
use crate::types::{Corpus, SparseVector};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

// Two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern must compile"));

/// English function words excluded from the vocabulary.
pub static STOP_WORDS: phf::Set<&'static str> = phf::phf_set! {
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "amoungst", "amount", "an", "and", "another",
    "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "bill", "both",
    "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone",
    "everything", "everywhere", "except", "few", "fifteen", "fifty", "fill",
    "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter",
    "latterly", "least", "less", "ltd", "made", "many", "may", "me",
    "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our",
    "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps",
    "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such",
    "system", "take", "ten", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout",
    "thru", "thus", "to", "together", "too", "top", "toward", "towards",
    "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
};

/// Lowercased terms of `document`, stop words removed, in order of
/// appearance.
pub fn tokenize(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Vocabulary plus idf weights, fitted once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfModel {
    /// Term → column, columns assigned in lexicographic term order.
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    documents: usize,
}

impl TfidfModel {
    /// Fit the vocabulary and smoothed idf table on `documents`.
    ///
    /// Fails with [`AnalysisError::EmptyVocabulary`] when no document
    /// contributes a single term.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let unique: BTreeSet<String> = tokenize(document.as_ref()).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(AnalysisError::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, column);
        }

        tracing::debug!(terms = idf.len(), documents = documents.len(), "fitted tf-idf model");
        Ok(Self {
            vocabulary,
            idf,
            documents: documents.len(),
        })
    }

    /// Number of vocabulary terms, i.e. the length of every feature vector.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Number of documents the model was fitted on.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Vocabulary terms in column order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|c| self.idf[c])
    }

    /// L2-normalised tf × idf vector for one document. Terms outside the
    /// vocabulary are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        let counts = SparseVector::from_pairs(
            tokenize(document)
                .iter()
                .filter_map(|t| self.column(t))
                .map(|c| (c, 1.0)),
        );
        let weighted: Vec<(usize, f64)> =
            counts.iter().map(|(c, tf)| (c, tf * self.idf[c])).collect();
        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return SparseVector::default();
        }
        SparseVector::from_pairs(weighted.into_iter().map(|(c, w)| (c, w / norm)))
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }
}

/// Fit a model on the corpus' normalized messages and attach the resulting
/// vector to every record. Returns the model for callers that want to
/// inspect the vocabulary.
pub fn vectorize(corpus: &mut Corpus) -> Result<TfidfModel> {
    let documents = corpus.clean_messages();
    let model = TfidfModel::fit(&documents)?;
    let rows = model.transform_all(&documents);
    corpus.attach_features(model.dimension(), rows)?;
    tracing::info!(
        records = corpus.len(),
        terms = model.dimension(),
        "vectorized corpus"
    );
    Ok(model)
}

//! TF-IDF vectorizer with cosine ranking.
//!
//! `fit` learns a vocabulary and smoothed inverse document frequencies from a
//! corpus and keeps one sparse weight vector per text. Queries are projected
//! onto the fitted vocabulary only; unknown query terms are ignored.

use std::collections::{BTreeMap, HashMap};

use localrag_core::{Error, Result, Vectorizer};

use crate::analyzer::TermAnalyzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfOptions {
    /// Use `1 + ln(tf)` instead of the raw count.
    pub sublinear_tf: bool,
    /// Add one to document counts, as if an extra document held every term once.
    pub smooth_idf: bool,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self { sublinear_tf: false, smooth_idf: true }
    }
}

/// Sparse vector sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
struct SparseVector {
    entries: Vec<(usize, f32)>,
    norm: f32,
}

impl SparseVector {
    fn new(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|&(term, _)| term);
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        Self { entries, norm }
    }

    fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j, mut dot) = (0, 0, 0.0f32);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }

    /// Zero when either side has no weight.
    fn cosine(&self, other: &SparseVector) -> f32 {
        let denom = self.norm * other.norm;
        if denom == 0.0 { 0.0 } else { self.dot(other) / denom }
    }
}

#[derive(Debug, Clone)]
struct FittedModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    rows: Vec<SparseVector>,
}

#[derive(Clone)]
pub struct TfidfVectorizer {
    analyzer: TermAnalyzer,
    options: TfidfOptions,
    model: Option<FittedModel>,
}

impl TfidfVectorizer {
    pub fn new() -> Result<Self> {
        Self::with_options(TfidfOptions::default())
    }

    pub fn with_options(options: TfidfOptions) -> Result<Self> {
        Ok(Self { analyzer: TermAnalyzer::english()?, options, model: None })
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.vocabulary.len())
    }

    /// Learned inverse document frequency for `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f32> {
        let model = self.model.as_ref()?;
        model.vocabulary.get(term).map(|&id| model.idf[id])
    }

    /// Cosine similarity of `query` against every fitted row, in corpus order.
    pub fn scores(&self, query: &str) -> Result<Vec<f32>> {
        let model = self.model.as_ref().ok_or(Error::NotReady)?;
        let mut analyzer = self.analyzer.clone();
        let query_vec = self.weigh(&analyzer.terms(query), &model.vocabulary, &model.idf);
        Ok(model.rows.iter().map(|row| query_vec.cosine(row)).collect())
    }

    fn tf(&self, count: usize) -> f32 {
        let count = count as f32;
        if self.options.sublinear_tf { 1.0 + count.ln() } else { count }
    }

    fn weigh(&self, terms: &[String], vocabulary: &HashMap<String, usize>, idf: &[f32]) -> SparseVector {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for term in terms {
            if let Some(&id) = vocabulary.get(term) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        SparseVector::new(counts.into_iter().map(|(id, count)| (id, self.tf(count) * idf[id])).collect())
    }
}

impl Vectorizer for TfidfVectorizer {
    fn fit(&mut self, texts: &[&str]) -> Result<()> {
        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| self.analyzer.terms(t)).collect();

        // Sorted so term ids are stable across runs.
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &tokenized {
            let mut seen: Vec<&str> = terms.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = texts.len() as f32;
        let smooth = if self.options.smooth_idf { 1.0 } else { 0.0 };
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (id, (term, df)) in document_frequency.iter().enumerate() {
            vocabulary.insert((*term).to_string(), id);
            idf.push(((n + smooth) / (*df as f32 + smooth)).ln() + 1.0);
        }

        let rows = tokenized.iter().map(|terms| self.weigh(terms, &vocabulary, &idf)).collect();
        tracing::debug!(texts = texts.len(), vocabulary = vocabulary.len(), "fitted tf-idf model");
        self.model = Some(FittedModel { vocabulary, idf, rows });
        Ok(())
    }

    fn top_k(&self, query: &str, texts: &[&str], k: usize) -> Result<Vec<usize>> {
        let model = self.model.as_ref().ok_or(Error::NotReady)?;
        if texts.len() != model.rows.len() {
            return Err(Error::CorpusMismatch { fitted: model.rows.len(), given: texts.len() });
        }
        let scores = self.scores(query)?;
        let mut order: Vec<usize> = (0..scores.len()).collect();
        // Stable sort: equal scores keep corpus order.
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order.truncate(k);
        Ok(order)
    }
}

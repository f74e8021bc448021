use crate::error::Result;

/// A ranking strategy over a fixed corpus of texts.
///
/// Implementations are two-phase: `fit` learns whatever statistics the
/// strategy needs from the corpus, `top_k` ranks that same corpus against a
/// query. Row `i` of the fitted state must always correspond to `texts[i]`.
pub trait Vectorizer: Send + Sync {
    /// Rebuild all state from `texts`. A failed fit leaves the previous state intact.
    fn fit(&mut self, texts: &[&str]) -> Result<()>;

    /// Positions into `texts`, best match first, at most `k` of them.
    ///
    /// Returns [`crate::Error::NotReady`] when called before `fit`, and
    /// [`crate::Error::CorpusMismatch`] when `texts` is not the fitted corpus size.
    fn top_k(&self, query: &str, texts: &[&str], k: usize) -> Result<Vec<usize>>;
}

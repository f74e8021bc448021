use localrag_core::{Error, Vectorizer};
use localrag_text::TfidfVectorizer;

#[test]
fn tfidf_full_flow() -> anyhow::Result<()> {
    let corpus = [
        "Tantivy is a full-text search engine library written in Rust.",
        "Cosine similarity compares the angle between two vectors.",
        "Rust guarantees memory safety without a garbage collector.",
        "Term frequency counts how often a word appears in a document.",
    ];
    let mut vectorizer = TfidfVectorizer::new()?;
    vectorizer.fit(&corpus)?;

    let hits = vectorizer.top_k("rust memory safety", &corpus, 2)?;
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0], 2);
    assert_eq!(hits[1], 0);

    let scores = vectorizer.scores("rust memory safety")?;
    assert!(scores[hits[0]] >= scores[hits[1]]);
    Ok(())
}

#[test]
fn result_length_is_min_of_k_and_corpus() -> anyhow::Result<()> {
    let corpus = ["alpha beta", "gamma delta", "epsilon"];
    let mut vectorizer = TfidfVectorizer::new()?;
    vectorizer.fit(&corpus)?;
    assert_eq!(vectorizer.top_k("alpha", &corpus, 10)?.len(), 3);
    assert_eq!(vectorizer.top_k("alpha", &corpus, 1)?, vec![0]);
    assert!(vectorizer.top_k("alpha", &corpus, 0)?.is_empty());
    Ok(())
}

#[test]
fn equal_scores_keep_corpus_order() -> anyhow::Result<()> {
    let corpus = ["kernel module", "kernel module", "userspace", "kernel module"];
    let mut vectorizer = TfidfVectorizer::new()?;
    vectorizer.fit(&corpus)?;
    assert_eq!(vectorizer.top_k("kernel", &corpus, 4)?, vec![0, 1, 3, 2]);
    Ok(())
}

#[test]
fn mismatched_corpus_is_rejected() -> anyhow::Result<()> {
    let mut vectorizer = TfidfVectorizer::new()?;
    vectorizer.fit(&["one text", "two text"])?;
    let err = vectorizer.top_k("text", &["one text"], 1).unwrap_err();
    assert!(matches!(err, Error::CorpusMismatch { fitted: 2, given: 1 }));
    Ok(())
}

#[test]
fn stop_word_only_corpus_falls_back_to_corpus_order() -> anyhow::Result<()> {
    let corpus = ["the and of", "is it a"];
    let mut vectorizer = TfidfVectorizer::new()?;
    vectorizer.fit(&corpus)?;
    assert_eq!(vectorizer.vocabulary_size(), 0);
    assert_eq!(vectorizer.top_k("the", &corpus, 2)?, vec![0, 1]);
    Ok(())
}

#[test]
fn identifiers_are_matched_whole() -> anyhow::Result<()> {
    let corpus = ["call split_text to chunk", "split the text into chunks", "max_chars bounds a chunk"];
    let mut vectorizer = TfidfVectorizer::new()?;
    vectorizer.fit(&corpus)?;
    assert!(vectorizer.idf("split_text").is_some());
    assert!(vectorizer.idf("max_chars").is_some());
    assert_eq!(vectorizer.top_k("split_text", &corpus, 1)?, vec![0]);
    Ok(())
}

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn localrag(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("localrag").unwrap();
    // Run inside the temp dir so no stray config.toml is picked up.
    cmd.current_dir(dir.path()).env_remove("OPENAI_API_KEY").env("RUST_ENV", "test");
    cmd
}

#[test]
fn chat_prints_context_then_exits() {
    let tmp = TempDir::new().unwrap();
    let sample = tmp.path().join("sample.txt");
    fs::write(&sample, "Hello world. Test document.\nAnother line.").unwrap();

    localrag(&tmp)
        .args(["chat", "--file", sample.to_str().unwrap()])
        .write_stdin("hello?\n/exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexing file:"))
        .stdout(predicate::str::contains("Top Context"))
        .stdout(predicate::str::contains("Hello world. Test document."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn chat_exits_cleanly_on_eof() {
    let tmp = TempDir::new().unwrap();
    let sample = tmp.path().join("sample.txt");
    fs::write(&sample, "This is a tiny document about arcs and curves.").unwrap();

    localrag(&tmp)
        .args(["chat", "--file", sample.to_str().unwrap()])
        .write_stdin("what is this?\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Context"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn chat_reports_missing_llm_without_failing() {
    let tmp = TempDir::new().unwrap();
    let sample = tmp.path().join("sample.txt");
    fs::write(&sample, "Arcs and curves.").unwrap();

    localrag(&tmp)
        .args(["chat", "--answer", "--file", sample.to_str().unwrap()])
        .write_stdin("curves?\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("LLM unavailable or failed:"))
        .stdout(predicate::str::contains("OPENAI_API_KEY not set"));
}

#[test]
fn empty_file_has_no_context() {
    let tmp = TempDir::new().unwrap();
    let sample = tmp.path().join("empty.txt");
    fs::write(&sample, "   \n").unwrap();

    localrag(&tmp)
        .args(["chat", "--file", sample.to_str().unwrap()])
        .write_stdin("anything\n:q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No relevant context found."));
}

#[test]
fn search_emits_json_documents() {
    let tmp = TempDir::new().unwrap();
    let sample = tmp.path().join("rag.txt");
    fs::write(
        &sample,
        "Python is a programming language.\nIt emphasizes readability.\nRAG combines retrieval and generation.\n",
    )
    .unwrap();

    let output = localrag(&tmp)
        .args(["search", "--file", sample.to_str().unwrap(), "--max-chars", "60", "--overlap", "10", "-k", "1", "--json", "What is RAG?"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let docs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(docs.as_array().map(Vec::len), Some(1));
    assert_eq!(docs[0]["metadata"]["chunk_id"], 1);
    assert!(docs[0]["content"].as_str().unwrap().contains("RAG combines retrieval and generation"));
}

#[test]
fn missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    localrag(&tmp)
        .args(["search", "--file", "does-not-exist.txt", "query"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn zero_k_flag_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let sample = tmp.path().join("sample.txt");
    fs::write(&sample, "Some text worth searching.").unwrap();

    localrag(&tmp)
        .args(["search", "--file", sample.to_str().unwrap(), "-k", "0", "searching"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("retrieval.top_k must be positive"));
}

#[test]
fn indexing_is_logged_by_default() {
    let tmp = TempDir::new().unwrap();
    let sample = tmp.path().join("sample.txt");
    fs::write(&sample, "Some text worth searching.").unwrap();

    localrag(&tmp)
        .env_remove("RUST_LOG")
        .args(["search", "--file", sample.to_str().unwrap(), "searching"])
        .assert()
        .success()
        .stderr(predicate::str::contains("indexed file"));
}

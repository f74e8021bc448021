use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use console::{style, Term};
use localrag_core::config::Settings;
use localrag_core::Document;

use crate::answer::{AnswerGenerator, OpenAiAnswerGenerator};
use crate::build_retriever;

const EXIT_COMMANDS: [&str; 3] = ["/exit", "quit", ":q"];

fn rule(title: &str) {
    let width = Term::stdout().size_checked().map_or(60, |(_, cols)| cols as usize).min(100);
    if title.is_empty() {
        println!("{}", style("─".repeat(width)).dim());
    } else {
        let side = width.saturating_sub(title.chars().count() + 2) / 2;
        println!("{} {} {}", style("─".repeat(side)).dim(), style(title).bold(), style("─".repeat(side)).dim());
    }
}

fn join_context(docs: &[&Document]) -> String {
    docs.iter().map(|d| d.content.as_str()).collect::<Vec<_>>().join("\n\n")
}

pub fn run_chat(path: &Path, settings: &Settings, use_llm: bool) -> Result<()> {
    println!("Indexing file: {}", style(path.display()).bold());
    let retriever = build_retriever(path, settings)?;

    println!("Type your question. Use /exit to quit.");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("{} ", style(">").cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!("\nGoodbye!");
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&query.to_lowercase().as_str()) {
            println!("Goodbye!");
            break;
        }

        let docs = retriever.retrieve(query, settings.retrieval.top_k)?;
        if docs.is_empty() {
            println!("{}", style("No relevant context found.").yellow());
            continue;
        }

        let context = join_context(&docs);
        rule("Top Context");
        println!("{}", context);
        rule("");

        if use_llm {
            let contents: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
            match OpenAiAnswerGenerator::from_env(&settings.answer).and_then(|g| g.generate(query, &contents)) {
                Ok(answer) => {
                    rule("Answer");
                    println!("{}", answer);
                    rule("");
                }
                Err(e) => println!("{} {:#}", style("LLM unavailable or failed:").yellow(), e),
            }
        }
    }
    Ok(())
}

pub fn run_search(path: &Path, settings: &Settings, query: &str, json: bool) -> Result<()> {
    let retriever = build_retriever(path, settings)?;
    let docs = retriever.retrieve(query, settings.retrieval.top_k)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }
    if docs.is_empty() {
        println!("No relevant context found for: {}", style(query).italic());
        return Ok(());
    }
    println!("\nFound {} results for: {}\n", style(docs.len()).cyan(), style(query).yellow().bold());
    for (i, doc) in docs.iter().enumerate() {
        let chunk = doc.chunk_id().map_or_else(|| "?".to_string(), |id| id.to_string());
        println!("{}. {}", style(i + 1).dim(), style(format!("chunk {}", chunk)).green());
        println!("   {}\n", doc.content.replace('\n', "\n   "));
    }
    Ok(())
}

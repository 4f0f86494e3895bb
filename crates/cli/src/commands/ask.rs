//! `driversfriend ask`: Single question or interactive session.

use driversfriend_config::AppConfig;
use driversfriend_core::resolution::{ChatRequest, ResolutionResult};
use driversfriend_resolver::ResolutionPipeline;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(
    config: AppConfig,
    message: Option<String>,
    language: String,
    user: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = driversfriend_resolver::build_from_config(&config).await?;

    if let Some(msg) = message {
        let request = ChatRequest::new(msg, language).with_user(user);
        let result = pipeline.handle(&request).await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_result(&result);
        }
        return Ok(());
    }

    interactive(&pipeline, &language, &user).await
}

async fn interactive(
    pipeline: &ResolutionPipeline,
    language: &str,
    user: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("  Driver's Friend — Interactive Mode");
    println!("  Language: {language}");
    println!("  Type your question and press Enter. Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let request = ChatRequest::new(line, language).with_user(user);
        match pipeline.handle(&request).await {
            Ok(result) => {
                println!();
                print_result(&result);
                println!();
            }
            Err(e) => eprintln!("  [Error] {e}"),
        }
    }

    println!();
    println!("  Drive safely! 🚗");
    Ok(())
}

fn print_result(result: &ResolutionResult) {
    for line in result.response.lines() {
        println!("  {line}");
    }
    println!(
        "  [{} · confidence {:.2}]",
        result.intent_name(),
        result.confidence()
    );
    if let Some(suggestions) = &result.suggestions {
        println!("  You might also ask:");
        for question in suggestions {
            println!("    • {question}");
        }
    }
}

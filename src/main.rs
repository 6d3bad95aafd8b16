use std::time::Instant;

use clap::{Arg, ArgAction, Command};
use cocktail_import::{ImportError, LlmProvider, RecipeImporter};
use log::debug;
use tokio::io::AsyncReadExt;

async fn read_input(path: &str) -> Result<String, ImportError> {
    if path == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(text)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("cocktail-import")
        .version(VERSION)
        .about("Extract structured cocktail recipes from web pages, pasted text or AI output.")
        .arg(
            Arg::new("url")
                .long("url")
                .conflicts_with("input")
                .help("Fetch the recipe page at this URL."),
        )
        .arg(
            Arg::new("input")
                .default_value("-")
                .help("File containing the recipe text, or '-' to read standard input."),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .action(ArgAction::SetTrue)
                .help("The input is already AI output; parse it without calling a provider."),
        )
        .arg(
            Arg::new("provider")
                .long("provider")
                .value_parser(["openai", "anthropic"])
                .help("AI provider to use instead of the configured default."),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .help("Model name to request from the provider."),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .help("Language the source text is written in."),
        )
        .arg(
            Arg::new("timed")
                .long("timed")
                .action(ArgAction::SetTrue)
                .help("Report how long the import took on standard error."),
        )
        .get_matches();

    let mut builder = RecipeImporter::builder();
    builder = match matches.get_one::<String>("url") {
        Some(url) => builder.url(url),
        None => {
            let path = matches
                .get_one::<String>("input")
                .map(String::as_str)
                .unwrap_or("-");
            builder.text(read_input(path).await?)
        }
    };

    if matches.get_flag("raw") {
        builder = builder.skip_ai();
    }
    match matches.get_one::<String>("provider").map(String::as_str) {
        Some("anthropic") => builder = builder.provider(LlmProvider::Anthropic),
        Some(_) => builder = builder.provider(LlmProvider::OpenAI),
        None => {}
    }
    if let Some(model) = matches.get_one::<String>("model") {
        builder = builder.model(model);
    }
    if let Some(language) = matches.get_one::<String>("language") {
        builder = builder.language(language);
    }

    let start = Instant::now();
    let report = builder.build().await?;
    let elapsed = start.elapsed();
    debug!("Parsed via {:?}", report.source);

    let summary = report.summary();
    let parsed = report.into_parsed();
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    eprintln!("{}", summary);
    if matches.get_flag("timed") {
        eprintln!("Finished in {:.1} ms", elapsed.as_secs_f64() * 1000.0);
    }

    if parsed.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

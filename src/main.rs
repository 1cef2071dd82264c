// notion-enhancer CLI entry point.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use notion_enhancer_lib::{enhance_export, ClientConfig, EnhanceOptions, NotionClient};

#[derive(Parser)]
#[command(name = "notion-enhancer", about = "Prettifies Notion .zip exports")]
struct Cli {
    /// The token for your Notion.so session
    #[arg(env = "NOTION_TOKEN_V2", hide_env_values = true)]
    token_v2: String,

    /// The path to the Notion exported .zip file
    zip_path: PathBuf,

    /// The path to output to, defaults to cwd
    #[arg(long, default_value = ".")]
    output_path: PathBuf,

    /// Removes the title that Notion adds. H1s at the top of every file
    #[arg(long)]
    remove_title: bool,

    /// Do not rewrite the paths in the Markdown files to match file renaming
    #[arg(long)]
    no_rewrite_paths: bool,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv(); // Try to load .env, ignore if missing
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let started = Instant::now();

    let client = NotionClient::new(ClientConfig::new(cli.token_v2).with_env_overrides())?;
    let options = EnhanceOptions {
        remove_title: cli.remove_title,
        rewrite_paths: !cli.no_rewrite_paths,
    };

    let report = enhance_export(&client, &cli.zip_path, &cli.output_path, &options)
        .with_context(|| format!("Failed to enhance '{}'", cli.zip_path.display()))?;

    log::info!(
        "Finished in {:.2} seconds ({} files, {} links rewritten)",
        started.elapsed().as_secs_f64(),
        report.files_written,
        report.links_rewritten
    );
    println!("Output file written as '{}'", report.output_path.display());

    if !report.failed_documents.is_empty() {
        anyhow::bail!(
            "{} file(s) were left out of the output: {}",
            report.failed_documents.len(),
            report.failed_documents.join(", ")
        );
    }
    Ok(())
}

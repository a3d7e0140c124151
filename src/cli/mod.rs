//! Command-line interface: a thin host around the pipeline.
//!
//! Parses arguments, builds the completion client from configuration, runs
//! one pipeline invocation, renders the result to the terminal, and persists
//! it as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use console::style;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::completions::openai_api::{OpenAiClient, OpenAiClientConfig};
use crate::domain::models::{AgentKind, PipelineResult, Recommendation};
use crate::infrastructure::config::ConfigLoader;
use crate::services::ResearchPipeline;

/// Prospector - multi-agent market research for product ideas
#[derive(Debug, Parser)]
#[command(name = "prospector", version, about)]
pub struct Cli {
    /// The product idea to research, e.g. "AI-powered fitness app"
    pub idea: String,

    /// Path to write the JSON result (default: research_results_<idea>.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to a configuration file (overrides the default search)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the raw JSON result instead of the formatted report
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI end to end.
pub async fn execute(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let client_config = OpenAiClientConfig::from_completion_config(&config.completion)
        .context("Completion client configuration failed (is OPENAI_API_KEY set?)")?;
    let client = Arc::new(OpenAiClient::new(client_config)?);

    let pipeline = ResearchPipeline::new(client);
    let result = pipeline.run(&cli.idea).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    let output_path = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.idea));
    save_result(&result, &output_path)?;
    println!("\nResults saved to: {}", output_path.display());

    Ok(())
}

/// Default output path: `research_results_<idea-slug>.json`, slug capped at
/// 20 characters. Path separators in the idea are flattened so the file
/// always lands in the current directory.
pub fn default_output_path(idea: &str) -> PathBuf {
    let slug: String = idea
        .chars()
        .map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c })
        .take(20)
        .collect();
    PathBuf::from(format!("research_results_{slug}.json"))
}

/// Persist the serialized result.
pub fn save_result(result: &PipelineResult, path: &std::path::Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

fn recommendation_glyph(recommendation: Recommendation) -> console::StyledObject<&'static str> {
    match recommendation {
        Recommendation::Good => style("Good").green(),
        Recommendation::Neutral => style("Neutral").yellow(),
        Recommendation::Poor => style("Poor").red(),
        Recommendation::Error => style("Error").red().dim(),
    }
}

/// Render the formatted run report.
fn print_report(result: &PipelineResult) {
    println!(
        "\n{} {}",
        style("Researching product idea:").bold(),
        result.product_idea
    );
    println!("{}", "=".repeat(60));

    for kind in [AgentKind::Incumbents, AgentKind::Funding, AgentKind::Growth] {
        if let Some(output) = result.results.get(&kind) {
            println!("\n{}", style(kind.to_string()).bold());
            println!("   Analysis: {}", truncate(&output.analysis, 200));
            println!("   Confidence: {:.1}", output.confidence);
        }
    }

    if let Some(decision) = result.results.get(&AgentKind::Decision) {
        println!("\n{}", style("Final Recommendation").bold());
        if let Some(recommendation) = decision.recommendation {
            println!("   Recommendation: {}", recommendation_glyph(recommendation));
        }
        println!("   Reasoning: {}", truncate(&decision.analysis, 300));
        println!("   Confidence: {:.1}", decision.confidence);
    }

    println!("\n{}", style("System Evaluation").bold());
    println!("{}", "-".repeat(30));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Agent"),
        Cell::new("Overall"),
        Cell::new("Length"),
        Cell::new("Confidence"),
        Cell::new("Summary"),
    ]);
    for (agent, score) in &result.evaluation.evaluations {
        table.add_row(vec![
            Cell::new(agent),
            Cell::new(format!("{:.2}", score.overall_score)),
            Cell::new(score.response_length),
            Cell::new(format!("{:.1}", score.confidence)),
            Cell::new(&score.summary),
        ]);
    }
    println!("{table}");

    println!(
        "   Overall Score: {}/10 ({})",
        result.evaluation.system_score,
        result.evaluation.performance_label()
    );
    for recommendation in result.evaluation.recommendations.iter().take(2) {
        println!("     - {recommendation}");
    }
}

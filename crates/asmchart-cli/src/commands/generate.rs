//! Generate Verilog from charts

use anyhow::{Context, Result};
use asmchart_codegen::{CompileOptions, Compiler};

use super::load_config;

/// Run the generate command
pub async fn run(
    config_path: &str,
    chart: Option<&str>,
    output: Option<&str>,
    comments: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let mut codegen = config.project.codegen.clone();
    codegen.source_comments |= comments;

    let compiler = Compiler::new(CompileOptions {
        output_dir: config.output_dir(),
        codegen,
    });

    match (chart, output) {
        (Some(chart), Some(output)) => {
            let compiled = compiler
                .compile_chart_to(chart, output)
                .await
                .with_context(|| format!("Failed to generate {}", chart))?;
            tracing::info!("✓ {} → {}", compiled.name, compiled.path.display());
        }
        (Some(chart), None) => {
            let compiled = compiler
                .compile_chart(chart)
                .await
                .with_context(|| format!("Failed to generate {}", chart))?;
            tracing::info!("✓ {} → {}", compiled.name, compiled.path.display());
        }
        (None, Some(_)) => {
            anyhow::bail!("--output requires a chart file");
        }
        (None, None) => {
            let charts_dir = config.charts_dir();
            tracing::info!("Generating all charts in {}", charts_dir.display());

            let results = compiler
                .compile_all(&charts_dir)
                .await
                .context("Failed to generate charts")?;

            if results.is_empty() {
                tracing::warn!("No charts found in {}", charts_dir.display());
            }
            for compiled in &results {
                tracing::info!(
                    "  ✓ {} ({} states, {} bytes)",
                    compiled.name,
                    compiled.states,
                    compiled.size()
                );
            }
        }
    }

    tracing::info!("Generation complete");
    Ok(())
}

//! Validate a chart without writing output

use anyhow::{Context, Result};
use asmchart_codegen::{CompileOptions, Compiler};

use super::load_config;

/// Run the validate command
pub async fn run(config_path: &str, chart: &str) -> Result<()> {
    tracing::info!("Validating chart: {}", chart);

    let config = load_config(config_path)?;
    let compiler = Compiler::new(CompileOptions {
        output_dir: config.output_dir(),
        codegen: config.project.codegen.clone(),
    });

    let compiled = compiler
        .check_chart(chart)
        .await
        .with_context(|| format!("Chart {} is invalid", chart))?;

    tracing::info!("✓ Module: {}", compiled.name);
    tracing::info!("✓ States: {}", compiled.states);
    println!("{}: ok ({} states)", compiled.name, compiled.states);
    Ok(())
}

//! Chart file compiler
//!
//! Reads chart descriptions from disk, generates Verilog and writes one
//! `<chart name>.v` per chart. Output is only written once generation for
//! that chart has fully succeeded.

use std::path::{Path, PathBuf};

use asmchart_core::CodegenConfig;

use crate::error::Result;
use crate::generator::Generator;
use crate::parser::{ChartFormat, Parser};

/// Options for the compiler
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Output directory for generated modules
    pub output_dir: PathBuf,

    /// Code generation settings
    pub codegen: CodegenConfig,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            codegen: CodegenConfig::default(),
        }
    }
}

/// Chart → Verilog file compiler
pub struct Compiler {
    options: CompileOptions,
    parser: Parser,
    generator: Generator,
}

impl Compiler {
    /// Create a new compiler with the given options
    pub fn new(options: CompileOptions) -> Self {
        Self {
            parser: Parser::new(),
            generator: Generator::with_config(options.codegen.clone()),
            options,
        }
    }

    /// Parse and generate a chart without writing anything
    pub async fn check_chart(&self, chart_path: impl AsRef<Path>) -> Result<CompiledModule> {
        let chart_path = chart_path.as_ref();
        let format = ChartFormat::from_path(chart_path)?;
        let content = tokio::fs::read_to_string(chart_path).await?;

        let chart = self.parser.parse_str(&content, format)?;
        let source = self.generator.generate(&chart)?;
        let states = chart.states().count();

        Ok(CompiledModule {
            path: self.options.output_dir.join(format!("{}.v", chart.name)),
            name: chart.name,
            states,
            source,
        })
    }

    /// Compile a chart into `<output_dir>/<name>.v`
    pub async fn compile_chart(&self, chart_path: impl AsRef<Path>) -> Result<CompiledModule> {
        let chart_path = chart_path.as_ref();
        tracing::info!("Compiling chart: {}", chart_path.display());

        let compiled = self.check_chart(chart_path).await?;

        tokio::fs::create_dir_all(&self.options.output_dir).await?;
        compiled.save(&compiled.path).await?;

        tracing::info!(
            "Wrote {} ({} states, {} bytes)",
            compiled.path.display(),
            compiled.states,
            compiled.size()
        );

        Ok(compiled)
    }

    /// Compile a chart into an explicit output file
    pub async fn compile_chart_to(
        &self,
        chart_path: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<CompiledModule> {
        let mut compiled = self.check_chart(chart_path).await?;
        compiled.path = output.as_ref().to_path_buf();

        if let Some(parent) = compiled.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        compiled.save(&compiled.path).await?;

        tracing::info!("Wrote {}", compiled.path.display());
        Ok(compiled)
    }

    /// Compile every chart description under a directory
    pub async fn compile_all(&self, charts_dir: impl AsRef<Path>) -> Result<Vec<CompiledModule>> {
        let mut results = Vec::new();

        for path in chart_files(charts_dir.as_ref()) {
            let compiled = self.compile_chart(&path).await?;
            results.push(compiled);
        }

        Ok(results)
    }
}

/// Chart description files under `dir`, sorted by path
pub fn chart_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| ChartFormat::from_path(p).is_ok())
        .collect();
    files.sort();
    files
}

/// A generated module ready to be written
#[derive(Debug)]
pub struct CompiledModule {
    /// Module (chart) name
    pub name: String,

    /// Number of case arms
    pub states: usize,

    /// Generated Verilog
    pub source: String,

    /// Destination file
    pub path: PathBuf,
}

impl CompiledModule {
    /// Write the generated source to a file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        tokio::fs::write(path.as_ref(), &self.source).await?;
        Ok(())
    }

    /// Size of the generated source in bytes
    pub fn size(&self) -> usize {
        self.source.len()
    }
}

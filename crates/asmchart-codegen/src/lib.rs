//! asmchart Code Generation
//!
//! This crate turns ASM chart descriptions into Verilog state machines.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌─────────┐     ┌─────────┐     ┌─────────┐     ┌─────────┐
//! │XML/YAML │────▶│  Chart  │────▶│ Verilog │────▶│  .v     │
//! │  chart  │     │ (Parse) │     │  (Gen)  │     │ (Write) │
//! └─────────┘     └─────────┘     └─────────┘     └─────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use asmchart_codegen::{Generator, Parser};
//!
//! let chart = Parser::new().parse_file("charts/traffic.xml")?;
//! let verilog = Generator::new().generate(&chart)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod blocks;
pub mod compiler;
pub mod error;
pub mod generator;
pub mod parser;

pub use compiler::{CompileOptions, CompiledModule, Compiler};
pub use error::{Error, Result};
pub use generator::{Generator, generate};
pub use parser::{ChartFormat, Parser};

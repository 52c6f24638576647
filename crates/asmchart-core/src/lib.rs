//! asmchart Core Library
//!
//! This crate provides the pieces shared by the generator and the CLI:
//! - The ASM chart model (variables, state/decision/condition nodes)
//! - Chart integrity checks
//! - Project configuration (`asmchart.yaml`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Chart    │────▶│    Chart    │────▶│   Codegen   │
//! │ description │     │    model    │     │  (Verilog)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use asmchart_core::{Chart, Direction, Node, StateNode, Variable};
//!
//! let mut chart = Chart::new("blink", 0);
//! chart.add_variable(Variable::new("led", 1, Direction::Output)).unwrap();
//! chart.add_node(Node::State(StateNode::new(0, "on", vec!["led <= 1;".into()], Some(1)))).unwrap();
//! chart.add_node(Node::State(StateNode::new(1, "off", vec!["led <= 0;".into()], Some(0)))).unwrap();
//! chart.validate().unwrap();
//! assert_eq!(chart.states().count(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chart;
pub mod config;
pub mod error;

pub use chart::{
    Chart, ConditionNode, DecisionNode, Direction, Node, NodeId, StateNode, Variable,
    is_identifier,
};
pub use config::{CodegenConfig, Config, ProjectConfig};
pub use error::{Error, Result};

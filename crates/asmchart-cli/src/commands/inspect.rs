//! Print a parsed chart

use anyhow::{Context, Result};
use asmchart_codegen::Parser;
use asmchart_core::{Node, NodeId};

/// Run the inspect command
pub async fn run(chart_path: &str, json: bool) -> Result<()> {
    let chart = Parser::new()
        .parse_file(chart_path)
        .with_context(|| format!("Failed to parse {}", chart_path))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!("Chart: {}", chart.name);
    println!("Start: {}", chart.start);

    println!("Variables:");
    for variable in chart.variables.values() {
        println!(
            "  {} [{} bit] {:?}",
            variable.name, variable.bit_width, variable.direction
        );
    }

    println!("Nodes:");
    for node in chart.nodes.values() {
        match node {
            Node::State(state) => println!(
                "  {} state '{}' ({} statements) -> {}",
                state.id,
                state.label,
                state.statements.len(),
                target(state.next)
            ),
            Node::Decision(decision) => println!(
                "  {} decision ({}) ? {} : {}",
                decision.id, decision.condition, decision.on_true, decision.on_false
            ),
            Node::Condition(condition) => println!(
                "  {} condition '{}' ({} statements) -> {}",
                condition.id,
                condition.label,
                condition.statements.len(),
                target(condition.next)
            ),
        }
    }

    Ok(())
}

fn target(next: Option<NodeId>) -> String {
    next.map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

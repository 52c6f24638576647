//! State case-arm codegen

use asmchart_core::StateNode;

use super::code_block::CodeBlock;
use super::continuation::Continuation;
use crate::error::Result;

/// Helper for generating one case arm per state node
pub struct StateCodegen;

impl StateCodegen {
    /// Emit `<id>: begin`, the state's statements, its resolved successor
    /// and `end`.
    pub fn generate(
        state: &StateNode,
        resolver: &mut Continuation<'_>,
        indent: &str,
        source_comments: bool,
    ) -> Result<String> {
        let mut block = CodeBlock::new(indent);

        block.append(&format!("{}: begin", state.id), 0);

        if source_comments && !state.label.is_empty() {
            block.comment(&state.label, 1);
        }
        for statement in &state.statements {
            block.append(statement, 1);
        }

        let next = resolver.resolve_from(state.id, state.next)?;
        block.nest(&next, 1);

        block.append("end", 0);

        Ok(block.finalize())
    }
}

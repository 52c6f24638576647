//! Verilog module generator
//!
//! Assembles the complete module for one chart: header, declarations,
//! initialization, free-running clock and the clocked `case` statement
//! with one arm per state node.

use asmchart_core::{Chart, CodegenConfig};

use crate::blocks::{Assignment, CodeBlock, Continuation, DeclarationsCodegen, StateCodegen};
use crate::error::{Error, Result};

/// Generate a module for `chart` with default settings
pub fn generate(chart: &Chart) -> Result<String> {
    Generator::new().generate(chart)
}

/// Chart → Verilog generator
#[derive(Debug, Clone)]
pub struct Generator {
    config: CodegenConfig,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator with default settings
    pub fn new() -> Self {
        Self::with_config(CodegenConfig::default())
    }

    /// Create a generator from project settings
    pub fn with_config(config: CodegenConfig) -> Self {
        Self { config }
    }

    /// Emit state and condition labels as comments
    pub fn with_source_comments(mut self) -> Self {
        self.config.source_comments = true;
        self
    }

    /// Generate the complete module text.
    ///
    /// Fails without producing any output if the chart collides with the
    /// generated registers, references a missing node, or contains a loop
    /// of decision/condition nodes that never reaches a state.
    pub fn generate(&self, chart: &Chart) -> Result<String> {
        self.config.validate()?;
        self.check_reserved_names(chart)?;

        if chart.node(chart.start).is_none() {
            return Err(asmchart_core::Error::UnknownStart { id: chart.start }.into());
        }

        let indent = self.config.indent_unit();
        let mut module = CodeBlock::new(&indent);

        module.append(
            &format!(
                "module {} ({});",
                chart.name,
                DeclarationsCodegen::port_list(chart.ports())
            ),
            0,
        );
        module.append(
            &DeclarationsCodegen::generate(
                chart.variables.values(),
                &self.config.clock_signal,
                &self.config.state_register,
            ),
            1,
        );
        module.blank_line();

        module.append(&self.initial_block(chart, &indent)?, 1);
        module.blank_line();

        module.append(&self.clock_block(&indent), 1);
        module.blank_line();

        module.append(&self.state_machine_block(chart, &indent)?, 1);
        module.blank_line();

        module.append("endmodule", 0);

        tracing::debug!(
            chart = %chart.name,
            states = chart.states().count(),
            "generated module"
        );

        Ok(module.finalize())
    }

    fn check_reserved_names(&self, chart: &Chart) -> Result<()> {
        for name in self.config.reserved_names() {
            if chart.variables.contains_key(name) {
                return Err(Error::ReservedName {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn resolver<'a>(&'a self, chart: &'a Chart, indent: &'a str) -> Continuation<'a> {
        Continuation::new(chart, indent, &self.config.state_register)
            .with_source_comments(self.config.source_comments)
            .with_max_nesting(self.config.max_nesting)
    }

    /// Clock low, state register on the start node. A start that is not a
    /// state is resolved down to the state it leads to.
    fn initial_block(&self, chart: &Chart, indent: &str) -> Result<String> {
        let mut block = CodeBlock::new(indent);
        let mut resolver = self
            .resolver(chart, indent)
            .with_assignment(Assignment::Blocking);

        block.append("initial begin", 0);
        block.append(&format!("{} = 0;", self.config.clock_signal), 1);
        let start = resolver.resolve(Some(chart.start))?;
        block.nest(&start, 1);
        block.append("end", 0);

        Ok(block.finalize())
    }

    fn clock_block(&self, indent: &str) -> String {
        let clk = &self.config.clock_signal;
        let mut block = CodeBlock::new(indent);

        block.append("always begin", 0);
        block.append(&format!("{clk} = ~{clk};"), 1);
        block.append(&format!("#{};", self.config.clock_half_period), 1);
        block.append("end", 0);

        block.finalize()
    }

    fn state_machine_block(&self, chart: &Chart, indent: &str) -> Result<String> {
        let mut block = CodeBlock::new(indent);
        let mut resolver = self.resolver(chart, indent);

        block.append(
            &format!("always @(posedge {}) begin", self.config.clock_signal),
            0,
        );
        block.append(&format!("case ({})", self.config.state_register), 1);
        block.blank_line();

        for state in chart.states() {
            tracing::trace!(state = state.id, "emitting case arm");
            let arm = StateCodegen::generate(
                state,
                &mut resolver,
                indent,
                self.config.source_comments,
            )?;
            block.append(&arm, 2);
            block.blank_line();
        }

        block.append("endcase", 1);
        block.append("end", 0);

        Ok(block.finalize())
    }
}

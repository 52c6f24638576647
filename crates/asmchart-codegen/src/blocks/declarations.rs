//! Signal declaration codegen

use asmchart_core::{Direction, Variable};

/// Helper for generating the declarations region
pub struct DeclarationsCodegen;

impl DeclarationsCodegen {
    /// Declare every variable, then the clock and state registers
    pub fn generate<'v>(
        variables: impl IntoIterator<Item = &'v Variable>,
        clock_signal: &str,
        state_register: &str,
    ) -> String {
        let mut lines: Vec<String> = variables.into_iter().map(Self::declare).collect();

        lines.push(format!("reg {};", clock_signal));
        lines.push(format!("integer {};", state_register));

        lines.join("\n")
    }

    /// Declaration line for a single variable
    pub fn declare(variable: &Variable) -> String {
        let kind = match variable.direction {
            Direction::Input => "input reg",
            Direction::Output => "output reg",
            Direction::Internal => "reg",
        };

        if variable.bit_width > 1 {
            format!("{} [{}:0] {};", kind, variable.bit_width - 1, variable.name)
        } else {
            format!("{} {};", kind, variable.name)
        }
    }

    /// Comma separated port list for the module header
    pub fn port_list<'v>(ports: impl IntoIterator<Item = &'v Variable>) -> String {
        ports
            .into_iter()
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

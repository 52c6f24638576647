//! ASM chart model
//!
//! A chart is a set of hardware variables plus a graph of nodes keyed by
//! numeric identifier. State nodes become case arms of the generated
//! machine; decision and condition nodes are inlined wherever they are
//! referenced.
//!
//! The reference graph may contain cycles, but every cycle has to pass
//! through at least one [`StateNode`].

use std::collections::BTreeMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Node identifier, unique within a chart
pub type NodeId = u32;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));

/// Whether `name` is a legal HDL identifier
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Signal direction of a variable
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Module input port
    Input,
    /// Module output port
    Output,
    /// Storage local to the module
    #[default]
    Internal,
}

/// A hardware signal declared by the chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variable {
    /// Signal name
    pub name: String,

    /// Width in bits (at least 1)
    pub bit_width: u32,

    /// Port direction
    pub direction: Direction,
}

impl Variable {
    /// Create a new variable
    pub fn new(name: impl Into<String>, bit_width: u32, direction: Direction) -> Self {
        Self {
            name: name.into(),
            bit_width,
            direction,
        }
    }

    /// Whether the variable appears in the module port list
    pub fn is_port(&self) -> bool {
        matches!(self.direction, Direction::Input | Direction::Output)
    }
}

/// A clocked state with its own case arm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateNode {
    /// Node identifier
    pub id: NodeId,

    /// Human readable label
    pub label: String,

    /// Statements executed in this state
    pub statements: Vec<String>,

    /// Where control goes on the next clock edge
    pub next: Option<NodeId>,
}

impl StateNode {
    /// Create a new state node
    pub fn new(
        id: NodeId,
        label: impl Into<String>,
        statements: Vec<String>,
        next: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            statements,
            next,
        }
    }
}

/// A combinational two-way branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionNode {
    /// Node identifier
    pub id: NodeId,

    /// Branch condition, emitted verbatim
    pub condition: String,

    /// Target when the condition holds
    pub on_true: NodeId,

    /// Target otherwise
    pub on_false: NodeId,
}

impl DecisionNode {
    /// Create a new decision node
    pub fn new(id: NodeId, condition: impl Into<String>, on_true: NodeId, on_false: NodeId) -> Self {
        Self {
            id,
            condition: condition.into(),
            on_true,
            on_false,
        }
    }
}

/// Unconditional combinational statements on a transition path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConditionNode {
    /// Node identifier
    pub id: NodeId,

    /// Human readable label
    pub label: String,

    /// Statements spliced into the transition
    pub statements: Vec<String>,

    /// Where control continues afterwards
    pub next: Option<NodeId>,
}

impl ConditionNode {
    /// Create a new condition node
    pub fn new(
        id: NodeId,
        label: impl Into<String>,
        statements: Vec<String>,
        next: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            statements,
            next,
        }
    }
}

/// Any node of the chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// State box
    State(StateNode),
    /// Decision box
    Decision(DecisionNode),
    /// Condition box
    Condition(ConditionNode),
}

impl Node {
    /// Identifier of the node
    pub fn id(&self) -> NodeId {
        match self {
            Node::State(s) => s.id,
            Node::Decision(d) => d.id,
            Node::Condition(c) => c.id,
        }
    }

    /// Outgoing references, in branch order
    pub fn successors(&self) -> Vec<NodeId> {
        match self {
            Node::State(s) => s.next.into_iter().collect(),
            Node::Condition(c) => c.next.into_iter().collect(),
            Node::Decision(d) => vec![d.on_true, d.on_false],
        }
    }
}

/// A complete ASM chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chart {
    /// Chart name (used as the module name)
    pub name: String,

    /// Variables in declaration order
    pub variables: IndexMap<String, Variable>,

    /// Nodes, ascending by identifier
    pub nodes: BTreeMap<NodeId, Node>,

    /// Entry point of the machine
    pub start: NodeId,
}

impl Chart {
    /// Create an empty chart
    pub fn new(name: impl Into<String>, start: NodeId) -> Self {
        Self {
            name: name.into(),
            variables: IndexMap::new(),
            nodes: BTreeMap::new(),
            start,
        }
    }

    /// Add a variable, rejecting duplicate names
    pub fn add_variable(&mut self, variable: Variable) -> Result<()> {
        if self.variables.contains_key(&variable.name) {
            return Err(Error::DuplicateVariable {
                name: variable.name,
            });
        }
        self.variables.insert(variable.name.clone(), variable);
        Ok(())
    }

    /// Add a node, rejecting duplicate identifiers
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// State nodes in ascending identifier order
    pub fn states(&self) -> impl Iterator<Item = &StateNode> {
        self.nodes.values().filter_map(|node| match node {
            Node::State(state) => Some(state),
            _ => None,
        })
    }

    /// Input and output variables in declaration order
    pub fn ports(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values().filter(|v| v.is_port())
    }

    /// Check names, widths, the start node and every node reference.
    ///
    /// Cycles are not checked here; the generator rejects cycles that
    /// never reach a state node while it walks them.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.name) {
            return Err(Error::InvalidChartName {
                name: self.name.clone(),
            });
        }

        for variable in self.variables.values() {
            if !is_identifier(&variable.name) {
                return Err(Error::InvalidVariable {
                    name: variable.name.clone(),
                    message: "not a legal identifier".to_string(),
                });
            }
            if variable.bit_width == 0 {
                return Err(Error::InvalidVariable {
                    name: variable.name.clone(),
                    message: "bit width must be at least 1".to_string(),
                });
            }
        }

        if !self.nodes.contains_key(&self.start) {
            return Err(Error::UnknownStart { id: self.start });
        }

        for node in self.nodes.values() {
            for target in node.successors() {
                if !self.nodes.contains_key(&target) {
                    return Err(Error::DanglingReference {
                        from: node.id(),
                        target,
                    });
                }
            }
        }

        tracing::debug!(
            chart = %self.name,
            nodes = self.nodes.len(),
            variables = self.variables.len(),
            "chart validated"
        );

        Ok(())
    }
}

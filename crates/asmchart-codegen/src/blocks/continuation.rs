//! Continuation resolver
//!
//! Produces the text for "control reaches this node": a state node becomes
//! a single state-register assignment, condition nodes are spliced in as
//! straight-line statements and decision nodes become nested `if`/`else`
//! blocks. Inlining stops at the first state node on every path.
//!
//! Condition chains are walked iteratively; only decision branches recurse,
//! bounded by the configured nesting limit.

use asmchart_core::{Chart, DecisionNode, Node, NodeId};
use indexmap::IndexSet;

use super::code_block::CodeBlock;
use crate::error::{Error, Result};

/// Nesting limit used when none is configured
const DEFAULT_MAX_NESTING: usize = 64;

/// How a transition into a state is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Assignment {
    /// `state <= N;`, used inside the clocked unit
    #[default]
    NonBlocking,
    /// `state = N;`, used inside the initialization unit
    Blocking,
}

impl Assignment {
    fn operator(self) -> &'static str {
        match self {
            Assignment::NonBlocking => "<=",
            Assignment::Blocking => "=",
        }
    }
}

/// Resolver for decision/condition chains
#[derive(Debug)]
pub struct Continuation<'a> {
    chart: &'a Chart,
    indent: &'a str,
    state_register: &'a str,
    assignment: Assignment,
    source_comments: bool,
    max_nesting: usize,
    origin: Option<NodeId>,
    /// Decision/condition nodes currently being inlined
    path: IndexSet<NodeId>,
    /// Decisions currently open
    depth: usize,
}

impl<'a> Continuation<'a> {
    /// Create a resolver over `chart`
    pub fn new(chart: &'a Chart, indent: &'a str, state_register: &'a str) -> Self {
        Self {
            chart,
            indent,
            state_register,
            assignment: Assignment::default(),
            source_comments: false,
            max_nesting: DEFAULT_MAX_NESTING,
            origin: None,
            path: IndexSet::new(),
            depth: 0,
        }
    }

    /// Use a different assignment form for state transitions
    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignment = assignment;
        self
    }

    /// Emit condition labels as comments
    pub fn with_source_comments(mut self, enabled: bool) -> Self {
        self.source_comments = enabled;
        self
    }

    /// Fail once decisions nest deeper than `limit`
    pub fn with_max_nesting(mut self, limit: usize) -> Self {
        self.max_nesting = limit;
        self
    }

    /// Resolve `target` as the successor of node `origin`
    pub fn resolve_from(&mut self, origin: NodeId, target: Option<NodeId>) -> Result<String> {
        self.origin = Some(origin);
        self.resolve(target)
    }

    /// Text for control reaching `target`; empty for `None`
    pub fn resolve(&mut self, target: Option<NodeId>) -> Result<String> {
        let mut block = CodeBlock::new(self.indent);
        let entered = self.path.len();

        let walked = self.walk(&mut block, target);
        self.path.truncate(entered);
        walked?;

        Ok(block.finalize())
    }

    /// Splice conditions until a state or decision ends the chain
    fn walk(&mut self, block: &mut CodeBlock<'_>, mut target: Option<NodeId>) -> Result<()> {
        let chart = self.chart;

        while let Some(id) = target {
            let node = chart.node(id).ok_or(Error::UnresolvedNode {
                id,
                referenced_by: self.path.last().copied().or(self.origin),
            })?;

            match node {
                Node::State(state) => {
                    block.append(
                        &format!(
                            "{} {} {};",
                            self.state_register,
                            self.assignment.operator(),
                            state.id
                        ),
                        0,
                    );
                    return Ok(());
                }
                Node::Condition(condition) => {
                    self.enter(id)?;
                    if self.source_comments && !condition.label.is_empty() {
                        block.comment(&condition.label, 0);
                    }
                    for statement in &condition.statements {
                        block.append(statement, 0);
                    }
                    target = condition.next;
                }
                Node::Decision(decision) => {
                    self.enter(id)?;
                    let text = self.decision(decision)?;
                    block.append(&text, 0);
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    fn enter(&mut self, id: NodeId) -> Result<()> {
        if let Some(pos) = self.path.get_index_of(&id) {
            let mut cycle: Vec<NodeId> = self.path.iter().skip(pos).copied().collect();
            cycle.push(id);
            return Err(Error::NonTerminatingPath { cycle });
        }

        tracing::trace!(node = id, depth = self.depth, "inlining node");
        self.path.insert(id);
        Ok(())
    }

    fn decision(&mut self, decision: &DecisionNode) -> Result<String> {
        if self.depth >= self.max_nesting {
            return Err(Error::NestingTooDeep {
                id: decision.id,
                limit: self.max_nesting,
            });
        }

        self.depth += 1;
        let branches = self.branches(decision);
        self.depth -= 1;
        branches
    }

    fn branches(&mut self, decision: &DecisionNode) -> Result<String> {
        let mut block = CodeBlock::new(self.indent);

        block.append(&format!("if ({}) begin", decision.condition), 0);
        let on_true = self.resolve(Some(decision.on_true))?;
        block.nest(&on_true, 1);

        block.append("end else begin", 0);
        let on_false = self.resolve(Some(decision.on_false))?;
        block.nest(&on_false, 1);

        block.append("end", 0);

        Ok(block.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asmchart_core::{ConditionNode, StateNode};

    const INDENT: &str = "    ";

    fn state(id: NodeId, next: Option<NodeId>) -> Node {
        Node::State(StateNode::new(id, format!("S{id}"), vec![], next))
    }

    fn decision(id: NodeId, condition: &str, on_true: NodeId, on_false: NodeId) -> Node {
        Node::Decision(DecisionNode::new(id, condition, on_true, on_false))
    }

    fn condition(id: NodeId, statements: &[&str], next: Option<NodeId>) -> Node {
        Node::Condition(ConditionNode::new(
            id,
            format!("C{id}"),
            statements.iter().map(|s| s.to_string()).collect(),
            next,
        ))
    }

    fn chart(nodes: Vec<Node>) -> Chart {
        let mut chart = Chart::new("fsm", 0);
        for node in nodes {
            chart.add_node(node).unwrap();
        }
        chart
    }

    #[test]
    fn test_none_is_empty() {
        let chart = chart(vec![state(0, None)]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert_eq!(resolver.resolve(None).unwrap(), "");
    }

    #[test]
    fn test_state_is_boundary() {
        let chart = chart(vec![state(0, Some(1)), state(1, Some(0))]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert_eq!(resolver.resolve(Some(1)).unwrap(), "state <= 1;");
    }

    #[test]
    fn test_blocking_assignment() {
        let chart = chart(vec![state(0, None)]);
        let mut resolver =
            Continuation::new(&chart, INDENT, "current").with_assignment(Assignment::Blocking);
        assert_eq!(resolver.resolve(Some(0)).unwrap(), "current = 0;");
    }

    #[test]
    fn test_condition_splices_statements_before_continuation() {
        let chart = chart(vec![
            state(0, Some(5)),
            condition(5, &["a <= 1;", "b <= a;"], Some(0)),
        ]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert_eq!(
            resolver.resolve(Some(5)).unwrap(),
            "a <= 1;\nb <= a;\nstate <= 0;"
        );
    }

    #[test]
    fn test_condition_without_next() {
        let chart = chart(vec![condition(5, &["done <= 1;"], None)]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert_eq!(resolver.resolve(Some(5)).unwrap(), "done <= 1;");
    }

    #[test]
    fn test_condition_comment() {
        let chart = chart(vec![state(0, None), condition(5, &["x <= 0;"], Some(0))]);
        let mut resolver =
            Continuation::new(&chart, INDENT, "state").with_source_comments(true);
        assert_eq!(
            resolver.resolve(Some(5)).unwrap(),
            "// C5\nx <= 0;\nstate <= 0;"
        );
    }

    #[test]
    fn test_decision() {
        let chart = chart(vec![state(0, None), state(1, None), decision(2, "rst", 0, 1)]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert_eq!(
            resolver.resolve(Some(2)).unwrap(),
            "if (rst) begin\n    state <= 0;\nend else begin\n    state <= 1;\nend"
        );
    }

    #[test]
    fn test_nested_decisions_indent_by_depth() {
        let chart = chart(vec![
            state(0, None),
            state(1, None),
            decision(2, "a", 3, 1),
            decision(3, "b", 0, 1),
        ]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        let expected = "\
if (a) begin
    if (b) begin
        state <= 0;
    end else begin
        state <= 1;
    end
end else begin
    state <= 1;
end";
        assert_eq!(resolver.resolve(Some(2)).unwrap(), expected);
    }

    #[test]
    fn test_shared_target_is_not_a_cycle() {
        let chart = chart(vec![
            state(0, None),
            decision(2, "a", 5, 5),
            condition(5, &["x <= 1;"], Some(0)),
        ]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        let text = resolver.resolve(Some(2)).unwrap();
        assert_eq!(text.matches("x <= 1;").count(), 2);
    }

    #[test]
    fn test_decision_only_cycle_rejected() {
        let chart = chart(vec![decision(10, "a", 11, 11), decision(11, "b", 10, 10)]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        let err = resolver.resolve(Some(10)).unwrap_err();
        match err {
            Error::NonTerminatingPath { cycle } => assert_eq!(cycle, vec![10, 11, 10]),
            other => panic!("Expected NonTerminatingPath, got {other:?}"),
        }
    }

    #[test]
    fn test_condition_self_loop_rejected() {
        let chart = chart(vec![condition(4, &["x <= x + 1;"], Some(4))]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert!(matches!(
            resolver.resolve(Some(4)),
            Err(Error::NonTerminatingPath { .. })
        ));
    }

    #[test]
    fn test_cycle_through_state_is_fine() {
        let chart = chart(vec![state(0, Some(2)), decision(2, "go", 0, 0)]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert!(resolver.resolve_from(0, Some(2)).is_ok());
    }

    #[test]
    fn test_unresolved_node_names_referrer() {
        let chart = chart(vec![state(0, None), decision(2, "go", 0, 9)]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert!(matches!(
            resolver.resolve_from(0, Some(2)),
            Err(Error::UnresolvedNode {
                id: 9,
                referenced_by: Some(2)
            })
        ));
    }

    #[test]
    fn test_unresolved_direct_successor() {
        let chart = chart(vec![state(0, Some(7))]);
        let mut resolver = Continuation::new(&chart, INDENT, "state");
        assert!(matches!(
            resolver.resolve_from(0, Some(7)),
            Err(Error::UnresolvedNode {
                id: 7,
                referenced_by: Some(0)
            })
        ));
    }

    #[test]
    fn test_long_condition_chain() {
        let mut nodes = vec![state(0, Some(1))];
        for id in 1..=10_000 {
            let next = if id == 10_000 { 0 } else { id + 1 };
            nodes.push(condition(id, &["count <= count + 1;"], Some(next)));
        }
        let chart = chart(nodes);
        let mut resolver = Continuation::new(&chart, INDENT, "state");

        let text = resolver.resolve_from(0, Some(1)).unwrap();
        assert_eq!(text.lines().count(), 10_001);
        assert!(text.ends_with("state <= 0;"));
    }

    #[test]
    fn test_long_condition_loop_rejected() {
        let mut nodes = vec![];
        for id in 1..=10_000 {
            let next = if id == 10_000 { 1 } else { id + 1 };
            nodes.push(condition(id, &["x <= 1;"], Some(next)));
        }
        let chart = chart(nodes);
        let mut resolver = Continuation::new(&chart, INDENT, "state");

        match resolver.resolve(Some(1)).unwrap_err() {
            Error::NonTerminatingPath { cycle } => {
                assert_eq!(cycle.len(), 10_001);
                assert_eq!(cycle.first(), Some(&1));
                assert_eq!(cycle.last(), Some(&1));
            }
            other => panic!("Expected NonTerminatingPath, got {other:?}"),
        }
    }

    #[test]
    fn test_nesting_limit() {
        // 1 -> 2 -> 3 -> 4 all decisions, each falling back to state 0
        let chart = chart(vec![
            state(0, None),
            decision(1, "a", 2, 0),
            decision(2, "b", 3, 0),
            decision(3, "c", 4, 0),
            decision(4, "d", 0, 0),
        ]);

        let mut resolver = Continuation::new(&chart, INDENT, "state").with_max_nesting(4);
        assert!(resolver.resolve(Some(1)).is_ok());

        let mut resolver = Continuation::new(&chart, INDENT, "state").with_max_nesting(3);
        assert!(matches!(
            resolver.resolve(Some(1)),
            Err(Error::NestingTooDeep { id: 4, limit: 3 })
        ));
    }

    #[test]
    fn test_deep_decision_chain_fails_cleanly() {
        let mut nodes = vec![state(0, None)];
        for id in 1..=10_000 {
            let on_true = if id == 10_000 { 0 } else { id + 1 };
            nodes.push(decision(id, "go", on_true, 0));
        }
        let chart = chart(nodes);
        let mut resolver = Continuation::new(&chart, INDENT, "state");

        assert!(matches!(
            resolver.resolve(Some(1)),
            Err(Error::NestingTooDeep {
                limit: DEFAULT_MAX_NESTING,
                ..
            })
        ));
    }

    #[test]
    fn test_multiline_condition_label() {
        let chart = chart(vec![
            state(0, None),
            Node::Condition(ConditionNode::new(5, "count\nup", vec!["x <= 0;".into()], Some(0))),
        ]);
        let mut resolver =
            Continuation::new(&chart, INDENT, "state").with_source_comments(true);
        assert_eq!(
            resolver.resolve(Some(5)).unwrap(),
            "// count\n// up\nx <= 0;\nstate <= 0;"
        );
    }
}

//! Chart description parser
//!
//! Reads XML (`<ASMChart>` documents) or YAML chart descriptions into a
//! validated [`Chart`].

use std::path::Path;

use asmchart_core::{
    Chart, ConditionNode, DecisionNode, Direction, Node, NodeId, StateNode, Variable,
};

use crate::error::{Error, Result};

/// Supported chart description formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    /// `<ASMChart>` XML document
    Xml,
    /// YAML document
    Yaml,
}

impl ChartFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Ok(ChartFormat::Xml),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(ChartFormat::Yaml)
            }
            _ => Err(Error::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Parser for chart description files
#[derive(Debug, Default, Clone)]
pub struct Parser;

impl Parser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a chart file, choosing the format from its extension
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Chart> {
        let path = path.as_ref();
        let format = ChartFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content, format)
    }

    /// Parse chart text in the given format
    pub fn parse_str(&self, content: &str, format: ChartFormat) -> Result<Chart> {
        match format {
            ChartFormat::Xml => self.parse_xml(content),
            ChartFormat::Yaml => self.parse_yaml(content),
        }
    }

    /// Parse a YAML chart description
    pub fn parse_yaml(&self, yaml: &str) -> Result<Chart> {
        let raw: RawChart = serde_yaml::from_str(yaml)?;
        self.convert_to_chart(raw)
    }

    /// Parse an `<ASMChart>` XML document
    pub fn parse_xml(&self, xml: &str) -> Result<Chart> {
        let doc: XmlChart = quick_xml::de::from_str(xml)?;
        self.convert_to_chart(RawChart::try_from(doc)?)
    }

    fn convert_to_chart(&self, raw: RawChart) -> Result<Chart> {
        for decision in &raw.decisions {
            if decision.on_true.is_none() {
                return Err(Error::MissingBranchTarget {
                    id: decision.id,
                    branch: "true",
                });
            }
            if decision.on_false.is_none() {
                return Err(Error::MissingBranchTarget {
                    id: decision.id,
                    branch: "false",
                });
            }
        }
        let start = raw.start.ok_or(Error::MissingStartState)?;

        let mut chart = Chart::new(raw.name, start);

        for variable in raw.variables {
            chart.add_variable(Variable::new(
                variable.name,
                variable.width,
                direction_from(variable.direction.as_deref()),
            ))?;
        }

        for state in raw.states {
            chart.add_node(Node::State(StateNode::new(
                state.id,
                label_or_id(state.label, state.id),
                clean_statements(state.statements),
                state.next,
            )))?;
        }

        for decision in raw.decisions {
            if let (Some(on_true), Some(on_false)) = (decision.on_true, decision.on_false) {
                chart.add_node(Node::Decision(DecisionNode::new(
                    decision.id,
                    decision.condition.trim(),
                    on_true,
                    on_false,
                )))?;
            }
        }

        for condition in raw.conditions {
            chart.add_node(Node::Condition(ConditionNode::new(
                condition.id,
                label_or_id(condition.label, condition.id),
                clean_statements(condition.statements),
                condition.next,
            )))?;
        }

        chart.validate()?;

        tracing::debug!(
            chart = %chart.name,
            nodes = chart.nodes.len(),
            start = chart.start,
            "parsed chart"
        );

        Ok(chart)
    }
}

/// `input`/`output` (any case) are ports, everything else is internal
fn direction_from(kind: Option<&str>) -> Direction {
    match kind.map(|k| k.trim().to_lowercase()).as_deref() {
        Some("input") => Direction::Input,
        Some("output") => Direction::Output,
        _ => Direction::Internal,
    }
}

fn label_or_id(label: Option<String>, id: NodeId) -> String {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| id.to_string())
}

fn clean_statements(statements: Vec<String>) -> Vec<String> {
    statements
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_number(field: &'static str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_optional(field: &'static str, value: Option<String>) -> Result<Option<u32>> {
    value.map(|v| parse_number(field, &v)).transpose()
}

// ============================================================================
// Raw chart structures (shared by both formats, YAML via serde)
// ============================================================================

use serde::Deserialize;

fn default_chart_name() -> String {
    "ASM_Chart".to_string()
}

#[derive(Debug, Deserialize)]
struct RawChart {
    #[serde(default = "default_chart_name")]
    name: String,
    #[serde(default)]
    start: Option<NodeId>,
    #[serde(default)]
    variables: Vec<RawVariable>,
    #[serde(default)]
    states: Vec<RawBox>,
    #[serde(default)]
    decisions: Vec<RawDecision>,
    #[serde(default)]
    conditions: Vec<RawBox>,
}

#[derive(Debug, Deserialize)]
struct RawVariable {
    name: String,
    #[serde(alias = "size")]
    width: u32,
    #[serde(default, alias = "type")]
    direction: Option<String>,
}

/// State and condition boxes share one shape
#[derive(Debug, Deserialize)]
struct RawBox {
    id: NodeId,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    statements: Vec<String>,
    #[serde(default)]
    next: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
struct RawDecision {
    id: NodeId,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    on_true: Option<NodeId>,
    #[serde(default)]
    on_false: Option<NodeId>,
}

// ============================================================================
// XML document structures (quick-xml)
// ============================================================================

#[derive(Debug, Deserialize)]
struct XmlChart {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "Variables", default)]
    variables: XmlVariables,
    #[serde(rename = "StateBoxes", default)]
    state_boxes: XmlStateBoxes,
    #[serde(rename = "DecisionBoxes", default)]
    decision_boxes: XmlDecisionBoxes,
    #[serde(rename = "ConditionBoxes", default)]
    condition_boxes: XmlConditionBoxes,
    #[serde(rename = "StartState", default)]
    start_state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct XmlVariables {
    #[serde(rename = "Variable", default)]
    items: Vec<XmlVariable>,
}

#[derive(Debug, Deserialize)]
struct XmlVariable {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@size")]
    size: String,
    #[serde(rename = "@type", default)]
    kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct XmlStateBoxes {
    #[serde(rename = "StateBox", default)]
    items: Vec<XmlBox>,
}

#[derive(Debug, Default, Deserialize)]
struct XmlConditionBoxes {
    #[serde(rename = "ConditionBox", default)]
    items: Vec<XmlBox>,
}

#[derive(Debug, Default, Deserialize)]
struct XmlDecisionBoxes {
    #[serde(rename = "DecisionBox", default)]
    items: Vec<XmlDecision>,
}

#[derive(Debug, Deserialize)]
struct XmlBox {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Statements", default)]
    statements: XmlStatements,
    #[serde(rename = "Destination", default)]
    destination: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct XmlStatements {
    #[serde(rename = "Statement", default)]
    items: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct XmlDecision {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "Condition", default)]
    condition: Option<String>,
    #[serde(rename = "TrueDestination", default)]
    true_destination: Option<String>,
    #[serde(rename = "FalseDestination", default)]
    false_destination: Option<String>,
}

impl TryFrom<XmlBox> for RawBox {
    type Error = Error;

    fn try_from(xml: XmlBox) -> Result<Self> {
        Ok(RawBox {
            id: parse_number("node id", &xml.id)?,
            label: xml.name,
            statements: xml.statements.items,
            next: parse_optional("destination", xml.destination)?,
        })
    }
}

impl TryFrom<XmlChart> for RawChart {
    type Error = Error;

    fn try_from(xml: XmlChart) -> Result<Self> {
        let variables = xml
            .variables
            .items
            .into_iter()
            .map(|v| {
                Ok(RawVariable {
                    width: parse_number("variable size", &v.size)?,
                    name: v.name.trim().to_string(),
                    direction: v.kind,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let states = xml
            .state_boxes
            .items
            .into_iter()
            .map(RawBox::try_from)
            .collect::<Result<Vec<_>>>()?;

        let decisions = xml
            .decision_boxes
            .items
            .into_iter()
            .map(|d| {
                Ok(RawDecision {
                    id: parse_number("node id", &d.id)?,
                    condition: d.condition.unwrap_or_default(),
                    on_true: parse_optional("true destination", d.true_destination)?,
                    on_false: parse_optional("false destination", d.false_destination)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let conditions = xml
            .condition_boxes
            .items
            .into_iter()
            .map(RawBox::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(RawChart {
            name: xml
                .name
                .map(|n| n.trim().to_string())
                .unwrap_or_else(default_chart_name),
            start: parse_optional("start state", xml.start_state)?,
            variables,
            states,
            decisions,
            conditions,
        })
    }
}

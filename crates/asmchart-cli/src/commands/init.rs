//! Initialize a new asmchart project

use anyhow::Result;
use asmchart_core::config::CONFIG_FILE;
use std::fs;
use std::path::Path;

/// Run the init command
pub async fn run(path: &str, name: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    // Create directory if it doesn't exist
    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    // Get absolute path for deriving name
    let abs_path = project_dir.canonicalize()?;

    // Derive project name from directory name if not provided
    let project_name = match name {
        Some(n) => n.to_string(),
        None => abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Could not determine project name from path"))?,
    };

    // Check if already initialized
    if project_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!(
            "Directory '{}' already contains a {}",
            project_dir.display(),
            CONFIG_FILE
        );
    }

    tracing::info!("Creating new asmchart project: {}", project_name);

    fs::create_dir_all(project_dir.join("charts"))?;

    let config = format!(
        r#"# asmchart project configuration
name: {project_name}
charts_dir: charts
output_dir: out

codegen:
  indent_width: 4
  clock_signal: clk
  state_register: state
  clock_half_period: 5
  source_comments: false
  max_nesting: 64
"#
    );
    fs::write(project_dir.join(CONFIG_FILE), config)?;

    let example_chart = r#"<?xml version="1.0"?>
<ASMChart name="blink">
    <Variables>
        <Variable name="en" size="1" type="input"/>
        <Variable name="led" size="1" type="output"/>
    </Variables>
    <StateBoxes>
        <StateBox id="0">
            <Name>Off</Name>
            <Statements>
                <Statement>led &lt;= 0;</Statement>
            </Statements>
            <Destination>2</Destination>
        </StateBox>
        <StateBox id="1">
            <Name>On</Name>
            <Statements>
                <Statement>led &lt;= 1;</Statement>
            </Statements>
            <Destination>0</Destination>
        </StateBox>
    </StateBoxes>
    <DecisionBoxes>
        <DecisionBox id="2">
            <Condition>en</Condition>
            <TrueDestination>1</TrueDestination>
            <FalseDestination>0</FalseDestination>
        </DecisionBox>
    </DecisionBoxes>
    <StartState>0</StartState>
</ASMChart>
"#;
    fs::write(project_dir.join("charts/blink.xml"), example_chart)?;

    tracing::info!("✓ Created {}", CONFIG_FILE);
    tracing::info!("✓ Created charts/blink.xml");
    tracing::info!("Next steps:");
    tracing::info!("  cd {}", path);
    tracing::info!("  asmchart generate");

    Ok(())
}

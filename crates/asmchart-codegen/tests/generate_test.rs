//! End-to-end tests: chart description text in, Verilog text out

use asmchart_codegen::{ChartFormat, Error, Generator, Parser, generate};

const TWO_STATE_XML: &str = r#"
<ASMChart name="toggle">
    <Variables>
        <Variable name="rst" size="1" type="input"/>
    </Variables>
    <StateBoxes>
        <StateBox id="0">
            <Statements>
                <Statement>out &lt;= 1;</Statement>
            </Statements>
            <Destination>1</Destination>
        </StateBox>
        <StateBox id="1">
            <Destination>0</Destination>
        </StateBox>
    </StateBoxes>
    <StartState>0</StartState>
</ASMChart>
"#;

const TWO_STATE_VERILOG: &str = "\
module toggle (rst);
    input reg rst;
    reg clk;
    integer state;

    initial begin
        clk = 0;
        state = 0;
    end

    always begin
        clk = ~clk;
        #5;
    end

    always @(posedge clk) begin
        case (state)

            0: begin
                out <= 1;
                state <= 1;
            end

            1: begin
                state <= 0;
            end

        endcase
    end

endmodule";

fn verilog(content: &str, format: ChartFormat) -> Result<String, Error> {
    let chart = Parser::new().parse_str(content, format)?;
    generate(&chart)
}

#[test]
fn test_two_state_xml_chart() {
    let code = verilog(TWO_STATE_XML, ChartFormat::Xml).unwrap();
    assert_eq!(code, TWO_STATE_VERILOG);
}

#[test]
fn test_yaml_and_xml_agree() {
    let yaml = r#"
name: toggle
start: 0
variables:
  - name: rst
    width: 1
    direction: input
states:
  - id: 0
    statements: ["out <= 1;"]
    next: 1
  - id: 1
    next: 0
"#;
    assert_eq!(
        verilog(yaml, ChartFormat::Yaml).unwrap(),
        verilog(TWO_STATE_XML, ChartFormat::Xml).unwrap()
    );
}

#[test]
fn test_decision_start_has_no_case_arm() {
    let yaml = r#"
name: guarded
start: 2
variables:
  - name: rst
    width: 1
    direction: input
states:
  - id: 0
    statements: ["out <= 1;"]
    next: 2
  - id: 1
    next: 2
decisions:
  - id: 2
    condition: rst
    on_true: 0
    on_false: 1
"#;
    let code = verilog(yaml, ChartFormat::Yaml).unwrap();

    assert!(!code.contains("2: begin"));
    assert_eq!(code.matches(": begin").count(), 2);
    // once in the initial unit, once per arm
    assert_eq!(code.matches("if (rst) begin").count(), 3);
    assert!(code.contains(
        "                out <= 1;\n                if (rst) begin\n                    state <= 0;\n                end else begin\n                    state <= 1;\n                end\n"
    ));
}

#[test]
fn test_condition_and_nested_decision_layout() {
    let yaml = r#"
name: counter
start: 0
variables:
  - name: en
    width: 1
    direction: input
  - name: up
    width: 1
    direction: input
  - name: count
    width: 4
    direction: output
states:
  - id: 0
    label: Idle
    next: 10
  - id: 1
    label: Hold
    next: 0
decisions:
  - id: 10
    condition: en
    on_true: 11
    on_false: 0
  - id: 11
    condition: up
    on_true: 20
    on_false: 1
conditions:
  - id: 20
    statements: ["count <= count + 1;"]
    next: 1
"#;
    let code = verilog(yaml, ChartFormat::Yaml).unwrap();
    let arm = "
            0: begin
                if (en) begin
                    if (up) begin
                        count <= count + 1;
                        state <= 1;
                    end else begin
                        state <= 1;
                    end
                end else begin
                    state <= 0;
                end
            end
";
    assert!(code.contains(arm), "unexpected layout:\n{code}");
    assert!(code.starts_with("module counter (en, up, count);\n"));
    assert!(code.contains("    output reg [3:0] count;\n"));
}

#[test]
fn test_decision_cycle_is_rejected() {
    let xml = r#"
<ASMChart name="spin">
    <StateBoxes>
        <StateBox id="0"><Destination>1</Destination></StateBox>
    </StateBoxes>
    <DecisionBoxes>
        <DecisionBox id="1">
            <Condition>a</Condition>
            <TrueDestination>2</TrueDestination>
            <FalseDestination>0</FalseDestination>
        </DecisionBox>
        <DecisionBox id="2">
            <Condition>b</Condition>
            <TrueDestination>1</TrueDestination>
            <FalseDestination>0</FalseDestination>
        </DecisionBox>
    </DecisionBoxes>
    <StartState>0</StartState>
</ASMChart>
"#;
    match verilog(xml, ChartFormat::Xml) {
        Err(Error::NonTerminatingPath { cycle }) => assert_eq!(cycle, vec![1, 2, 1]),
        other => panic!("Expected NonTerminatingPath, got {other:?}"),
    }
}

#[test]
fn test_reserved_clock_name_is_rejected() {
    let yaml = r#"
name: clash
start: 0
variables:
  - name: clk
    width: 1
    direction: input
states:
  - id: 0
    next: 0
"#;
    let chart = Parser::new().parse_yaml(yaml).unwrap();
    assert!(matches!(
        Generator::new().generate(&chart),
        Err(Error::ReservedName { name }) if name == "clk"
    ));
}

#[test]
fn test_repeated_generation_is_byte_identical() {
    let chart = Parser::new().parse_xml(TWO_STATE_XML).unwrap();
    let first = generate(&chart).unwrap();
    for _ in 0..5 {
        assert_eq!(generate(&chart).unwrap(), first);
    }
}

//! Integration tests for project configuration loading
//!
//! Tests use temporary directories with real `asmchart.yaml` fixtures.

use asmchart_core::config::CONFIG_FILE;
use asmchart_core::{Config, Error};
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("charts")).unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), config).unwrap();
    dir
}

#[test]
fn test_load_from_directory() {
    let dir = setup_project(
        r#"
name: traffic-light
charts_dir: fsm
output_dir: rtl
codegen:
  indent_width: 2
  clock_signal: sys_clk
"#,
    );

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.project.name, "traffic-light");
    assert_eq!(config.charts_dir(), dir.path().join("fsm"));
    assert_eq!(config.output_dir(), dir.path().join("rtl"));
    assert_eq!(config.project.codegen.clock_signal, "sys_clk");
    assert_eq!(config.project.codegen.state_register, "state");
}

#[test]
fn test_load_from_file_path() {
    let dir = setup_project("name: direct\n");

    let config = Config::load(dir.path().join(CONFIG_FILE)).unwrap();
    assert_eq!(config.project.name, "direct");
    assert_eq!(config.base_path, dir.path());
}

#[test]
fn test_invalid_codegen_settings_fail_load() {
    let dir = setup_project(
        r#"
name: broken
codegen:
  clock_signal: state
"#,
    );

    let err = Config::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigInvalid { .. }));
}

#[test]
fn test_malformed_yaml_fails_load() {
    let dir = setup_project("name: [unterminated\n");

    let err = Config::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn test_load_or_default_prefers_file() {
    let dir = setup_project("name: present\n");

    let config = Config::load_or_default(dir.path()).unwrap();
    assert_eq!(config.project.name, "present");
}

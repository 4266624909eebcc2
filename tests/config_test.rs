use std::fs;

use kiln::config::{find_config, Project};
use kiln::constants::CONFIG_FILES;
use kiln::error::Error;
use kiln::host::ComponentRegistry;
use tempfile::TempDir;

#[test]
fn test_parse_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let content = r#"
kiln:
  parts: site other
site:
  templates:
    - a.j2 a.txt
    - b.j2 b.txt mode=755
  port: 8080
  debug: true
  empty: null
  name: "  padded  "
"#;
    let project = Project::parse(content, temp_dir.path()).unwrap();
    let site = project.options("site").unwrap();

    assert_eq!(site["templates"], "a.j2 a.txt\nb.j2 b.txt mode=755");
    assert_eq!(site["port"], "8080");
    assert_eq!(site["debug"], "true");
    assert_eq!(site["empty"], "");
    assert_eq!(site["name"], "padded");
    assert_eq!(project.default_parts(), vec!["site", "other"]);
    assert_eq!(project.component_names(), vec!["kiln", "site"]);
}

#[test]
fn test_parse_json() {
    let temp_dir = TempDir::new().unwrap();
    let content = r#"{"site": {"templates": "a.j2 a.txt", "retries": 3}}"#;
    let project = Project::parse(content, temp_dir.path()).unwrap();

    assert_eq!(project.options("site").unwrap()["retries"], "3");
    assert!(project.default_parts().is_empty());
    assert!(project.options("missing").is_none());
}

#[test]
fn test_project_directory() {
    let temp_dir = TempDir::new().unwrap();

    let project = Project::parse("site:\n  a: b\n", temp_dir.path()).unwrap();
    assert_eq!(project.directory(), temp_dir.path());
    assert_eq!(
        project.options("kiln").unwrap()["directory"],
        temp_dir.path().display().to_string()
    );

    let project = Project::parse("kiln:\n  directory: build\n", temp_dir.path()).unwrap();
    assert_eq!(project.directory(), temp_dir.path().join("build"));
}

#[test]
fn test_nested_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();

    let err = Project::parse("site:\n  nested:\n    key: value\n", temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigError(msg) if msg.contains("site.nested")));

    let err = Project::parse("site:\n  list:\n    - [a, b]\n", temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));

    let err = Project::parse("- just\n- a list\n", temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigError(msg) if msg.contains("Invalid configuration format")));
}

#[test]
fn test_find_and_load() {
    let temp_dir = TempDir::new().unwrap();

    let err = find_config(temp_dir.path(), &CONFIG_FILES).unwrap_err();
    assert!(matches!(err, Error::ConfigError(msg) if msg.contains("kiln.yaml")));

    fs::write(temp_dir.path().join("kiln.json"), r#"{"site": {"a": "b"}}"#).unwrap();
    fs::write(temp_dir.path().join("kiln.yml"), "site:\n  a: yaml\n").unwrap();
    let path = find_config(temp_dir.path(), &CONFIG_FILES).unwrap();
    assert_eq!(path, temp_dir.path().join("kiln.yml"));

    let project = Project::load(&path).unwrap();
    assert_eq!(project.options("site").unwrap()["a"], "yaml");
    assert_eq!(project.directory(), temp_dir.path());
}

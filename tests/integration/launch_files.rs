// tests/integration/launch_files.rs

use std::io::Write;

use tempfile::NamedTempFile;

use proclaunch::LaunchError;
use proclaunch::config::{load_and_build, load_from_path};
use proclaunch_test_utils::builders::LaunchFileBuilder;

use crate::common::init_tracing;

#[test]
fn test_invalid_argument_type_is_rejected() {
    init_tracing();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
name = "tool"
default_arguments = ["--level", 2, 0.5]
"#
    )
    .unwrap();

    match load_and_build(file.path()) {
        Err(LaunchError::InvalidArgument(msg)) => assert!(msg.contains("float")),
        Err(e) => panic!("Expected InvalidArgument, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_malformed_toml_is_toml_error() {
    init_tracing();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "name = ").unwrap();

    assert!(matches!(
        load_from_path(file.path()),
        Err(LaunchError::TomlError(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        load_and_build(dir.path().join("absent.toml")),
        Err(LaunchError::IoError(_))
    ));
}

#[test]
fn test_missing_executable_in_file_is_config_error() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = LaunchFileBuilder::new("tool")
        .executable("bin/tool")
        .write_to(dir.path(), "tool.toml")
        .unwrap();

    assert!(matches!(
        load_and_build(&path),
        Err(LaunchError::ConfigError(_))
    ));
}

#[test]
fn test_file_fields_are_applied() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = LaunchFileBuilder::new("tool")
        .working_directory("work")
        .default_arguments(r#"["-v", 3]"#)
        .combined_output(true)
        .expected_exit_codes(&[0, 2])
        .additional_paths(&["/opt/one", "/opt/two"])
        .unset_environment(&["DROP_ME"])
        .env("KEEP_ME", "yes")
        .write_to(dir.path(), "tool.toml")
        .unwrap();

    let cfg = load_and_build(&path).unwrap();

    assert_eq!(cfg.name(), "tool");
    assert_eq!(cfg.working_directory(), Some(dir.path().join("work").as_path()));
    let args: Vec<&str> = cfg.default_arguments().iter().map(|a| a.as_str()).collect();
    assert_eq!(args, vec!["-v", "3"]);
    assert!(cfg.combined_output());
    assert!(cfg.expected_exit_codes().contains(&2));
    assert!(!cfg.expected_exit_codes().contains(&1));
    assert_eq!(cfg.environment().get("DROP_ME"), Some(&None));
    assert_eq!(cfg.environment().get("KEEP_ME"), Some(&Some("yes".to_string())));

    let path_var = cfg.platform().path_variable();
    let sep = cfg.platform().path_list_separator();
    let search = cfg
        .environment()
        .get(path_var)
        .cloned()
        .flatten()
        .expect("search path set");
    assert!(search.starts_with(&format!("/opt/two{sep}/opt/one")));
}

#[cfg(unix)]
#[test]
fn test_launch_file_runs_end_to_end() {
    use crate::common::stdout_lines;
    use proclaunch_test_utils::builders::ScriptBuilder;

    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    ScriptBuilder::new("greet")
        .line(r#"echo "$GREETING $1""#)
        .line("exit 2")
        .write_to(dir.path())
        .unwrap();
    let path = LaunchFileBuilder::new("greet")
        .executable("greet")
        .default_arguments(r#"["world"]"#)
        .expected_exit_codes(&[2])
        .env("GREETING", "hello")
        .write_to(dir.path(), "greet.toml")
        .unwrap();

    let done = load_and_build(&path).unwrap().run_default().unwrap();

    assert_eq!(done.exit_code(), 2);
    assert_eq!(stdout_lines(&done), vec!["hello world"]);
}

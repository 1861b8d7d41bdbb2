// tests/integration/error_handling.rs

use proclaunch::{LaunchConfiguration, LaunchError};

use crate::common::init_tracing;

#[cfg(unix)]
mod unix {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use proclaunch_test_utils::builders::ScriptBuilder;

    #[test]
    fn test_missing_executable_is_config_error() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();

        let result = LaunchConfiguration::for_program("tool")
            .unwrap()
            .with_executable(dir.path().join("missing"));

        match result {
            Err(LaunchError::ConfigError(msg)) => {
                assert!(msg.contains("does not exist"));
                assert!(msg.contains("missing"));
            }
            Err(e) => panic!("Expected ConfigError, got: {:?}", e),
            Ok(_) => panic!("Expected error, got Ok"),
        }
    }

    #[test]
    fn test_non_executable_file_is_config_error() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let script = ScriptBuilder::new("plain")
            .line("echo never")
            .mode(0o644)
            .write_to(dir.path())
            .unwrap();

        let result = LaunchConfiguration::for_program("plain")
            .unwrap()
            .with_executable(&script);

        match result {
            Err(LaunchError::ConfigError(msg)) => assert!(msg.contains("not an executable")),
            Err(e) => panic!("Expected ConfigError, got: {:?}", e),
            Ok(_) => panic!("Expected error, got Ok"),
        }
    }

    #[test]
    fn test_broken_interpreter_is_spawn_failure() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken");
        fs::write(&path, "#!/proclaunch/no/such/interpreter\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let result = LaunchConfiguration::for_program("broken")
            .unwrap()
            .with_executable(&path)
            .unwrap()
            .run_default();

        match result {
            Err(LaunchError::SpawnFailure { name, .. }) => assert_eq!(name, "broken"),
            Err(e) => panic!("Expected SpawnFailure, got: {:?}", e),
            Ok(_) => panic!("Expected error, got Ok"),
        }
    }

    #[test]
    fn test_executable_removed_after_configuration_fails_at_spawn() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let script = ScriptBuilder::new("gone").line("exit 0").write_to(dir.path()).unwrap();

        let cfg = LaunchConfiguration::for_program("gone")
            .unwrap()
            .with_executable(&script)
            .unwrap();
        fs::remove_file(&script).unwrap();

        assert!(matches!(
            cfg.run_default(),
            Err(LaunchError::SpawnFailure { .. })
        ));
    }

    #[test]
    fn test_missing_working_directory_is_spawn_failure() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();

        let result = LaunchConfiguration::for_program("sh")
            .unwrap()
            .with_executable("/bin/sh")
            .unwrap()
            .with_working_directory(dir.path().join("nope"))
            .with_default_arguments(["-c", "true"])
            .run_default();

        assert!(matches!(result, Err(LaunchError::SpawnFailure { .. })));
    }
}

#[test]
fn test_error_messages_name_the_program() {
    let err = LaunchError::UnexpectedExitCode {
        name: "git".to_string(),
        code: 128,
    };
    assert_eq!(err.to_string(), "Program 'git' exited with unexpected code 128");

    let err = LaunchError::ExecutableNotFound {
        name: "git".to_string(),
        reason: "no match in 'PATH'".to_string(),
    };
    assert!(err.to_string().contains("git"));
}

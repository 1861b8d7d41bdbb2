// tests/property/main.rs

use proptest::prelude::*;

use proclaunch::{LaunchConfiguration, Platform};

#[derive(Debug, Clone)]
enum Op {
    WorkDir(String),
    InheritWorkDir,
    SetVar(String, String),
    UnsetVar(String),
    AddPath(String),
    DefaultArgs(Vec<String>),
    Combined(bool),
    ExitCodes(Vec<i32>),
}

fn name() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,6}"
}

fn dir() -> impl Strategy<Value = String> {
    "/[a-z0-9]{1,8}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        dir().prop_map(Op::WorkDir),
        Just(Op::InheritWorkDir),
        (name(), "[a-z0-9 ]{0,8}").prop_map(|(k, v)| Op::SetVar(k, v)),
        name().prop_map(Op::UnsetVar),
        dir().prop_map(Op::AddPath),
        proptest::collection::vec("[a-z-]{0,6}", 0..4).prop_map(Op::DefaultArgs),
        any::<bool>().prop_map(Op::Combined),
        proptest::collection::vec(-3..300i32, 0..4).prop_map(Op::ExitCodes),
    ]
}

fn apply(cfg: &LaunchConfiguration, op: &Op) -> LaunchConfiguration {
    match op {
        Op::WorkDir(d) => cfg.with_working_directory(d),
        Op::InheritWorkDir => cfg.with_inherited_working_directory(),
        Op::SetVar(k, v) => cfg.with_environment_variable(k, v),
        Op::UnsetVar(k) => cfg.without_environment_variable(k),
        Op::AddPath(d) => cfg.with_additional_path_variable(d),
        Op::DefaultArgs(args) => cfg.with_default_arguments(args),
        Op::Combined(b) => cfg.with_combined_output(*b),
        Op::ExitCodes(codes) => cfg.with_expected_exit_codes(codes.iter().copied()),
    }
}

proptest! {
    #[test]
    fn with_operations_never_mutate_the_receiver(ops in proptest::collection::vec(op(), 1..12)) {
        let mut current = LaunchConfiguration::for_program_on("tool", Platform::PosixLike).unwrap();
        for op in &ops {
            let before = current.clone();
            let next = apply(&current, op);
            prop_assert_eq!(&current, &before);
            current = next;
        }
    }

    #[test]
    fn additional_paths_come_out_in_reverse_order(dirs in proptest::collection::vec(dir(), 1..8)) {
        let mut cfg = LaunchConfiguration::for_program_on("tool", Platform::PosixLike)
            .unwrap()
            .with_environment_variable("PATH", "/base");
        for d in &dirs {
            cfg = cfg.with_additional_path_variable(d);
        }

        let mut expected: Vec<&str> = dirs.iter().map(String::as_str).rev().collect();
        expected.push("/base");
        prop_assert_eq!(
            cfg.environment().get("PATH").cloned().flatten(),
            Some(expected.join(":"))
        );
    }

    #[test]
    fn windows_like_paths_join_with_semicolons(dirs in proptest::collection::vec(dir(), 1..8)) {
        let mut cfg = LaunchConfiguration::for_program_on("tool", Platform::WindowsLike)
            .unwrap()
            .with_environment_variable("Path", "/base");
        for d in &dirs {
            cfg = cfg.with_additional_path_variable(d);
        }

        let mut expected: Vec<&str> = dirs.iter().map(String::as_str).rev().collect();
        expected.push("/base");
        prop_assert_eq!(
            cfg.environment().get("Path").cloned().flatten(),
            Some(expected.join(";"))
        );
    }
}

#![allow(dead_code)]

pub use proclaunch_test_utils::{init_tracing, sh, stderr_lines, stdout_lines};

/// Name of some variable the test process inherited, other than the search path.
pub fn inherited_variable() -> (String, String) {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .find(|(k, v)| {
            k != "PATH"
                && !k.is_empty()
                && !v.contains('\n')
                && k.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
        .expect("test process inherits at least one environment variable")
}

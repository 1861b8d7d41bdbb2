// crates/test-utils/src/lib.rs

pub mod builders;

use std::sync::Once;

use proclaunch::{CompletedProcess, LaunchConfiguration};
use tracing_subscriber::{EnvFilter, fmt};

static TRACING: Once = Once::new();

/// Route `proclaunch` logs into the test harness, once per test binary.
///
/// The level comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration running `script` through `/bin/sh -c`.
///
/// Extra runtime arguments show up as `$0`, `$1`, ... inside the script.
pub fn sh(script: &str) -> LaunchConfiguration {
    LaunchConfiguration::for_program("sh")
        .and_then(|cfg| cfg.with_executable("/bin/sh"))
        .expect("/bin/sh must be available for process tests")
        .with_default_arguments(["-c", script])
}

/// All captured stdout lines.
pub fn stdout_lines(done: &CompletedProcess) -> Vec<String> {
    done.stdout_lines()
        .and_then(|lines| lines.collect())
        .expect("reading captured stdout")
}

/// All captured stderr lines.
pub fn stderr_lines(done: &CompletedProcess) -> Vec<String> {
    done.stderr_lines()
        .and_then(|lines| lines.collect())
        .expect("reading captured stderr")
}

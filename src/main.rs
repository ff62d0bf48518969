use egs_subset::cli::{exit_status, init_tracing, report_error, run_cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let result = run_cli(std::env::args_os());
    if let Err(err) = &result
        && let Err(io_err) = report_error(err, &mut std::io::stderr().lock())
    {
        // stderr is unusable; the exit status still carries the failure.
        tracing::error!(error = %io_err, "could not report run failure");
    }
    ExitCode::from(exit_status(&result))
}

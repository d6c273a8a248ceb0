// cli/src/output.rs
// Terminal output for the CLI: the tracing subscriber that renders core's
// `log` records, and styled rendering of compilation errors.

use console::{Style, Term};
use elpian_core::{ElpianErrorExt, Level, generate_error_report};

/// Install the stderr subscriber. `verbosity` counts `-v` flags: 0 is
/// warnings, 1 info, 2 debug, 3+ trace. Records from the `log` facade are
/// bridged into it.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(Term::stderr().features().colors_supported())
        .with_target(false)
        .without_time()
        .try_init();
}

/// Print the one-line report for `error` to stderr, colored by level.
pub fn print_error(error: &dyn ElpianErrorExt) {
    let style = match error.level() {
        Level::Info => Style::new().for_stderr().green(),
        Level::Warning => Style::new().for_stderr().yellow(),
        Level::Error => Style::new().for_stderr().red(),
        Level::Critical => Style::new().for_stderr().red().bold(),
    };
    let _ = Term::stderr().write_line(&style.apply_to(generate_error_report(error)).to_string());
}

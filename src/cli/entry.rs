//! Process entry points shared by every binary.

use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::shell::is_ci;
use crate::ui::{create_ui, OutputMode, ScanreadyTheme};

use super::args::{Cli, Commands};
use super::commands::CommandDispatcher;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("scanready=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scanready=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run the `scanready` binary with parsed arguments.
pub fn run(cli: Cli) -> ExitCode {
    init_tracing(cli.debug);
    tracing::debug!("scanready starting with args: {:?}", cli);

    let theme = if cli.no_color {
        ScanreadyTheme::plain()
    } else {
        ScanreadyTheme::detect()
    };
    let mut ui = create_ui(!is_ci(), OutputMode::from_flags(cli.verbose, cli.quiet), theme);

    match CommandDispatcher::new().dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}

/// Run one tool with default flags, for the per-tool binaries.
pub fn run_tool(command: Commands) -> ExitCode {
    init_tracing(false);
    tracing::debug!(?command, "scanready tool starting");

    let mut ui = create_ui(!is_ci(), OutputMode::Normal, ScanreadyTheme::detect());

    match CommandDispatcher::new().dispatch_command(&command, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use shared::ShadingMode;
use slope_viewer_lib::command::{execute_command, execute_json_batch, ViewerCommand};
use slope_viewer_lib::harness::TestHarness;
use slope_viewer_lib::state::AppState;

/// Command-line options
#[derive(Default)]
struct CliArgs {
    mesh: Option<PathBuf>,
    mode: Option<ShadingMode>,
    toggles: Vec<i64>,
    commands: Option<PathBuf>,
    /// Persist `--mode` as the startup mode
    save_mode: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slope_viewer=info,slope_viewer_lib=info".into()),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("usage: slope-viewer [--mesh <file.json>] [--mode <shading_mode> [--save-mode]] [--toggle <triangle>]... [--commands <file.json>]");
            return ExitCode::FAILURE;
        }
    };

    let mut harness = TestHarness::from_state(AppState::with_saved_settings());

    if let Some(path) = &args.mesh {
        if let Err(e) = harness.state.load_file(path) {
            tracing::error!("Failed to load mesh from {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    if let Some(mode) = args.mode {
        harness.set_mode(mode);
        if args.save_mode {
            harness.state.settings.shading_mode = mode;
            harness.state.settings.save();
        }
    }

    for triangle in &args.toggles {
        if !harness.toggle(*triangle) {
            tracing::warn!("Toggle of triangle {triangle} had no effect");
        }
    }

    if let Some(path) = &args.commands {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to read command file {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        };
        match execute_json_batch(&mut harness, &json) {
            Ok(responses) => {
                for resp in responses {
                    print_json(&resp);
                }
            }
            Err(e) => {
                tracing::error!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    print_json(&execute_command(&mut harness, ViewerCommand::Inspect));
    ExitCode::SUCCESS
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("Failed to serialize output: {e}"),
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {arg}"))
        };
        match arg.as_str() {
            "--mesh" => out.mesh = Some(PathBuf::from(value()?)),
            "--commands" => out.commands = Some(PathBuf::from(value()?)),
            "--save-mode" => out.save_mode = true,
            "--mode" => {
                let raw = value()?;
                let mode = serde_json::from_value(serde_json::Value::String(raw.clone()))
                    .map_err(|_| format!("unknown shading mode '{raw}'"))?;
                out.mode = Some(mode);
            }
            "--toggle" => {
                let raw = value()?;
                let triangle = raw
                    .parse()
                    .map_err(|_| format!("invalid triangle index '{raw}'"))?;
                out.toggles.push(triangle);
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    if out.save_mode && out.mode.is_none() {
        return Err("--save-mode requires --mode".to_string());
    }
    Ok(out)
}

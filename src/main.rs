use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use screenburn::args::{self, CliAction};
use screenburn::commands;
use screenburn::config::Config;
use screenburn::constants::*;
use screenburn::control::{ControlLoop, LoopState};
use screenburn::display::{self, DisplayController, command::is_tool_available};
use screenburn::lock::{self, InstanceLock};
use screenburn::logger::Log;
use screenburn::signals;
use screenburn::ticker::{self, CancellationToken};
use screenburn::utils::format_duration;

/// Warn about missing external tools. Ticks keep running either way and
/// report each failed call, so a tool installed later is picked up.
fn check_tools(config: &Config) {
    let temperature_tool = config
        .temperature_command
        .as_deref()
        .unwrap_or(DEFAULT_TEMPERATURE_COMMAND)
        .split_whitespace()
        .next()
        .unwrap_or(DEFAULT_TEMPERATURE_COMMAND);

    if !is_tool_available(temperature_tool) {
        Log::log_warning(&format!(
            "{} was not found in PATH. Color temperature changes will fail.",
            temperature_tool
        ));
    }

    let breaks_enabled = config.breaks_enabled.unwrap_or(DEFAULT_BREAKS_ENABLED);
    if breaks_enabled && !is_tool_available(DEFAULT_OUTPUT_COMMAND) {
        Log::log_warning(&format!(
            "{} was not found in PATH. Screen breaks will fail.",
            DEFAULT_OUTPUT_COMMAND
        ));
    }
}

fn run_daemon(config_path: Option<&Path>, dry_run: bool) -> Result<()> {
    Log::log_version();

    let (config, loaded_from) = Config::load_with_override(config_path)?;
    config.log_config(&loaded_from);

    let control = ControlLoop::from_config(&config)?;

    let lock = InstanceLock::acquire(&lock::default_lock_path())?;
    Log::log_block_start("Lock acquired, starting screenburn...");

    let token = CancellationToken::new();
    signals::setup_signal_handler(token.clone())?;

    if dry_run {
        Log::log_decorated("Dry run: display changes are only logged");
    } else {
        check_tools(&config);
    }
    let mut display = display::create_display(&config, dry_run);
    Log::log_verbose(&format!("Using {} display controller", display.name()));

    if let Some(breaks) = control.breaks() {
        Log::log_block_start(&format!(
            "First break in {}",
            format_duration(breaks.active_duration())
        ));
    }

    // The state is moved through each tick; the Option only lets the closure
    // take it by value.
    let mut state: Option<LoopState> = Some(control.initial_state());
    let ticks = ticker::run(config.tick_interval(), &token, |delta| {
        if let Some(current) = state.take() {
            let (next, _) = control.tick(current, &Utc::now(), delta, &mut display);
            state = Some(next);
        }
    });

    Log::log_block_start("Shutting down screenburn...");
    let final_state = state.unwrap_or_else(|| control.initial_state());
    let final_state = control.shutdown(
        final_state,
        &mut display,
        config.reset_on_exit.unwrap_or(DEFAULT_RESET_ON_EXIT),
    );

    Log::log_verbose(&format!(
        "Ran {} ticks with {} display failures",
        ticks,
        final_state.display_failures()
    ));

    lock.release();
    Log::log_end();
    Ok(())
}

fn main() {
    let action = match args::parse_action(std::env::args_os()) {
        Ok(action) => action,
        // Covers --help and --version as well as real parse errors.
        Err(e) => e.exit(),
    };

    let result = match action {
        CliAction::Run {
            debug_enabled,
            dry_run,
            config,
        } => {
            Log::set_debug(debug_enabled);
            run_daemon(config.as_deref(), dry_run)
        }
        CliAction::Status { config } => commands::status::handle_status_command(config.as_deref()),
        CliAction::Test {
            debug_enabled,
            temperature,
            config,
        } => {
            Log::set_debug(debug_enabled);
            commands::test::handle_test_command(temperature, config.as_deref())
        }
        CliAction::BlankTest {
            debug_enabled,
            dry_run,
            config,
        } => {
            Log::set_debug(debug_enabled);
            commands::blank_test::handle_blank_test_command(config.as_deref(), dry_run)
        }
    };

    if let Err(e) = result {
        Log::log_pipe();
        Log::log_critical(&format!("{:#}", e));
        Log::log_end();
        std::process::exit(EXIT_FAILURE);
    }
}


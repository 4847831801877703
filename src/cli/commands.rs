//! Command dispatch: settings, services and terminal output

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{to_dot, TreeView};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Render {
            input,
            output,
            format,
        }) => cmd_render(cli, input, output.as_deref(), format.as_deref()),
        Some(Commands::Dot { input }) => cmd_dot(cli, input),
        Some(Commands::Tree { input }) => cmd_tree(cli, input),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".into(),
        )),
    }
}

/// Layered settings with command line flags on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(policy) = cli.policy {
        settings.count_policy = policy;
    }
    if let Some(max_depth) = cli.max_depth {
        settings.max_depth = max_depth;
    }
    settings.validate()?;
    debug!(?settings, "effective settings");
    Ok(settings)
}

#[instrument(skip(cli))]
fn cmd_render(cli: &Cli, input: &Path, output: Option<&Path>, format: Option<&str>) -> CliResult<()> {
    let mut settings = load_settings(cli)?;
    if let Some(format) = format {
        settings.format = format.to_string();
        settings.validate()?;
    }
    let container = ServiceContainer::new(settings);

    let written = container.render_service().render(input, output)?;
    output::success(&format!("Visualization saved at: {}", written.display()));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_dot(cli: &Cli, input: &Path) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?);

    let diagram = container.render_service().diagram(input)?;
    print!("{}", to_dot(&diagram));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, input: &Path) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?);

    let diagram = container.render_service().diagram(input)?;
    output::info(&diagram.to_term_tree());
    let anomalies = diagram.anomalies().count();
    if anomalies > 0 {
        output::warning(&format!(
            "{anomalies} anomalous node(s) out of {}",
            diagram.nodes.len()
        ));
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not found" };
                    output::action("Global", &format!("{} ({state})", path.display()));
                }
                None => output::warning("no global config directory on this platform"),
            }
            if let Some(path) = &cli.config {
                output::action("Local", &path.display());
            }
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("no global config directory on this platform".into())
            })?;
            let container = ServiceContainer::new(Settings::default());
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io("write", &path, e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

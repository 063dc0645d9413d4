//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::render::render_forest;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    // Completions need no settings
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let dir = local_dir(cli)?;
    let settings = Settings::load(Some(&dir))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Show {
            file,
            ids,
            extensions,
        } => cmd_show(&container, file, *ids, *extensions),
        Commands::Check { file } => cmd_check(&container, file),
        Commands::Fmt {
            file,
            output,
            compact,
        } => cmd_fmt(&container, file, output.as_deref(), *compact),
        Commands::Stats { file } => cmd_stats(&container, file),
        Commands::Config { command } => cmd_config(&container, command, &dir),
        Commands::Completion { .. } => Ok(()),
    }
}

fn local_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.dir {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArgs(format!(
            "not a directory: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("resolve current directory", e))),
    }
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, file: &Path, ids: bool, extensions: bool) -> CliResult<()> {
    let doc = container.documents.load(file)?;

    let mut display = container.settings.display.clone();
    display.show_ids |= ids;
    display.show_extensions |= extensions;

    for tree in render_forest(doc.roots(), &display) {
        output::info(&tree);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let report = container.documents.check(file)?;

    if report.is_ok() {
        output::success(&format!(
            "{}: {} nodes, {} roots, {} lazy",
            file.display(),
            report.nodes,
            report.roots,
            report.lazy
        ));
        return Ok(());
    }

    output::header(&file.display());
    for issue in &report.issues {
        output::failure(issue);
    }
    Err(CliError::IntegrityViolations(report.issues.len()))
}

#[instrument(skip(container))]
fn cmd_fmt(
    container: &ServiceContainer,
    file: &Path,
    target: Option<&Path>,
    compact: bool,
) -> CliResult<()> {
    let doc = container.documents.load(file)?;
    let pretty = container.settings.output.pretty && !compact;

    match target {
        Some(path) => {
            container.documents.save(path, &doc, pretty)?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => {
            let content = container.documents.format(&doc, pretty)?;
            io::stdout()
                .write_all(content.as_bytes())
                .map_err(|e| InfraError::io("write to stdout", e))?;
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_stats(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let stats = container.documents.stats(file)?;

    output::header(&file.display());
    output::field("nodes", &stats.nodes);
    output::field("roots", &stats.roots);
    output::field("depth", &stats.depth);
    output::field("lazy", &stats.lazy);
    output::field("expanded", &stats.expanded);
    output::field("checked", &stats.checked);
    if stats.extension_names.is_empty() {
        output::field("extensions", "-");
    } else {
        let names: Vec<_> = stats.extension_names.iter().map(String::as_str).collect();
        output::field("extensions", &names.join(", "));
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands, dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::field("global", &path.display()),
                None => output::field("global", "(no home directory)"),
            }
            output::field("local", &local_config_path(dir).display());
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
    }
    Ok(())
}

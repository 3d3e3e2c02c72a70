//! Command dispatch: one handler per subcommand

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{samples, write_report, ReportLine};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{
    global_config_path, local_config_path, OutputFormat, Settings, TransformMode, MAX_INDENT_WIDTH,
};
use crate::domain::Node;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Path argument meaning "read the document from stdin".
const STDIN_PATH: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => cmd_completion(*shell),
        other => execute_with_settings(other, cli.project_dir.as_deref()),
    }
}

/// Run a command that needs the layered settings.
fn execute_with_settings(command: &Commands, project_dir: Option<&Path>) -> CliResult<()> {
    let project_dir = resolve_project_dir(project_dir)?;
    let settings = Settings::load(Some(&project_dir))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Render {
            file,
            mode,
            format,
            indent,
        } => cmd_render(&container, file, *mode, *format, *indent),
        Commands::Transform {
            file,
            mode,
            compact,
        } => cmd_transform(&container, file, *mode, *compact),
        Commands::Classify { file } => cmd_classify(&container, file),
        Commands::Demo => cmd_demo(&container),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cmd_config_show(&container),
            ConfigCommands::Path => cmd_config_path(&project_dir),
            ConfigCommands::Init { global } => cmd_config_init(&container, &project_dir, *global),
        },
        Commands::Completion { shell } => cmd_completion(*shell),
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("resolve current directory", e))),
    }
}

/// Read a document from `file`, or from stdin for "-".
fn load_document(container: &ServiceContainer, file: &Path) -> CliResult<Node> {
    if file == Path::new(STDIN_PATH) {
        let content =
            io::read_to_string(io::stdin()).map_err(|e| InfraError::io("read stdin", e))?;
        return Ok(container.report_service.parse(&content, "<stdin>")?);
    }
    Ok(container.report_service.load(file)?)
}

fn emit(lines: &[ReportLine], format: OutputFormat, indent_width: usize) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    write_report(lines, format, indent_width, &mut stdout)
        .map_err(|e| InfraError::io("write report", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_render(
    container: &ServiceContainer,
    file: &Path,
    mode: Option<TransformMode>,
    format: Option<OutputFormat>,
    indent: Option<usize>,
) -> CliResult<()> {
    let settings = &container.settings;
    let indent_width = indent.unwrap_or(settings.indent_width);
    if !(1..=MAX_INDENT_WIDTH).contains(&indent_width) {
        return Err(CliError::InvalidArgs(format!(
            "--indent must be between 1 and {MAX_INDENT_WIDTH}, got {indent_width}"
        )));
    }

    let node = load_document(container, file)?;
    let lines = container
        .report_service
        .report(&node, mode.unwrap_or(settings.mode))?;
    emit(&lines, format.unwrap_or(settings.format), indent_width)
}

#[instrument(skip(container))]
fn cmd_transform(
    container: &ServiceContainer,
    file: &Path,
    mode: Option<TransformMode>,
    compact: bool,
) -> CliResult<()> {
    let node = load_document(container, file)?;
    let transformed = container
        .report_service
        .transform(&node, mode.unwrap_or(container.settings.mode))?;

    let value = serde_json::Value::from(&transformed);
    let json = if compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    }
    .map_err(|e| InfraError::io("serialize transformed document", e.into()))?;
    output::info(&json);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_classify(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let node = load_document(container, file)?;
    for (path, shape) in container.report_service.classify(&node) {
        output::info(&format!("{}: {}", path, shape));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_demo(container: &ServiceContainer) -> CliResult<()> {
    let settings = &container.settings;
    for sample in samples::builtin() {
        output::header(&demo_header(sample.title));
        let node = container
            .report_service
            .parse(sample.document, sample.title)?;
        let lines = container.report_service.report(&node, sample.mode)?;
        emit(&lines, settings.format, settings.indent_width)?;
    }
    Ok(())
}

/// Section header printed before each demo sample, preceded by a blank line.
fn demo_header(title: &str) -> String {
    format!("\n=== {} ===", title)
}

fn cmd_config_show(container: &ServiceContainer) -> CliResult<()> {
    output::info(&container.settings.to_toml()?);
    Ok(())
}

fn cmd_config_path(project_dir: &Path) -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::action("global", &path.display()),
        None => output::action("global", "(no config directory available)"),
    }
    output::action("local", &local_config_path(project_dir).display());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config_init(container: &ServiceContainer, project_dir: &Path, global: bool) -> CliResult<()> {
    let path = if global {
        global_config_path().ok_or_else(|| {
            CliError::Usage("cannot determine global config directory".to_string())
        })?
    } else {
        local_config_path(project_dir)
    };

    if container.fs.exists(&path) {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }

    container.fs.ensure_parent(&path).map_err(|e| {
        InfraError::io(format!("create config directory: {}", path.display()), e)
    })?;
    container
        .fs
        .write(&path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write config: {}", path.display()), e))?;
    output::success(&format!("Created {}", path.display()));
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut stdout = io::stdout();
    generate(shell, &mut cmd, name, &mut stdout);
    stdout
        .flush()
        .map_err(|e| InfraError::io("write completions", e))?;
    Ok(())
}

//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::Localizator;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, project_config_path, Settings};
use crate::domain::{AddOutcome, LocalizationNode};
use crate::exitcode;
use crate::infrastructure::{InfraError, ServiceContainer};

/// Run the parsed command line, returning the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        Commands::Config { command } => {
            let project_dir = project_dir(cli)?;
            cmd_config(command, &project_dir)
        }
        _ => {
            let project_dir = project_dir(cli)?;
            let settings = Settings::load(Some(&project_dir))?;
            let mut localizator = ServiceContainer::new(settings).build_localizator()?;
            if let Some(localization) = &cli.localization {
                localizator.set_localization(localization.as_str());
            }
            run(command, &mut localizator)
        }
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("resolve current directory", e))),
    }
}

fn run(command: &Commands, loc: &mut Localizator) -> CliResult<i32> {
    match command {
        Commands::Get {
            path,
            init,
            fallback,
        } => cmd_get(loc, path, init.as_deref(), fallback.as_deref()),
        Commands::Array { path, index } => cmd_array(loc, path, *index),
        Commands::AddString {
            category,
            name,
            value,
        } => {
            let outcome = loc.add_string(category, name, value)?;
            report_add(outcome, category, name)
        }
        Commands::AddCategory { category, name } => {
            let outcome = loc.add_category(category, name)?;
            report_add(outcome, category, name)
        }
        Commands::Set { path, value } => {
            loc.set_string(path, value)?;
            output::action("Set", path);
            Ok(exitcode::OK)
        }
        Commands::Merge {
            first,
            second,
            keep_values,
            default,
        } => {
            loc.merge_localizations(first, second, *keep_values, default)?;
            output::success(&format!("Merged {first} and {second}"));
            Ok(exitcode::OK)
        }
        Commands::Equiv { first, second } => {
            if loc.are_localizations_equivalent(first, second)? {
                output::success(&format!("{first} and {second} are equivalent"));
                Ok(exitcode::OK)
            } else {
                output::failure(&format!("{first} and {second} differ"));
                Ok(exitcode::NOT_EQUIVALENT)
            }
        }
        Commands::Tree => {
            let localization = loc.current_localization().to_string();
            let tree = loc.tree_for(&localization)?;
            output::info(&to_termtree(&localization, &tree));
            Ok(exitcode::OK)
        }
        Commands::Config { .. } | Commands::Completion { .. } => Err(CliError::Usage(
            "command does not operate on a localization".to_string(),
        )),
    }
}

#[instrument(skip(loc))]
fn cmd_get(
    loc: &mut Localizator,
    path: &str,
    init: Option<&str>,
    fallback: Option<&str>,
) -> CliResult<i32> {
    let value = match (init, fallback) {
        (Some(init), _) => loc.get_string_init(path, init)?,
        (None, Some(fallback)) => loc.get_string_or(path, fallback),
        (None, None) => loc.get_string(path)?,
    };
    output::info(&value);
    Ok(exitcode::OK)
}

#[instrument(skip(loc))]
fn cmd_array(loc: &mut Localizator, path: &str, index: Option<usize>) -> CliResult<i32> {
    match index {
        Some(index) => output::info(&loc.get_array_element(path, index)?),
        None => {
            for item in loc.get_array(path)? {
                output::info(&item);
            }
        }
    }
    Ok(exitcode::OK)
}

fn report_add(outcome: AddOutcome, category: &str, name: &str) -> CliResult<i32> {
    debug!("add {name} to {category:?}: {outcome:?}");
    match outcome {
        AddOutcome::Added => {
            output::action("Added", &name);
            Ok(exitcode::OK)
        }
        AddOutcome::AlreadyExisted => {
            output::warning(&format!("{name} already exists"));
            Ok(exitcode::OK)
        }
        AddOutcome::InvalidTarget => Err(CliError::InvalidArgs(format!(
            "cannot add {name}: {category:?} is not a category"
        ))),
    }
}

fn cmd_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence)");
            match global_config_path() {
                Some(path) => output::info(&format!("global:  {}", path.display())),
                None => output::warning("no global config directory on this platform"),
            }
            output::info(&format!(
                "project: {}",
                project_config_path(project_dir).display()
            ));
        }
    }
    Ok(exitcode::OK)
}

/// Render a localization tree; strings show their value, arrays their items.
pub fn to_termtree(name: &str, node: &LocalizationNode) -> Tree<String> {
    match node {
        LocalizationNode::String(value) => Tree::new(format!("{name} = {value:?}")),
        LocalizationNode::Array(items) => {
            let leaves = items
                .iter()
                .enumerate()
                .map(|(i, item)| Tree::new(format!("[{i}] {item:?}")));
            Tree::new(format!("{name} [{}]", items.len())).with_leaves(leaves)
        }
        LocalizationNode::Category(children) => {
            let leaves = children
                .iter()
                .map(|(child, node)| to_termtree(child, node));
            Tree::new(name.to_string()).with_leaves(leaves)
        }
    }
}

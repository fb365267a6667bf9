use anyhow::Result;
use clap::{Parser, Subcommand};
use ctempl::commands::{
    expand_command, generate_command, info_command, init_config_command, list_modules_command,
    verify_command,
};
use ctempl::init_logging;
use ctempl_core::fixture::DEFAULT_TRUTH_FILE;

/// Expand marker-annotated C templates into C sources.
///
/// This CLI is a thin wrapper around `ctempl-core` (exposed in code as `ctempl_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(name = "ctempl", version, about = "Expand marker-annotated C templates", long_about = None)]
struct Cli {
    /// Log debug output to stderr (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate `<module>.c` from `<module>_template.c` for each module.
    ///
    /// Modules default to the config's `modules` list, or every template
    /// found in the directory. Outputs newer than their template are skipped
    /// unless `--force` is given.
    Generate {
        /// Template directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        dir: String,

        /// Module to generate (repeatable).
        #[arg(long = "module")]
        modules: Vec<String>,

        /// Regenerate even if the output looks up to date.
        #[arg(long)]
        force: bool,

        /// Print the generation report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Expand a single template file to stdout or to `--output`.
    Expand {
        /// Template file to expand.
        #[arg(long)]
        input: String,

        /// Write the expansion here instead of stdout.
        #[arg(long)]
        output: Option<String>,

        /// Omit `#line` directives.
        #[arg(long)]
        no_line_directives: bool,
    },

    /// List the modules `generate` would process and whether each is up to date.
    ListModules {
        #[arg(long, default_value = ".")]
        dir: String,

        #[arg(long)]
        json: bool,
    },

    /// Generate a module and compare it with a fixture, then remove the output.
    Verify {
        #[arg(long, default_value = ".")]
        dir: String,

        #[arg(long, default_value = "test")]
        module: String,

        /// Fixture file name inside the directory.
        #[arg(long, default_value = DEFAULT_TRUTH_FILE)]
        truth: String,
    },

    /// Write a default `ctempl.json` (or `ctempl.yaml`) into a template directory.
    InitConfig {
        #[arg(long, default_value = ".")]
        dir: String,

        /// `json` or `yaml`.
        #[arg(long, default_value = "json")]
        format: String,

        /// Overwrite an existing config.
        #[arg(long)]
        force: bool,
    },

    /// Show the resolved config and modules of a template directory.
    Info {
        #[arg(long, default_value = ".")]
        dir: String,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Default to Info on the current directory if no command is provided.
    match cli.command.unwrap_or(Command::Info { dir: ".".to_string(), json: false }) {
        Command::Generate { dir, modules, force, json } => {
            generate_command(&dir, &modules, force, json)?
        }
        Command::Expand { input, output, no_line_directives } => {
            expand_command(&input, output.as_deref(), !no_line_directives)?
        }
        Command::ListModules { dir, json } => list_modules_command(&dir, json)?,
        Command::Verify { dir, module, truth } => verify_command(&dir, &module, &truth)?,
        Command::InitConfig { dir, format, force } => init_config_command(&dir, &format, force)?,
        Command::Info { dir, json } => info_command(&dir, json)?,
    }

    Ok(())
}

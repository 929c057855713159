// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;
use std::path::Path;

use crate::config::FormConfig;
use crate::error::{FieldError, FormError, Result, ResultExt};
use crate::field::FormDocument;
use crate::form::{Dispatch, FormValidator, Report, SubmitStatus};
use crate::validator::ProcessValidator;

use super::args::{CheckArgs, Cli, Commands, ConfigPreset, InitArgs};

const CONFIG_FILE: &str = "formcheck.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Check(args) => {
            let config = if let Some(config_path) = &cli.config {
                FormConfig::load_from(config_path)?
            } else {
                FormConfig::load()?
            };
            run_check(&cli, &config, args)
        }
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

/// Run the check command.
fn run_check(cli: &Cli, config: &FormConfig, args: &CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let validator = ProcessValidator::from_config(&config.validator)?;
    let mut form = FormValidator::from_config(config, validator, ())?;
    let document = read_document(args)?;
    let timeout = config.form.settle_timeout();

    let report = match &args.field {
        Some(name) => {
            let mut dispatch = form.handle_blur(&document, name)?;
            if let Dispatch::Pending { ticket } = dispatch {
                let progress = form.settle(timeout);
                if let Some((_, outcome)) = progress
                    .settled
                    .into_iter()
                    .find(|(settled, _)| *settled == ticket)
                {
                    dispatch = outcome;
                }
            }
            Report::for_field(&form, &dispatch)
        }
        None => {
            let mut status = form.handle_submit(&document)?;
            if status == SubmitStatus::Pending {
                if let Some(settled) = form.settle(timeout).submit {
                    status = settled;
                }
            }
            Report::for_submit(&form, &status)
        }
    };

    report.print(cli.format);

    if report.is_valid() {
        Ok(())
    } else {
        Err(FormError::Field(FieldError::Failed {
            count: report.errors.len(),
        }))
    }
}

fn read_document(args: &CheckArgs) -> Result<FormDocument> {
    let content = if args.reads_stdin() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read form document from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&args.document)
            .context(format!("Failed to read {}", args.document.display()))?
    };
    FormDocument::from_json(&content)
}

/// Print version information.
fn run_version() -> Result<()> {
    println!("formcheck {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: &InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new(CONFIG_FILE);

    if config_path.exists() && !args.force {
        return Err(FormError::WithContext {
            context: "init".to_string(),
            message: format!("{} already exists. Use --force to overwrite.", CONFIG_FILE),
        });
    }

    let config_content = match args.preset {
        Some(ConfigPreset::Minimal) => {
            r#"# formcheck configuration (minimal)
[rules]
email = "required|email"
"#
        }
        Some(ConfigPreset::Standard) => {
            r#"# formcheck configuration (standard)
[form]
ignore = ["csrf_token"]

[rules]
name = "required"
email = "required|email"
password = "required|min:8"
password_confirmation = "required|same:password"

[validator]
command = "node"
args = ["validate.js"]
"#
        }
        Some(ConfigPreset::Full) | None => example_config(),
    };

    std::fs::write(config_path, config_content).map_err(|e| FormError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })?;

    println!("✓ Created {}", CONFIG_FILE);

    Ok(())
}

// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

fn config_arg(locale: &str) -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help(t!("cli.arg_config", locale = locale).to_string())
        .value_name("CONFIG")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn tests_dir_arg(locale: &str) -> Arg {
    Arg::new("tests-dir")
        .short('d')
        .long("tests-dir")
        .help(t!("cli.arg_tests_dir", locale = locale).to_string())
        .value_name("TESTS_DIR")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("suite-graph")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("inspect")
                .about(t!("cli.inspect_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(tests_dir_arg(locale))
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .help(t!("cli.arg_verbose", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("find-suite")
                .about(t!("cli.find_suite_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(tests_dir_arg(locale))
                .arg(
                    Arg::new("field")
                        .long("field")
                        .help(t!("cli.arg_field", locale = locale).to_string())
                        .value_name("FIELD")
                        .required(true)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("value")
                        .long("value")
                        .help(t!("cli.arg_value", locale = locale).to_string())
                        .value_name("VALUE")
                        .required(true)
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cli.init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("cli.arg_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .default_value(crate::core::config::DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("cli.arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Where the graph configuration comes from, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    pub config: Option<PathBuf>,
    pub tests_dir: Option<PathBuf>,
    pub lang: Option<String>,
}

impl ConfigSource {
    fn from_matches(matches: &ArgMatches, lang: Option<String>) -> Self {
        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            tests_dir: matches.get_one::<PathBuf>("tests-dir").cloned(),
            lang,
        }
    }
}

pub fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let lang = pre_parse_language();
    match &lang {
        Some(lang) => crate::set_language(lang),
        None => crate::init(),
    }
    let locale = rust_i18n::locale().to_string();

    let matches = build_cli(&locale).get_matches();

    match matches.subcommand() {
        Some(("inspect", sub)) => {
            let source = ConfigSource::from_matches(sub, lang);
            commands::inspect::execute(&source, sub.get_flag("verbose"))?;
        }
        Some(("find-suite", sub)) => {
            let source = ConfigSource::from_matches(sub, lang);
            let field = sub
                .get_one::<String>("field")
                .map(String::as_str)
                .unwrap_or_default();
            let value = sub
                .get_one::<String>("value")
                .map(String::as_str)
                .unwrap_or_default();
            commands::find_suite::execute(&source, field, value)?;
        }
        Some(("init", sub)) => {
            let output = sub
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(crate::core::config::DEFAULT_CONFIG_FILE));
            commands::init::execute(&output, sub.get_flag("force"), &locale)?;
        }
        _ => {
            // subcommand_required: clap has already printed help and exited.
        }
    }
    Ok(())
}

/**
 * Binding Syntax CLI - bindc
 *
 * Main entry point for interpreting binding attributes
 */
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use std::process;

use binding_syntax_cli::commands::{
    load_config, parse_assignment, run_attr, run_expr, run_interpret, Session,
};

fn tag_arg() -> Arg {
    Arg::new("tag")
        .short('t')
        .long("tag")
        .value_name("TAG")
        .default_value("div")
        .help("Tag name of the element carrying the attributes")
}

fn filter_arg() -> Arg {
    Arg::new("filter")
        .short('f')
        .long("filter")
        .value_name("NAME")
        .action(ArgAction::Append)
        .help("Register a filter name (repeatable)")
}

fn cli() -> Command {
    Command::new("bindc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Binding attribute interpreter")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Path to an interpreter config JSON file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log every dispatched command"),
        )
        .subcommand(
            Command::new("attr")
                .about("Interpret NAME=VALUE attributes of one element")
                .arg(
                    Arg::new("attributes")
                        .value_name("NAME=VALUE")
                        .required(true)
                        .num_args(1..),
                )
                .arg(tag_arg())
                .arg(filter_arg()),
        )
        .subcommand(
            Command::new("interpret")
                .about("Run one binding command directly")
                .arg(Arg::new("command").value_name("COMMAND").required(true))
                .arg(Arg::new("name").value_name("NAME").required(true))
                .arg(
                    Arg::new("value")
                        .value_name("VALUE")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(tag_arg())
                .arg(filter_arg()),
        )
        .subcommand(
            Command::new("expr")
                .about("Parse a binding expression")
                .arg(
                    Arg::new("source")
                        .value_name("SOURCE")
                        .required(true)
                        .allow_hyphen_values(true),
                ),
        )
}

fn session(matches: &ArgMatches, sub: &ArgMatches) -> anyhow::Result<Session> {
    let config_path = matches.get_one::<String>("config").map(Path::new);
    let mut session = Session::new(
        sub.get_one::<String>("tag")
            .map(String::as_str)
            .unwrap_or("div"),
    );
    session.config = load_config(config_path)?;
    session.verbose = matches.get_flag("verbose");
    session.filters = sub
        .get_many::<String>("filter")
        .map(|names| names.cloned().collect())
        .unwrap_or_default();
    Ok(session)
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

fn run(matches: &ArgMatches) -> anyhow::Result<serde_json::Value> {
    match matches.subcommand() {
        Some(("attr", sub)) => {
            let attributes = sub
                .get_many::<String>("attributes")
                .into_iter()
                .flatten()
                .map(|arg| parse_assignment(arg.as_str()))
                .collect::<anyhow::Result<Vec<_>>>()?;
            run_attr(&session(matches, sub)?, &attributes)
        }
        Some(("interpret", sub)) => run_interpret(
            &session(matches, sub)?,
            required(sub, "command"),
            required(sub, "name"),
            required(sub, "value"),
        ),
        Some(("expr", sub)) => run_expr(required(sub, "source")),
        _ => Err(anyhow::anyhow!("no subcommand given")),
    }
}

fn main() {
    let matches = cli().get_matches();

    match run(&matches).and_then(|output| Ok(serde_json::to_string_pretty(&output)?)) {
        Ok(text) => println!("{}", text),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

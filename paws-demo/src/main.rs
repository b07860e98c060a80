use std::env;
use std::ffi::OsString;

use anyhow::{Context, anyhow};
use joinery::JoinableIterator;
use lazy_format::lazy_format;
use paws::{
    DefinitionError, FlagDefinition, FlagOptions, FlagRange, FlagType, ParseResult, Registry,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log filter directives come from `PAWS_LOG`; without it, only warnings
fn log_filter() -> anyhow::Result<EnvFilter> {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("PAWS_LOG")
        .from_env()
        .context("PAWS_LOG contains invalid log directives")
}

fn choices(choices: &[&str]) -> Vec<String> {
    choices.iter().map(|&choice| choice.to_owned()).collect()
}

/// A small slice of git's command line
fn registry() -> Result<Registry, DefinitionError> {
    let mut registry = Registry::new();

    registry.add_flags([
        FlagDefinition::bool("verbose", &["v"]).with_help("Be more talkative"),
        FlagDefinition::string("git-dir", &[]).with_help("Path to the repository"),
        FlagDefinition::new("color", FlagType::String, FlagOptions {
            default: Some("auto".into()),
            choices: choices(&["auto", "always", "never"]),
            help: "When to use colors".to_owned(),
            ..FlagOptions::default()
        })?,
    ]);

    registry.add_command(["status"], [
        FlagDefinition::bool("short", &["s"]),
        FlagDefinition::bool("branch", &["b"]),
    ])?;

    registry.add_command(["commit"], [
        FlagDefinition::string("message", &["m"])
            .required()
            .with_help("Use the given message as the commit message"),
        FlagDefinition::bool("all", &["a"]),
        FlagDefinition::bool("amend", &[]),
    ])?;

    registry.add_command(["log"], [
        FlagDefinition::new("max-count", FlagType::Uint, FlagOptions {
            aliases: vec!["n".to_owned()],
            range: Some(FlagRange::new(1, 10_000)),
            ..FlagOptions::default()
        })?,
        FlagDefinition::bool("oneline", &[]),
    ])?;

    registry.add_command(["clone"], [
        FlagDefinition::new("depth", FlagType::Int, FlagOptions {
            default: Some(0i64.into()),
            range: Some(FlagRange::new(0, i64::MAX)),
            ..FlagOptions::default()
        })?,
        FlagDefinition::bool("bare", &[]),
    ])?;

    registry.add_command(["remote"], [FlagDefinition::bool("verbose", &["v"])])?;

    registry.add_command(["remote", "add"], [
        FlagDefinition::bool("fetch", &["f"]),
        FlagDefinition::new("tags", FlagType::String, FlagOptions {
            choices: choices(&["all", "none"]),
            ..FlagOptions::default()
        })?,
    ])?;

    registry.add_command(["remote", "prune"], [
        FlagDefinition::float("timeout", &[]),
        FlagDefinition::bool("dry-run", &["n"]),
    ])?;

    Ok(registry)
}

/// The value every flag in scope resolves to, defaults included
fn effective_value(result: &ParseResult<'_>, flag: &FlagDefinition) -> String {
    let name = flag.name();

    match flag.kind() {
        FlagType::Bool => result.bool(name).to_string(),
        FlagType::String => format!("{:?}", result.string(name)),
        FlagType::Int => result.int(name).to_string(),
        FlagType::Uint => result.uint(name).to_string(),
        FlagType::Float => result.float(name).to_string(),
    }
}

/// Every argument after the program name, which must all be valid UTF-8
fn utf8_args(args: impl IntoIterator<Item = OsString>) -> anyhow::Result<Vec<String>> {
    args.into_iter()
        .skip(1)
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("argument {arg:?} is not valid UTF-8"))
        })
        .collect()
}

fn report(registry: &Registry, result: &ParseResult<'_>) -> String {
    let command = result.command();
    let command_flags = command.map_or(&[][..], |command| command.flags());

    // Command flags first; globals they shadow are left out
    let in_scope = command_flags.iter().chain(
        registry
            .global_flags()
            .iter()
            .filter(|flag| command.is_none_or(|command| command.find_flag(flag.name()).is_none())),
    );

    let values = in_scope.map(|flag| {
        let marker = if result.is_set(flag.name()) { "" } else { " (default)" };
        let value = effective_value(result, flag);
        lazy_format!("\n  --{name} = {value}{marker}", name = flag.name())
    });

    let path = result.command_path().map(|path| path.iter().join_with(" "));
    let path = lazy_format!(match (&path) {
        Some(path) => "{path}",
        None => "(none)",
    });

    let positional_args = result.positional();
    let positional = lazy_format!("\n  {arg:?}" for arg in positional_args);

    let stopped = if result.double_dash_seen() {
        "\n(flag parsing stopped at --)"
    } else {
        ""
    };

    format!(
        "command: {path}\nflags:{values}\npositional:{positional}{stopped}",
        values = values.join_concat(),
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter()?)
        .with_writer(std::io::stderr)
        .init();

    let registry = registry().context("failed to build the command registry")?;
    let args = utf8_args(env::args_os())?;

    let result = registry.parse(&args)?;
    registry.validate_required(&result)?;

    println!("{}", report(&registry, &result));

    Ok(())
}

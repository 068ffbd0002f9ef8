mod boot;
mod configure;
mod launch;
mod process;
mod registry;
mod shared;

pub(crate) use shared::*;

use crate::{config::WinectlConfig, local_logger::init_local_logger, prelude::*};
use clap::{
    Parser, Subcommand,
    builder::{Styles, styling},
};
use winectl::Runtime;

fn create_styles() -> Styles {
    styling::Styles::styled()
        .header(styling::AnsiColor::Red.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Red.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Magenta.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}

#[derive(Parser, Debug)]
#[command(version, about = "Control wine prefixes from the command line", styles = create_styles())]
pub struct Cli {
    #[command(flatten)]
    pub runtime: RuntimeArgs,

    /// The configuration name to use
    /// If provided, the configuration will be loaded from ~/.config/winectl/{config-name}.yaml
    /// Otherwise, loads from ~/.config/winectl/config.yaml
    #[arg(long, env = "WINECTL_CONFIG_NAME", global = true)]
    pub config_name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the persisted configuration
    #[command(subcommand)]
    Config(configure::ConfigCommands),
    #[command(flatten)]
    Prefix(PrefixCommands),
}

/// Commands operating on a resolved runtime and prefix
#[derive(Subcommand, Debug)]
enum PrefixCommands {
    /// List the processes running in the prefix
    Ps(process::PsArgs),
    /// Kill processes by hexadecimal pid or by executable name
    Kill(process::KillArgs),
    /// Drive the prefix lifecycle through wineboot
    Boot(boot::BootArgs),
    /// Edit the registry of the prefix
    #[command(subcommand)]
    Reg(registry::RegCommands),
    /// Manage dll overrides
    #[command(subcommand)]
    Dll(registry::DllCommands),
    /// Set the Windows version reported to applications
    Winver(registry::WinverArgs),
    /// Open one of the tools bundled with wine
    Tool(launch::ToolArgs),
    /// Run a program inside the prefix
    #[command(alias = "r")]
    Run(launch::RunArgs),
    /// Validate the installation and print the wine binary in use
    Check,
}

fn check(runtime: &Runtime) {
    println!("{}", runtime.binary().display());
    info!(
        "{} installation at {} is valid, prefix is {}",
        runtime.distribution(),
        runtime.root().display(),
        runtime.prefix().display()
    );
}

fn dispatch(command: PrefixCommands, runtime: &Runtime, config: &WinectlConfig) -> Result<()> {
    match command {
        PrefixCommands::Ps(args) => process::ps(args, runtime),
        PrefixCommands::Kill(args) => process::kill(args, runtime),
        PrefixCommands::Boot(args) => boot::run(args, runtime),
        PrefixCommands::Reg(command) => registry::reg(command, runtime),
        PrefixCommands::Dll(command) => registry::dll(command, runtime),
        PrefixCommands::Winver(args) => registry::winver(args, runtime),
        PrefixCommands::Tool(args) => launch::tool(args, runtime, config.terminal.as_deref()),
        PrefixCommands::Run(args) => launch::run(args, runtime),
        PrefixCommands::Check => {
            check(runtime);
            Ok(())
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_local_logger()?;
    let config_name = cli.config_name.as_deref();

    match cli.command {
        // Editing the configuration must work before any runtime is usable
        Commands::Config(command) => configure::run(command, &cli.runtime, config_name),
        Commands::Prefix(command) => {
            let config = WinectlConfig::load(config_name)?;
            let runtime = cli.runtime.resolve(&config)?;
            dispatch(command, &runtime, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "winectl",
            "kill",
            "notepad.exe",
            "--prefix",
            "/tmp/prefix",
            "--proton",
        ])
        .unwrap();
        assert_eq!(cli.runtime.prefix.as_deref(), Some("/tmp/prefix"));
        assert!(cli.runtime.proton);
        assert!(matches!(
            cli.command,
            Commands::Prefix(PrefixCommands::Kill(ref args)) if args.target == "notepad.exe"
        ));
    }

    #[test]
    fn test_parse_run_args() {
        let cli = Cli::try_parse_from(["winectl", "run", "--wait", "--", "app.exe", "-x"]).unwrap();
        match cli.command {
            Commands::Prefix(PrefixCommands::Run(args)) => {
                assert!(args.wait);
                assert_eq!(args.args, vec!["app.exe", "-x"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_without_runtime() {
        let cli = Cli::try_parse_from(["winectl", "config", "set", "--terminal", "kitty"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(_)));

        let cli = Cli::try_parse_from(["winectl", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Prefix(PrefixCommands::Check)));
    }
}

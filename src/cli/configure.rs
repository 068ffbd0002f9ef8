use crate::cli::RuntimeArgs;
use crate::config::WinectlConfig;
use crate::prelude::*;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use winectl::Distribution;
use winectl::runtime::terminal::is_known_terminal;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Persist the global --runtime, --prefix, --proton and --verbosity
    /// flags given with this command as defaults
    Set(SetArgs),
    /// Print the configuration in use
    Show,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Terminal emulator for console tools
    #[arg(long)]
    pub terminal: Option<String>,

    /// Record the runtime as a plain wine installation, ignored with --proton
    #[arg(long)]
    pub wine: bool,
}

fn apply(args: SetArgs, runtime: &RuntimeArgs, config: &mut WinectlConfig) {
    if let Some(path) = &runtime.runtime {
        config.runtime.path = Some(PathBuf::from(path));
    }
    if runtime.proton {
        config.runtime.distribution = Distribution::Proton;
    } else if args.wine {
        config.runtime.distribution = Distribution::Wine;
    }
    if let Some(prefix) = &runtime.prefix {
        config.prefix = Some(PathBuf::from(prefix));
    }
    if let Some(verbosity) = runtime.verbosity {
        config.verbosity = Some(verbosity);
    }
    if let Some(terminal) = args.terminal {
        if !is_known_terminal(&terminal) {
            warn!("{terminal} is not a supported terminal, console tools will run without one");
        }
        config.terminal = Some(terminal);
    }
}

pub fn run(command: ConfigCommands, runtime: &RuntimeArgs, config_name: Option<&str>) -> Result<()> {
    let mut config = WinectlConfig::load(config_name)?;
    match command {
        ConfigCommands::Set(args) => {
            apply(args, runtime, &mut config);
            config.persist(config_name)?;
            info!("Configuration saved");
        }
        ConfigCommands::Show => print!("{}", serde_yaml::to_string(&config)?),
    }
    Ok(())
}

use crate::prelude::*;
use clap::{Args, Subcommand};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use winectl::{DllOverride, RegEntry, Runtime, WindowsVersion};

#[derive(Debug, Subcommand)]
pub enum RegCommands {
    /// Add or replace a value
    Add {
        key: String,
        value: String,
        data: String,
    },
    /// Delete a value
    Delete { key: String, value: String },
    /// List the values stored directly under a key
    List { key: String },
}

#[derive(Debug, Subcommand)]
pub enum DllCommands {
    /// Choose which implementation of a dll wine loads
    Override {
        name: String,
        #[arg(value_enum)]
        mode: DllOverride,
    },
    /// Drop the override and go back to wine's default
    Restore { name: String },
    /// Show the overrides set in the prefix
    List,
}

#[derive(Debug, Args)]
pub struct WinverArgs {
    #[arg(value_enum)]
    pub version: WindowsVersion,

    /// Only report this version to the given executable, e.g. `game.exe`
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Tabled)]
struct RegRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Data")]
    data: String,
}

fn build_reg_table(entries: &[RegEntry]) -> String {
    let rows = entries.iter().map(|entry| RegRow {
        name: entry.name.clone(),
        kind: entry.kind.clone(),
        data: entry.data.clone(),
    });
    Table::new(rows).with(Style::modern()).to_string()
}

pub fn reg(command: RegCommands, runtime: &Runtime) -> Result<()> {
    match command {
        RegCommands::Add { key, value, data } => runtime.reg_add(&key, &value, &data)?,
        RegCommands::Delete { key, value } => runtime.reg_delete(&key, &value)?,
        RegCommands::List { key } => {
            let entries = runtime.reg_list(&key)?;
            if entries.is_empty() {
                info!("No value under {key}");
            } else {
                println!("{}", build_reg_table(&entries));
            }
        }
    }
    Ok(())
}

pub fn dll(command: DllCommands, runtime: &Runtime) -> Result<()> {
    match command {
        DllCommands::Override { name, mode } => {
            runtime.override_dll(&name, mode)?;
            info!("{name} set to {}", mode.data());
        }
        DllCommands::Restore { name } => runtime.restore_dll(&name)?,
        DllCommands::List => {
            for (name, mode) in runtime.override_dll_list()? {
                println!("{name}\t{}", mode.data());
            }
        }
    }
    Ok(())
}

pub fn winver(args: WinverArgs, runtime: &Runtime) -> Result<()> {
    match args.app {
        Some(app) => runtime.set_app_default(&app, args.version)?,
        None => runtime.set_windows_version(args.version)?,
    }
    Ok(())
}

use crate::prelude::*;
use clap::Args;
use std::process::Child;
use winectl::runtime::terminal::is_known_terminal;
use winectl::{ExecOptions, Runtime, Tool};

#[derive(Debug, Args)]
pub struct ToolArgs {
    #[arg(value_enum)]
    pub tool: Tool,

    /// Terminal emulator used by console tools (cmd, debug).
    /// Defaults to the one persisted in the configuration.
    #[arg(long)]
    pub terminal: Option<String>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Wait for the program to exit and forward its exit code
    #[arg(long)]
    pub wait: bool,

    /// Arguments given to wine. A single argument is split like a shell would.
    #[arg(required = true, last = true)]
    pub args: Vec<String>,
}

fn wait_for(child: Option<Child>, wait: bool) -> Result<()> {
    let Some(mut child) = child else {
        bail!("Failed to launch the process, see the warnings above");
    };
    debug!("Started process {}", child.id());

    if !wait {
        return Ok(());
    }
    let status = child.wait()?;
    if !status.success() {
        bail!("Process exited with {status}");
    }
    Ok(())
}

pub fn tool(args: ToolArgs, runtime: &Runtime, default_terminal: Option<&str>) -> Result<()> {
    let terminal = args.terminal.as_deref().or(default_terminal);
    if let Some(terminal) = terminal.filter(|t| !is_known_terminal(t)) {
        warn!("Unknown terminal {terminal}, {} will run without one", args.tool.program());
    }

    let child = runtime.launch_tool(args.tool, terminal)?;
    wait_for(child, false)
}

fn split_args(args: Vec<String>) -> Result<Vec<String>> {
    match args.as_slice() {
        [line] => shell_words::split(line).context("Failed to split the command line"),
        _ => Ok(args),
    }
}

pub fn run(args: RunArgs, runtime: &Runtime) -> Result<()> {
    let argv = split_args(args.args)?;
    let child = runtime.spawn(&argv, ExecOptions::default())?;
    wait_for(child, args.wait)
}

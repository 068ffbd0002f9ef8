use super::{ExecOptions, Runtime};
use crate::error::WineResult;
use clap::ValueEnum;
use std::path::Path;
use std::process::Child;

/// Programs bundled with wine that can be opened inside a prefix.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Winecfg,
    /// winedbg, the interactive debugger
    Debug,
    Cmd,
    Taskmanager,
    Controlpanel,
    Uninstaller,
    Regedit,
    /// wineconsole
    Console,
}

impl Tool {
    pub fn program(self) -> &'static str {
        match self {
            Tool::Winecfg => "winecfg",
            Tool::Debug => "winedbg",
            Tool::Cmd => "cmd",
            Tool::Taskmanager => "taskmgr",
            Tool::Controlpanel => "control",
            Tool::Uninstaller => "uninstaller",
            Tool::Regedit => "regedit",
            Tool::Console => "wineconsole",
        }
    }

    /// Console tools need a terminal to be usable, the others open their
    /// own window on the active display.
    pub fn is_console(self) -> bool {
        matches!(self, Tool::Debug | Tool::Cmd)
    }
}

impl Runtime {
    /// Open `tool` without waiting for it. `terminal` is only honored for
    /// console tools.
    pub fn launch_tool(&self, tool: Tool, terminal: Option<&str>) -> WineResult<Option<Child>> {
        let terminal = terminal.filter(|_| tool.is_console());
        self.spawn([tool.program()], ExecOptions::default().terminal(terminal))
    }

    pub fn winecfg(&self) -> WineResult<Option<Child>> {
        self.launch_tool(Tool::Winecfg, None)
    }

    pub fn debug(&self, terminal: Option<&str>) -> WineResult<Option<Child>> {
        self.launch_tool(Tool::Debug, terminal)
    }

    pub fn cmd(&self, terminal: Option<&str>) -> WineResult<Option<Child>> {
        self.launch_tool(Tool::Cmd, terminal)
    }

    pub fn taskmanager(&self) -> WineResult<Option<Child>> {
        self.launch_tool(Tool::Taskmanager, None)
    }

    pub fn controlpanel(&self) -> WineResult<Option<Child>> {
        self.launch_tool(Tool::Controlpanel, None)
    }

    pub fn uninstaller(&self) -> WineResult<Option<Child>> {
        self.launch_tool(Tool::Uninstaller, None)
    }

    pub fn regedit(&self) -> WineResult<Option<Child>> {
        self.launch_tool(Tool::Regedit, None)
    }

    pub fn console(&self) -> WineResult<Option<Child>> {
        self.launch_tool(Tool::Console, None)
    }

    /// Install an `.msi` package with `msiexec /i`.
    pub fn install_msi(&self, package: &Path) -> WineResult<Option<Child>> {
        let package = package.to_string_lossy();
        self.spawn(["msiexec", "/i", &*package], ExecOptions::default())
    }
}

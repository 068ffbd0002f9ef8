use super::{ExecOptions, Runtime};
use crate::error::{WineError, WineResult};
use clap::ValueEnum;
use log::info;

/// Display used when a boot operation must not reach the user's session.
const SILENT_DISPLAY: &str = ":0.0";

/// wineserver lifecycle operations handled by `wineboot`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootStatus {
    /// Kill running processes without any cleanup
    Kill,
    /// Restart only, don't do normal startup operations
    Restart,
    /// Shutdown only, don't reboot
    Shutdown,
    /// Update the wineprefix directory
    Update,
}

impl BootStatus {
    pub fn flag(self) -> &'static str {
        match self {
            BootStatus::Kill => "-k",
            BootStatus::Restart => "-r",
            BootStatus::Shutdown => "-s",
            BootStatus::Update => "-u",
        }
    }
}

impl TryFrom<u8> for BootStatus {
    type Error = WineError;

    fn try_from(status: u8) -> Result<Self, Self::Error> {
        match status {
            0 => Ok(BootStatus::Kill),
            1 => Ok(BootStatus::Restart),
            2 => Ok(BootStatus::Shutdown),
            3 => Ok(BootStatus::Update),
            _ => Err(WineError::UnsupportedBootStatus(status)),
        }
    }
}

impl Runtime {
    /// Run `wineboot` with the flag of `status` and wait for it.
    ///
    /// With `silent`, `DISPLAY` is forced to a virtual display so the
    /// operation does not pop up windows in the user's session.
    pub fn boot(&self, status: BootStatus, silent: bool) -> WineResult<()> {
        let mut options = ExecOptions::default();
        if silent {
            options = options.env("DISPLAY", SILENT_DISPLAY);
        }

        info!("Running wineboot {} in {}", status.flag(), self.prefix().display());
        self.capture(["wineboot", status.flag()], options)?;
        Ok(())
    }

    /// Kill all processes running inside the wineprefix.
    pub fn boot_kill(&self) -> WineResult<()> {
        self.boot(BootStatus::Kill, false)
    }

    /// Simulate a system restart, without normal startup operations.
    pub fn boot_restart(&self) -> WineResult<()> {
        self.boot(BootStatus::Restart, false)
    }

    /// Simulate a system shutdown, without rebooting.
    pub fn boot_shutdown(&self) -> WineResult<()> {
        self.boot(BootStatus::Shutdown, false)
    }

    /// Update the wineprefix directory.
    pub fn boot_update(&self) -> WineResult<()> {
        self.boot(BootStatus::Update, false)
    }
}

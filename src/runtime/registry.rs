use super::{ExecOptions, Runtime};
use crate::error::{WineError, WineResult};
use clap::ValueEnum;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use wine_shared::{RegEntry, parse_reg_query};

pub const DLL_OVERRIDES_KEY: &str = r"HKEY_CURRENT_USER\Software\Wine\DllOverrides";
const WINE_KEY: &str = r"HKEY_CURRENT_USER\Software\Wine";
const APP_DEFAULTS_KEY: &str = r"HKEY_CURRENT_USER\Software\Wine\AppDefaults";
/// Name `reg query` prints for the unnamed value of a key.
const DEFAULT_VALUE_NAME: &str = "(Default)";

/// Which implementation of a DLL wine loads.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DllOverride {
    /// Provided by wine
    Builtin,
    /// Provided by Windows
    Native,
    /// Builtin, then native
    BuiltinNative,
    /// Native, then builtin
    NativeBuiltin,
    /// Not loaded at all
    Disabled,
}

impl DllOverride {
    /// Registry data stored for this mode.
    pub fn data(self) -> &'static str {
        match self {
            DllOverride::Builtin => "builtin",
            DllOverride::Native => "native",
            DllOverride::BuiltinNative => "builtin,native",
            DllOverride::NativeBuiltin => "native,builtin",
            DllOverride::Disabled => "",
        }
    }

    pub fn from_data(data: &str) -> Option<Self> {
        let normalized = data.trim().replace(' ', "").to_lowercase();
        match normalized.as_str() {
            "builtin" | "b" => Some(DllOverride::Builtin),
            "native" | "n" => Some(DllOverride::Native),
            "builtin,native" | "b,n" => Some(DllOverride::BuiltinNative),
            "native,builtin" | "n,b" => Some(DllOverride::NativeBuiltin),
            "" => Some(DllOverride::Disabled),
            _ => None,
        }
    }
}

impl TryFrom<u8> for DllOverride {
    type Error = WineError;

    fn try_from(mode: u8) -> Result<Self, Self::Error> {
        match mode {
            0 => Ok(DllOverride::Builtin),
            1 => Ok(DllOverride::Native),
            2 => Ok(DllOverride::BuiltinNative),
            3 => Ok(DllOverride::NativeBuiltin),
            _ => Err(WineError::UnsupportedOverride(mode)),
        }
    }
}

/// Windows versions wine can report to applications.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum WindowsVersion {
    Win11,
    Win10,
    Win81,
    Win8,
    Win7,
    Win2008R2,
    Win2008,
    Vista,
    Win2003,
    WinXP,
    Win2k,
    WinMe,
    Win98,
    Win95,
}

impl WindowsVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            WindowsVersion::Win11 => "win11",
            WindowsVersion::Win10 => "win10",
            WindowsVersion::Win81 => "win81",
            WindowsVersion::Win8 => "win8",
            WindowsVersion::Win7 => "win7",
            WindowsVersion::Win2008R2 => "win2008r2",
            WindowsVersion::Win2008 => "win2008",
            WindowsVersion::Vista => "vista",
            WindowsVersion::Win2003 => "win2003",
            WindowsVersion::WinXP => "winxp",
            WindowsVersion::Win2k => "win2k",
            WindowsVersion::WinMe => "winme",
            WindowsVersion::Win98 => "win98",
            WindowsVersion::Win95 => "win95",
        }
    }
}

impl Runtime {
    /// Add or replace `value` under `key`.
    ///
    /// Arguments are passed to `reg` as separate argv entries, no shell is
    /// involved, but `reg` itself interprets them: never forward untrusted
    /// input here.
    pub fn reg_add(&self, key: &str, value: &str, data: &str) -> WineResult<()> {
        debug!("Setting {key}\\{value} to {data:?}");
        self.capture(
            ["reg", "add", key, "/v", value, "/d", data, "/f"],
            ExecOptions::default(),
        )?;
        Ok(())
    }

    pub fn reg_delete(&self, key: &str, value: &str) -> WineResult<()> {
        debug!("Deleting {key}\\{value}");
        self.capture(
            ["reg", "delete", key, "/v", value, "/f"],
            ExecOptions::default(),
        )?;
        Ok(())
    }

    /// Values stored under `key`. A failed launch or a missing key gives an
    /// empty list.
    pub fn reg_list(&self, key: &str) -> WineResult<Vec<RegEntry>> {
        let output = self
            .capture(["reg", "query", key], ExecOptions::default())?
            .unwrap_or_default();
        Ok(parse_reg_query(&output))
    }

    pub fn override_dll(&self, name: &str, mode: DllOverride) -> WineResult<()> {
        self.reg_add(DLL_OVERRIDES_KEY, name, mode.data())
    }

    /// Drop the override of `name`, going back to wine's default.
    pub fn restore_dll(&self, name: &str) -> WineResult<()> {
        self.reg_delete(DLL_OVERRIDES_KEY, name)
    }

    pub fn override_dll_list(&self) -> WineResult<Vec<(String, DllOverride)>> {
        Ok(self
            .reg_list(DLL_OVERRIDES_KEY)?
            .into_iter()
            .filter(|entry| entry.name != DEFAULT_VALUE_NAME)
            .filter_map(|entry| match DllOverride::from_data(&entry.data) {
                Some(mode) => Some((entry.name, mode)),
                None => {
                    trace!("Ignoring unknown override {:?} for {}", entry.data, entry.name);
                    None
                }
            })
            .collect())
    }

    /// Windows version reported to every application in the prefix.
    pub fn set_windows_version(&self, version: WindowsVersion) -> WineResult<()> {
        self.reg_add(WINE_KEY, "Version", version.as_str())
    }

    /// Windows version reported to `executable` only, e.g. `game.exe`.
    pub fn set_app_default(&self, executable: &str, version: WindowsVersion) -> WineResult<()> {
        let key = format!("{APP_DEFAULTS_KEY}\\{executable}");
        self.reg_add(&key, "Version", version.as_str())
    }
}

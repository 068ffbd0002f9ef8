use super::{ExecOptions, Runtime};
use crate::error::{WineError, WineResult};
use lazy_static::lazy_static;
use log::{debug, info};
use std::collections::HashSet;
use std::ops::Deref;
use wine_shared::{ProcessRecord, parse_process_table};

lazy_static! {
    /// wine system processes that keep the prefix alive; killing one of them
    /// leaves the wineserver in a broken state.
    pub static ref PROTECTED_PROCESSES: HashSet<&'static str> = HashSet::from([
        "explorer.exe",
        "services.exe",
        "rpcss.exe",
        "svchost.exe",
        "winedevice.exe",
        "plugplay.exe",
        "winedbg.exe",
        "conhost.exe",
    ]);
}

/// Exact, case-sensitive lookup in [`PROTECTED_PROCESSES`].
pub fn is_protected(name: &str) -> bool {
    PROTECTED_PROCESSES.contains(name)
}

/// A process of the prefix, borrowed from the [`Runtime`] that listed it.
#[derive(Debug, Clone)]
pub struct WineProcess<'a> {
    record: ProcessRecord,
    runtime: &'a Runtime,
}

impl Deref for WineProcess<'_> {
    type Target = ProcessRecord;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

impl WineProcess<'_> {
    pub fn record(&self) -> &ProcessRecord {
        &self.record
    }

    pub fn is_protected(&self) -> bool {
        is_protected(&self.record.name)
    }

    /// Kill the process through a scripted winedbg session.
    ///
    /// Protected processes are refused before anything is launched. The
    /// outcome of the debugger session itself is not checked.
    pub fn terminate(&self) -> WineResult<()> {
        self.runtime.kill_process(&self.record)
    }
}

impl Runtime {
    /// Snapshot of the processes running in the prefix, in the order winedbg
    /// printed them. Each call queries winedbg again.
    pub fn process_records(&self) -> WineResult<Vec<ProcessRecord>> {
        let output = self
            .capture(["winedbg", "--command", "info proc"], ExecOptions::default())?
            .unwrap_or_default();
        let records = parse_process_table(&output);
        debug!("Found {} processes in {}", records.len(), self.prefix().display());
        Ok(records)
    }

    pub fn processes(&self) -> WineResult<Vec<WineProcess<'_>>> {
        Ok(self
            .process_records()?
            .into_iter()
            .map(|record| WineProcess {
                record,
                runtime: self,
            })
            .collect())
    }

    pub fn kill_process(&self, record: &ProcessRecord) -> WineResult<()> {
        if is_protected(&record.name) {
            return Err(WineError::ProtectedProcess(record.name.clone()));
        }

        info!("Killing {} ({})", record.name, record.pid);
        let script = format!("attach {}\nkill\nquit\n", record.pid.to_prefixed_hex());
        let output = self.capture(["winedbg"], ExecOptions::default().stdin(script))?;
        if let Some(output) = output {
            debug!("winedbg: {}", output.trim_end());
        }
        Ok(())
    }
}

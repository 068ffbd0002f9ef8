use crate::prelude::*;
use clap::Args;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};
use winectl::runtime::is_protected;
use winectl::{Pid, ProcessRecord, Runtime, WineError};

#[derive(Debug, Args)]
pub struct PsArgs {
    /// Print the process list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct KillArgs {
    /// Hexadecimal process id (as shown by `winectl ps`) or executable name.
    /// A name kills every process with that name.
    pub target: String,
}

#[derive(Tabled)]
struct ProcessRow {
    #[tabled(rename = "PID")]
    pid: String,
    #[tabled(rename = "Threads")]
    threads: u32,
    #[tabled(rename = "Executable")]
    name: String,
    #[tabled(rename = "Protected")]
    protected: &'static str,
}

fn build_process_table(records: &[ProcessRecord]) -> String {
    let rows: Vec<ProcessRow> = records
        .iter()
        .map(|record| ProcessRow {
            pid: record.pid.to_string(),
            threads: record.threads,
            name: if record.is_child() {
                format!("└─ {}", record.name)
            } else {
                record.name.clone()
            },
            protected: if is_protected(&record.name) { "yes" } else { "" },
        })
        .collect();

    Table::new(&rows)
        .with(Style::modern())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string()
}

pub fn ps(args: PsArgs, runtime: &Runtime) -> Result<()> {
    let records = runtime.process_records()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        info!("No process running in {}", runtime.prefix().display());
    } else {
        println!("{}", build_process_table(&records));
    }

    Ok(())
}

fn matches_target(record: &ProcessRecord, target: &str, pid: Option<Pid>) -> bool {
    match pid {
        Some(pid) if record.pid == pid => true,
        _ => record.name == target,
    }
}

pub fn kill(args: KillArgs, runtime: &Runtime) -> Result<()> {
    let pid = args.target.parse::<Pid>().ok();
    let processes = runtime.processes()?;
    let targets = processes
        .iter()
        .filter(|process| matches_target(process, &args.target, pid))
        .collect::<Vec<_>>();

    if targets.is_empty() {
        bail!("No process matching {}", args.target);
    }

    let mut refused = Vec::new();
    for process in targets {
        match process.terminate() {
            Ok(()) => info!("Killed {} ({})", process.name, process.pid),
            Err(WineError::ProtectedProcess(name)) => {
                error!("{name}: this process is protected and cannot be terminated");
                refused.push(name);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !refused.is_empty() {
        bail!("Refused to kill protected processes: {}", refused.join(", "));
    }
    Ok(())
}

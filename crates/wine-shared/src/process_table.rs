//! Parser for the output of winedbg's `info proc` command.
//!
//! The output is an informal table, for example:
//!
//! ```text
//!  pid      threads  executable (all id:s are in hex)
//!  0000000e 2        'explorer.exe'
//!  00000020 4        'services.exe'
//!  \_ 00000038 5        'plugplay.exe'
//! =00000040 1        'winedbg.exe'
//! ```
//!
//! Column widths change between wine releases, the first column may carry a
//! marker for the current process and nested processes are flagged with a
//! `\_` token. Lines that do not look like a process row are skipped.

use crate::pid::Pid;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

const CHILD_MARKER: &str = "\\_";
const ROW_MARKERS: &[char] = &['=', '>'];
const QUOTES: &[char] = &['\'', '"'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub threads: u32,
    /// Executable name as reported by winedbg, case preserved.
    pub name: String,
    /// Id of the closest preceding top-level process, `None` for top-level
    /// rows and for nested rows seen before any top-level one.
    pub parent: Option<Pid>,
}

impl ProcessRecord {
    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }
}

#[derive(Debug, PartialEq)]
struct Row {
    pid: Pid,
    threads: u32,
    name: String,
    is_child: bool,
}

fn is_decimal(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

impl Row {
    fn parse(line: &str) -> Option<Row> {
        lazy_static! {
            static ref WHITESPACE_RUN: Regex = Regex::new(r"\s{2,}|\t").unwrap();
        }

        let collapsed = WHITESPACE_RUN.replace_all(line, " ");
        let cleaned = collapsed
            .trim()
            .trim_start_matches(ROW_MARKERS)
            .replace(QUOTES, "");

        let mut is_child = false;
        let mut fields = cleaned
            .split(' ')
            .filter(|field| {
                if *field == CHILD_MARKER {
                    is_child = true;
                    return false;
                }
                !field.is_empty()
            })
            .collect_vec();

        // Some builds print a leading row index ahead of the id column. Ids
        // are always zero-padded to 8 digits, an index never is.
        if fields.len() >= 4
            && fields[0].len() < 8
            && is_decimal(fields[0])
            && fields[1].parse::<Pid>().is_ok()
            && is_decimal(fields[2])
        {
            fields.remove(0);
        }

        if fields.len() < 3 || !is_decimal(fields[1]) {
            return None;
        }

        let pid = fields[0].parse::<Pid>().ok()?;
        let threads = fields[1].parse::<u32>().ok()?;
        let name = fields[2..].join(" ");

        Some(Row {
            pid,
            threads,
            name,
            is_child,
        })
    }
}

/// Turn the captured output of `winedbg --command "info proc"` into a flat
/// list of processes, in the order they were printed.
///
/// The first line is the column header and is always discarded. Nested rows
/// are attached to the last top-level row seen before them.
pub fn parse_process_table(output: &str) -> Vec<ProcessRecord> {
    let mut records = Vec::new();
    let mut current_parent: Option<Pid> = None;

    for line in output.lines().skip(1) {
        let Some(row) = Row::parse(line) else {
            if !line.trim().is_empty() {
                log::trace!("Skipping process table line: {line:?}");
            }
            continue;
        };

        let parent = if row.is_child {
            if current_parent.is_none() {
                log::trace!("Nested process {} has no parent row", row.pid);
            }
            current_parent
        } else {
            current_parent = Some(row.pid);
            None
        };

        records.push(ProcessRecord {
            pid: row.pid,
            threads: row.threads,
            name: row.name,
            parent,
        });
    }

    records
}

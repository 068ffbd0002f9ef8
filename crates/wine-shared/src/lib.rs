//! Subprocess-free pieces shared by winectl: process ids and the parsers for
//! the text printed by wine's bundled tools.

mod pid;
mod process_table;
mod reg_query;

pub use pid::Pid;
pub use process_table::{ProcessRecord, parse_process_table};
pub use reg_query::{RegEntry, parse_reg_query};

//! Control a wineprefix from Rust: run programs inside it, list and kill its
//! processes, edit its registry and drive the wineserver lifecycle.

mod prelude;

pub mod error;
pub mod executor;
pub mod runtime;

pub use error::{WineError, WineResult};
pub use executor::{ExecutionRequest, Runner, SystemRunner};
pub use runtime::{
    BootStatus, Distribution, DllOverride, ExecOptions, Runtime, Tool, Verbosity, WindowsVersion,
    WineProcess,
};
pub use wine_shared::{Pid, ProcessRecord, RegEntry};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

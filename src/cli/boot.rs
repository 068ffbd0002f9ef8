use crate::prelude::*;
use clap::Args;
use winectl::{BootStatus, Runtime};

#[derive(Debug, Args)]
pub struct BootArgs {
    /// What wineboot should do with the prefix
    #[arg(value_enum)]
    pub status: BootStatus,

    /// Keep wineboot away from the user's display
    #[arg(long)]
    pub silent: bool,
}

pub fn run(args: BootArgs, runtime: &Runtime) -> Result<()> {
    runtime.boot(args.status, args.silent)?;
    info!(
        "wineboot {} done for {}",
        args.status.flag(),
        runtime.prefix().display()
    );
    Ok(())
}

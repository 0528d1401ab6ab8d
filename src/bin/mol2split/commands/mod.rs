mod split;

use split::run_split;

use anyhow::Result;

use crate::cli::Cli;
use crate::display::Context;

pub fn dispatch(cli: Cli, ctx: Context) -> Result<()> {
    run_split(cli, ctx)
}

use anyhow::{Context, Result};

use mol2split::{Error as SplitError, segment};

use crate::cli::Cli;
use crate::config::build_split_config;
use crate::display::{Context as DisplayContext, Progress, print_summary};
use crate::io::{InputSource, check_input, prepare_output_dir};

pub fn run_split(cli: Cli, ctx: DisplayContext) -> Result<()> {
    let input_len = check_input(&cli.input)?;
    prepare_output_dir(&cli.output_dir)?;

    let config = build_split_config(&cli);
    tracing::debug!(
        input = %cli.input.display(),
        format = %config.format(),
        layout = ?config.layout(),
        "starting split"
    );

    let description = format!("Splitting {} archive", config.format());
    let progress = Progress::new(ctx.interactive, input_len, &description);

    let input = match InputSource::open(&cli.input, progress.bar()) {
        Ok(input) => input,
        Err(source) => {
            progress.abandon();
            return Err(SplitError::InputOpen {
                path: cli.input.clone(),
                source,
            }
            .into());
        }
    };

    let mut sink = config.sink(&cli.output_dir);
    let report = match segment(input, &config, &mut sink) {
        Ok(report) => report,
        Err(e) => {
            progress.abandon();
            return Err(e).with_context(|| format!("Failed to split '{}'", cli.input.display()));
        }
    };

    progress.finish(&description);

    if ctx.interactive {
        print_summary(&config, &report, &cli.output_dir);
    }

    Ok(())
}

use mol2split::{Format, SplitConfig};

use crate::cli::{Cli, FormatArg};

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Mol2 => Format::Mol2,
            FormatArg::Sdf => Format::Sdf,
            FormatArg::Mae => Format::Maestro,
        }
    }
}

pub fn build_split_config(cli: &Cli) -> SplitConfig {
    let format = cli
        .format
        .map(Format::from)
        .unwrap_or_else(|| Format::from_path(&cli.input));
    SplitConfig::new(format, cli.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> SplitConfig {
        build_split_config(&Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn infers_format_from_input() {
        assert_eq!(config(&["mol2split", "a.sdf", "5"]).format(), Format::Sdf);
        assert_eq!(config(&["mol2split", "a.mae", "5"]).format(), Format::Maestro);
        assert_eq!(config(&["mol2split", "a.dat", "5"]).format(), Format::Mol2);
    }

    #[test]
    fn explicit_format_wins() {
        let cfg = config(&["mol2split", "a.sdf", "5", "--format", "mae"]);
        assert_eq!(cfg.format(), Format::Maestro);
    }

    #[test]
    fn record_count_is_coerced() {
        assert_eq!(config(&["mol2split", "a.sdf", "0"]).records_per_partition(), 1);
    }
}

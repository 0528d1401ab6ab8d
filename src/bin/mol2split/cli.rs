use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "mol2split",
    about = "Split MOL2, SDF, and Maestro archives into smaller files",
    long_about = "Split MOL2, SDF, and Maestro archives into smaller files.\n\n\
        Records are written to part1.<ext>, part2.<ext>, ... in groups of RECORDS. \
        With RECORDS = 1 a MOL2 archive is written one file per record, \
        named after the line following each MOLECULE marker.",
    version
)]
pub struct Cli {
    /// Archive to split (format inferred from .mol2, .sdf, or .mae)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Records per output file (values below 1 are treated as 1)
    #[arg(value_name = "RECORDS", allow_negative_numbers = true)]
    pub records: i64,

    /// Directory for output files, created if missing
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Archive format (inferred from the input extension if not specified)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Suppress progress and summary output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every opened and closed output file
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Tripos MOL2
    Mol2,
    /// MDL SD file
    #[value(alias = "sd")]
    Sdf,
    /// Schrödinger Maestro
    #[value(alias = "maestro")]
    Mae,
}

pub fn parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn accepts_negative_record_counts() {
        let cli = Cli::try_parse_from(["mol2split", "in.mol2", "-3"]).unwrap();
        assert_eq!(cli.records, -3);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn parses_output_dir_and_format() {
        let cli =
            Cli::try_parse_from(["mol2split", "in.txt", "10", "out", "--format", "sdf"]).unwrap();
        assert_eq!(cli.records, 10);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert!(matches!(cli.format, Some(FormatArg::Sdf)));
    }

    #[test]
    fn requires_record_count() {
        assert!(Cli::try_parse_from(["mol2split", "in.mol2"]).is_err());
    }
}

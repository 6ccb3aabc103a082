use std::path::PathBuf;

use clap::{Parser, Subcommand};
use magbin_analysis::bins::BinSpec;

use self::{
    aggregate::AggregateArg, compare::CompareArg, distributions::DistributionsArg,
    generate::GenerateArg,
};

mod aggregate;
mod compare;
mod distributions;
mod generate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Write per-bin mean sizes as a summary table
    Aggregate(#[clap(flatten)] AggregateArg),
    /// Compare measured sizes with the input size
    Compare(#[clap(flatten)] CompareArg),
    /// Show size histograms inside each bin
    Distributions(#[clap(flatten)] DistributionsArg),
    /// Generate a simulated measurement table
    Generate(#[clap(flatten)] GenerateArg),
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Input table and binning options shared by the analysis commands
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BinningArg {
    /// Path to the whitespace-separated measurement table
    pub table: PathBuf,

    /// Field used to assign records to bins
    #[arg(long, default_value = "magIn")]
    pub select: String,

    /// Distance between neighbouring bin centers
    #[arg(long, default_value_t = 1.0)]
    pub bin_step: f64,

    /// Half-width of each bin window; a record belongs to (center - w, center + w]
    #[arg(long, default_value_t = 0.5)]
    pub half_width: f64,
}

impl BinningArg {
    pub fn spec(&self) -> BinSpec {
        BinSpec::new(self.bin_step, self.half_width)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Aggregate(arg) => aggregate::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Distributions(arg) => distributions::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_binning_defaults() {
        let args = CommandArgs::try_parse_from(["magbin", "aggregate", "data.txt"]).unwrap();
        let Mode::Aggregate(arg) = args.mode else {
            panic!("expected aggregate mode");
        };
        assert_eq!(arg.binning.select, "magIn");
        assert_eq!(arg.binning.spec(), BinSpec::default());
        assert_eq!(arg.fields, ["r50in", "r50meas", "r50SE"]);
        assert_eq!(arg.format, OutputFormat::Text);
    }

    #[test]
    fn test_binning_overrides() {
        let args = CommandArgs::try_parse_from([
            "magbin",
            "compare",
            "data.txt",
            "--select",
            "magMeas",
            "--bin-step",
            "0.5",
            "--half-width",
            "0.5",
        ])
        .unwrap();
        let Mode::Compare(arg) = args.mode else {
            panic!("expected compare mode");
        };
        assert_eq!(arg.binning.select, "magMeas");
        assert_eq!(arg.binning.spec(), BinSpec::new(0.5, 0.5));
    }

    #[test]
    fn test_hist_bins_bounds() {
        let parse = |bins: &str| {
            CommandArgs::try_parse_from(["magbin", "distributions", "data.txt", "--hist-bins", bins])
        };
        assert!(parse("0").is_err());
        assert!(parse("1000000000").is_err());

        let Mode::Distributions(arg) = parse("25").unwrap().mode else {
            panic!("expected distributions mode");
        };
        assert_eq!(arg.hist_bins, 25);

        let args = CommandArgs::try_parse_from(["magbin", "distributions", "data.txt"]).unwrap();
        let Mode::Distributions(arg) = args.mode else {
            panic!("expected distributions mode");
        };
        assert_eq!(arg.hist_bins, 10);
    }
}

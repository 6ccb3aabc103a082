use anyhow::Context;
use magbin_analysis::distribution::{self, DEFAULT_HISTOGRAM_BINS, FieldDistribution};
use magbin_stats::histogram::Histogram;

use crate::{command::BinningArg, util};

const MAX_BAR_WIDTH: u64 = 50;
const MAX_HISTOGRAM_BINS: u64 = 1000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DistributionsArg {
    #[clap(flatten)]
    pub binning: BinningArg,

    /// Size fields to histogram in each bin (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["r50in", "r50meas", "r50SE"])]
    pub fields: Vec<String>,

    /// Number of histogram bins per field (1-1000)
    #[arg(
        long,
        default_value_t = DEFAULT_HISTOGRAM_BINS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_HISTOGRAM_BINS),
    )]
    pub hist_bins: usize,
}

pub(crate) fn run(arg: &DistributionsArg) -> anyhow::Result<()> {
    let DistributionsArg {
        binning,
        fields,
        hist_bins,
    } = arg;

    let table = util::read_table_file(&binning.table)?;
    let bins = distribution::distributions(
        &table,
        &binning.select,
        fields.as_slice(),
        binning.spec(),
        *hist_bins,
    )
    .context("Failed to compute distributions")?;
    log::info!("Computed distributions for {} bins", bins.len());

    for bin in &bins {
        println!(
            "{} bin {} ({} records)",
            binning.select, bin.center, bin.members
        );
        println!("==========================================");
        for field in &bin.fields {
            print_field(field);
        }
        println!();
    }

    Ok(())
}

fn print_field(field: &FieldDistribution) {
    println!("  {} (valid: {})", field.field, field.valid);
    if field.histogram.bins.is_empty() {
        println!("    no valid measurements");
        return;
    }
    print_histogram(&field.histogram);
}

fn print_histogram(histogram: &Histogram) {
    let max_count = histogram.max_count().max(1);
    for bin in &histogram.bins {
        let label = format!("{:.2}..{:.2}", bin.range.start, bin.range.end);
        let count = bin.count;
        let bar_width = usize::try_from((count * MAX_BAR_WIDTH) / max_count).unwrap_or(0);
        println!("    {label:>15} | {count:<5} {}", "#".repeat(bar_width));
    }
}

use std::path::PathBuf;

use anyhow::Context;
use magbin_analysis::{aggregate, export};

use crate::{
    command::{BinningArg, OutputFormat},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AggregateArg {
    #[clap(flatten)]
    pub binning: BinningArg,

    /// Fields to average in each bin (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["r50in", "r50meas", "r50SE"])]
    pub fields: Vec<String>,

    /// Output format: text summary table or JSON
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AggregateArg) -> anyhow::Result<()> {
    let AggregateArg {
        binning,
        fields,
        format,
        output,
    } = arg;

    let table = util::read_table_file(&binning.table)?;
    let result = aggregate::aggregate(&table, &binning.select, fields.as_slice(), binning.spec())
        .context("Failed to aggregate table")?;
    log::info!(
        "Computed means of [{}] in {} bins of {} (step {}, half-width {})",
        result.fields.join(", "),
        result.bins.len(),
        result.selection,
        result.spec.step,
        result.spec.half_width,
    );

    let mut output = Output::from_output_path(output.clone())?;
    match format {
        OutputFormat::Text => {
            export::write_summary(&mut output, &result)
                .with_context(|| format!("Failed to write summary to {}", output.display_path()))?;
            output.finish()?;
        }
        OutputFormat::Json => output.write_json(&result)?,
    }
    log::info!("Summary written to {}", output.display_path());

    Ok(())
}

//! Measurement technique comparison report
//!
//! Writes, for every measured size field, how often the measurement failed
//! and how the residual against the input size behaves overall and as a
//! function of the selection field.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use magbin_analysis::compare::{self, TechniqueComparison};

use crate::{
    command::{BinningArg, OutputFormat},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    pub binning: BinningArg,

    /// Input size the measurements are compared against
    #[arg(long, default_value = "r50in")]
    pub reference: String,

    /// Measured size fields to compare (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["r50meas", "r50SE"])]
    pub measured: Vec<String>,

    /// Output format: text report or JSON
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let CompareArg {
        binning,
        reference,
        measured,
        format,
        output,
    } = arg;

    let table = crate::util::read_table_file(&binning.table)?;
    let report = compare::compare(
        &table,
        &binning.select,
        reference,
        measured.as_slice(),
        binning.spec(),
    )
    .context("Failed to compare measurements")?;

    let mut output = Output::from_output_path(output.clone())?;
    match format {
        OutputFormat::Text => {
            write_report(&mut output, binning, reference, &report)
                .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
            output.finish()?;
        }
        OutputFormat::Json => output.write_json(&report)?,
    }
    log::info!("Comparison written to {}", output.display_path());

    Ok(())
}

fn write_report<W>(
    writer: &mut W,
    binning: &BinningArg,
    reference: &str,
    report: &[TechniqueComparison],
) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        writer,
        "Size Comparison against {reference} (binned by {}, step {}, half-width {})",
        binning.select, binning.bin_step, binning.half_width
    )?;
    writeln!(writer, "==========================================")?;
    writeln!(writer)?;
    for comparison in report {
        write_comparison(writer, &binning.select, comparison)?;
        writeln!(writer)?;
    }
    Ok(())
}

fn write_comparison<W>(
    writer: &mut W,
    selection: &str,
    comparison: &TechniqueComparison,
) -> io::Result<()>
where
    W: Write,
{
    let TechniqueComparison {
        reference,
        measured,
        total,
        valid,
        failed,
        residual,
        by_bin,
    } = comparison;

    writeln!(writer, "{measured}")?;
    writeln!(
        writer,
        "  Records: {total}  Valid: {valid}  Failed: {failed} ({:.1}%)",
        comparison.failure_rate() * 100.0
    )?;

    let Some(residual) = residual else {
        return writeln!(writer, "  No valid measurements");
    };
    let stats = &residual.stats;
    writeln!(writer, "  Residual ({reference} - {measured}):")?;
    writeln!(
        writer,
        "    Mean: {:.4}  Median: {:.4}  StdDev: {:.4}  Min: {:.4}  Max: {:.4}",
        stats.mean, stats.median, stats.std_dev, stats.min, stats.max
    )?;
    let percentiles = residual
        .percentiles
        .iter()
        .map(|(p, v)| format!("P{p}: {v:.4}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "    {percentiles}")?;

    writeln!(writer)?;
    writeln!(
        writer,
        "  {:>10} {:>8} {:>8} {:>14}",
        selection, "Members", "Valid", "Mean residual"
    )?;
    writeln!(writer, "  {}", "-".repeat(43))?;
    for bin in by_bin {
        let mean = bin
            .mean_residual
            .value()
            .map_or_else(|| "N/A".to_owned(), |m| format!("{m:.4}"));
        writeln!(
            writer,
            "  {:>10} {:>8} {:>8} {:>14}",
            bin.center, bin.members, bin.valid, mean
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use magbin_analysis::table::RecordTable;

    use super::*;

    const TABLE: &str = "\
#magIn r50in r50meas r50SE
20.0 2.0 1.5 -1
20.3 3.0 3.5 -1
21.2 5.0 4.0 -1
";

    fn binning(table: &Path) -> BinningArg {
        BinningArg {
            table: table.to_path_buf(),
            select: "magIn".to_owned(),
            bin_step: 1.0,
            half_width: 0.5,
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("magbin-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_text_report_layout() {
        let table = RecordTable::parse_str(TABLE).unwrap();
        let arg = binning(Path::new("unused.txt"));
        let report = compare::compare(
            &table,
            "magIn",
            "r50in",
            &["r50meas", "r50SE"],
            arg.spec(),
        )
        .unwrap();

        let mut buf = Vec::new();
        write_report(&mut buf, &arg, "r50in", &report).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Size Comparison against r50in (binned by magIn"));
        assert!(text.contains("r50meas\n  Records: 3  Valid: 3  Failed: 0 (0.0%)"));
        assert!(text.contains(
            "r50SE\n  Records: 3  Valid: 0  Failed: 3 (100.0%)\n  No valid measurements"
        ));
        assert!(text.contains("Mean residual"));
    }

    #[test]
    fn test_text_report_goes_to_output_file() {
        let dir = scratch_dir("compare-text");
        let table_path = dir.join("table.txt");
        let report_path = dir.join("report.txt");
        fs::write(&table_path, TABLE).unwrap();

        let arg = CompareArg {
            binning: binning(&table_path),
            reference: "r50in".to_owned(),
            measured: vec!["r50meas".to_owned()],
            format: OutputFormat::Text,
            output: Some(report_path.clone()),
        };
        run(&arg).unwrap();

        let text = fs::read_to_string(&report_path).unwrap();
        assert!(text.starts_with("Size Comparison against r50in"));
        assert!(text.contains("Records: 3  Valid: 3  Failed: 0"));

        fs::remove_dir_all(&dir).unwrap();
    }
}

//! Simulated measurement table generator
//!
//! Produces profiles with a uniform input magnitude and half-light radius,
//! then re-measures each one with two techniques whose scatter grows towards
//! faint magnitudes. Faint profiles are also more likely to fail, which is
//! recorded with the `-1` sentinel.

use std::path::PathBuf;

use anyhow::Context;
use magbin_analysis::{aggregate::MISSING_SENTINEL, table::RecordTable};
use rand::{Rng, SeedableRng as _};
use rand_distr::StandardNormal;
use rand_pcg::Pcg32;

use crate::util::Output;

const MAG_RANGE: (f64, f64) = (18.0, 26.0);
const SIZE_RANGE: (f64, f64) = (0.5, 6.0);
const DECIMALS: usize = 3;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of simulated profiles
    #[arg(long, default_value_t = 1000)]
    pub num_records: usize,

    /// Random seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        num_records,
        seed,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Generating {num_records} profiles (seed {seed})...");
    let mut rng = Pcg32::seed_from_u64(seed);
    let table = simulate(&mut rng, *num_records).context("Failed to build simulated table")?;

    let mut output = Output::from_output_path(output.clone())?;
    table
        .write(&mut output, DECIMALS)
        .with_context(|| format!("Failed to write table to {}", output.display_path()))?;
    output.finish()?;
    log::info!(
        "Wrote {} profiles to {}",
        table.len(),
        output.display_path()
    );

    Ok(())
}

/// One simulated profile and its two re-measurements.
#[derive(Debug, Clone, Copy)]
struct Profile {
    mag_in: f64,
    r50_in: f64,
    mag_meas: f64,
    r50_meas: f64,
    r50_se: f64,
}

impl Profile {
    fn simulate<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        let mag_in = rng.random_range(MAG_RANGE.0..MAG_RANGE.1);
        let r50_in = rng.random_range(SIZE_RANGE.0..SIZE_RANGE.1);
        // 0 at the bright end, 1 at the faint end
        let faintness = (mag_in - MAG_RANGE.0) / (MAG_RANGE.1 - MAG_RANGE.0);
        let sigma = 0.02 * 10f64.powf(0.2 * (mag_in - MAG_RANGE.0));

        let mut gauss = || rng.sample::<f64, _>(StandardNormal);
        let mag_noise = gauss();
        let cog_noise = gauss();
        let se_noise = gauss();

        // Curve-of-growth: unbiased, wider scatter, rarely fails
        let cog_failed = rng.random_bool((0.02 + 0.3 * faintness.powi(3)).clamp(0.0, 1.0));
        let (mag_meas, r50_meas) = if cog_failed {
            (MISSING_SENTINEL, MISSING_SENTINEL)
        } else {
            let r50 = r50_in * (1.0 + 1.5 * sigma * cog_noise);
            (mag_in + sigma * mag_noise, positive_or_sentinel(r50))
        };

        // SExtractor: tighter scatter, underestimates faint sizes, fails more often
        let se_failed = rng.random_bool((0.05 + 0.4 * faintness.powi(2)).clamp(0.0, 1.0));
        let r50_se = if se_failed {
            MISSING_SENTINEL
        } else {
            positive_or_sentinel(r50_in * (1.0 - 0.1 * faintness + sigma * se_noise))
        };

        Self {
            mag_in,
            r50_in,
            mag_meas,
            r50_meas,
            r50_se,
        }
    }
}

fn positive_or_sentinel(value: f64) -> f64 {
    if value > 0.0 { value } else { MISSING_SENTINEL }
}

fn simulate<R>(rng: &mut R, num_records: usize) -> anyhow::Result<RecordTable>
where
    R: Rng,
{
    let profiles = (0..num_records)
        .map(|_| Profile::simulate(rng))
        .collect::<Vec<_>>();
    let column = |f: fn(&Profile) -> f64| profiles.iter().map(f).collect::<Vec<_>>();

    let table = RecordTable::from_columns([
        ("magIn", column(|p| p.mag_in)),
        ("r50in", column(|p| p.r50_in)),
        ("magMeas", column(|p| p.mag_meas)),
        ("r50meas", column(|p| p.r50_meas)),
        ("r50SE", column(|p| p.r50_se)),
    ])?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_table() {
        let a = simulate(&mut Pcg32::seed_from_u64(7), 200).unwrap();
        let b = simulate(&mut Pcg32::seed_from_u64(7), 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_columns_and_ranges() {
        let table = simulate(&mut Pcg32::seed_from_u64(42), 500).unwrap();
        assert_eq!(
            table.field_names(),
            &["magIn", "r50in", "magMeas", "r50meas", "r50SE"]
        );
        assert_eq!(table.len(), 500);

        let mags = table.column("magIn").unwrap();
        assert!(mags.iter().all(|m| (MAG_RANGE.0..MAG_RANGE.1).contains(m)));
        let sizes = table.column("r50in").unwrap();
        assert!(sizes.iter().all(|&s| s > 0.0));

        for field in ["r50meas", "r50SE"] {
            let values = table.column(field).unwrap();
            assert!(
                values
                    .iter()
                    .all(|&v| v > 0.0 || v == MISSING_SENTINEL)
            );
        }
    }

    #[test]
    fn test_faint_profiles_fail_more_often() {
        let table = simulate(&mut Pcg32::seed_from_u64(3), 4000).unwrap();
        let mags = table.column("magIn").unwrap();
        let se = table.column("r50SE").unwrap();
        let failure_rate = |faint: bool| {
            let (failed, total) = mags
                .iter()
                .zip(se)
                .filter(|&(&m, _)| (m >= 22.0) == faint)
                .fold((0_u32, 0_u32), |(failed, total), (_, &v)| {
                    (failed + u32::from(v < 0.0), total + 1)
                });
            f64::from(failed) / f64::from(total)
        };
        assert!(failure_rate(true) > failure_rate(false));
    }
}

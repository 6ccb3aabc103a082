//! Plain-text summary of a [`BinnedAggregate`]
//!
//! ```text
//! #magIn r50in r50meas r50SE
//! 21 2.4 2.31 -1
//! 22 2.9 2.62 2.7
//! ```
//!
//! The header names the selection field followed by every target field.
//! Each following line holds a bin center and one mean per field, with
//! `-1` where the bin has no valid measurement. Rows keep the aggregate's
//! ascending center order.

use std::io::{self, Write};

use crate::aggregate::BinnedAggregate;

/// Writes the summary table to `writer`. I/O errors are returned unchanged.
pub fn write_summary<W>(writer: &mut W, aggregate: &BinnedAggregate) -> io::Result<()>
where
    W: Write,
{
    write!(writer, "#{}", aggregate.selection)?;
    for field in &aggregate.fields {
        write!(writer, " {field}")?;
    }
    writeln!(writer)?;

    for bin in &aggregate.bins {
        write!(writer, "{}", bin.center)?;
        for mean in &bin.means {
            write!(writer, " {}", mean.mean.or_sentinel())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Renders the summary table into a `String`.
#[must_use]
pub fn summary_to_string(aggregate: &BinnedAggregate) -> String {
    let mut buf = Vec::new();
    write_summary(&mut buf, aggregate).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate::aggregate, bins::BinSpec, table::RecordTable};

    fn sample() -> BinnedAggregate {
        let table = RecordTable::parse_str(
            "#mag sizeA sizeB\n10 2 -1\n10.4 4 6\n11 -1 3\n",
        )
        .unwrap();
        aggregate(&table, "mag", &["sizeA", "sizeB"], BinSpec::default()).unwrap()
    }

    #[test]
    fn test_summary_layout() {
        let text = summary_to_string(&sample());
        assert_eq!(text, "#mag sizeA sizeB\n10 3 6\n11 -1 3\n");
    }

    #[test]
    fn test_fractional_values() {
        let table = RecordTable::parse_str("#mag size\n20.2 1.5\n20.4 2\n").unwrap();
        let result = aggregate(&table, "mag", &["size"], BinSpec::new(0.5, 0.25)).unwrap();
        let text = summary_to_string(&result);
        assert_eq!(text, "#mag size\n20 1.5\n20.5 2\n");
    }

    #[test]
    fn test_write_error_propagates() {
        struct FailingWriter;
        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_summary(&mut FailingWriter, &sample()).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}

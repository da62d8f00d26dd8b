//! CSV export of spectrum frames.
//!
//! One header row (`time_s,ear,<centre freq>...`) followed by one row per
//! frame and ear. Values are written as dB relative to the reference or as
//! raw powers.

use crate::{Error, Result};
use multispec_core::{SignalBank, power_db};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streams spectrum frames to CSV.
pub struct SpectrumCsvWriter<W: Write> {
    out: W,
    width: usize,
    db_scale: bool,
}

impl SpectrumCsvWriter<BufWriter<File>> {
    /// Create a CSV file whose header lists the centre frequencies of
    /// `layout` (any bank with the output's channel layout).
    pub fn create(path: impl AsRef<Path>, layout: &SignalBank, db_scale: bool) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), layout, db_scale)
    }
}

impl<W: Write> SpectrumCsvWriter<W> {
    /// Wrap a writer and emit the header row.
    pub fn new(mut out: W, layout: &SignalBank, db_scale: bool) -> Result<Self> {
        write!(out, "time_s,ear")?;
        for &freq in layout.centre_freqs() {
            write!(out, ",{:.2}", freq)?;
        }
        writeln!(out)?;

        Ok(Self {
            out,
            width: layout.n_channels(),
            db_scale,
        })
    }

    /// Append one row per ear of `frame`.
    pub fn write_frame(&mut self, time_s: f64, frame: &SignalBank) -> Result<()> {
        if frame.n_channels() != self.width {
            return Err(Error::FrameWidth {
                expected: self.width,
                got: frame.n_channels(),
            });
        }

        for ear in 0..frame.n_ears() {
            write!(self.out, "{:.6},{}", time_s, ear)?;
            for &power in frame.ear(ear) {
                let value = if self.db_scale { power_db(power) } else { power };
                write!(self.out, ",{:.6}", value)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

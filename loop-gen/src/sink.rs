//! Tabular output: the sink trait, its CSV implementation and the batch
//! driver that feeds generated loops into it.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use log::{debug, info};
use rand::Rng;

use crate::error::GenError;
use crate::generator::RecordGenerator;
use crate::profile::Profile;
use crate::record::Record;
use crate::schema::Schema;

pub trait RecordSink {
    /// # Errors
    /// Errors when the underlying output cannot be written
    fn write_header(&mut self, headers: &[&str]) -> Result<(), GenError>;

    /// Writes the cells of `record` in `headers` order. Fields the record does
    /// not have are written as empty cells.
    ///
    /// # Errors
    /// Errors when the underlying output cannot be written
    fn write_record(&mut self, headers: &[&str], record: &Record) -> Result<(), GenError>;

    /// # Errors
    /// Errors when buffered output cannot be flushed
    fn flush(&mut self) -> Result<(), GenError>;
}

pub struct CsvSink<W: io::Write> {
    writer: Writer<W>,
}

impl CsvSink<File> {
    /// Creates (or truncates) the CSV file at `path`.
    ///
    /// # Errors
    /// Errors with [`GenError::Output`], naming `path`, when the file cannot be created
    pub fn create(path: impl AsRef<Path>) -> Result<Self, GenError> {
        let path = path.as_ref();
        let writer = WriterBuilder::new()
            .from_path(path)
            .map_err(|source| GenError::Output {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Opened {} for writing", path.display());
        Ok(CsvSink { writer })
    }
}

impl<W: io::Write> CsvSink<W> {
    #[must_use]
    pub fn from_writer(writer: W) -> Self {
        CsvSink {
            writer: WriterBuilder::new().from_writer(writer),
        }
    }

    /// # Errors
    /// Errors when the remaining buffered rows cannot be flushed
    pub fn into_inner(self) -> Result<W, GenError> {
        self.writer
            .into_inner()
            .map_err(|e| GenError::IoError(e.into_error()))
    }
}

impl<W: io::Write> RecordSink for CsvSink<W> {
    fn write_header(&mut self, headers: &[&str]) -> Result<(), GenError> {
        self.writer.write_record(headers)?;
        Ok(())
    }

    fn write_record(&mut self, headers: &[&str], record: &Record) -> Result<(), GenError> {
        self.writer
            .write_record(headers.iter().map(|&header| record.cell(header)))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), GenError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// A run of `count` loops with sequential ids starting at `base_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    base_id: u64,
    count: u64,
}

impl TryFrom<&Profile> for Batch {
    type Error = GenError;
    fn try_from(profile: &Profile) -> Result<Self, Self::Error> {
        Batch::new(profile.base_id, profile.record_count)
    }
}

impl Batch {
    /// # Errors
    /// Errors when the last id of the run would not fit in a `u64`
    pub fn new(base_id: u64, count: usize) -> Result<Self, GenError> {
        let count = u64::try_from(count)
            .ok()
            .filter(|&count| base_id.checked_add(count.saturating_sub(1)).is_some())
            .ok_or_else(|| {
                GenError::InvalidProfile(format!(
                    "{} loops starting at id {} overflow the id range",
                    count, base_id
                ))
            })?;
        Ok(Batch { base_id, count })
    }

    #[must_use]
    pub fn base_id(&self) -> u64 {
        self.base_id
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> {
        let base_id = self.base_id;
        (0..self.count).map(move |i| base_id + i)
    }

    /// Generates every loop in id order.
    pub fn generate<R: Rng>(&self, generator: &mut RecordGenerator<R>) -> Vec<Record> {
        self.ids().map(|id| generator.generate(id)).collect()
    }

    /// # Errors
    /// Errors when the sink fails to accept a row
    pub fn write<S: RecordSink + ?Sized>(
        schema: &Schema,
        records: &[Record],
        sink: &mut S,
    ) -> Result<(), GenError> {
        let headers = schema.headers();
        sink.write_header(&headers)?;
        for record in records {
            sink.write_record(&headers, record)?;
        }
        sink.flush()
    }

    /// Generates the batch and writes it to `sink`, returning the number of rows written.
    ///
    /// # Errors
    /// Errors when the sink fails to accept a row
    pub fn run<R: Rng, S: RecordSink + ?Sized>(
        &self,
        generator: &mut RecordGenerator<R>,
        sink: &mut S,
    ) -> Result<usize, GenError> {
        let records = self.generate(generator);
        Batch::write(&generator.schema(), &records, sink)?;
        info!(
            "Wrote {} {} loops starting at {}",
            records.len(),
            generator.profile().name,
            self.base_id
        );
        Ok(records.len())
    }
}

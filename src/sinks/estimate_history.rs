use crate::OlaError;
use crate::sinks::Snapshot;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Csv,
    Tsv,
    Json,
}

/// Snapshots recorded over a run, oldest first.
#[derive(Debug, Default, Clone)]
pub struct EstimateHistory {
    entries: Vec<Snapshot>,
}

impl EstimateHistory {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: HistoryFormat) -> Result<(), OlaError> {
        match fmt {
            HistoryFormat::Csv => self.export_with_delimiter(path, ','),
            HistoryFormat::Tsv => self.export_with_delimiter(path, '\t'),
            HistoryFormat::Json => self.export_json(path),
        }
    }

    /// Long format: one line per group per snapshot.
    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), OlaError> {
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(
            w,
            "slices_seen{d}rows_seen{d}seconds{d}group{d}value",
            d = delimiter
        )?;
        for s in &self.entries {
            for (group, value) in s.estimate.iter() {
                writeln!(
                    w,
                    "{}{d}{}{d}{:.6}{d}{}{d}{:.12}",
                    s.slices_seen,
                    s.rows_seen,
                    s.seconds,
                    quote_field(&group.to_string(), delimiter),
                    value,
                    d = delimiter
                )?;
            }
        }
        w.flush()?;
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), OlaError> {
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut w, &self.entries)?;
        writeln!(w)?;
        w.flush()?;
        Ok(())
    }
}

/// RFC 4180 quoting: a field holding the delimiter, a quote or a line break
/// is wrapped in quotes, with embedded quotes doubled.
fn quote_field(field: &str, delimiter: char) -> String {
    if field.contains([delimiter, '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

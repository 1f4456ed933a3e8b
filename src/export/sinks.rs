use std::io::{self, BufWriter, Write};

use crate::types::Row;

/// Writes rows under a fixed header; missing cells are written empty.
pub struct CsvSink<W: Write> {
    w: csv::Writer<BufWriter<W>>,
    header: Vec<String>,
    guarded: Vec<bool>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, delimiter: u8, quote_all: bool, header: Vec<String>, guarded: Vec<bool>) -> Self {
        let style = if quote_all { csv::QuoteStyle::Always } else { csv::QuoteStyle::Necessary };
        let w = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(style)
            .from_writer(BufWriter::new(inner));
        Self { w, header, guarded }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.w.write_record(&self.header).map_err(io::Error::other)
    }

    pub fn write_row(&mut self, row: &Row) -> io::Result<()> {
        let record: Vec<String> = self
            .header
            .iter()
            .zip(&self.guarded)
            .map(|(col, &guard)| {
                let cell = row.text(col);
                if guard && !cell.is_empty() { format!("\t{cell}") } else { cell }
            })
            .collect();
        self.w.write_record(&record).map_err(io::Error::other)
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.w.flush()
    }
}

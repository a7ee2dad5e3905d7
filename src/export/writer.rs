//! Flat-file writer for the two export files.
//!
//! Semicolon separators, every field double-quoted with embedded quotes
//! doubled, CRLF row endings, no header row (the accounting import
//! profile supplies column semantics). Append-only: rows go out in
//! processing order, never reordered.

use std::io::{self, Write};

use super::order_row::ExportOrderRow;
use super::product_row::ExportProductRow;

/// Serializes fully-constructed export records to one output sink.
#[derive(Debug)]
pub struct ExportWriter<W: Write> {
    sink: W,
}

impl<W: Write> ExportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Append one order-line row.
    pub fn write_order_row(&mut self, row: &ExportOrderRow) -> io::Result<()> {
        self.write_fields(&row.fields())
    }

    /// Append one product row.
    pub fn write_product_row(&mut self, row: &ExportProductRow) -> io::Result<()> {
        self.write_fields(&row.fields())
    }

    /// Flush the sink. Called once at the end of a run.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Consume the writer and hand the sink back.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_fields(&mut self, fields: &[&str]) -> io::Result<()> {
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(';');
            }
            line.push('"');
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        }
        line.push_str("\r\n");
        self.sink.write_all(line.as_bytes())
    }
}

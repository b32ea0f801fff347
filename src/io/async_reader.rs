//! Asynchronous CSV ledger reader with batch interface
//!
//! Provides batch reading over ledger rows for the parallel strategy.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - Batch reading so each batch can be accumulated on its own task
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of TableRows
//!                  ↓
//!           csv_format module
//!           (header_columns, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, header_columns};
use crate::types::{LedgerError, TableRow};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV ledger reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<R>,
    columns: Vec<String>,
    rows_read: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader and read the header
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the header cannot be read.
    pub async fn new(reader: R) -> Result<Self, LedgerError> {
        let mut csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_reader(reader);

        let columns = header_columns(csv_reader.headers().await?.iter());

        Ok(Self {
            csv_reader,
            columns,
            rows_read: 0,
        })
    }

    /// Header names in column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data records consumed so far, malformed ones included
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Read a batch of ledger rows
    ///
    /// Reads up to `batch_size` records. Malformed records are logged and
    /// skipped.
    ///
    /// # Returns
    ///
    /// The rows read, in input order. An empty vector means end of file.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<TableRow> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.records();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(record)) => {
                    self.rows_read += 1;
                    batch.push(convert_csv_record(&self.columns, record.iter()));
                }
                Some(Err(e)) => {
                    self.rows_read += 1;
                    tracing::warn!("Skipping record: {}", e);
                }
                None => break,
            }
        }

        batch
    }
}

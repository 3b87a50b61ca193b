//! Raw source ingestion.
//!
//! Loads the raw inflation, commodity and wage files into Polars DataFrames of
//! string columns, leaving all interpretation to the cleaners.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use econ_ingest::read_raw_csv;
//!
//! let (df, info) = read_raw_csv(Path::new("data/raw/imf_commodity_price.csv"))?;
//! println!("{} rows, delimiter {:?}", info.rows, info.delimiter as char);
//! ```

mod check;
mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, RawFileInfo, TextEncoding, check_file_size, check_file_size_with_limit,
    decode_bytes, normalize_headers, read_raw_csv, read_raw_csv_str, sniff_delimiter,
};

// === Ingestion Check ===
pub use check::{RawFileCheck, RawFileStatus, check_raw_file};

//! CSV reading utilities.

mod decode;
mod header;
mod reader;

pub use decode::{TextEncoding, decode_bytes};
pub use header::{normalize_headers, sniff_delimiter};
pub use reader::{
    MAX_CSV_FILE_SIZE, RawFileInfo, check_file_size, check_file_size_with_limit, read_raw_csv,
    read_raw_csv_str,
};

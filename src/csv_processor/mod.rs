pub mod reader;
pub mod writer;

pub use reader::{file_exists, get_file_size, parse_csv, read_csv_file, CsvRow, ParsedCsv};
pub use writer::{escape_field, serialize_rows, write_csv_file, CsvWriteOptions, Newline};

pub mod csv;

pub use crate::csv::{read_table, table_to_bytes, write_table, write_table_to_path, ExportError, TableRow};

mod options;
mod pipeline;
mod sinks;

pub use options::{CsvOptions, ExportReport};
pub use pipeline::{TEMP_PREFIX, export_dataset, output_filename, remove_stale_temp_files, write_dataset, write_to_writer};

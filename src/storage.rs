/// Batch conversion of export files.
pub mod conversion;
/// File discovery from command-line inputs.
pub mod discovery;
/// XML document loading.
pub mod document;
/// Row extraction from loaded documents.
pub mod extractor;
/// Spreadsheet output.
pub mod workbook;

pub use conversion::{Conversion, ConversionReport, FileFailure};
pub use discovery::{collect_xml_paths, default_output_path};
pub use document::{Document, DocumentError, Element};
pub use extractor::extract_rows;
pub use workbook::{WorkbookError, write_workbook};

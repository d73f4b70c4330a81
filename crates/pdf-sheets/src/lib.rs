pub mod archive;
pub mod batch;
pub mod constants;
mod geometry;
mod options;
mod pairing;
mod reader;
pub mod report;
mod stats;
mod types;

pub use archive::{is_zip, unpack_archive};
pub use batch::{DocumentEntry, analyze_documents, analyze_folder, discover_documents};
pub use geometry::{page_dimensions, read_page_dimensions};
pub use options::*;
pub use pairing::{dimensions_similar, pair_pages, pair_sheets};
pub use reader::{load_pdf, pages_of, read_document};
pub use report::write_report;
pub use stats::*;
pub use types::*;

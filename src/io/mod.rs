//! Loading and saving PDF documents.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{OutputSet, PdfWriter};

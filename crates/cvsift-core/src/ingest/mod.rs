mod loader;
mod normalize;
mod sections;

pub use loader::{
    load_text, CompositeLoader, DocumentFormat, DocxLoader, LoadError, LoadResult, PdfLoader,
    PlainTextLoader, TextLoader,
};
pub use normalize::normalize;
pub use sections::{Section, SectionSegmenter, HEADER};

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::normalize::normalize;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Decoding strategy, chosen purely from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            _ => Self::PlainText,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(Self::PlainText, Self::from_extension)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "plain_text",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait TextLoader: Send + Sync {
    fn supported_formats(&self) -> &[DocumentFormat];

    fn can_load(&self, format: DocumentFormat) -> bool {
        self.supported_formats().contains(&format)
    }

    /// Decode raw document bytes into plain text. No normalization happens here.
    fn load_bytes(&self, data: &[u8], format: DocumentFormat) -> LoadResult<String>;

    fn load_file(&self, path: &Path) -> LoadResult<String> {
        let format = DocumentFormat::from_path(path);
        let data = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), %format, bytes = data.len(), "loading document");
        self.load_bytes(&data, format)
    }
}

/// Best-effort text decoding: invalid UTF-8 sequences are dropped.
pub struct PlainTextLoader;

impl PlainTextLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLoader for PlainTextLoader {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::PlainText]
    }

    fn load_bytes(&self, data: &[u8], _format: DocumentFormat) -> LoadResult<String> {
        let text: String = data.utf8_chunks().map(|chunk| chunk.valid()).collect();
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

/// Page-by-page PDF text extraction, pages joined with newlines.
pub struct PdfLoader;

impl PdfLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLoader for PdfLoader {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Pdf]
    }

    fn load_bytes(&self, data: &[u8], _format: DocumentFormat) -> LoadResult<String> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| LoadError::Pdf(e.to_string()))?;

        let mut chunks = Vec::new();
        for page_number in doc.get_pages().keys() {
            let text = doc
                .extract_text(&[*page_number])
                .map_err(|e| LoadError::Pdf(format!("page {page_number}: {e}")))?;
            if !text.is_empty() {
                chunks.push(text);
            }
        }

        tracing::debug!(pages = chunks.len(), "extracted pdf pages");
        Ok(chunks.join("\n"))
    }
}

/// Paragraph text from a Word document; blank paragraphs are skipped and
/// tables are ignored.
pub struct DocxLoader;

impl DocxLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLoader for DocxLoader {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Docx]
    }

    fn load_bytes(&self, data: &[u8], _format: DocumentFormat) -> LoadResult<String> {
        let docx = docx_rs::read_docx(data).map_err(|e| LoadError::Docx(e.to_string()))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
                _ => None,
            })
            .filter(|text| !text.trim().is_empty())
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            _ => {}
        }
    }
    text
}

pub struct CompositeLoader {
    loaders: Vec<Box<dyn TextLoader>>,
}

impl CompositeLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Box<dyn TextLoader>) -> Self {
        self.loaders.push(loader);
        self
    }

    fn find_loader(&self, format: DocumentFormat) -> Option<&dyn TextLoader> {
        self.loaders
            .iter()
            .find(|l| l.can_load(format))
            .map(AsRef::as_ref)
    }
}

impl Default for CompositeLoader {
    fn default() -> Self {
        Self::new()
            .with_loader(Box::new(PdfLoader::new()))
            .with_loader(Box::new(DocxLoader::new()))
            .with_loader(Box::new(PlainTextLoader::new()))
    }
}

impl TextLoader for CompositeLoader {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[
            DocumentFormat::Pdf,
            DocumentFormat::Docx,
            DocumentFormat::PlainText,
        ]
    }

    fn can_load(&self, format: DocumentFormat) -> bool {
        self.find_loader(format).is_some()
    }

    fn load_bytes(&self, data: &[u8], format: DocumentFormat) -> LoadResult<String> {
        // Anything without a dedicated loader is decoded as text.
        match self.find_loader(format) {
            Some(loader) => loader.load_bytes(data, format),
            None => PlainTextLoader.load_bytes(data, format),
        }
    }
}

/// Load a document with the default loaders and return its normalized text.
pub fn load_text(path: &Path) -> LoadResult<String> {
    let raw = CompositeLoader::default().load_file(path)?;
    Ok(normalize(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use docx_rs::{Docx, Paragraph, Run};
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use tempfile::TempDir;

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    /// One page per entry, each drawing its text with a standard Type1 font.
    fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = i64::try_from(kids.len()).unwrap();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension("docx"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_extension("txt"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_extension("doc"), DocumentFormat::PlainText);
    }

    #[test]
    fn test_format_from_path_without_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("resume")),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv/jane.Docx")),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_plain_text_drops_invalid_bytes() {
        let data = b"Jane \xff\xfeDoe";
        let text = PlainTextLoader::new()
            .load_bytes(data, DocumentFormat::PlainText)
            .unwrap();
        assert_eq!(text, "Jane Doe");
    }

    #[test]
    fn test_plain_text_strips_bom() {
        let data = "\u{feff}Jane Doe".as_bytes();
        let text = PlainTextLoader::new()
            .load_bytes(data, DocumentFormat::PlainText)
            .unwrap();
        assert_eq!(text, "Jane Doe");
    }

    #[test]
    fn test_docx_paragraphs_joined_skipping_blank() {
        let data = docx_bytes(&["Jane Doe", "   ", "Skills: Rust, SQL"]);
        let text = DocxLoader::new()
            .load_bytes(&data, DocumentFormat::Docx)
            .unwrap();
        assert_eq!(text, "Jane Doe\nSkills: Rust, SQL");
    }

    #[test]
    fn test_plain_text_keeps_literal_replacement_character() {
        let data = "Jane \u{fffd} Doe".as_bytes();
        let text = PlainTextLoader::new()
            .load_bytes(data, DocumentFormat::PlainText)
            .unwrap();
        assert_eq!(text, "Jane \u{fffd} Doe");
    }

    #[test]
    fn test_pdf_pages_joined() {
        let data = pdf_bytes(&["Jane Doe", "Skills: Rust, SQL"]);
        let text = PdfLoader::new()
            .load_bytes(&data, DocumentFormat::Pdf)
            .unwrap();

        let jane = text.find("Jane Doe").unwrap();
        let skills = text.find("Skills: Rust, SQL").unwrap();
        assert!(jane < skills);
    }

    #[test]
    fn test_load_text_reads_pdf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("resume.pdf");
        std::fs::write(&path, pdf_bytes(&["Jane Doe", "Skills: Rust, SQL"])).unwrap();

        assert_eq!(load_text(&path).unwrap(), "Jane Doe\n\nSkills: Rust, SQL");
    }

    #[test]
    fn test_corrupt_pdf_is_an_error() {
        let result = PdfLoader::new().load_bytes(b"definitely not a pdf", DocumentFormat::Pdf);
        assert!(matches!(result, Err(LoadError::Pdf(_))));
    }

    #[test]
    fn test_corrupt_docx_is_an_error() {
        let result = DocxLoader::new().load_bytes(b"PK not really", DocumentFormat::Docx);
        assert!(matches!(result, Err(LoadError::Docx(_))));
    }

    #[test]
    fn test_composite_dispatches_by_extension() {
        let tmp = TempDir::new().unwrap();
        let txt = tmp.path().join("jane.txt");
        std::fs::write(&txt, "Jane Doe\r\nEngineer").unwrap();
        let docx = tmp.path().join("jane.docx");
        std::fs::write(&docx, docx_bytes(&["Jane Doe", "Engineer"])).unwrap();

        let loader = CompositeLoader::default();
        assert_eq!(loader.load_file(&txt).unwrap(), "Jane Doe\r\nEngineer");
        assert_eq!(loader.load_file(&docx).unwrap(), "Jane Doe\nEngineer");
    }

    #[test]
    fn test_load_text_normalizes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("resume.md");
        std::fs::write(&path, "\n\nJane Doe\r\n\r\n\r\n\r\nSkills: Go\n").unwrap();

        assert_eq!(load_text(&path).unwrap(), "Jane Doe\n\nSkills: Go");
    }

    #[test]
    fn test_load_text_missing_file() {
        let result = load_text(Path::new("/nonexistent/cvsift/resume.txt"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}

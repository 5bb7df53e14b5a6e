//! Document loaders
//!
//! Turn files into kernel [`Document`]s: one per PDF page, one per text or
//! markdown file. [`DirectoryLoader`] walks a documents directory in sorted
//! path order and dispatches on file extension.

use docchat_kernel::rag::Document;
use docchat_kernel::rag::types::{META_PAGE, META_SOURCE};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Metadata key holding the document format (`pdf` or `text`).
pub const META_FORMAT: &str = "format";

// =============================================================================
// Errors
// =============================================================================

/// Errors from document loading.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoaderError {
    /// File IO error (includes the path that failed)
    #[error("Failed to read '{path}': {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// The PDF could not be parsed or its text extracted
    #[error("Failed to parse PDF '{path}': {reason}")]
    Pdf { path: String, reason: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The file has no extractable text
    #[error("Document is empty: {0}")]
    EmptyDocument(String),

    /// Loading succeeded but produced nothing to index
    #[error("No loadable documents in {0}")]
    NoDocuments(String),
}

pub type LoaderResult<T> = Result<T, LoaderError>;

fn io_error(path: &Path, source: std::io::Error) -> LoaderError {
    LoaderError::IoError {
        path: path.display().to_string(),
        source,
    }
}

// =============================================================================
// DocumentLoader Trait
// =============================================================================

/// Loads documents from a path.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, path: &Path) -> LoaderResult<Vec<Document>>;
}

// =============================================================================
// TextLoader
// =============================================================================

/// Loads a plain text or markdown file as a single document (page 0).
#[derive(Debug, Clone, Default)]
pub struct TextLoader;

impl TextLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for TextLoader {
    fn load(&self, path: &Path) -> LoaderResult<Vec<Document>> {
        let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;

        if content.trim().is_empty() {
            return Err(LoaderError::EmptyDocument(path.display().to_string()));
        }

        let source = path.display().to_string();
        Ok(vec![
            Document::new(format!("{source}:p0"), content)
                .with_metadata(META_SOURCE, source)
                .with_metadata(META_PAGE, "0")
                .with_metadata(META_FORMAT, "text"),
        ])
    }
}

// =============================================================================
// PdfLoader
// =============================================================================

/// Loads a PDF, one document per page with text.
///
/// Pages are numbered from 0. Pages with no extractable text are skipped;
/// a PDF where every page is blank is an [`LoaderError::EmptyDocument`].
#[derive(Debug, Clone, Default)]
pub struct PdfLoader;

impl PdfLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, path: &Path) -> LoaderResult<Vec<Document>> {
        let source = path.display().to_string();
        let pdf_error = |reason: String| LoaderError::Pdf {
            path: source.clone(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
        let pdf = lopdf::Document::load_mem(&bytes).map_err(|e| pdf_error(e.to_string()))?;

        let mut documents = Vec::new();
        for (page, page_number) in pdf.get_pages().keys().enumerate() {
            let text = pdf
                .extract_text(&[*page_number])
                .map_err(|e| pdf_error(format!("page {page}: {e}")))?;

            if text.trim().is_empty() {
                tracing::debug!(source = %source, page, "skipping page without text");
                continue;
            }

            documents.push(
                Document::new(format!("{source}:p{page}"), text)
                    .with_metadata(META_SOURCE, source.as_str())
                    .with_metadata(META_PAGE, page.to_string())
                    .with_metadata(META_FORMAT, "pdf"),
            );
        }

        if documents.is_empty() {
            return Err(LoaderError::EmptyDocument(source));
        }
        Ok(documents)
    }
}

// =============================================================================
// DirectoryLoader
// =============================================================================

/// Loads every supported file directly inside a directory.
///
/// - files are visited in sorted path order
/// - hidden files and subdirectories are skipped
/// - unsupported extensions and empty documents are skipped with a warning
/// - any other failure on a supported file aborts the whole load
#[derive(Debug, Clone, Default)]
pub struct DirectoryLoader {
    text: TextLoader,
    pdf: PdfLoader,
}

impl DirectoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The loader responsible for `path`, chosen by extension.
    pub fn loader_for(&self, path: &Path) -> Option<&dyn DocumentLoader> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(&self.pdf),
            "txt" | "md" => Some(&self.text),
            _ => None,
        }
    }

    /// Sorted list of candidate files in `dir`.
    fn candidate_files(dir: &Path) -> LoaderResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
            let entry = entry.map_err(|e| io_error(dir, e))?;
            let path = entry.path();

            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if hidden || !path.is_file() {
                continue;
            }
            files.push(path);
        }
        files.sort();
        Ok(files)
    }
}

impl DocumentLoader for DirectoryLoader {
    fn load(&self, dir: &Path) -> LoaderResult<Vec<Document>> {
        let mut documents = Vec::new();

        for path in Self::candidate_files(dir)? {
            let Some(loader) = self.loader_for(&path) else {
                tracing::warn!(path = %path.display(), "skipping unsupported file");
                continue;
            };

            match loader.load(&path) {
                Ok(docs) => {
                    tracing::info!(path = %path.display(), documents = docs.len(), "loaded");
                    documents.extend(docs);
                }
                Err(LoaderError::EmptyDocument(p)) => {
                    tracing::warn!(path = %p, "skipping document without text");
                }
                Err(e) => return Err(e),
            }
        }

        if documents.is_empty() {
            return Err(LoaderError::NoDocuments(dir.display().to_string()));
        }
        Ok(documents)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use tempfile::TempDir;

    /// Write a PDF with one text line per page.
    pub(crate) fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = lopdf::Document::with_version("1.5");
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
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn text_loader_loads_file_as_page_zero() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, "Hello, world!\nSecond line.").unwrap();

        let docs = TextLoader::new().load(&path).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "Hello, world!\nSecond line.");
        assert_eq!(docs[0].metadata[META_FORMAT], "text");
        assert_eq!(docs[0].page(), Some(0));
        assert_eq!(docs[0].source(), Some(path.display().to_string().as_str()));
    }

    #[test]
    fn text_loader_rejects_blank_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blank.txt");
        std::fs::write(&path, "   \n  \n  ").unwrap();

        assert!(matches!(
            TextLoader::new().load(&path),
            Err(LoaderError::EmptyDocument(_))
        ));
    }

    #[test]
    fn text_loader_missing_file() {
        let err = TextLoader::new()
            .load(Path::new("/nonexistent/file.txt"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
        assert!(err.to_string().contains("/nonexistent/file.txt"));
    }

    #[test]
    fn pdf_loader_yields_one_document_per_page() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.pdf");
        write_pdf(&path, &["Ferris is a crab", "Cargo builds crates"]);

        let docs = PdfLoader::new().load(&path).unwrap();

        assert_eq!(docs.len(), 2);
        assert!(docs[0].text.contains("Ferris"));
        assert!(docs[1].text.contains("Cargo"));
        assert_eq!(docs[0].page(), Some(0));
        assert_eq!(docs[1].page(), Some(1));
        assert_eq!(docs[1].metadata[META_FORMAT], "pdf");
    }

    #[test]
    fn pdf_loader_rejects_non_pdf_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fake.pdf");
        std::fs::write(&path, "definitely not a pdf").unwrap();

        assert!(matches!(
            PdfLoader::new().load(&path),
            Err(LoaderError::Pdf { .. })
        ));
    }

    #[test]
    fn directory_loader_sorts_and_filters() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.md"), "# Bee\nbuzz").unwrap();
        std::fs::write(tmp.path().join("a.txt"), "alpha").unwrap();
        std::fs::write(tmp.path().join("image.png"), [0x89, b'P', b'N', b'G']).unwrap();
        std::fs::write(tmp.path().join(".hidden.txt"), "secret").unwrap();
        std::fs::write(tmp.path().join("empty.txt"), "  ").unwrap();
        std::fs::create_dir(tmp.path().join("nested")).unwrap();
        std::fs::write(tmp.path().join("nested").join("c.txt"), "nested").unwrap();

        let docs = DirectoryLoader::new().load(tmp.path()).unwrap();

        let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "# Bee\nbuzz"]);
    }

    #[test]
    fn directory_loader_aborts_on_broken_pdf() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "fine").unwrap();
        std::fs::write(tmp.path().join("b.pdf"), "broken").unwrap();

        assert!(matches!(
            DirectoryLoader::new().load(tmp.path()),
            Err(LoaderError::Pdf { .. })
        ));
    }

    #[test]
    fn directory_without_documents_is_an_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("notes.csv"), "a,b").unwrap();

        assert!(matches!(
            DirectoryLoader::new().load(tmp.path()),
            Err(LoaderError::NoDocuments(_))
        ));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            DirectoryLoader::new().load(&tmp.path().join("absent")),
            Err(LoaderError::IoError { .. })
        ));
    }
}

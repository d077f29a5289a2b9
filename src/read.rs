//! Locating and reading reference and hypothesis documents.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::ZipArchive;

/// Entry of a Word package holding the body text.
const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid word package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid word document body: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("cannot extract text from pdf: {0}")]
    Pdf(String),
}

/// How a document's text is extracted, picked from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Word,
    Pdf,
}

impl DocumentFormat {
    /// Unknown or missing extensions fall back to plain text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("doc") | Some("docx") => DocumentFormat::Word,
            Some("pdf") => DocumentFormat::Pdf,
            _ => DocumentFormat::PlainText,
        }
    }
}

/// Reads the text of a document: plain UTF-8, a Word package or a PDF.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String, ReadError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path);
    debug!("reading {} as {:?}", path.display(), format);

    match format {
        DocumentFormat::PlainText => Ok(fs::read_to_string(path)?),
        DocumentFormat::Word => read_word(path),
        DocumentFormat::Pdf => {
            pdf_extract::extract_text(path).map_err(|e| ReadError::Pdf(format!("{e:?}")))
        }
    }
}

/// Concatenates the `w:t` runs of the document body, one line per paragraph.
fn read_word(path: &Path) -> Result<String, ReadError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY)?.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" | b"w:br" | b"w:cr" => text.push('\n'),
                b"w:tab" => text.push('\t'),
                _ => {}
            },
            Event::Text(t) if in_run => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

/// Resolves a reference argument the way multi-bleu does: `stem` itself when
/// it is a file, otherwise `stem0`, `stem1`, ... up to the first gap.
pub fn reference_paths<P: AsRef<Path>>(stem: P) -> Vec<PathBuf> {
    let stem = stem.as_ref();
    if stem.is_file() {
        return vec![stem.to_path_buf()];
    }

    let mut paths = Vec::new();
    loop {
        let mut name = stem.as_os_str().to_owned();
        name.push(paths.len().to_string());
        let path = PathBuf::from(name);
        if !path.is_file() {
            break;
        }
        paths.push(path);
    }
    paths
}

/// Collects the `ref_*` and `hyp_*` files directly inside `dir`, each list
/// sorted by path.
pub fn scan_directory<P: AsRef<Path>>(dir: P) -> io::Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut references = Vec::new();
    let mut hypotheses = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if name.starts_with("ref_") {
            references.push(path);
        } else if name.starts_with("hyp_") {
            hypotheses.push(path);
        }
    }

    references.sort();
    hypotheses.sort();
    Ok((references, hypotheses))
}

//! File type detection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Type implied by the leading bytes, if they carry a known signature.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            Some(FileType::Pdf)
        } else if bytes.starts_with(ZIP_MAGIC) {
            Some(FileType::Docx)
        } else {
            None
        }
    }

    /// Content signature wins over the extension; plain text is the fallback.
    pub fn detect(extension: Option<&str>, bytes: &[u8]) -> Self {
        if let Some(sniffed) = Self::sniff(bytes) {
            return sniffed;
        }
        match extension.map(Self::from_extension) {
            Some(FileType::Pdf) | Some(FileType::Docx) => FileType::Unknown,
            Some(FileType::Unknown) | None => FileType::Text,
            Some(other) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Docx);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("exe"), FileType::Unknown);
    }

    #[test]
    fn test_detect_prefers_signature() {
        assert_eq!(FileType::detect(Some("txt"), b"%PDF-1.7 ..."), FileType::Pdf);
        assert_eq!(FileType::detect(None, b"PK\x03\x04rest"), FileType::Docx);
        assert_eq!(FileType::detect(Some("md"), b"# Jane Doe"), FileType::Markdown);
        assert_eq!(FileType::detect(None, b"Jane Doe"), FileType::Text);
    }

    #[test]
    fn test_detect_rejects_mislabelled_binary_types() {
        assert_eq!(FileType::detect(Some("pdf"), b"not a pdf"), FileType::Unknown);
        assert_eq!(FileType::detect(Some("docx"), b"plain words"), FileType::Unknown);
    }
}

/// Supported upload formats, classified from the file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    WordDoc,
    Pdf,
    Image,
}

impl FileKind {
    /// Classify a file name by its suffix. Matching ignores case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".txt") {
            Some(Self::PlainText)
        } else if lower.ends_with(".docx") {
            Some(Self::WordDoc)
        } else if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if [".png", ".jpg", ".jpeg"].iter().any(|ext| lower.ends_with(ext)) {
            Some(Self::Image)
        } else {
            None
        }
    }
}

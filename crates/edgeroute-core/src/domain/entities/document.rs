use crate::domain::value_objects::Platform;

/// A serialised routing document, ready to be written by a sink.
///
/// It contains no logic, only the bytes and where they belong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub platform: Platform,
    /// File name relative to the platform's output directory.
    pub file_name: String,
    pub contents: String,
}

impl ConfigDocument {
    pub fn new(platform: Platform, file_name: impl Into<String>, contents: String) -> Self {
        Self {
            platform,
            file_name: file_name.into(),
            contents,
        }
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }
}

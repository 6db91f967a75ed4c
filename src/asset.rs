/// A file record the host keeps for an EnterMedia asset.
///
/// Upload reads the filename, source path and any previous id, and writes
/// back the id and source path EnterMedia assigns.
pub trait AssetRecord {
    fn filename(&self) -> &str;
    fn source_path(&self) -> &str;
    fn original_id(&self) -> Option<&str>;
    fn set_asset_id(&mut self, id: String);
    fn set_source_path(&mut self, path: String);
}

/// Plain in-memory asset record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Asset {
    pub filename: String,
    pub source_path: String,
    pub original_id: Option<String>,
    pub asset_id: Option<String>,
}

impl Asset {
    pub fn new(filename: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            source_path: source_path.into(),
            ..Default::default()
        }
    }

    pub fn with_original_id(mut self, id: impl Into<String>) -> Self {
        self.original_id = Some(id.into());
        self
    }
}

impl AssetRecord for Asset {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn source_path(&self) -> &str {
        &self.source_path
    }

    fn original_id(&self) -> Option<&str> {
        self.original_id.as_deref()
    }

    fn set_asset_id(&mut self, id: String) {
        self.asset_id = Some(id);
    }

    fn set_source_path(&mut self, path: String) {
        self.source_path = path;
    }
}

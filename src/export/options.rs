use std::path::PathBuf;

use crate::types::EntityKind;

#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Quote every field rather than only where needed.
    pub quote_all: bool,
    /// Prefix non-empty date cells with a tab so spreadsheets keep them as text.
    pub guard_dates: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',', quote_all: false, guard_dates: false }
    }
}

impl CsvOptions {
    /// Transactional entities quote everything and guard their date columns.
    #[must_use]
    pub fn for_entity(entity: EntityKind) -> Self {
        let strict = entity.is_transactional();
        Self { quote_all: strict, guard_dates: strict, ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    /// Data rows written, header excluded.
    pub rows: usize,
}

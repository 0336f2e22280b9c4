pub mod catalog;
pub mod config;
pub mod format;
pub mod intent;
pub mod records;
pub mod stages;

pub use catalog::{Catalog, CatalogEntry, ObjectType};
pub use format::format_response;
pub use intent::{QueryIntent, SummaryType};
pub use records::{Record, ResultSet};
pub use stages::StageVocabulary;

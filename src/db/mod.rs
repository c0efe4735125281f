pub mod document;
pub mod store;

pub use document::JournalDocument;
pub use store::{JournalStore, LoadOutcome};

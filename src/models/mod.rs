pub mod loaders;
pub mod question;
pub mod record_store;

pub use loaders::parse_workbook;
pub use question::QuestionRecord;
pub use record_store::RecordStore;

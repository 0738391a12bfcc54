pub mod xlsx_loader;

pub use xlsx_loader::parse_workbook;

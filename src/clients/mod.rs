pub mod paper_client;

pub use paper_client::{HttpTransport, PaperClient, PaperTransport, TransportResponse};

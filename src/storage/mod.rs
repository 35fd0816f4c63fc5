mod file;
mod quote;
pub use file::QuoteFile;
pub use quote::QuoteStorage;

//! Bible data: canonical book table, verse corpus, dataset loading.

pub mod books;
pub mod corpus;
pub mod loader;

pub use books::{book_info, books, resolve_book, resolve_book_id, BookDescriptor};
pub use corpus::VerseCorpus;
pub use loader::{fetcher_for, CorpusFetcher, FileFetcher, HttpFetcher};

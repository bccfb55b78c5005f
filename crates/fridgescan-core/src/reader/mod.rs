//! Production [`SymbolReader`](crate::symbol::SymbolReader) implementation.
//!
//! The pipeline's job is to feed the underlying reader images likely to
//! succeed; the reader's own scan algorithm is out of scope here and lives in
//! the `rxing` crate.

mod multiformat;

pub use multiformat::RxingReader;

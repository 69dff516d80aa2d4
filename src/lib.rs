//! Reader for StarDict-style dictionaries.
//!
//! The `.idx` file is parsed into a [`dict::WordIndex`] by a chunked
//! [`dict::RecordScanner`], searched with [`dict::search()`], and definitions are
//! pulled out of the `.dict` file through a [`dict::ContentReader`].

pub mod dict;
pub mod settings;
mod trace_init;

pub use dict::{load_content, load_index, search, DictError, StarDict, WordPosition};
pub use trace_init::init_tracing;

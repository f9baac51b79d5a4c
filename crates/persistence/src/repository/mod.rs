//! Save repositories.
//!
//! Repositories move sealed [`SaveBundle`](crate::SaveBundle)s in and out of
//! storage. Static content is not their concern; it comes from the content
//! oracle.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::{LoadedFrom, SaveRepository};

//! Save-file codec and repositories.
//!
//! Entities from `game-core` are written in a field-numbered,
//! protobuf-compatible wire format (see [`schema`] for the field table),
//! wrapped in a checksummed [`envelope`], and stored through a
//! [`SaveRepository`].
//!
//! ```ignore
//! let repo = FileSaveRepository::new(save_dir)?;
//! repo.save("main", &SaveBundle::new(game, player))?;
//! let (bundle, _) = repo.load_with_fallback("main")?.expect("slot written");
//! ```

pub mod envelope;
pub mod error;
pub mod repository;
pub mod schema;
pub mod wire;

pub use envelope::{FORMAT_VERSION, MAGIC, SaveBundle};
pub use error::DecodeError;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, LoadedFrom, RepositoryError, SaveRepository,
};
pub use wire::{Key, Message, Reader, WireType, Writer};

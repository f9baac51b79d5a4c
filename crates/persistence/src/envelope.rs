//! Save file envelope.
//!
//! ```text
//! +--------+---------+------------------+---------+
//! | "DSAV" | version | sha256(payload)  | payload |
//! | 4 B    | u16 LE  | 32 B             | ...     |
//! +--------+---------+------------------+---------+
//! ```
//!
//! The payload is an encoded [`SaveBundle`].

use game_core::state::{Game, PlayerCharacter};
use sha2::{Digest, Sha256};

use crate::error::DecodeError;
use crate::wire::{Message, Reader, Writer};

pub const MAGIC: [u8; 4] = *b"DSAV";
pub const FORMAT_VERSION: u16 = 1;

const DIGEST_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC.len() + 2 + DIGEST_LEN;

/// Everything one save slot holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaveBundle {
    pub game: Game,
    pub player: PlayerCharacter,
}

impl SaveBundle {
    pub fn new(game: Game, player: PlayerCharacter) -> Self {
        Self { game, player }
    }

    /// Encodes the bundle inside a checksummed envelope.
    pub fn seal(&self) -> Vec<u8> {
        let payload = self.encode();
        let digest = Sha256::digest(&payload);

        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&digest);
        bytes.extend_from_slice(&payload);
        bytes
    }

    /// Verifies the envelope and decodes the payload.
    pub fn open(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < HEADER_LEN || bytes[..MAGIC.len()] != MAGIC {
            return Err(DecodeError::BadMagic);
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let (expected, payload) = bytes[6..].split_at(DIGEST_LEN);
        let actual = Sha256::digest(payload);
        if actual.as_slice() != expected {
            return Err(DecodeError::ChecksumMismatch {
                expected: hex::encode(expected),
                actual: hex::encode(actual),
            });
        }

        Self::decode(payload)
    }
}

impl Message for SaveBundle {
    const NAME: &'static str = "SaveBundle";

    fn encode_fields(&self, w: &mut Writer) {
        w.message(1, &self.game);
        w.message(2, &self.player);
    }

    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut game = None;
        let mut player = None;
        while let Some(key) = r.next_key()? {
            match key.field {
                1 => game = Some(r.message(key)?),
                2 => player = Some(r.message(key)?),
                _ => r.skip(key)?,
            }
        }
        // Absent entities decode like empty ones.
        let game = match game {
            Some(game) => game,
            None => Game::decode(&[])?,
        };
        let player = match player {
            Some(player) => player,
            None => PlayerCharacter::decode(&[])?,
        };
        Ok(Self { game, player })
    }
}

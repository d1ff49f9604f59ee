/*
 * Responsibility
 * - 公開 ID ↔ 内部 ID (boards."boardId") の変換 (encode/decode)
 * - Extractor / DTO 変換からはこの service を使う (方式変更の影響を局所化)
 */
use sqids::Sqids;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must be between 0 and 255, got {value}")]
    InvalidMinLength { value: usize },
    #[error("sqids error: {0}")]
    Sqids(#[from] sqids::Error),
    #[error("id must be non-negative, got {value}")]
    NegativeId { value: i64 },
    #[error("invalid public id format")]
    DecodeInvalidFormat,
    #[error("decoded id is out of range")]
    DecodeOutOfRange,
}

impl IdCodecError {
    /// True when the caller handed us a bad public id (as opposed to a server-side fault).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::DecodeInvalidFormat | Self::DecodeOutOfRange)
    }
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        let n = u64::try_from(id).map_err(|_| IdCodecError::NegativeId { value: id })?;
        Ok(self.sqids.encode(&[n])?)
    }

    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let nums = self.sqids.decode(public_id);
        let [n] = nums.as_slice() else {
            return Err(IdCodecError::DecodeInvalidFormat);
        };
        let id = i64::try_from(*n).map_err(|_| IdCodecError::DecodeOutOfRange)?;

        // sqids accepts several spellings of the same number; only the canonical one is an id.
        if self.sqids.encode(&[*n])? != public_id {
            return Err(IdCodecError::DecodeInvalidFormat);
        }
        Ok(id)
    }
}

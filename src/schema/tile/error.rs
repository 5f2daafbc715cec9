use thiserror::Error;

use std::str::Utf8Error;


#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Varint extends past the end of the buffer")]
    TruncatedVarint,
    #[error("Varint encoding exceeds 64 bits")]
    VarintOverflow,
    #[error("Field length {declared} exceeds the {remaining} bytes remaining")]
    FieldOutOfBounds {
        declared: usize,
        remaining: usize,
    },
    #[error("Unsupported wire type in field key: {0}")]
    UnsupportedWireType(u8),
    #[error("Field text is not Utf8")]
    MalformedString(#[from] Utf8Error),
    #[error("No data has been assigned to the tile")]
    MissingData,
    #[error("Decoding was cancelled")]
    Cancelled,
}

#[derive(Error, Debug, Clone)]
pub struct InvalidTileIdError {
    pub param: String,
    pub value: String,
    pub reason: String,
}

impl std::fmt::Display for InvalidTileIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile id parameter {} value {} is invalid: {}", self.param, self.value, self.reason)
    }
}

// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Every failure the codec can produce, on either the encode or the decode path.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of input")]
    Eof,
    #[error("remaining input after deserialization")]
    RemainingInput,
    #[error("expected boolean encoded as 0x00 or 0x01, found {0:#04x}")]
    ExpectedBoolean(u8),
    #[error("sequence or map length exceeds the maximum ({0} > {1})")]
    ExceededMaxLen(u64, u64),
    #[error("container nesting exceeds the maximum depth of {0}")]
    ExceededContainerDepth(usize),
    #[error("integer value {0} does not fit in the target width")]
    IntegerOverflow(u64),
    #[error("uleb128 encoding is not minimal / canonical")]
    NonCanonicalUleb128,
    #[error("unknown enum variant tag {0}")]
    UnknownVariantTag(u32),
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("map keys are not in strictly increasing serialized order")]
    NonCanonicalMap,
    #[error("type is not representable in BCS: {0}")]
    NotSupported(&'static str),
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

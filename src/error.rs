use std::{fmt, io};

use thiserror::Error;

use crate::format::PixelFormat;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The stream did not start with the `VTF\0` signature.
    #[error("incorrect identifier, got {0:02X?}")]
    InvalidSignature([u8; 4]),

    /// A stage of container decoding failed.
    #[error("could not read {stage}: {source}")]
    ReadFailed {
        stage: ReadStage,
        source: Box<Error>,
    },

    /// A pixel format this codec cannot encode or decode.
    #[error("pixel format {format:?}: {reason}")]
    Unsupported {
        format: PixelFormat,
        reason: UnsupportedReason,
    },

    /// A pixel buffer whose length does not match its dimensions.
    #[error("{len} pixels do not fill a {width}×{height} plane")]
    DimensionMismatch { width: u32, height: u32, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn unsupported(format: PixelFormat) -> Self {
        let reason = if format.is_paletted() {
            UnsupportedReason::Paletted
        } else {
            UnsupportedReason::NoCodec
        };

        Error::Unsupported { format, reason }
    }
}

/// The region of the container being parsed when a decode error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    Header,
    Thumbnail,
    Mipmaps,
    Resources,
    Body,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadStage::Header => "header",
            ReadStage::Thumbnail => "thumbnail",
            ReadStage::Mipmaps => "mipmap chain",
            ReadStage::Resources => "resource directory",
            ReadStage::Body => "body",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// No codec exists for this format.
    NoCodec,

    /// Paletted formats need an external palette and have no codec.
    Paletted,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            UnsupportedReason::NoCodec => "not supported",
            UnsupportedReason::Paletted => "not supported (paletted)",
        };

        f.write_str(reason)
    }
}

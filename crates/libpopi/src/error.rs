// SPDX-License-Identifier: MIT OR Apache-2.0

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("line index {index} out of range for frame with {len} line(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown progress bar preset: {0}")]
    UnknownPreset(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("{0}")]
    Other(String),
}

macro_rules! error_ctor {
    ($($name:ident => $variant:ident),* $(,)?) => {
        $(
            pub fn $name(msg: impl Into<String>) -> Self {
                Self::$variant(msg.into())
            }
        )*
    };
}

impl Error {
    error_ctor!(
        unknown_preset => UnknownPreset,
        config => Config,
        invalid_value => InvalidValue,
        other => Other,
    );

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

use std::path::PathBuf;

use gfx_font::ConvertError;
use thiserror::Error;

use crate::HeaderError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error("cannot create '{}': {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

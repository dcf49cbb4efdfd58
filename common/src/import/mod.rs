use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use vertex_list::{VertexList, load_vertex_list, parse_vertex_list};

mod vertex_list;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("vertex list does not start with a triangle count")]
    MissingTriangleCount,
    #[error("vertex list triangle count {0:?} is not a number")]
    InvalidTriangleCount(String),
}

pub fn read_text(path: impl AsRef<Path>) -> Result<String, AssetError> {
    let path = path.as_ref();

    fs::read_to_string(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

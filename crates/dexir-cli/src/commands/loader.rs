//! Reading DEX files from disk and reporting failures.

use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use dexir::{BuildOptions, DexError, ErrorKind, Header, build};
use memmap2::Mmap;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Dex { path: PathBuf, source: DexError },
}

impl LoadError {
    /// 2 when the file is not a DEX image we can read at all, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::Io { .. } => 1,
            LoadError::Dex { source, .. } => match source.kind() {
                ErrorKind::NotDex | ErrorKind::UnsupportedVersion => 2,
                ErrorKind::Corrupt | ErrorKind::Io => 1,
            },
        }
    }
}

/// File contents, memory-mapped when non-empty.
#[derive(Debug)]
pub enum DexFile {
    Mapped(Mmap),
    Empty,
}

impl Deref for DexFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            DexFile::Mapped(map) => map,
            DexFile::Empty => &[],
        }
    }
}

pub fn open(path: &Path) -> Result<DexFile, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    if file.metadata().map_err(io_err)?.len() == 0 {
        return Ok(DexFile::Empty);
    }
    // SAFETY: the map is read-only and dropped before the command exits;
    // concurrent truncation by another process is not guarded against.
    let map = unsafe { Mmap::map(&file) }.map_err(io_err)?;
    Ok(DexFile::Mapped(map))
}

/// Build the IR of the file at `path`.
pub fn load(path: &Path, options: &BuildOptions) -> Result<(DexFile, Header), LoadError> {
    let bytes = open(path)?;
    let header = build(&bytes, options).map_err(|source| LoadError::Dex {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((bytes, header))
}

/// Report `err` on stderr and exit with its code.
pub fn fail(err: LoadError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(err.exit_code());
}

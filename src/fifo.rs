// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Serving route requests over a pair of [named pipes](https://en.wikipedia.org/wiki/Named_pipe).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use nix::sys::stat::Mode;

use crate::server::{self, Server};

/// Error conditions which may occur when serving over named pipes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create named pipe {0} (make sure it does not exist already): {1}")]
    Create(PathBuf, #[source] nix::Error),

    #[error("failed to open named pipe {0}: {1}")]
    Open(PathBuf, #[source] io::Error),

    #[error(transparent)]
    Server(#[from] server::Error),
}

/// Locations of the named pipes used to communicate with the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeConfig {
    /// Pipe from which requests are read; the client writes to it.
    pub input: PathBuf,

    /// Pipe to which responses are written; the client reads from it.
    pub output: PathBuf,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("inpipe"),
            output: PathBuf::from("outpipe"),
        }
    }
}

/// NamedPipe owns a named pipe special file, removing it when dropped.
#[derive(Debug)]
pub struct NamedPipe {
    path: PathBuf,
}

impl NamedPipe {
    /// Creates a new named pipe at the provided path. Fails if anything
    /// already exists at that path.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        nix::unistd::mkfifo(&path, Mode::from_bits_truncate(0o666))
            .map_err(|e| Error::Create(path.clone(), e))?;
        log::debug!("created named pipe {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the pipe for reading. Blocks until the other end is opened for writing.
    pub fn open_read(&self) -> Result<File, Error> {
        File::open(&self.path).map_err(|e| Error::Open(self.path.clone(), e))
    }

    /// Opens the pipe for writing. Blocks until the other end is opened for reading.
    pub fn open_write(&self) -> Result<File, Error> {
        OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|e| Error::Open(self.path.clone(), e))
    }
}

impl Drop for NamedPipe {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => log::debug!("removed named pipe {}", self.path.display()),
            Err(e) => log::warn!("failed to remove named pipe {}: {}", self.path.display(), e),
        }
    }
}

/// Creates both named pipes, waits for the client to open them and serves
/// its requests until the shutdown token. The pipes are removed on return,
/// regardless of the outcome.
///
/// The input pipe is opened first, matching the order in which the client opens them.
pub fn serve(server: &Server, config: &PipeConfig) -> Result<usize, Error> {
    let input_pipe = NamedPipe::create(&config.input)?;
    let output_pipe = NamedPipe::create(&config.output)?;

    log::info!("waiting for a client on {}", input_pipe.path().display());
    let input = input_pipe.open_read()?;
    log::info!("waiting for a client on {}", output_pipe.path().display());
    let output = output_pipe.open_write()?;
    log::info!("client connected");

    let answered = server.serve(io::BufReader::new(input), io::BufWriter::new(output))?;
    Ok(answered)
}

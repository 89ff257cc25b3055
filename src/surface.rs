//! Display surfaces: where a generated CV is presented.
//!
//! The generator only talks to the [`SurfaceOpener`] / [`DisplaySurface`]
//! port, so the same sequence drives a file, standard output, or an
//! in-memory recorder in tests.
//!
//! A surface follows a strict lifecycle: open → write once → close → focus.
//! Adapters reject out-of-order calls with [`Error::SurfaceError`].

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;

use crate::{Error, Result, SurfaceFeatures};

/// Default file name used by the file surface
pub const DEFAULT_OUTPUT_FILE: &str = "cv.html";

/// A freshly opened destination that receives exactly one document.
pub trait DisplaySurface {
    /// Write the complete document. Only one write is accepted.
    fn write(&mut self, document: &str) -> Result<()>;

    /// Finalize the surface for writing.
    fn close(&mut self) -> Result<()>;

    /// Bring the finalized surface to the foreground.
    fn focus(&mut self) -> Result<()>;
}

/// Capability to create new display surfaces.
pub trait SurfaceOpener {
    fn open(&mut self, features: &SurfaceFeatures) -> Result<Box<dyn DisplaySurface>>;
}

/// Lifecycle position of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Open,
    Written,
    Closed,
    Focused,
}

impl Lifecycle {
    /// Advance on `write`. Valid only on a fresh surface.
    pub fn on_write(&mut self) -> Result<()> {
        match self {
            Lifecycle::Open => {
                *self = Lifecycle::Written;
                Ok(())
            }
            other => Err(Error::SurfaceError(format!("write on a surface that is {:?}", other))),
        }
    }

    /// Advance on `close`. Closing twice is an error.
    pub fn on_close(&mut self) -> Result<()> {
        match self {
            Lifecycle::Open | Lifecycle::Written => {
                *self = Lifecycle::Closed;
                Ok(())
            }
            other => Err(Error::SurfaceError(format!("close on a surface that is {:?}", other))),
        }
    }

    /// Advance on `focus`. The surface must be closed for writing first.
    pub fn on_focus(&mut self) -> Result<()> {
        match self {
            Lifecycle::Closed | Lifecycle::Focused => {
                *self = Lifecycle::Focused;
                Ok(())
            }
            other => Err(Error::SurfaceError(format!("focus on a surface that is {:?}", other))),
        }
    }
}

// --- File -------------------------------------------------------------------

/// Opens a file on disk as the display surface.
#[derive(Debug, Clone)]
pub struct FileOpener {
    path: PathBuf,
}

impl FileOpener {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileOpener {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_FILE)
    }
}

impl SurfaceOpener for FileOpener {
    fn open(&mut self, features: &SurfaceFeatures) -> Result<Box<dyn DisplaySurface>> {
        let file = File::create(&self.path).map_err(|e| {
            Error::SurfaceError(format!("cannot create {}: {}", self.path.display(), e))
        })?;
        log::debug!(
            "opened file surface {} ({})",
            self.path.display(),
            features.to_feature_string()
        );
        Ok(Box::new(FileSurface {
            path: self.path.clone(),
            writer: Some(BufWriter::new(file)),
            lifecycle: Lifecycle::Open,
        }))
    }
}

/// A surface backed by a file
pub struct FileSurface {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    lifecycle: Lifecycle,
}

impl DisplaySurface for FileSurface {
    fn write(&mut self, document: &str) -> Result<()> {
        self.lifecycle.on_write()?;
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| Error::SurfaceError("file surface already released".into()))?;
        writer.write_all(document.as_bytes())?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.lifecycle.on_close()?;
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn focus(&mut self) -> Result<()> {
        self.lifecycle.on_focus()?;
        log::info!("CV written to {}", self.path.display());
        Ok(())
    }
}

// --- Stdout -----------------------------------------------------------------

/// Writes the document to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOpener;

impl SurfaceOpener for StdoutOpener {
    fn open(&mut self, _features: &SurfaceFeatures) -> Result<Box<dyn DisplaySurface>> {
        Ok(Box::new(StdoutSurface {
            lifecycle: Lifecycle::Open,
        }))
    }
}

struct StdoutSurface {
    lifecycle: Lifecycle,
}

impl DisplaySurface for StdoutSurface {
    fn write(&mut self, document: &str) -> Result<()> {
        self.lifecycle.on_write()?;
        std::io::stdout().lock().write_all(document.as_bytes())?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.lifecycle.on_close()?;
        std::io::stdout().flush()?;
        Ok(())
    }

    fn focus(&mut self) -> Result<()> {
        self.lifecycle.on_focus()
    }
}

// --- Memory -----------------------------------------------------------------

/// Everything that happened to one in-memory surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceLog {
    pub features: SurfaceFeatures,
    pub writes: Vec<String>,
    pub closed: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    None,
    Open,
    Write,
}

/// Records opened surfaces in memory. Intended for tests and embedding.
#[derive(Debug, Clone)]
pub struct MemoryOpener {
    logs: Rc<RefCell<Vec<SurfaceLog>>>,
    failure: Failure,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self {
            logs: Rc::new(RefCell::new(Vec::new())),
            failure: Failure::None,
        }
    }

    /// An opener whose host refuses to create surfaces (e.g. a popup blocker).
    pub fn blocked() -> Self {
        Self {
            failure: Failure::Open,
            ..Self::new()
        }
    }

    /// An opener whose surfaces open but reject writes.
    pub fn failing_writes() -> Self {
        Self {
            failure: Failure::Write,
            ..Self::new()
        }
    }

    /// Snapshot of every surface opened so far, in opening order.
    pub fn surfaces(&self) -> Vec<SurfaceLog> {
        self.logs.borrow().clone()
    }
}

impl Default for MemoryOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceOpener for MemoryOpener {
    fn open(&mut self, features: &SurfaceFeatures) -> Result<Box<dyn DisplaySurface>> {
        if self.failure == Failure::Open {
            return Err(Error::SurfaceError("surface blocked by host".into()));
        }
        let index = {
            let mut logs = self.logs.borrow_mut();
            logs.push(SurfaceLog {
                features: *features,
                ..Default::default()
            });
            logs.len() - 1
        };
        Ok(Box::new(MemorySurface {
            logs: Rc::clone(&self.logs),
            index,
            fail_writes: self.failure == Failure::Write,
            lifecycle: Lifecycle::Open,
        }))
    }
}

struct MemorySurface {
    logs: Rc<RefCell<Vec<SurfaceLog>>>,
    index: usize,
    fail_writes: bool,
    lifecycle: Lifecycle,
}

impl MemorySurface {
    fn with_log(&self, f: impl FnOnce(&mut SurfaceLog)) {
        if let Some(log) = self.logs.borrow_mut().get_mut(self.index) {
            f(log);
        }
    }
}

impl DisplaySurface for MemorySurface {
    fn write(&mut self, document: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::SurfaceError("surface rejected the document".into()));
        }
        self.lifecycle.on_write()?;
        self.with_log(|log| log.writes.push(document.to_string()));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.lifecycle.on_close()?;
        self.with_log(|log| log.closed = true);
        Ok(())
    }

    fn focus(&mut self) -> Result<()> {
        self.lifecycle.on_focus()?;
        self.with_log(|log| log.focused = true);
        Ok(())
    }
}

//! Destinations for rendered plot images

use eeg_core::{EegError, EegResult};
use image::{ImageError, ImageFormat, RgbImage};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Somewhere plot images can be written by name
pub trait ImageSink {
    /// Make the sink ready for writes. Must be idempotent.
    fn prepare(&mut self) -> EegResult<()>;

    /// Store `image` under `name`, replacing any previous image of that name
    fn write_image(&mut self, name: &str, image: &RgbImage) -> EegResult<()>;

    /// Human readable location for log and status messages
    fn location(&self) -> String;
}

/// Writes `<dir>/<name>.png` files
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySink { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File an image named `name` is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.png", name))
    }
}

impl ImageSink for DirectorySink {
    fn prepare(&mut self) -> EegResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| EegError::io(&self.root, &e))?;
        debug!(dir = %self.root.display(), "output directory ready");
        Ok(())
    }

    fn write_image(&mut self, name: &str, image: &RgbImage) -> EegResult<()> {
        let path = self.path_for(name);

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| match e {
                ImageError::IoError(io_err) => EegError::io(&path, &io_err),
                other => EegError::ImageEncoding {
                    path: path.clone(),
                    reason: other.to_string(),
                },
            })?;

        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "wrote plot"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.root().display().to_string()
    }
}

/// Keeps images in memory, keyed by name
#[derive(Debug, Default)]
pub struct MemorySink {
    images: BTreeMap<String, RgbImage>,
    prepared: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&RgbImage> {
        self.images.get(name)
    }

    /// Stored image names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.images.keys().map(String::as_str).collect()
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }
}

impl ImageSink for MemorySink {
    fn prepare(&mut self) -> EegResult<()> {
        self.prepared = true;
        Ok(())
    }

    fn write_image(&mut self, name: &str, image: &RgbImage) -> EegResult<()> {
        if !self.prepared {
            return Err(EegError::SinkNotReady {
                sink: self.location(),
                image: name.to_string(),
            });
        }
        self.images.insert(name.to_string(), image.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

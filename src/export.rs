//! End-to-end export pipeline.
//!
//! Builds the skeleton, samples it, renders the HTR text in memory, and
//! only then touches the filesystem. A failure at any step leaves the
//! destination untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::{FrameRange, FrameRate};
use crate::htr::{self, ExportDocument};
use crate::sample::{sample, scene_sampler};
use crate::scene::Scene;
use crate::skeleton::build_root;
use crate::util::{Error, Result};

/// File name used when the caller does not pick one.
pub const DEFAULT_OUTPUT: &str = "HTR-Result.htr";

/// Confirmation returned by a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub num_segments: usize,
    pub num_frames: usize,
    pub bytes: usize,
}

/// Runs exports against one scene.
pub struct Exporter<'a, S: Scene> {
    scene: &'a S,
}

impl<'a, S: Scene> Exporter<'a, S> {
    pub fn new(scene: &'a S) -> Self {
        Self { scene }
    }

    /// First selected object, the export root by convention.
    pub fn selected_root(&self) -> Result<S::Handle> {
        self.scene
            .selection()
            .into_iter()
            .next()
            .ok_or(Error::EmptySelection)
    }

    /// Frame range from the scene's playback settings.
    pub fn frame_range(&self) -> Result<FrameRange> {
        let (min, max) = self.scene.playback_frame_range();
        FrameRange::from_playback(min, max)
    }

    /// Frame rate from the scene's working time unit.
    pub fn frame_rate(&self) -> Result<FrameRate> {
        FrameRate::from_time_unit(&self.scene.working_time_unit())
    }

    /// Build and sample the skeleton under `root`.
    #[tracing::instrument(skip_all)]
    pub fn document(&self, root: Option<&S::Handle>) -> Result<ExportDocument<S::Handle>> {
        let root = root.ok_or(Error::EmptySelection)?;
        let mut skeleton = build_root(self.scene, root)?;
        let range = self.frame_range()?;
        let rate = self.frame_rate()?;
        sample(&mut skeleton, range, scene_sampler(self.scene))?;
        ExportDocument::new(skeleton, range, rate, self.scene.working_length_unit())
    }

    /// Full HTR text for the skeleton under `root`.
    pub fn render(&self, root: Option<&S::Handle>) -> Result<String> {
        Ok(htr::serialize(&self.document(root)?))
    }

    /// Export the skeleton under `root` to `path`.
    ///
    /// The text is written to a temporary file next to `path` and renamed
    /// over it once complete.
    pub fn export_to_path(&self, root: Option<&S::Handle>, path: impl AsRef<Path>) -> Result<ExportSummary> {
        let path = path.as_ref();
        let doc = self.document(root)?;
        let text = htr::serialize(&doc);

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| Error::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        let summary = ExportSummary {
            path: path.to_path_buf(),
            num_segments: doc.num_segments(),
            num_frames: doc.num_frames(),
            bytes: text.len(),
        };
        info!(
            path = %summary.path.display(),
            segments = summary.num_segments,
            frames = summary.num_frames,
            "exported HTR"
        );
        Ok(summary)
    }

    /// Export the skeleton under the first selected object.
    pub fn export_selection(&self, path: impl AsRef<Path>) -> Result<ExportSummary> {
        let root = self.selected_root()?;
        self.export_to_path(Some(&root), path)
    }
}

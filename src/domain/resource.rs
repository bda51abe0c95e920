//! Validated icon and audio references

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::ResourceError;

/// What a resolved path is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Icon,
    Audio,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Icon => write!(f, "icon"),
            ResourceKind::Audio => write!(f, "audio"),
        }
    }
}

/// An absolute path known to exist and, for audio, to be a `.wav` file.
///
/// Only [`PathResolver`] creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    kind: ResourceKind,
}

impl ResolvedPath {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Path as a string for handing to external processes
    pub fn to_string_lossy(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Resolves user-supplied icon/audio references.
///
/// A reference is tried as given first, then relative to the bundled
/// resource root.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    resource_root: Option<PathBuf>,
}

impl PathResolver {
    /// Create a resolver that only accepts paths as given
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver that falls back to `root` for relative references
    pub fn with_resource_root(root: impl Into<PathBuf>) -> Self {
        Self {
            resource_root: Some(root.into()),
        }
    }

    /// The default bundled resource root: `resources/` next to the executable
    pub fn default_resource_root() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("resources")))
    }

    pub fn resource_root(&self) -> Option<&Path> {
        self.resource_root.as_deref()
    }

    pub fn resolve_icon(&self, path: impl AsRef<Path>) -> Result<ResolvedPath, ResourceError> {
        let path = path.as_ref();
        self.locate(path)
            .map(|path| ResolvedPath {
                path,
                kind: ResourceKind::Icon,
            })
            .ok_or_else(|| ResourceError::InvalidIconPath {
                path: path.to_path_buf(),
            })
    }

    /// Resolve an audio file. The `.wav` extension is checked before existence.
    pub fn resolve_audio(&self, path: impl AsRef<Path>) -> Result<ResolvedPath, ResourceError> {
        let path = path.as_ref();
        if !has_wav_extension(path) {
            return Err(ResourceError::InvalidAudioFormat {
                path: path.to_path_buf(),
            });
        }

        self.locate(path)
            .map(|path| ResolvedPath {
                path,
                kind: ResourceKind::Audio,
            })
            .ok_or_else(|| ResourceError::InvalidAudioPath {
                path: path.to_path_buf(),
            })
    }

    fn locate(&self, path: &Path) -> Option<PathBuf> {
        if path.as_os_str().is_empty() {
            return None;
        }

        if path.is_file() {
            return absolute(path);
        }

        let root = self.resource_root.as_ref()?;
        let bundled = root.join(path);
        if bundled.is_file() {
            return absolute(&bundled);
        }

        None
    }
}

fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

fn absolute(path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return Some(path.to_path_buf());
    }
    std::env::current_dir().ok().map(|cwd| cwd.join(path))
}

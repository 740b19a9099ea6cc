use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use maxrects::{Heuristic, RectSize};
use serde::{de::Error as _, Deserialize, Deserializer};
use thiserror::Error;

/// Describes a packing job: the bin to pack into, how to pack, and the
/// rectangles to pack.
///
/// Pack files are TOML, unless their name ends in `.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PackFile {
    /// The width and height of every bin.
    pub bin_size: (f64, f64),

    /// Whether rectangles may be rotated by 90 degrees to make them fit.
    #[serde(default)]
    pub allow_flip: bool,

    /// Which heuristic picks the spot for each rectangle.
    #[serde(default, deserialize_with = "deserialize_heuristic")]
    pub heuristic: Heuristic,

    #[serde(default)]
    pub mode: PackMode,

    /// The rectangles to pack. Names must be unique within a pack file.
    #[serde(default)]
    pub rects: Vec<RectConfig>,

    /// The path that this pack file came from.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl PackFile {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PackFileError> {
        let path = path.as_ref();
        let contents = fs::read(path)?;

        let is_json = path
            .extension()
            .map(|extension| extension == "json")
            .unwrap_or(false);

        let mut pack_file = if is_json {
            Self::from_json(&contents, path)?
        } else {
            Self::from_toml(&contents, path)?
        };
        pack_file.file_path = path.to_owned();

        Ok(pack_file)
    }

    fn from_toml(contents: &[u8], path: &Path) -> Result<Self, PackFileError> {
        let pack_file: Self = toml::from_slice(contents).map_err(|source| PackFileError::Toml {
            path: path.to_owned(),
            source,
        })?;

        pack_file.validate(path)?;
        Ok(pack_file)
    }

    fn from_json(contents: &[u8], path: &Path) -> Result<Self, PackFileError> {
        let pack_file: Self =
            serde_json::from_slice(contents).map_err(|source| PackFileError::Json {
                path: path.to_owned(),
                source,
            })?;

        pack_file.validate(path)?;
        Ok(pack_file)
    }

    fn validate(&self, path: &Path) -> Result<(), PackFileError> {
        let mut seen = HashSet::new();

        for rect in &self.rects {
            if !seen.insert(rect.name.as_str()) {
                return Err(PackFileError::DuplicateName {
                    name: rect.name.clone(),
                    path: path.to_owned(),
                });
            }
        }

        Ok(())
    }

    /// Turns the configured rectangles into packing requests, using each
    /// rectangle's name as its cookie.
    pub fn requests(&self) -> Vec<RectSize<String>> {
        self.rects
            .iter()
            .map(|rect| RectSize::new(rect.width, rect.height, rect.name.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RectConfig {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackMode {
    /// Let the packer choose which rectangle to place next.
    Batch,

    /// Place rectangles in the order they are listed, skipping any that don't
    /// fit.
    Sequential,
}

impl Default for PackMode {
    fn default() -> Self {
        PackMode::Batch
    }
}

fn deserialize_heuristic<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Heuristic, D::Error> {
    let name = String::deserialize(deserializer)?;

    name.parse().map_err(D::Error::custom)
}

#[derive(Debug, Error)]
pub enum PackFileError {
    #[error("{source} in {}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{source} in {}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Rectangle name '{name}' is used more than once in {}", .path.display())]
    DuplicateName { name: String, path: PathBuf },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}

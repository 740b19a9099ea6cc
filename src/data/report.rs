use std::{
    collections::BTreeMap,
    io::{self, BufWriter, Write},
    path::Path,
};

use fs_err as fs;
use maxrects::{MaxRectsPacker, PlacedRect};
use serde::Serialize;

/// The results of a packing job, written out as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackReport {
    /// Every bin that was filled, in the order they were opened.
    pub bins: Vec<BinReport>,

    /// Names of the rectangles that could not be placed in any bin.
    pub unplaced: Vec<String>,
}

impl PackReport {
    /// Writes this report as pretty-printed JSON to `output`, or stdout if no
    /// path was given.
    pub fn write(&self, output: Option<&Path>) -> anyhow::Result<()> {
        match output {
            Some(path) => {
                let mut file = BufWriter::new(fs::File::create(path)?);
                serde_json::to_writer_pretty(&mut file, self)?;
                writeln!(file)?;
                file.flush()?;

                log::info!("Wrote pack report to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                serde_json::to_writer_pretty(&mut handle, self)?;
                writeln!(handle)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BinReport {
    pub size: (f64, f64),

    /// The fraction of the bin's area that is covered.
    pub occupancy: f64,

    /// Placed rectangles, keyed by name.
    pub rects: BTreeMap<String, RectReport>,
}

impl BinReport {
    pub fn new(packer: &MaxRectsPacker, placed: Vec<PlacedRect<String>>) -> Self {
        let rects = placed
            .into_iter()
            .map(|placed| {
                let report = RectReport {
                    position: placed.position(),
                    size: placed.size(),
                    rotated: placed.is_rotated(),
                };

                (placed.into_cookie(), report)
            })
            .collect();

        Self {
            size: (packer.width(), packer.height()),
            occupancy: packer.occupancy(),
            rects,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RectReport {
    pub position: (f64, f64),

    /// The size of the rectangle inside the bin, after rotation.
    pub size: (f64, f64),

    pub rotated: bool,
}

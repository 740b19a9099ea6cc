use maxrects::{Heuristic, InsertResult, MaxRectsPacker, PackError, PlacedRect, RectSize};

use crate::data::{BinReport, PackFile, PackMode, PackReport};
use crate::options::{InputOptions, PackOptions};

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let pack_file = PackFile::read_from_file(&options.input.path)?;
    log::debug!("Read pack file {}", pack_file.file_path.display());

    let settings = PackSettings::new(&pack_file, &options.input);
    let report = pack_single(&settings, pack_file.requests())?;

    report.write(options.input.output.as_deref())
}

/// How to pack, after applying command line overrides to a pack file.
#[derive(Debug, Clone, Copy)]
pub struct PackSettings {
    pub bin_size: (f64, f64),
    pub allow_flip: bool,
    pub heuristic: Heuristic,
    pub mode: PackMode,
}

impl PackSettings {
    pub fn new(pack_file: &PackFile, input: &InputOptions) -> Self {
        Self {
            bin_size: pack_file.bin_size,
            allow_flip: pack_file.allow_flip || input.allow_flip,
            heuristic: input.heuristic.unwrap_or(pack_file.heuristic),
            mode: pack_file.mode,
        }
    }

    pub fn new_packer(&self) -> Result<MaxRectsPacker, PackError> {
        MaxRectsPacker::new(self.bin_size.0, self.bin_size.1, self.allow_flip)
    }
}

pub fn pack_single(
    settings: &PackSettings,
    requests: Vec<RectSize<String>>,
) -> Result<PackReport, PackError> {
    let mut packer = settings.new_packer()?;
    let (placed, unplaced) = pack_bin(&mut packer, settings, requests)?;

    log::info!(
        "Packed {} rectangles with occupancy {:.3}, {} did not fit",
        placed.len(),
        packer.occupancy(),
        unplaced.len()
    );

    Ok(PackReport {
        bins: vec![BinReport::new(&packer, placed)],
        unplaced: unplaced.into_iter().map(RectSize::into_cookie).collect(),
    })
}

/// Packs as many of `requests` into `packer` as possible, returning what was
/// placed and what was left over.
pub fn pack_bin(
    packer: &mut MaxRectsPacker,
    settings: &PackSettings,
    requests: Vec<RectSize<String>>,
) -> Result<(Vec<PlacedRect<String>>, Vec<RectSize<String>>), PackError> {
    match settings.mode {
        PackMode::Batch => Ok(packer
            .insert_batch(requests, settings.heuristic)?
            .into_parts()),

        PackMode::Sequential => {
            let mut placed = Vec::new();
            let mut unplaced = Vec::new();

            for request in requests {
                let (width, height) = request.size();
                let cookie = request.into_cookie();

                match packer.insert(width, height, settings.heuristic, cookie)? {
                    InsertResult::Placed(rect) => placed.push(rect),
                    InsertResult::Unplaceable(request) => {
                        log::debug!("{} did not fit, skipping it", request.cookie());
                        unplaced.push(request);
                    }
                }
            }

            Ok((placed, unplaced))
        }
    }
}

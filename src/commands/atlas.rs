use std::collections::HashMap;

use maxrects::{PackError, RectSize};

use crate::commands::pack::{pack_bin, PackSettings};
use crate::data::{BinReport, PackFile, PackReport};
use crate::options::AtlasOptions;

pub fn atlas(options: AtlasOptions) -> anyhow::Result<()> {
    let pack_file = PackFile::read_from_file(&options.input.path)?;
    log::debug!("Read pack file {}", pack_file.file_path.display());

    let settings = PackSettings::new(&pack_file, &options.input);
    let report = pack_atlas(&settings, pack_file.requests(), options.max_bins)?;

    report.write(options.input.output.as_deref())
}

/// Packs `requests` into as many bins as it takes, opening a new bin whenever
/// the current one can't take any more.
///
/// Every request is validated before any bin is opened. Unplaced rectangles
/// are reported in the order they were requested.
pub fn pack_atlas(
    settings: &PackSettings,
    requests: Vec<RectSize<String>>,
    max_bins: Option<usize>,
) -> Result<PackReport, PackError> {
    let num_requests = requests.len();
    log::trace!("Packing {} rectangles into an atlas", num_requests);

    for request in &requests {
        request.validate()?;
    }

    // Duplicate names share their first position.
    let mut input_order = HashMap::with_capacity(num_requests);
    for (index, request) in requests.iter().enumerate() {
        input_order.entry(request.cookie().clone()).or_insert(index);
    }

    // Anything that can't fit into an empty bin would never get placed, so it
    // gets set aside up front. Everything else fits into a fresh bin, which
    // guarantees progress below.
    let empty = settings.new_packer()?;
    let (mut remaining_items, oversized): (Vec<_>, Vec<_>) =
        requests.into_iter().partition(|request| {
            let (width, height) = request.size();
            empty.score(width, height, settings.heuristic).is_some()
        });

    let mut bins = Vec::new();

    while !remaining_items.is_empty() {
        if max_bins.map_or(false, |max_bins| bins.len() >= max_bins) {
            log::debug!("Reached the limit of {} bins", bins.len());
            break;
        }

        let mut packer = settings.new_packer()?;
        let (placed, next_remaining) = pack_bin(&mut packer, settings, remaining_items)?;

        log::trace!(
            "Bin {} holds {} rectangles with occupancy {:.3}",
            bins.len(),
            placed.len(),
            packer.occupancy()
        );

        bins.push(BinReport::new(&packer, placed));
        remaining_items = next_remaining;
    }

    let mut unplaced: Vec<String> = oversized
        .into_iter()
        .chain(remaining_items)
        .map(RectSize::into_cookie)
        .collect();
    unplaced.sort_by_key(|name| input_order.get(name).copied());

    log::info!(
        "Packed {} of {} rectangles into {} bins",
        num_requests - unplaced.len(),
        num_requests,
        bins.len()
    );

    Ok(PackReport { bins, unplaced })
}

use std::path::PathBuf;

use maxrects::Heuristic;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "A tool to pack rectangles into fixed-size bins")]
pub struct Options {
    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack the rectangles from a pack file into a single bin. Rectangles that
    /// don't fit are listed in the report.
    Pack(PackOptions),

    /// Pack the rectangles from a pack file into as many bins as needed to fit
    /// all of them.
    Atlas(AtlasOptions),
}

#[derive(Debug, StructOpt)]
pub struct InputOptions {
    /// The path to the pack file describing the bin and the rectangles.
    pub path: PathBuf,

    /// Overrides the heuristic from the pack file.
    ///
    /// Options: best-short-side-fit, best-long-side-fit, best-area-fit,
    /// bottom-left, contact-point
    #[structopt(long)]
    pub heuristic: Option<Heuristic>,

    /// Allows rectangles to be rotated even if the pack file doesn't.
    #[structopt(long)]
    pub allow_flip: bool,

    /// Where to write the JSON report. Defaults to stdout.
    #[structopt(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    #[structopt(flatten)]
    pub input: InputOptions,
}

#[derive(Debug, StructOpt)]
pub struct AtlasOptions {
    #[structopt(flatten)]
    pub input: InputOptions,

    /// The most bins to open. Rectangles that don't fit in them are listed in
    /// the report as unplaced.
    #[structopt(long)]
    pub max_bins: Option<usize>,
}

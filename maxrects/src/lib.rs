//! Maxrects is a library for packing rectangles into a fixed-size bin. It
//! tracks the free space of the bin as a set of maximal free rectangles and
//! picks a spot for each new rectangle using one of the MaxRects heuristics.
//!
//! The packer never decides what to do when a rectangle doesn't fit. Growing
//! the bin, opening another bin or dropping the rectangle is up to the caller.
//!
//! ## Example
//! ```
//! use maxrects::{Heuristic, MaxRectsPacker, RectSize};
//!
//! // Create a packer for a 512x512 bin that may rotate rectangles.
//! let mut packer = MaxRectsPacker::new(512.0, 512.0, true)?;
//!
//! // Rectangles can be inserted one at a time. The last argument is a cookie
//! // that is handed back with the result.
//! let first = packer.insert(128.0, 64.0, Heuristic::BestShortSideFit, "banner")?;
//! assert!(first.is_placed());
//!
//! // Or as a batch, which lets the packer choose the order.
//! let output = packer.insert_batch(
//!     vec![
//!         RectSize::new(64.0, 64.0, "icon"),
//!         RectSize::new(1.0, 300.0, "divider"),
//!     ],
//!     Heuristic::BestAreaFit,
//! )?;
//!
//! for placed in output.placed() {
//!     println!("{} is at {:?}", placed.cookie(), placed.position());
//! }
//!
//! assert!(packer.occupancy() > 0.0);
//! # Ok::<(), maxrects::PackError>(())
//! ```

mod error;
mod free_rects;
mod geometry;
mod heuristic;
mod packer;
mod types;

pub use error::*;
pub use free_rects::*;
pub use geometry::Rect;
pub use heuristic::*;
pub use packer::*;
pub use types::*;

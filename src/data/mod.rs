mod pack_file;
mod report;

pub use pack_file::*;
pub use report::*;

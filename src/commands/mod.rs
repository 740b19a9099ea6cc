mod atlas;
mod pack;

pub use atlas::*;
pub use pack::*;

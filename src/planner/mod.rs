//! Concat, segment and layout planning module
//!
//! Everything in here is a pure function of its inputs: the same arguments
//! always produce the same plan, and nothing touches the filesystem or spawns
//! a process.

pub mod concat;
pub mod geometry;
pub mod overlay;
pub mod segment;

pub use concat::ConcatPlanner;
pub use geometry::GeometryPlanner;
pub use overlay::escape_drawtext;
pub use segment::SegmentPlanner;

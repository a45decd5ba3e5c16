mod controller;
mod geometry;
mod tuning;

pub use controller::{CosmeticAnimation, EvasiveTarget, Jump, ProximityZone, Reaction, classify};
pub use geometry::{Point, Size, TargetBox, ViewportBounds, clamp_axis};
pub use tuning::EvasionTuning;

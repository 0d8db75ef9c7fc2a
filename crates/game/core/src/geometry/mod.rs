//! Grid geometry: points, directions, line tracing and area shapes.
//!
//! Everything here is a pure function of its inputs.
mod area;
mod line;
mod point;

pub use area::{burst, cone, ray, reach};
pub use line::{line_points, trace_line};
pub use point::{Direction, Point};

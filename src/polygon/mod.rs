//! Polygon type used for obstacle rings and visibility results.
//!
//! # Example
//!
//! ```
//! use sightline::polygon::Polygon;
//! use sightline::Point2;
//!
//! let square = Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//!
//! assert_eq!(square.area(), 4.0);
//! assert_eq!(square.edges().count(), 4);
//! ```

mod core;

pub use core::{polygon_contains, polygon_signed_area, Polygon};

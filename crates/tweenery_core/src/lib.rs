//! Tweenery Core
//!
//! Pure building blocks shared by the Tweenery animation system:
//!
//! - **Interpolation**: linear interpolation over scalars and numeric arrays
//! - **Paths**: parsing and interpolating `"M 0,0 L 10,10"`-style path strings
//! - **Transforms**: merging `"name(args) name(args)"` transform strings
//!
//! # Example
//!
//! ```rust
//! use tweenery_core::{compute_transform, interpolate};
//!
//! assert_eq!(interpolate(0.5, 10.0, 20.0), 15.0);
//! assert_eq!(
//!     compute_transform("translateX(50px) scale(.5)", "scale(1)"),
//!     "translateX(50px) scale(1)"
//! );
//! ```

pub mod error;
pub mod interpolate;
pub mod path;
pub mod transform;

pub use error::{Error, Result};
pub use interpolate::{interpolate, interpolate_array, Interpolate};
pub use path::{interpolate_path, parse_path, PathSegment};
pub use transform::{compute_transform, transform_name};

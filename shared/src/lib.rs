//! Shared components for the reseau and control network tools.
//!
//! This crate supplies the pieces both tools lean on:
//!
//! - **PVL records** ([`pvl`]): cube labels, run summaries, and failure logs
//! - **Pixels** ([`special_pixel`], [`pixel_type`]): sentinels and storage types
//! - **Cubes** ([`cube`], [`brick`], [`process`]): labeled cores with windowed I/O
//! - **Geometry** ([`ground_map`]): latitude/longitude to image projection
//! - **Parameters** ([`shared_args`]): `KEY=value` handling for the binaries

pub mod brick;
pub mod cube;
pub mod ground_map;
pub mod image_size;
pub mod pixel_type;
pub mod process;
pub mod pvl;
pub mod shared_args;
pub mod special_pixel;
pub mod test_util;

pub use brick::Brick;
pub use cube::{Cube, CubeError};
pub use ground_map::{GroundMap, GroundMapError, ImagePoint, ProjectedGroundMap};
pub use image_size::ImageSize;
pub use pixel_type::PixelType;
pub use pvl::{Pvl, PvlError, PvlGroup, PvlKeyword};

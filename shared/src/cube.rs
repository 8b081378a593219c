//! Image cubes: a labeled, typed, three dimensional pixel core.
//!
//! A cube file is a JSON document holding the PVL label, the storage pixel
//! type, and the core in `(band, line, sample)` order. Special pixels are
//! stored as their double sentinel values, which survive the round trip
//! bit-for-bit.
//!
//! Pixel access goes through [`Brick`]s: reading fills any part of the brick
//! that hangs off the cube with Null, and writing quantizes every value to the
//! cube's pixel type and silently drops pixels that fall outside the cube.

use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::brick::Brick;
use crate::image_size::ImageSize;
use crate::pixel_type::PixelType;
use crate::pvl::{Pvl, PvlError, PvlGroup};
use crate::special_pixel::NULL;

#[derive(Error, Debug)]
pub enum CubeError {
    #[error("Unable to access cube [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cube [{path}] is not a valid cube file: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cube [{0}] has an empty core")]
    EmptyCore(PathBuf),
    #[error("Cube sizes differ: input is {input}, output is {output}")]
    SizeMismatch { input: ImageSize, output: ImageSize },
    #[error(transparent)]
    Label(#[from] PvlError),
}

pub type Result<T> = std::result::Result<T, CubeError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    label: Pvl,
    pixel_type: PixelType,
    core: Array3<f64>,
}

impl Cube {
    /// Create a cube whose core is entirely Null.
    pub fn new(size: ImageSize, pixel_type: PixelType, label: Pvl) -> Self {
        Self {
            label,
            pixel_type,
            core: size.filled_core(NULL),
        }
    }

    /// Create a cube from an existing core, quantized to `pixel_type`.
    pub fn from_core(core: Array3<f64>, pixel_type: PixelType, label: Pvl) -> Self {
        let core = core.mapv(|v| pixel_type.quantize(v));
        Self {
            label,
            pixel_type,
            core,
        }
    }

    /// Load a cube from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CubeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cube: Cube =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| CubeError::Format {
                path: path.to_path_buf(),
                source,
            })?;
        if cube.core.is_empty() {
            return Err(CubeError::EmptyCore(path.to_path_buf()));
        }
        log::debug!(
            "Opened cube {} ({}, {})",
            path.display(),
            cube.size(),
            cube.pixel_type
        );
        Ok(cube)
    }

    /// Write the cube to disk, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| CubeError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|source| CubeError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)?;
        log::debug!("Wrote cube {} ({})", path.display(), self.size());
        Ok(())
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::from_core(&self.core)
    }

    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    pub fn label(&self) -> &Pvl {
        &self.label
    }

    /// Look up a label group by name.
    pub fn group(&self, name: &str) -> Result<&PvlGroup> {
        Ok(self.label.find_group(name)?)
    }

    /// Single pixel at a 1-based position, Null when outside the cube.
    pub fn pixel(&self, sample: i64, line: i64, band: i64) -> f64 {
        self.size()
            .index_of(sample, line, band)
            .map(|idx| self.core[idx])
            .unwrap_or(NULL)
    }

    /// Fill `brick` from the cube at the brick's base position.
    pub fn read(&self, brick: &mut Brick) {
        let size = self.size();
        for index in 0..brick.size() {
            let (sample, line, band) = brick.position(index);
            brick[index] = size
                .index_of(sample, line, band)
                .map(|idx| self.core[idx])
                .unwrap_or(NULL);
        }
    }

    /// Store `brick` into the cube at the brick's base position.
    pub fn write(&mut self, brick: &Brick) {
        let size = self.size();
        for index in 0..brick.size() {
            let (sample, line, band) = brick.position(index);
            if let Some(idx) = size.index_of(sample, line, band) {
                self.core[idx] = self.pixel_type.quantize(brick[index]);
            }
        }
    }

    pub fn core(&self) -> &Array3<f64> {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pvl::PvlKeyword;
    use crate::special_pixel::{is_high, is_null};

    fn ramp_cube(pixel_type: PixelType) -> Cube {
        let size = ImageSize::single_band(4, 3);
        let core = Array3::from_shape_fn(size.shape(), |(_, l, s)| (10 * l + s) as f64);
        let mut label = Pvl::new();
        let mut instrument = PvlGroup::new("Instrument");
        instrument.add_keyword(PvlKeyword::new("SpacecraftName", "APOLLO 15"));
        label.add_group(instrument);
        Cube::from_core(core, pixel_type, label)
    }

    #[test]
    fn test_read_fills_outside_with_null() {
        let cube = ramp_cube(PixelType::Real);
        let mut brick = Brick::new(2, 2, 1);
        brick.set_base_position(0, 1, 1);
        cube.read(&mut brick);
        assert!(is_null(brick[0]));
        assert_eq!(brick[1], 0.0);
        assert!(is_null(brick[2]));
        assert_eq!(brick[3], 10.0);
    }

    #[test]
    fn test_write_quantizes_and_clips() {
        let mut cube = ramp_cube(PixelType::UnsignedByte);
        let mut brick = Brick::new(2, 1, 1);
        brick.set_base_position(4, 3, 1);
        brick[0] = 300.0;
        brick[1] = 99.0;
        cube.write(&brick);
        assert!(is_high(cube.pixel(4, 3, 1)));
        assert!(is_null(cube.pixel(5, 3, 1)));
    }

    #[test]
    fn test_save_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.cub");
        let mut cube = ramp_cube(PixelType::Double);
        let mut brick = Brick::new(1, 1, 1);
        brick.set_base_position(2, 2, 1);
        brick[0] = NULL;
        cube.write(&brick);
        cube.save(&path).unwrap();

        let loaded = Cube::open(&path).unwrap();
        assert_eq!(loaded.size(), ImageSize::single_band(4, 3));
        assert_eq!(loaded.pixel_type(), PixelType::Double);
        assert!(is_null(loaded.pixel(2, 2, 1)));
        assert_eq!(loaded.pixel(4, 3, 1), 23.0);
        let spacecraft = loaded.group("instrument").unwrap();
        assert_eq!(
            spacecraft.find_keyword("SpacecraftName").unwrap().as_str(0).unwrap(),
            "APOLLO 15"
        );
    }

    #[test]
    fn test_open_missing_file() {
        let result = Cube::open(Path::new("/nonexistent/cube.cub"));
        assert!(matches!(result, Err(CubeError::Io { .. })));
    }
}

//! Synthetic cubes for tests across the workspace.

use ndarray::Array3;
use std::f64::consts::PI;

use crate::cube::Cube;
use crate::image_size::ImageSize;
use crate::pixel_type::PixelType;
use crate::pvl::{Pvl, PvlGroup, PvlKeyword};

/// One reseau entry for a synthetic label: (line, sample, valid)
pub type ReseauEntry = (f64, f64, i32);

/// Core whose pixel at (sample, line) holds `1000 * line + sample` (1-based).
///
/// Every pixel is unique, so tests can tell exactly which pixels moved.
pub fn ramp_core(size: ImageSize) -> Array3<f64> {
    Array3::from_shape_fn(size.shape(), |(_, line, sample)| {
        (1000 * (line + 1) + sample + 1) as f64
    })
}

/// Label with `Instrument` and `Reseaus` groups.
pub fn reseau_label(
    spacecraft: &str,
    instrument: &str,
    status: &str,
    reseaus: &[ReseauEntry],
) -> Pvl {
    let mut label = Pvl::new();

    let mut inst = PvlGroup::new("Instrument");
    inst.add_keyword(PvlKeyword::new("SpacecraftName", spacecraft));
    inst.add_keyword(PvlKeyword::new("InstrumentId", instrument));
    label.add_group(inst);

    let mut group = PvlGroup::new("Reseaus");
    group.add_keyword(PvlKeyword::with_values(
        "Line",
        reseaus.iter().map(|r| r.0),
    ));
    group.add_keyword(PvlKeyword::with_values(
        "Sample",
        reseaus.iter().map(|r| r.1),
    ));
    group.add_keyword(PvlKeyword::with_values(
        "Type",
        reseaus.iter().map(|_| 5),
    ));
    group.add_keyword(PvlKeyword::with_values(
        "Valid",
        reseaus.iter().map(|r| r.2),
    ));
    group.add_keyword(PvlKeyword::new("Status", status));
    label.add_group(group);

    label
}

/// Ramp-filled single band cube of an Apollo metric camera frame.
pub fn apollo_metric_cube(size: ImageSize, status: &str, reseaus: &[ReseauEntry]) -> Cube {
    Cube::from_core(
        ramp_core(size),
        PixelType::Double,
        reseau_label("APOLLO 15", "METRIC", status, reseaus),
    )
}

/// Global simple cylindrical elevation model at one pixel per degree.
///
/// The cube is 360 x 180 with pixel centers on whole degrees: longitude `lon`
/// projects to sample `lon + 0.5` and latitude `lat` to line `90.5 - lat`.
/// Each pixel holds `value(sample, line)`.
pub fn global_dem_cube<F>(radius: f64, value: F) -> Cube
where
    F: Fn(usize, usize) -> f64,
{
    let size = ImageSize::single_band(360, 180);
    let core = Array3::from_shape_fn(size.shape(), |(_, line, sample)| value(sample + 1, line + 1));

    let resolution = radius * PI / 180.0;
    let mut mapping = PvlGroup::new("Mapping");
    mapping.add_keyword(PvlKeyword::new("ProjectionName", "SimpleCylindrical"));
    mapping.add_keyword(PvlKeyword::new("EquatorialRadius", radius));
    mapping.add_keyword(PvlKeyword::new("PolarRadius", radius));
    mapping.add_keyword(PvlKeyword::new("LatitudeType", "Planetocentric"));
    mapping.add_keyword(PvlKeyword::new("LongitudeDirection", "PositiveEast"));
    mapping.add_keyword(PvlKeyword::new("LongitudeDomain", 360));
    mapping.add_keyword(PvlKeyword::new("CenterLongitude", 180.0));
    mapping.add_keyword(PvlKeyword::new("PixelResolution", resolution));
    mapping.add_keyword(PvlKeyword::new("UpperLeftCornerX", -180.0 * resolution));
    mapping.add_keyword(PvlKeyword::new("UpperLeftCornerY", 90.0 * resolution));

    let mut label = Pvl::new();
    label.add_group(mapping);
    Cube::from_core(core, PixelType::Real, label)
}

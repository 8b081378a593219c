//! Recompute ground point radii from a digital elevation model.
//!
//! Each ground point's chosen surface coordinate is projected into the DEM
//! and the radius is replaced with the DEM pixel under it. A point fails,
//! and is ignored in the network, when its coordinate is invalid, the ground
//! map cannot project it, or the pixel there is special.

use thiserror::Error;

use shared::special_pixel::is_special;
use shared::{Cube, GroundMap};

use crate::network::{ControlNet, ControlPoint, SurfacePointSource};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RadiiError {
    #[error("No valid radii can be calculated. Verify that the DEM [{model}] is valid.")]
    NoValidRadii { model: String },
}

/// Counts from one pass over a network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadiusOutcome {
    pub successes: usize,
    pub failures: usize,
    /// IDs of failed points, in network order
    pub failed_ids: Vec<String>,
}

impl RadiusOutcome {
    /// Failed point IDs as a single comma separated list.
    pub fn failed_id_list(&self) -> String {
        self.failed_ids.join(", ")
    }

    /// Reject a pass in which no point received a radius.
    pub fn require_success(&self, model: &str) -> Result<(), RadiiError> {
        if self.successes == 0 {
            return Err(RadiiError::NoValidRadii {
                model: model.to_string(),
            });
        }
        Ok(())
    }
}

/// DEM value, in meters, under `point`'s `source` coordinate.
///
/// `None` when any of the three checks fails; later checks are skipped.
pub fn sample_radius<G: GroundMap>(
    point: &ControlPoint,
    dem: &Cube,
    ground_map: &G,
    source: SurfacePointSource,
) -> Option<f64> {
    let surface = source.surface_point(point);
    if !surface.is_valid() {
        return None;
    }
    let location = ground_map.ground_to_image(surface.latitude, surface.longitude)?;
    let value = dem.pixel(location.sample as i64, location.line as i64, 1);
    (!is_special(value)).then_some(value)
}

/// Replace the radius of every ground point in `net` with the DEM value.
///
/// Tie points are left alone and counted in neither total.
pub fn recompute_radii<G: GroundMap>(
    net: &mut ControlNet,
    dem: &Cube,
    ground_map: &G,
    source: SurfacePointSource,
) -> RadiusOutcome {
    let mut outcome = RadiusOutcome::default();

    for point in net.points.iter_mut().filter(|p| p.is_ground()) {
        match sample_radius(point, dem, ground_map, source) {
            Some(radius) => {
                let mut surface = source.surface_point(point);
                surface.reset_local_radius(radius);
                source.set_surface_point(point, surface);
                outcome.successes += 1;
                log::debug!("Point {}: radius {radius:.3} m", point.id);
            }
            None => {
                point.ignored = true;
                outcome.failures += 1;
                outcome.failed_ids.push(point.id.clone());
                log::warn!("Point {}: no valid radius, ignoring", point.id);
            }
        }
    }

    log::info!(
        "Recomputed {} radii from {} surface points, {} failures",
        outcome.successes,
        source,
        outcome.failures
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::PointType;
    use crate::surface_point::SurfacePoint;
    use shared::special_pixel::NULL;
    use shared::{ImagePoint, ImageSize, PixelType, Pvl};

    /// Maps latitude to line and longitude to sample directly.
    struct IdentityMap {
        limit: f64,
    }

    impl GroundMap for IdentityMap {
        fn ground_to_image(&self, latitude: f64, longitude: f64) -> Option<ImagePoint> {
            (latitude <= self.limit && longitude <= self.limit).then_some(ImagePoint {
                sample: longitude,
                line: latitude,
            })
        }
    }

    fn dem() -> Cube {
        let mut cube = Cube::new(ImageSize::single_band(4, 4), PixelType::Double, Pvl::new());
        let mut brick = shared::Brick::new(4, 4, 1);
        for i in 0..brick.size() {
            brick[i] = 1_000.0 + i as f64;
        }
        brick[15] = NULL;
        cube.write(&brick);
        cube
    }

    fn ground(id: &str, latitude: f64, longitude: f64) -> ControlPoint {
        let mut point = ControlPoint::new(id, PointType::Ground);
        point.apriori = SurfacePoint::new(latitude, longitude, 1.0);
        point.adjusted = SurfacePoint::new(latitude, longitude, 2.0);
        point
    }

    #[test]
    fn test_sample_truncates_location() {
        let map = IdentityMap { limit: 4.9 };
        let point = ground("A", 2.9, 3.7);
        // Sample 3, line 2 -> index 2 + 4 * 1
        assert_eq!(
            sample_radius(&point, &dem(), &map, SurfacePointSource::Apriori),
            Some(1_006.0)
        );
    }

    #[test]
    fn test_recompute_counts_and_ids() {
        let map = IdentityMap { limit: 4.9 };
        let mut net = ControlNet::new("N", "Moon");
        net.points.push(ground("ok", 1.0, 1.0));
        net.points.push(ground("off_map", 10.0, 1.0));
        net.points.push(ControlPoint::new("tie", PointType::Tie));
        net.points.push(ground("null_pixel", 4.0, 4.0));
        let mut invalid = ground("invalid", 1.0, 1.0);
        invalid.adjusted = SurfacePoint::invalid();
        net.points.push(invalid);

        let outcome = recompute_radii(&mut net, &dem(), &map, SurfacePointSource::Adjusted);
        assert_eq!(outcome.successes, 1);
        assert_eq!(outcome.failures, 3);
        assert_eq!(outcome.failed_id_list(), "off_map, null_pixel, invalid");

        assert_eq!(net.points[0].adjusted.radius, 1_000.0);
        assert_eq!(net.points[0].apriori.radius, 1.0);
        assert!(!net.points[0].ignored);
        assert!(net.points[1].ignored);
        assert!(!net.points[2].ignored);
        assert!(net.points[3].ignored);
        assert!(net.points[4].ignored);
        assert_eq!(net.points[1].adjusted.radius, 2.0);
    }

    #[test]
    fn test_require_success() {
        let outcome = RadiusOutcome {
            successes: 0,
            failures: 2,
            failed_ids: vec!["a".into(), "b".into()],
        };
        let err = outcome.require_success("dem.cub").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No valid radii can be calculated. Verify that the DEM [dem.cub] is valid."
        );
        assert!(RadiusOutcome {
            successes: 1,
            ..RadiusOutcome::default()
        }
        .require_success("dem.cub")
        .is_ok());
    }
}

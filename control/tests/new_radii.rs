use std::path::Path;
use tempfile::TempDir;

use control::{
    new_radii, ControlNet, ControlPoint, NewRadiiParams, PointType, RunError, SurfacePoint,
};
use shared::special_pixel::NULL;
use shared::test_util::global_dem_cube;
use shared::{Cube, ImageSize, PixelType, Pvl};

const MOON_RADIUS: f64 = 1_737_400.0;

/// DEM whose value encodes the pixel, with Null over longitudes 100-109.
fn write_dem(dir: &Path) -> std::path::PathBuf {
    let dem = global_dem_cube(MOON_RADIUS, |sample, line| {
        if (101..=110).contains(&sample) {
            NULL
        } else {
            1_730_000.0 + (sample * 10 + line) as f64
        }
    });
    let path = dir.join("dem.cub");
    dem.save(&path).unwrap();
    path
}

fn ground(id: &str, latitude: f64, longitude: f64) -> ControlPoint {
    let mut point = ControlPoint::new(id, PointType::Ground);
    point.apriori = SurfacePoint::new(latitude, longitude, MOON_RADIUS);
    point.adjusted = SurfacePoint::new(latitude + 1.0, longitude + 1.0, MOON_RADIUS);
    point
}

fn write_net(dir: &Path, points: Vec<ControlPoint>) -> std::path::PathBuf {
    let mut net = ControlNet::new("Radii", "Moon");
    net.points = points;
    let path = dir.join("in.net");
    net.save(&path).unwrap();
    path
}

fn params(dir: &Path, cnet: std::path::PathBuf, model: std::path::PathBuf) -> NewRadiiParams {
    NewRadiiParams {
        cnet,
        model,
        to: dir.join("out.net"),
        getlatlon: Some("APRIORI".to_string()),
        errors: Some(dir.join("errors.log")),
    }
}

#[test]
fn test_radii_replaced_from_dem() {
    let dir = TempDir::new().unwrap();
    let model = write_dem(dir.path());
    let cnet = write_net(
        dir.path(),
        vec![
            ground("P1", 10.25, 20.25),
            ControlPoint::new("T1", PointType::Tie),
            ground("P2", -30.25, 300.25),
        ],
    );
    let params = params(dir.path(), cnet, model);

    let summary = new_radii(&params).unwrap();
    assert_eq!(summary.outcome.successes, 2);
    assert_eq!(summary.outcome.failures, 0);

    let out = ControlNet::load(&params.to).unwrap();
    // lat 10.25, lon 20.25 -> sample 20, line 80
    assert_eq!(out.points[0].apriori.radius, 1_730_000.0 + 280.0);
    assert_eq!(out.points[0].adjusted.radius, MOON_RADIUS);
    assert_eq!(out.points[0].apriori.latitude, 10.25);
    // lat -30.25, lon 300.25 -> sample 300, line 120
    assert_eq!(out.points[2].apriori.radius, 1_730_000.0 + 3_120.0);
    assert!(out.points.iter().all(|p| !p.ignored));
    assert_eq!(out.points[1], ControlPoint::new("T1", PointType::Tie));

    // Explicit log is written even without failures.
    let log = std::fs::read_to_string(params.errors.as_ref().unwrap()).unwrap();
    assert!(log.contains("Successes = 2"));
    assert!(!log.contains("PointIDs"));
}

#[test]
fn test_adjusted_coordinates_are_used() {
    let dir = TempDir::new().unwrap();
    let model = write_dem(dir.path());
    let cnet = write_net(dir.path(), vec![ground("P1", 10.25, 20.25)]);
    let mut params = params(dir.path(), cnet, model);
    params.getlatlon = Some("adjusted".to_string());

    new_radii(&params).unwrap();
    let out = ControlNet::load(&params.to).unwrap();
    // lat 11.25, lon 21.25 -> sample 21, line 79
    assert_eq!(out.points[0].adjusted.radius, 1_730_000.0 + 289.0);
    assert_eq!(out.points[0].apriori.radius, MOON_RADIUS);
}

#[test]
fn test_failures_are_ignored_and_logged() {
    let dir = TempDir::new().unwrap();
    let model = write_dem(dir.path());
    let mut invalid = ground("BAD_COORD", 0.25, 0.25);
    invalid.apriori = SurfacePoint::invalid();
    let cnet = write_net(
        dir.path(),
        vec![
            ground("GOOD", 45.25, 45.25),
            ground("NULL_DEM", 45.25, 105.25),
            invalid,
            ground("OFF_BODY", 95.0, 10.0),
        ],
    );
    let params = params(dir.path(), cnet, model);

    let summary = new_radii(&params).unwrap();
    assert_eq!(summary.outcome.successes, 1);
    assert_eq!(summary.outcome.failures, 3);
    assert_eq!(summary.log_path.as_deref(), params.errors.as_deref());
    assert_eq!(summary.summary.comments.len(), 1);

    let out = ControlNet::load(&params.to).unwrap();
    assert!(!out.points[0].ignored);
    assert!(out.points[1..].iter().all(|p| p.ignored));
    assert_eq!(out.points[1].apriori.radius, MOON_RADIUS);

    let log = std::fs::read_to_string(params.errors.as_ref().unwrap()).unwrap();
    assert!(log.starts_with("Object = Results"));
    assert!(log.contains("Failures  = 3"));
    assert!(log.contains("PointIDs = \"NULL_DEM, BAD_COORD, OFF_BODY\""));
}

#[test]
fn test_no_successes_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let model = write_dem(dir.path());
    let cnet = write_net(
        dir.path(),
        vec![
            ground("NULL_DEM", 45.25, 105.25),
            ControlPoint::new("T1", PointType::Tie),
        ],
    );
    let params = params(dir.path(), cnet, model.clone());

    let err = new_radii(&params).unwrap_err();
    assert!(matches!(err, RunError::Radii(_)));
    assert_eq!(
        err.to_string(),
        format!(
            "No valid radii can be calculated. Verify that the DEM [{}] is valid.",
            model.display()
        )
    );
    assert!(!params.to.exists());
    assert!(!params.errors.as_ref().unwrap().exists());
}

#[test]
fn test_empty_network_is_rejected() {
    let dir = TempDir::new().unwrap();
    let model = write_dem(dir.path());
    let cnet = write_net(dir.path(), vec![ControlPoint::new("T1", PointType::Tie)]);
    let params = params(dir.path(), cnet, model);
    assert!(matches!(new_radii(&params), Err(RunError::Radii(_))));
    assert!(!params.to.exists());
}

#[test]
fn test_missing_getlatlon_is_rejected() {
    let dir = TempDir::new().unwrap();
    let model = write_dem(dir.path());
    let cnet = write_net(dir.path(), vec![ground("P1", 10.25, 20.25)]);
    let mut params = params(dir.path(), cnet, model);
    params.getlatlon = None;

    let err = new_radii(&params).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The value for parameter GETLATLON [] must be provided."
    );
    assert!(!params.to.exists());
}

#[test]
fn test_unprojected_model_is_rejected() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("flat.cub");
    Cube::new(ImageSize::single_band(4, 4), PixelType::Real, Pvl::new())
        .save(&model)
        .unwrap();
    let cnet = write_net(dir.path(), vec![ground("P1", 10.25, 20.25)]);
    let params = params(dir.path(), cnet, model.clone());

    let err = new_radii(&params).unwrap_err();
    assert!(matches!(err, RunError::GroundMap { .. }));
    assert!(err
        .to_string()
        .starts_with(&format!("Cannot initialize ground map for cube [{}]", model.display())));
}

use std::rc::Rc;

use celestial_axes::{
    AxesConfig, AxesError, DisplayMode, LayerSource, PixelBounds, WorldCoordinateDisplay,
};
use celestial_wcs::{
    CoordinateKind, FrameConversion, FrameResolver, LinearTransform, SkyFrame, SkyFrameResolver,
    SliceSpec, Transform, WcsError, WcsResult, WorldCoord,
};

const PX: f64 = 0.523412;
const PY: f64 = 0.518311;

/// Galactic-style main transform giving (0.495833, -0.488889) at (PX, PY).
fn main_transform() -> Rc<dyn Transform> {
    let lon = 0.495833;
    let lat = -0.488889;
    Rc::new(
        LinearTransform::new(
            vec![0.0, 0.0],
            vec![lon + 0.01 * PX, lat - 0.01 * PY],
            vec![-0.01, 0.01],
            vec![CoordinateKind::longitude(), CoordinateKind::Latitude],
        )
        .unwrap(),
    )
}

/// Shifts longitude and latitude by fixed offsets.
#[derive(Debug)]
struct Offset {
    dlon: f64,
    dlat: f64,
}

impl FrameConversion for Offset {
    fn forward(&self, world: WorldCoord) -> WcsResult<WorldCoord> {
        Ok(WorldCoord::new(world.get(0) + self.dlon, world.get(1) + self.dlat))
    }

    fn inverse(&self, world: WorldCoord) -> WcsResult<WorldCoord> {
        Ok(WorldCoord::new(world.get(0) - self.dlon, world.get(1) - self.dlat))
    }
}

/// Knows only "fk5", as a fixed offset from the main frame.
#[derive(Debug)]
struct OffsetResolver;

impl FrameResolver for OffsetResolver {
    fn resolve(&self, frame: &str) -> WcsResult<Rc<dyn FrameConversion>> {
        match frame {
            "fk5" => Ok(Rc::new(Offset {
                dlon: 266.679887,
                dlat: -28.276667,
            })),
            other => Err(WcsError::unknown_frame(other)),
        }
    }
}

fn main_display() -> WorldCoordinateDisplay {
    WorldCoordinateDisplay::new(
        main_transform(),
        None,
        Box::new(OffsetResolver),
        AxesConfig::default(),
    )
    .unwrap()
}

#[test]
fn test_pixel_mode_readout() {
    let mut display = main_display();
    assert!(display.on_key_press('w'));
    assert_eq!(display.mode(), DisplayMode::Pixel);
    assert_eq!(
        display.display_coords(PX, PX).unwrap(),
        "0.523412 0.523412 (pixel)"
    );
    assert_eq!(
        display.display_coords(PX, PY).unwrap(),
        "0.523412 0.518311 (pixel)"
    );
}

#[test]
fn test_pixel_readout_near_zero_has_no_sign() {
    let mut display = main_display();
    display.set_mode(DisplayMode::Pixel).unwrap();
    assert_eq!(
        display.display_coords(-1e-9, -0.0).unwrap(),
        "0.000000 0.000000 (pixel)"
    );
}

#[test]
fn test_tiny_tick_spacing_does_not_break_layout() {
    let mut display = main_display();
    display.coords_mut()[0].set_ticks_spacing(1e-300);
    let layers = display.update_ticks(PixelBounds::new(0.0, 100.0, 0.0, 100.0));
    let lon = &layers[0].axes[0];
    assert!(!lon.values.is_empty() && lon.values.len() < 100);
    assert!(lon.spacing.unwrap() > 1e-3);
}

#[test]
fn test_main_world_readout() {
    let display = main_display();
    assert_eq!(display.mode(), DisplayMode::WORLD);
    assert_eq!(
        display.display_coords(PX, PY).unwrap(),
        "0°29'45\" -0°29'20\" (world)"
    );
}

#[test]
fn test_overlay_readout_with_decimal_format() {
    let mut display = main_display();
    display
        .get_coords_overlay("fk5")
        .unwrap()[0]
        .set_major_formatter("d.dddd")
        .unwrap();

    assert_eq!(display.toggle_mode(), DisplayMode::overlay(0));
    assert_eq!(
        display.display_coords(PX, PY).unwrap(),
        "267.1757 -28°45'56\" (world, overlay 1)"
    );
}

#[test]
fn test_cube_slice_readout() {
    let cube = LinearTransform::new(
        vec![0.0, 0.0, 0.0],
        vec![51.716944 - 0.01 * PY, 0.0, 2563.2 - 10.0 * PX],
        vec![0.01, 1.0, 10.0],
        vec![
            CoordinateKind::Latitude,
            CoordinateKind::Scalar,
            CoordinateKind::Spectral,
        ],
    )
    .unwrap();
    let slice: SliceSpec = "y, 50, x".parse().unwrap();
    let mut display = WorldCoordinateDisplay::new(
        Rc::new(cube),
        Some(slice),
        Box::new(SkyFrameResolver::new(SkyFrame::Icrs)),
        AxesConfig::default(),
    )
    .unwrap();

    // Before any ticks exist the spectral value is shown in full.
    let before = display.display_coords(PX, PY).unwrap();
    let spectral: f64 = before.split(' ').next().unwrap().parse().unwrap();
    assert!((spectral - 2563.2).abs() < 1e-9, "{before}");
    assert!(before.ends_with(" 51°43'01\" (world)"), "{before}");

    // Ticks 200 apart need no decimals.
    let layers = display.update_ticks(PixelBounds::new(0.0, 100.0, 0.0, 100.0));
    assert_eq!(layers[0].axes[0].spacing, Some(200.0));
    assert_eq!(
        display.display_coords(PX, PY).unwrap(),
        "2563 51°43'01\" (world)"
    );
}

#[test]
fn test_cube_slice_with_origin_beyond_the_pole() {
    // Latitude runs 95 - 0.1 y, so display pixel (0, 0) has no world position.
    let cube = LinearTransform::new(
        vec![0.0, 0.0, 0.0],
        vec![95.0, 0.0, 2500.0],
        vec![-0.1, 1.0, 10.0],
        vec![
            CoordinateKind::Latitude,
            CoordinateKind::Scalar,
            CoordinateKind::Spectral,
        ],
    )
    .unwrap();
    let slice: SliceSpec = "y 5 x".parse().unwrap();
    let mut display = WorldCoordinateDisplay::new(
        Rc::new(cube),
        Some(slice),
        Box::new(SkyFrameResolver::new(SkyFrame::Icrs)),
        AxesConfig::default(),
    )
    .unwrap();

    assert_eq!(
        display.display_coords(10.0, 100.0).unwrap(),
        "2600 85°00'00\" (world)"
    );
    assert_eq!(display.readout(10.0, 0.0), "-- -- (world)");

    let layers = display.update_ticks(PixelBounds::new(0.0, 20.0, 60.0, 100.0));
    for axis in &layers[0].axes {
        assert!(!axis.gridlines.is_empty(), "axis {} has no gridlines", axis.axis);
    }
}

#[test]
fn test_cube_without_slice_is_rejected() {
    let cube = LinearTransform::new(
        vec![0.0; 3],
        vec![0.0; 3],
        vec![1.0; 3],
        vec![CoordinateKind::Scalar; 3],
    )
    .unwrap();
    let err = WorldCoordinateDisplay::new(
        Rc::new(cube),
        None,
        Box::new(OffsetResolver),
        AxesConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AxesError::InvalidSlice { .. }));

    let err = "y 50 y".parse::<SliceSpec>().unwrap_err();
    assert!(matches!(AxesError::from(err), AxesError::InvalidSlice { .. }));
}

#[test]
fn test_toggle_cycle_picks_up_new_overlays() {
    let mut display = main_display();
    assert!(!display.on_key_press('x'));
    assert_eq!(display.mode(), DisplayMode::WORLD);

    display.on_key_press('w');
    assert_eq!(display.mode(), DisplayMode::Pixel);
    display.on_key_press('w');
    assert_eq!(display.mode(), DisplayMode::WORLD);

    display.get_coords_overlay("fk5").unwrap();
    display.on_key_press('w');
    assert_eq!(display.mode(), DisplayMode::overlay(0));
    display.on_key_press('w');
    assert_eq!(display.mode(), DisplayMode::Pixel);
    display.on_key_press('w');
    assert_eq!(display.mode(), DisplayMode::WORLD);
}

#[test]
fn test_configured_toggle_key() {
    let config = AxesConfig::from_json_str(r#"{ "toggle_key": "c" }"#).unwrap();
    let mut display =
        WorldCoordinateDisplay::new(main_transform(), None, Box::new(OffsetResolver), config)
            .unwrap();
    assert!(!display.on_key_press('w'));
    assert!(display.on_key_press('c'));
    assert_eq!(display.mode(), DisplayMode::Pixel);
}

#[test]
fn test_formats_are_isolated_between_sets() {
    let mut display = main_display();
    display.get_coords_overlay("fk5").unwrap()[0]
        .set_major_formatter("d.dddd")
        .unwrap();
    assert_eq!(
        display.display_coords(PX, PY).unwrap(),
        "0°29'45\" -0°29'20\" (world)"
    );

    display.coords_mut()[1].set_major_formatter("d.dd").unwrap();
    display.set_mode(DisplayMode::overlay(0)).unwrap();
    assert_eq!(
        display.display_coords(PX, PY).unwrap(),
        "267.1757 -28°45'56\" (world, overlay 1)"
    );
    display.set_mode(DisplayMode::WORLD).unwrap();
    assert_eq!(
        display.display_coords(PX, PY).unwrap(),
        "0°29'45\" -0.49 (world)"
    );
}

#[test]
fn test_unknown_frame_and_overlay_index() {
    let mut display = main_display();
    let err = display.get_coords_overlay("fk9").unwrap_err();
    assert!(matches!(err, AxesError::Frame { .. }));
    assert!(display.overlays().is_empty());

    assert!(matches!(
        display.overlay(0),
        Err(AxesError::OverlayNotFound { index: 0, count: 0 })
    ));
    assert!(display.set_mode(DisplayMode::overlay(0)).is_err());
    assert_eq!(display.mode(), DisplayMode::WORLD);
}

#[test]
fn test_placeholder_outside_domain() {
    let wcs = LinearTransform::new(
        vec![0.0, 0.0],
        vec![0.0, 89.5],
        vec![0.01, 0.01],
        vec![CoordinateKind::longitude(), CoordinateKind::Latitude],
    )
    .unwrap();
    let display = WorldCoordinateDisplay::new(
        Rc::new(wcs),
        None,
        Box::new(OffsetResolver),
        AxesConfig::default(),
    )
    .unwrap();

    assert!(matches!(
        display.display_coords(0.0, 100.0),
        Err(AxesError::CoordinateUnavailable { .. })
    ));
    assert_eq!(display.readout(0.0, 100.0), "-- -- (world)");
    assert_eq!(display.readout(0.0, 0.0), "0°00'00\" 89°30'00\" (world)");
}

/// Forward mapping is the identity, the inverse lands five pixels off.
#[derive(Debug)]
struct Skewed;

impl Transform for Skewed {
    fn dims(&self) -> usize {
        2
    }

    fn world_kinds(&self) -> Vec<CoordinateKind> {
        vec![CoordinateKind::Scalar; 2]
    }

    fn pixel_to_world(&self, pixel: &[f64]) -> WcsResult<Vec<f64>> {
        Ok(pixel.to_vec())
    }

    fn world_to_pixel(&self, world: &[f64]) -> WcsResult<Vec<f64>> {
        Ok(world.iter().map(|w| w + 5.0).collect())
    }
}

#[test]
fn test_round_trip_check() {
    let display = WorldCoordinateDisplay::new(
        Rc::new(Skewed),
        None,
        Box::new(OffsetResolver),
        AxesConfig::default(),
    )
    .unwrap();
    assert_eq!(display.readout(1.0, 2.0), "-- -- (world)");

    let config = AxesConfig {
        check_round_trip: false,
        ..AxesConfig::default()
    };
    let display =
        WorldCoordinateDisplay::new(Rc::new(Skewed), None, Box::new(OffsetResolver), config)
            .unwrap();
    assert_eq!(display.readout(1.0, 2.0), "1 2 (world)");
}

#[test]
fn test_sky_frame_overlay() {
    let galactic = LinearTransform::new(
        vec![0.0, 0.0],
        vec![0.0, 0.0],
        vec![-0.01, 0.01],
        vec![CoordinateKind::longitude(), CoordinateKind::Latitude],
    )
    .unwrap();
    let mut display = WorldCoordinateDisplay::new(
        Rc::new(galactic),
        None,
        Box::new(SkyFrameResolver::new(SkyFrame::Galactic)),
        AxesConfig::default(),
    )
    .unwrap();
    display.get_coords_overlay("icrs").unwrap();
    display.set_mode(DisplayMode::overlay(0)).unwrap();
    assert_eq!(
        display.readout(0.0, 0.0),
        "266°24'18\" -28°56'10\" (world, overlay 1)"
    );

    display.overlay_mut(0).unwrap()[0]
        .set_major_formatter("hh:mm:ss")
        .unwrap();
    assert_eq!(
        display.readout(0.0, 0.0),
        "17h45m37s -28°56'10\" (world, overlay 1)"
    );
}

#[test]
fn test_layers_render_main_then_overlays() {
    let mut display = main_display();
    display.get_coords_overlay("fk5").unwrap();
    let layers = display.update_ticks(PixelBounds::from_shape(100, 100));
    let sources: Vec<LayerSource> = layers.iter().map(|l| l.source).collect();
    assert_eq!(sources, [LayerSource::Main, LayerSource::Overlay(0)]);
    for layer in &layers {
        assert!(!layer.axes[0].ticks.is_empty());
        assert!(!layer.axes[1].gridlines.is_empty());
    }
    assert!(display.overlay(0).unwrap()[0].spacing().is_some());
}

#[test]
fn test_tick_update_leaves_readout_of_angles_alone() {
    let mut display = main_display();
    let before = display.readout(PX, PY);
    display.update_ticks(PixelBounds::from_shape(100, 100));
    assert_eq!(display.readout(PX, PY), before);
}

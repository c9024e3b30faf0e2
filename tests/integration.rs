use xform_engine::geom::{
    self, Axis, Dimension, PointLayout, PointSet, Tolerance, TransformMatrix, builder,
};
use xform_engine::raster::{self, Raster};
use xform_engine::render::{RenderMode, validate_render_request};
use xform_engine::TransformError;

fn batman() -> PointSet {
    PointSet::from_rows(&[
        [0.0, 0.0],
        [1.0, 0.2],
        [0.4, 1.0],
        [0.5, 0.4],
        [0.0, 0.8],
        [-0.5, 0.4],
        [-0.4, 1.0],
        [-1.5, 0.5],
        [0.0, 0.0],
    ])
    .expect("batman polyline")
}

fn cube() -> PointSet {
    PointSet::from_rows(&[
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
        [0.0, 0.0, 1.0],
    ])
    .expect("unit cube")
}

#[test]
fn rotate_quarter_turn_counter_clockwise() {
    let points = PointSet::from_rows(&[[1.0, 0.0]]).unwrap();
    let rotated = geom::rotate_points(&points, 90.0, Axis::Z).unwrap();
    assert!(rotated.approx_eq(
        &PointSet::from_rows(&[[0.0, 1.0]]).unwrap(),
        Tolerance::DEFAULT
    ));
}

#[test]
fn scale_and_reflect_concrete_values() {
    let scaled = geom::scale_points(&PointSet::from_rows(&[[2.0, 3.0]]).unwrap(), &[2.0, 2.0]).unwrap();
    assert_eq!(scaled.to_rows(), vec![vec![4.0, 6.0]]);

    let reflected =
        geom::reflect_points(&PointSet::from_rows(&[[1.0, 2.0]]).unwrap(), &[false, true]).unwrap();
    assert_eq!(reflected.to_rows(), vec![vec![1.0, -2.0]]);
}

#[test]
fn demo_sequence_on_batman_produces_2d_sets() {
    let shape = batman();
    let results = [
        geom::rotate_points(&shape, 45.0, Axis::Y).unwrap(),
        geom::scale_points(&shape, &[2.0, 2.0]).unwrap(),
        geom::reflect_points(&shape, &[false, true]).unwrap(),
        geom::shear_points(&shape, 2.0, 0, 1).unwrap(),
        geom::apply_inferred(&shape, &TransformMatrix::new(&[[0.0, 1.0], [1.0, 0.0]]).unwrap())
            .unwrap(),
    ];
    for result in &results {
        assert_eq!(result.len(), shape.len());
        assert_eq!(
            validate_render_request(&[shape.clone(), result.clone()], &["Original", "Transformed"]),
            Ok(RenderMode::TwoD)
        );
    }
}

#[test]
fn demo_sequence_on_cube_produces_3d_sets() {
    let shape = cube();
    for axis in Axis::ALL {
        let rotated = geom::rotate_points(&shape, 45.0, axis).unwrap();
        assert_eq!(rotated.dimension(), Dimension::Three);
    }
    let scaled = geom::scale_points(&shape, &[1.0, 2.0, 1.0]).unwrap();
    assert_eq!(scaled.point(1), Some(&[1.0, 2.0, 0.0][..]));
    let reflected = geom::reflect_points(&shape, &[true, true, false]).unwrap();
    assert_eq!(reflected.point(5), Some(&[-1.0, -1.0, 1.0][..]));
    let sheared = geom::shear_points(&shape, 1.0, 2, 1).unwrap();
    assert_eq!(sheared.point(4), Some(&[1.0, 1.0, 1.0][..]));
    assert_eq!(RenderMode::for_point_sets(&[shape, sheared]), Ok(RenderMode::ThreeD));
}

#[test]
fn square_matrix_dispatch_is_explicit() {
    let shape = batman();
    let m = builder::rotate(Dimension::Two, 30.0, Axis::Z).unwrap();
    let inferred = geom::apply_inferred(&shape, &m).unwrap();
    let rows = geom::apply(&shape, &m, PointLayout::RowVectors).unwrap();
    let cols = geom::apply(&shape, &m, PointLayout::ColumnVectors).unwrap();
    assert_eq!(inferred, rows);
    assert!(!rows.approx_eq(&cols, Tolerance::LOOSE));
    // Row vectors with M equal column vectors with M transposed.
    let cols_t = geom::apply(&shape, &m.transpose(), PointLayout::ColumnVectors).unwrap();
    assert!(rows.approx_eq(&cols_t, Tolerance::DEFAULT));
}

#[test]
fn invalid_axis_token_fails_everywhere() {
    let image = Raster::filled(4, 4, 3, 9).unwrap();
    assert!(matches!(
        "w".parse::<Axis>(),
        Err(TransformError::InvalidAxis { .. })
    ));
    assert!(matches!(
        builder::rotate_token(Dimension::Three, 45.0, "w"),
        Err(TransformError::InvalidAxis { .. })
    ));
    assert!(matches!(
        raster::reflect_token(&image, "w"),
        Err(TransformError::InvalidAxis { .. })
    ));
    assert!(matches!(
        raster::shear_token(&image, 0.5, "w"),
        Err(TransformError::InvalidAxis { .. })
    ));
}

#[test]
fn point_array_helpers_follow_raster_conventions() {
    let shape = batman();
    let rotated = raster::rotate_point_array(&shape, 45.0, 1.0).unwrap();
    assert_eq!(rotated.len(), shape.len());

    let scaled = raster::scale_point_array(&shape, 2.0).unwrap();
    let expected = geom::scale_points(&shape, &[2.0, 2.0]).unwrap();
    assert!(scaled.approx_eq(&expected, Tolerance::DEFAULT));

    let reflected = raster::reflect_point_array(&shape, Axis::Y).unwrap();
    assert_eq!(reflected.point(1), Some(&[0.2, 1.0][..]));

    let sheared = raster::shear_point_array(&shape, 1.0, Axis::X).unwrap();
    assert!(Tolerance::DEFAULT.approx_eq_coords(sheared.point(2).unwrap(), &[1.4, 1.0]));
}

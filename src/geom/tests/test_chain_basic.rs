use crate::geom::{ChainError, CurveChain, MoveKind, Point3, PointId, Tolerance, Vec3};
use std::ops::Sub;

const SPACING: f64 = 0.5;

fn two_segment_points() -> Vec<Point3> {
    vec![
        // first segment
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(3.0, 1.0, 0.0),
        Point3::new(4.0, 0.0, 0.0),
        // second segment, starting on the first segment's end
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(5.0, -1.0, 0.0),
        Point3::new(7.0, -1.0, 0.0),
        Point3::new(8.0, 0.0, 0.0),
    ]
}

fn two_segment_chain() -> CurveChain {
    CurveChain::from_control_points(&two_segment_points(), SPACING)
        .expect("chain should build")
}

#[test]
fn rejects_bad_control_point_counts() {
    let p = Point3::ORIGIN;
    for count in [0usize, 3, 5] {
        let points = vec![p; count];
        assert!(matches!(
            CurveChain::from_control_points(&points, SPACING),
            Err(ChainError::InvalidControlPointCount(n)) if n == count
        ));
    }
}

#[test]
fn rejects_invalid_spacing() {
    let points = vec![Point3::ORIGIN; 4];
    assert!(matches!(
        CurveChain::from_control_points(&points, 0.0),
        Err(ChainError::InvalidSpacing)
    ));
}

#[test]
fn rejects_discontinuous_groups() {
    let mut points = two_segment_points();
    points[4] = Point3::new(4.5, 0.0, 0.0);
    assert!(matches!(
        CurveChain::from_control_points(&points, SPACING),
        Err(ChainError::DiscontinuousChain { index: 1 })
    ));
}

#[test]
fn welds_coincident_joints_into_one_arena_slot() {
    let chain = two_segment_chain();
    assert_eq!(chain.segment_count(), 2);
    // 8 control points, one shared joint.
    assert_eq!(chain.points().len(), 7);
    let first = chain.segments()[0].ids();
    let second = chain.segments()[1].ids();
    assert_eq!(first[3], second[0]);
}

#[test]
fn owning_segments_distinguishes_joints_and_handles() {
    let chain = two_segment_chain();
    let joint = chain.segments()[0].ids()[3];
    let handle = chain.segments()[1].ids()[2];

    assert_eq!(chain.owning_segments(joint), vec![0, 1]);
    assert_eq!(chain.owning_segments(handle), vec![1]);
    assert!(chain.owning_segments(PointId::new(99)).is_empty());
}

#[test]
fn moving_unknown_point_is_a_no_op() {
    let mut chain = two_segment_chain();
    let before = chain.points().to_vec();
    chain.move_point(PointId::new(99), Point3::new(1.0, 1.0, 1.0), MoveKind::Drag);
    assert_eq!(chain.points(), &before[..]);
}

#[test]
fn joint_drag_carries_both_handles_rigidly() {
    let mut chain = two_segment_chain();
    let joint = chain.segments()[0].ids()[3];
    let h0 = chain.segments()[0].ids()[2];
    let h1 = chain.segments()[1].ids()[1];

    let joint_before = chain.point(joint).unwrap();
    let offset0 = chain.point(h0).unwrap().sub_point(joint_before);
    let offset1 = chain.point(h1).unwrap().sub_point(joint_before);

    let delta = Vec3::new(1.0, 0.0, 0.0);
    chain.move_point(joint, joint_before.add_vec(delta), MoveKind::Drag);

    let joint_after = chain.point(joint).unwrap();
    let tol = Tolerance::default_geom();
    assert!(tol.approx_eq_point3(joint_after, Point3::new(5.0, 0.0, 0.0)));

    // Handle offsets relative to the joint are unchanged.
    assert!(tol.approx_eq_vec3(chain.point(h0).unwrap().sub_point(joint_after), offset0));
    assert!(tol.approx_eq_vec3(chain.point(h1).unwrap().sub_point(joint_after), offset1));

    // Both segments were resampled: their sample tails track the new shape.
    let seg0_tail = chain.segments()[0].samples().last().copied().unwrap();
    assert!(tol.approx_eq_point3(seg0_tail, joint_after));
}

#[test]
fn joint_drag_round_trips() {
    let mut chain = two_segment_chain();
    let joint = chain.segments()[0].ids()[3];
    let h0 = chain.segments()[0].ids()[2];
    let h1 = chain.segments()[1].ids()[1];

    let before = (
        chain.point(joint).unwrap(),
        chain.point(h0).unwrap(),
        chain.point(h1).unwrap(),
    );

    let delta = Vec3::new(0.7, -0.3, 1.2);
    chain.move_point(joint, before.0.add_vec(delta), MoveKind::Drag);
    let moved = chain.point(joint).unwrap();
    chain.move_point(joint, moved.sub(delta), MoveKind::Drag);

    let tol = Tolerance::default_geom();
    assert!(tol.approx_eq_point3(chain.point(joint).unwrap(), before.0));
    assert!(tol.approx_eq_point3(chain.point(h0).unwrap(), before.1));
    assert!(tol.approx_eq_point3(chain.point(h1).unwrap(), before.2));
}

#[test]
fn handle_drag_mirrors_the_neighbor_handle() {
    let mut chain = two_segment_chain();
    let joint = chain.segments()[0].ids()[3];
    let moved_handle = chain.segments()[1].ids()[1];
    let neighbor = chain.segments()[0].ids()[2];

    let joint_pos = chain.point(joint).unwrap();
    let neighbor_dist = chain.point(neighbor).unwrap().distance_to(joint_pos);

    let target = Point3::new(4.0, 1.0, 0.0);
    chain.move_point(moved_handle, target, MoveKind::Drag);

    // The neighbor sits on the opposite side of the joint, at its own
    // original distance.
    let tol = Tolerance::default_geom();
    let expected_dir = joint_pos.sub_point(target).normalized().unwrap();
    let expected = joint_pos.add_vec(expected_dir.mul_scalar(neighbor_dist));
    assert!(tol.approx_eq_point3(chain.point(neighbor).unwrap(), expected));

    // Opposite, collinear tangent directions through the joint.
    let out_dir = chain.point(moved_handle).unwrap().sub_point(joint_pos).normalized().unwrap();
    let in_dir = chain.point(neighbor).unwrap().sub_point(joint_pos).normalized().unwrap();
    assert!((out_dir.dot(in_dir) + 1.0).abs() < 1e-9);
}

#[test]
fn boundary_handles_have_no_neighbor_to_mirror() {
    let mut chain = two_segment_chain();
    let first_handle = chain.segments()[0].ids()[1];
    let before = chain.points().to_vec();

    chain.move_point(first_handle, Point3::new(1.0, 2.0, 0.0), MoveKind::Drag);

    // Only the dragged handle itself changed.
    for (index, (a, b)) in before.iter().zip(chain.points()).enumerate() {
        if index == first_handle.index() {
            assert_ne!(a, b);
        } else {
            assert_eq!(a, b);
        }
    }
}

#[test]
fn place_mode_does_not_propagate() {
    let mut chain = two_segment_chain();
    let joint = chain.segments()[0].ids()[3];
    let h0 = chain.segments()[0].ids()[2];
    let h1 = chain.segments()[1].ids()[1];

    let h0_before = chain.point(h0).unwrap();
    let h1_before = chain.point(h1).unwrap();

    chain.move_point(joint, Point3::new(4.0, 2.0, 0.0), MoveKind::Place);

    assert_eq!(chain.point(h0).unwrap(), h0_before);
    assert_eq!(chain.point(h1).unwrap(), h1_before);
}

#[test]
fn extrusion_preview_continues_the_outgoing_tangent() {
    // Last segment ends at (1, 0, 0) with outgoing direction +X.
    let points = vec![
        Point3::new(-2.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
    ];
    let mut chain = CurveChain::from_control_points(&points, 0.25).expect("chain should build");

    chain.preview_extrusion(Point3::new(3.0, 0.0, 0.0));
    let pending = chain.pending().expect("preview should exist");

    let tol = Tolerance::default_geom();
    let (p1, p2) = pending.handles();
    // Half the chord (|target - p0| = 2) along +X from p0.
    assert!(tol.approx_eq_point3(p1, Point3::new(2.0, 0.0, 0.0)));
    // Pulled halfway from the target back toward p1.
    assert!(tol.approx_eq_point3(p2, Point3::new(2.5, 0.0, 0.0)));
    assert_eq!(pending.end(), Point3::new(3.0, 0.0, 0.0));
    assert_eq!(pending.start(), chain.segments()[0].ids()[3]);
    assert!(!pending.samples().is_empty());
}

#[test]
fn flatten_includes_pending_only_while_previewing() {
    let mut chain = two_segment_chain();
    let committed = chain.flatten_samples().len();

    chain.preview_extrusion(Point3::new(10.0, 2.0, 0.0));
    assert!(chain.flatten_samples().len() > committed);

    chain.cancel_extrusion();
    assert!(chain.pending().is_none());
    assert_eq!(chain.flatten_samples().len(), committed);
}

#[test]
fn commit_extrusion_appends_a_shared_joint_segment() {
    let mut chain = two_segment_chain();
    let points_before = chain.points().len();
    let last_end = chain.segments()[1].ids()[3];

    chain.preview_extrusion(Point3::new(10.0, 2.0, 0.0));
    let index = chain.commit_extrusion().expect("commit should succeed");

    assert_eq!(index, 2);
    assert_eq!(chain.segment_count(), 3);
    assert!(chain.pending().is_none());
    // p0 aliases the old last point; p1/p2/p3 are newly allocated.
    assert_eq!(chain.segments()[2].ids()[0], last_end);
    assert_eq!(chain.points().len(), points_before + 3);
    assert!(!chain.segments()[2].samples().is_empty());

    // Nothing pending: committing again is a no-op.
    assert!(chain.commit_extrusion().is_none());
}

#[test]
fn spacing_change_resamples_the_chain() {
    let mut chain = two_segment_chain();
    let coarse = chain.flatten_samples().len();

    chain.set_sample_spacing(SPACING / 4.0).expect("spacing should be valid");
    assert!(chain.flatten_samples().len() > 2 * coarse);

    assert!(matches!(
        chain.set_sample_spacing(-1.0),
        Err(ChainError::InvalidSpacing)
    ));
}

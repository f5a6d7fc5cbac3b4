use crate::mesh::CubeMesh;
use crate::surface::Surface;
use crate::transform::{apply_orientation, TransformStack};
use imu::OrientationState;

/// Draws the cube rotated by `state`. The stack is back at its base
/// transform when this returns.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    stack: &mut TransformStack,
    state: &OrientationState,
    cube: &CubeMesh,
) {
    let mut scope = stack.push();
    apply_orientation(&mut scope, state);
    surface.draw_cube(scope.top(), cube);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::base_view;
    use crate::mesh::CUBE;
    use crate::surface::testing::RecordingSurface;
    use crate::transform::orientation_transform;
    use nalgebra::Point3;

    #[test]
    fn frame_uses_base_view_then_orientation() {
        let mut surface = RecordingSurface::new();
        let mut stack = TransformStack::with_base(base_view());
        let state = OrientationState::new(90.0, 0.0, 0.0);

        draw_frame(&mut surface, &mut stack, &state, &CUBE);

        let model = surface.models[0];
        let moved = model * Point3::new(1.0, 0.0, 0.0);
        assert!((moved - Point3::new(0.0, 1.0, -5.0)).norm() < 1e-5);
        let expected = base_view() * orientation_transform(&state);
        assert!((model.to_homogeneous() - expected.to_homogeneous()).norm() < 1e-5);
    }

    #[test]
    fn frames_do_not_accumulate_rotation() {
        let mut surface = RecordingSurface::new();
        let mut stack = TransformStack::with_base(base_view());
        let state = OrientationState::new(15.0, 25.0, 35.0);

        for _ in 0..3 {
            draw_frame(&mut surface, &mut stack, &state, &CUBE);
        }

        assert_eq!(*stack.top(), base_view());
        assert_eq!(stack.depth(), 0);
        assert!(surface.models.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn every_face_and_edge_is_drawn() {
        let mut surface = RecordingSurface::new();
        let mut stack = TransformStack::new();
        draw_frame(&mut surface, &mut stack, &OrientationState::default(), &CUBE);
        assert_eq!(surface.faces_drawn, 6);
        assert_eq!(surface.edges_drawn, 12);
    }
}

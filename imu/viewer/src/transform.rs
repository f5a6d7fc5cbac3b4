//! Fixed-function style model transform with scoped save/restore.

use imu::OrientationState;
use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use std::ops::{Deref, DerefMut};

/// Current transform plus the states saved by [`TransformStack::push`].
///
/// Every operation post-multiplies, so each new rotation acts in the frame
/// left behind by the previous one.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Isometry3<f32>,
    saved: Vec<Isometry3<f32>>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::with_base(Isometry3::identity())
    }

    pub fn with_base(base: Isometry3<f32>) -> Self {
        TransformStack {
            current: base,
            saved: Vec::new(),
        }
    }

    pub fn top(&self) -> &Isometry3<f32> {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.current = self.current * Translation3::new(x, y, z);
    }

    pub fn rotate_degrees(&mut self, angle: f32, axis: &Unit<Vector3<f32>>) {
        self.current = self.current * UnitQuaternion::from_axis_angle(axis, angle.to_radians());
    }

    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        self.current * point
    }

    /// Saves the current transform; it comes back when the guard drops.
    pub fn push(&mut self) -> ScopedTransform<'_> {
        self.saved.push(self.current);
        ScopedTransform { stack: self }
    }

    fn pop(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ScopedTransform<'a> {
    stack: &'a mut TransformStack,
}

impl Deref for ScopedTransform<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &TransformStack {
        self.stack
    }
}

impl DerefMut for ScopedTransform<'_> {
    fn deref_mut(&mut self) -> &mut TransformStack {
        self.stack
    }
}

impl Drop for ScopedTransform<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}

/// Yaw about Z, then pitch about Y, then roll about X.
pub fn apply_orientation(stack: &mut TransformStack, state: &OrientationState) {
    stack.rotate_degrees(state.yaw as f32, &Vector3::z_axis());
    stack.rotate_degrees(state.pitch as f32, &Vector3::y_axis());
    stack.rotate_degrees(state.roll as f32, &Vector3::x_axis());
}

pub fn orientation_transform(state: &OrientationState) -> Isometry3<f32> {
    let mut stack = TransformStack::new();
    apply_orientation(&mut stack, state);
    *stack.top()
}

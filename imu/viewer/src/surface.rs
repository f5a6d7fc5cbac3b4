use crate::mesh::CubeMesh;
use nalgebra::Isometry3;

/// Something the cube can be drawn onto and presented.
pub trait Surface {
    /// Drains pending UI events. True if any of them asked to quit.
    fn poll_quit(&mut self) -> bool;

    /// Queues the cube for this frame: filled faces first, then the outline.
    fn draw_cube(&mut self, model: &Isometry3<f32>, cube: &CubeMesh);

    /// Clears, renders the queued frame and swaps buffers. Returns false if
    /// the surface was closed in the meantime.
    fn present(&mut self) -> bool;

    /// Releases the display context. Later calls do nothing.
    fn release(&mut self);

    fn is_released(&self) -> bool;
}

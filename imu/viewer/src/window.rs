use crate::camera::{Projection, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::material::FlatColorMaterial;
use crate::mesh::{quad_triangles, CubeMesh, EDGE_COLOR};
use crate::surface::Surface;
use kiss3d::camera::FixedView;
use kiss3d::event::{Action, Key, WindowEvent};
use kiss3d::light::Light;
use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Isometry3, Point3, Vector3};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};

pub const WINDOW_TITLE: &str = "MPU6050 Orientation Visualizer";

/// kiss3d window showing the cube.
///
/// The camera sits at the origin with an identity view, so the model
/// transform (base view included) maps cube space straight to eye space.
pub struct WindowSurface {
    window: Option<Window>,
    camera: FixedView,
    cube: SceneNode,
}

impl WindowSurface {
    pub fn open(cube: &CubeMesh) -> Self {
        let mut window = Window::new_with_size(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT);
        window.set_background_color(0.0, 0.0, 0.0);
        window.set_light(Light::StickToCamera);
        // FramePacer owns the frame rate.
        window.set_framerate_limit(None);

        let projection = Projection::for_window(WINDOW_WIDTH, WINDOW_HEIGHT);
        let camera = FixedView::new_with_frustrum(
            projection.fov_y_degrees.to_radians(),
            projection.near,
            projection.far,
        );

        let material = FlatColorMaterial::shared();
        if material.is_none() {
            warn!("Flat color shader unavailable, faces will be lit");
        }

        let mut group = window.add_group();
        for (face, [r, g, b]) in cube.colored_faces() {
            let mut node = group.add_mesh(face_mesh(cube, face), Vector3::new(1.0, 1.0, 1.0));
            node.set_color(r, g, b);
            node.enable_backface_culling(false);
            if let Some(material) = &material {
                node.set_material(Rc::clone(material));
            }
        }

        info!(
            width = WINDOW_WIDTH,
            height = WINDOW_HEIGHT,
            fov_y = projection.fov_y_degrees,
            "Opened display"
        );

        WindowSurface {
            window: Some(window),
            camera,
            cube: group,
        }
    }
}

fn face_mesh(cube: &CubeMesh, face: [usize; 4]) -> Rc<RefCell<Mesh>> {
    let (coords, triangles) = face_geometry(cube, face);
    Rc::new(RefCell::new(Mesh::new(coords, triangles, None, None, false)))
}

fn face_geometry(cube: &CubeMesh, face: [usize; 4]) -> (Vec<Point3<f32>>, Vec<Point3<u16>>) {
    let coords = cube
        .outward_quad(face)
        .iter()
        .map(|&i| cube.vertex(i))
        .collect();
    let triangles = quad_triangles([0, 1, 2, 3])
        .iter()
        .map(|&[a, b, c]| Point3::new(a as u16, b as u16, c as u16))
        .collect();
    (coords, triangles)
}

impl Surface for WindowSurface {
    fn poll_quit(&mut self) -> bool {
        let Some(window) = self.window.as_ref() else {
            return true;
        };

        let mut quit = false;
        for event in window.events().iter() {
            match event.value {
                WindowEvent::Close | WindowEvent::Key(Key::Escape, Action::Release, _) => {
                    quit = true
                }
                _ => {}
            }
        }
        quit
    }

    fn draw_cube(&mut self, model: &Isometry3<f32>, cube: &CubeMesh) {
        let Some(window) = self.window.as_mut() else {
            return;
        };

        self.cube.set_local_transformation(*model);

        let color = Point3::from(EDGE_COLOR);
        for (a, b) in cube.edge_segments() {
            window.draw_line(&(model * a), &(model * b), &color);
        }
    }

    fn present(&mut self) -> bool {
        match self.window.as_mut() {
            Some(window) => window.render_with_camera(&mut self.camera),
            None => false,
        }
    }

    fn release(&mut self) {
        if let Some(mut window) = self.window.take() {
            window.close();
            drop(window);
            info!("Released display");
        }
    }

    fn is_released(&self) -> bool {
        self.window.is_none()
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::CUBE;

    #[test]
    fn face_normals_point_out_of_the_cube() {
        for face in CUBE.faces {
            let (coords, triangles) = face_geometry(&CUBE, face);
            let center = coords.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / 4.0;
            for normal in Mesh::compute_normals_array(&coords, &triangles) {
                assert!(normal.dot(&center) > 0.0, "{:?} faces inward", face);
            }
        }
    }
}

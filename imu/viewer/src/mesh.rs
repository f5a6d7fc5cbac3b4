use nalgebra::{Point3, Vector3};

pub type Rgb = [f32; 3];

/// Fixed cube geometry spanning [-1, 1] on every axis.
#[derive(Debug)]
pub struct CubeMesh {
    pub vertices: [[f32; 3]; 8],
    /// Vertex index pairs for the wireframe outline.
    pub edges: [[usize; 2]; 12],
    /// Vertex index quads for the filled sides.
    pub faces: [[usize; 4]; 6],
    /// `face_colors[i]` fills `faces[i]`.
    pub face_colors: [Rgb; 6],
}

pub const EDGE_COLOR: Rgb = [0.0, 0.0, 0.0];

pub const CUBE: CubeMesh = CubeMesh {
    vertices: [
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ],
    edges: [
        [0, 1],
        [0, 3],
        [0, 4],
        [2, 1],
        [2, 3],
        [2, 7],
        [6, 3],
        [6, 4],
        [6, 7],
        [5, 1],
        [5, 4],
        [5, 7],
    ],
    faces: [
        [0, 1, 2, 3],
        [3, 2, 7, 6],
        [6, 7, 5, 4],
        [4, 5, 1, 0],
        [1, 5, 7, 2],
        [4, 0, 3, 6],
    ],
    face_colors: [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
        [1.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
    ],
};

impl CubeMesh {
    pub fn vertex(&self, index: usize) -> Point3<f32> {
        Point3::from(self.vertices[index])
    }

    /// Faces paired with their fill color, in drawing order.
    pub fn colored_faces(&self) -> impl Iterator<Item = ([usize; 4], Rgb)> + '_ {
        self.faces.iter().copied().zip(self.face_colors.iter().copied())
    }

    /// `face` reordered, if needed, so its triangles wind counter-clockwise
    /// seen from outside the cube.
    pub fn outward_quad(&self, face: [usize; 4]) -> [usize; 4] {
        if self.quad_normal(face).dot(&self.quad_center(face).coords) >= 0.0 {
            face
        } else {
            let [a, b, c, d] = face;
            [a, d, c, b]
        }
    }

    /// Right-handed normal of the quad's first triangle.
    pub fn quad_normal(&self, face: [usize; 4]) -> Vector3<f32> {
        let [a, b, c, _] = face.map(|i| self.vertex(i));
        (b - a).cross(&(c - a))
    }

    fn quad_center(&self, face: [usize; 4]) -> Point3<f32> {
        let sum = face
            .iter()
            .fold(Vector3::zeros(), |acc, &i| acc + self.vertex(i).coords);
        Point3::from(sum / 4.0)
    }

    pub fn edge_segments(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.edges
            .iter()
            .map(move |&[a, b]| (self.vertex(a), self.vertex(b)))
    }
}

/// Splits a quad into two triangles sharing its first vertex.
pub fn quad_triangles(quad: [usize; 4]) -> [[usize; 3]; 2] {
    let [a, b, c, d] = quad;
    [[a, b, c], [a, c, d]]
}

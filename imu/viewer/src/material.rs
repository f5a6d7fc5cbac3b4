use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::light::Light;
use kiss3d::resource::{Effect, Material, Mesh, ShaderAttribute, ShaderUniform};
use kiss3d::scene::ObjectData;
use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Vector3};
use std::cell::RefCell;
use std::rc::Rc;

/// Unlit material: every fragment gets the node's color as-is, so each cube
/// face shows its exact fill color whatever the light or winding.
pub struct FlatColorMaterial {
    shader: Effect,
    position: ShaderAttribute<Point3<f32>>,
    color: ShaderUniform<Point3<f32>>,
    transform: ShaderUniform<Matrix4<f32>>,
    scale: ShaderUniform<Matrix3<f32>>,
    view: ShaderUniform<Matrix4<f32>>,
    proj: ShaderUniform<Matrix4<f32>>,
}

impl FlatColorMaterial {
    /// Compiles the shader. `None` if one of its inputs cannot be bound.
    pub fn new() -> Option<Self> {
        let mut shader = Effect::new_from_str(VERTEX_SRC, FRAGMENT_SRC);
        shader.use_program();

        Some(FlatColorMaterial {
            position: shader.get_attrib("position")?,
            color: shader.get_uniform("color")?,
            transform: shader.get_uniform("transform")?,
            scale: shader.get_uniform("scale")?,
            view: shader.get_uniform("view")?,
            proj: shader.get_uniform("proj")?,
            shader,
        })
    }

    pub fn shared() -> Option<Rc<RefCell<Box<dyn Material + 'static>>>> {
        let material: Box<dyn Material + 'static> = Box::new(Self::new()?);
        Some(Rc::new(RefCell::new(material)))
    }
}

impl Material for FlatColorMaterial {
    fn render(
        &mut self,
        pass: usize,
        transform: &Isometry3<f32>,
        scale: &Vector3<f32>,
        camera: &mut dyn Camera,
        _: &Light,
        data: &ObjectData,
        mesh: &mut Mesh,
    ) {
        self.shader.use_program();
        self.position.enable();

        camera.upload(pass, &mut self.proj, &mut self.view);

        self.transform.upload(&transform.to_homogeneous());
        self.scale.upload(&Matrix3::from_diagonal(scale));
        self.color.upload(data.color());

        mesh.bind_coords(&mut self.position);
        mesh.bind_faces();

        Context::get().draw_elements(
            Context::TRIANGLES,
            mesh.num_pts() as i32,
            Context::UNSIGNED_SHORT,
            0,
        );

        mesh.unbind();
        self.position.disable();
    }
}

const VERTEX_SRC: &str = "#version 100
attribute vec3 position;
uniform mat4 proj;
uniform mat4 view;
uniform mat4 transform;
uniform mat3 scale;

void main() {
    gl_Position = proj * view * transform * mat4(scale) * vec4(position, 1.0);
}
";

const FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

uniform vec3 color;

void main() {
    gl_FragColor = vec4(color, 1.0);
}
";

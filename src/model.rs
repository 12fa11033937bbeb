//! OBJ model loading for demo scenes.
//!
//! Loads positions, normals, and index triples from an OBJ file into
//! rasterizer-ready vertices. Vertex colors default to opaque white;
//! materials and texture coordinates are ignored.

use std::fmt;
use std::path::Path;

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::vertex::Vertex;

#[derive(Debug)]
pub enum LoadError {
    Obj(tobj::LoadError),
    /// The file parsed but contained no triangles.
    NoGeometry,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed to load OBJ file: {e}"),
            LoadError::NoGeometry => write!(f, "OBJ file contains no triangles"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::NoGeometry => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

/// A triangle mesh in object space, with w=1 positions ready for a
/// vertex transform.
pub struct Model {
    vertices: Vec<Vertex>,
    faces: Vec<[usize; 3]>,
}

impl Model {
    /// Load every object in an OBJ file into a single mesh.
    ///
    /// Faces are triangulated and re-indexed on load so `faces` can be
    /// fed to `Renderer::render_indexed` directly.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let (objects, _materials) = tobj::load_obj(path.as_ref(), &tobj::GPU_LOAD_OPTIONS)?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for object in &objects {
            let mesh = &object.mesh;
            let base = vertices.len();

            for (i, position) in mesh.positions.chunks_exact(3).enumerate() {
                let normal = if mesh.normals.len() >= (i + 1) * 3 {
                    Vec3::new(
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    )
                } else {
                    Vec3::ZERO
                };

                vertices.push(Vertex::new(
                    Vec4::point(position[0], position[1], position[2]),
                    Vec4::ONE,
                    normal,
                ));
            }

            for triple in mesh.indices.chunks_exact(3) {
                faces.push([
                    base + triple[0] as usize,
                    base + triple[1] as usize,
                    base + triple[2] as usize,
                ]);
            }
        }

        if faces.is_empty() {
            return Err(LoadError::NoGeometry);
        }

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_triangle() {
        let path = write_temp_obj(
            "softrast_model_triangle.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let model = Model::from_obj(&path).unwrap();
        assert_eq!(model.vertices().len(), 3);
        assert_eq!(model.faces().len(), 1);
        assert_eq!(model.vertices()[1].position.w, 1.0);
        assert_eq!(model.vertices()[0].color, Vec4::ONE);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn quad_faces_are_triangulated() {
        let path = write_temp_obj(
            "softrast_model_quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );

        let model = Model::from_obj(&path).unwrap();
        assert_eq!(model.faces().len(), 2);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_file_reports_no_geometry() {
        let path = write_temp_obj("softrast_model_empty.obj", "# nothing here\n");

        match Model::from_obj(&path) {
            Err(LoadError::NoGeometry) => {}
            other => panic!("expected NoGeometry, got {:?}", other.map(|_| ())),
        }

        std::fs::remove_file(path).ok();
    }
}

use nalgebra::{Point3, Vector3};

use crate::misc::FloatingPoint;

/// Triangle mesh with per vertex normals
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonMesh<T: FloatingPoint> {
    vertices: Vec<Point3<T>>,
    faces: Vec<[usize; 3]>,
    normals: Vec<Vector3<T>>,
}

impl<T: FloatingPoint> Default for PolygonMesh<T> {
    fn default() -> Self {
        Self::new(vec![], vec![])
    }
}

impl<T: FloatingPoint> PolygonMesh<T> {
    /// Create a mesh and derive its normals from the faces
    pub fn new(vertices: Vec<Point3<T>>, faces: Vec<[usize; 3]>) -> Self {
        let mut mesh = Self {
            vertices,
            faces,
            normals: vec![],
        };
        mesh.compute_normals();
        mesh
    }

    pub fn vertices(&self) -> &[Point3<T>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn normals(&self) -> &[Vector3<T>] {
        &self.normals
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals.clear();
    }

    /// Replace the buffers in place and recompute normals
    pub fn replace(&mut self, vertices: Vec<Point3<T>>, faces: Vec<[usize; 3]>) {
        self.vertices = vertices;
        self.faces = faces;
        self.compute_normals();
    }

    /// Recompute vertex normals from the triangles.
    /// Each face contributes its area weighted normal to its three corners,
    /// so vertices shared between faces shade smoothly.
    /// Vertices no face references get a zero normal.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for [a, b, c] in self.faces.iter() {
            let (pa, pb, pc) = (&self.vertices[*a], &self.vertices[*b], &self.vertices[*c]);
            let n = (pb - pa).cross(&(pc - pa));
            normals[*a] += n;
            normals[*b] += n;
            normals[*c] += n;
        }
        normals.iter_mut().for_each(|n| {
            let norm_squared = n.norm_squared();
            if norm_squared > T::degenerate_tolerance() {
                *n /= norm_squared.sqrt();
            } else {
                *n = Vector3::zeros();
            }
        });
        self.normals = normals;
    }

    pub fn triangles(&self) -> Vec<[Point3<T>; 3]> {
        self.faces
            .iter()
            .map(|[a, b, c]| [self.vertices[*a], self.vertices[*b], self.vertices[*c]])
            .collect()
    }

    pub fn area(&self) -> T {
        let triangles = self.triangles();
        triangles
            .iter()
            .map(|[a, b, c]| {
                let ab = b - a;
                let ac = c - a;
                ab.cross(&ac).norm()
            })
            .fold(T::zero(), |a, b| a + b)
            / (T::one() + T::one())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn square_normals_face_up() {
        let mesh = PolygonMesh::new(
            vec![
                Point3::new(0., 0., 0.),
                Point3::new(1., 0., 0.),
                Point3::new(1., 1., 0.),
                Point3::new(0., 1., 0.),
                Point3::new(5., 5., 5.),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        assert_relative_eq!(mesh.area(), 1.);
        for n in &mesh.normals()[..4] {
            assert_relative_eq!(n, &Vector3::z());
        }
        // unreferenced
        assert_eq!(mesh.normals()[4], Vector3::zeros());
    }

    #[test]
    fn shared_vertices_average_faces() {
        // two faces folded along the x axis at a right angle
        let mesh = PolygonMesh::new(
            vec![
                Point3::new(0., 0., 0.),
                Point3::new(1., 0., 0.),
                Point3::new(0., 1., 0.),
                Point3::new(0., 0., 1.),
            ],
            vec![[0, 1, 2], [1, 0, 3]],
        );
        let diagonal = Vector3::new(0., 1., 1.).normalize();
        assert_relative_eq!(mesh.normals()[0], diagonal, epsilon = 1e-12);
        assert_relative_eq!(mesh.normals()[1], diagonal, epsilon = 1e-12);
        assert_relative_eq!(mesh.normals()[2], Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(mesh.normals()[3], Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn replace_and_clear() {
        let mut mesh = PolygonMesh::<f64>::default();
        assert!(mesh.is_empty());
        mesh.replace(
            vec![
                Point3::new(0., 0., 0.),
                Point3::new(2., 0., 0.),
                Point3::new(0., 2., 0.),
            ],
            vec![[0, 1, 2]],
        );
        assert_eq!(mesh.normals().len(), 3);
        assert_relative_eq!(mesh.area(), 2.);
        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.faces().is_empty());
        assert!(mesh.normals().is_empty());
    }
}

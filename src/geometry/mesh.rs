use glam::Vec3;
use std::io::BufReader;

pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }
    pub fn load_obj(source: &[u8]) -> Self {
        let mut reader = BufReader::new(source);
        if let Ok((models, _materials)) = tobj::load_obj_buf(
            &mut reader,
            &tobj::LoadOptions {
                single_index: true,
                ..Default::default()
            },
            |_matpath| Err(tobj::LoadError::GenericFailure),
        ) {
            let mut positions = Vec::new();
            let mut indices = Vec::new();
            for model in models {
                let mesh = model.mesh;
                let offset = positions.len() as u32;
                for p in mesh.positions.chunks_exact(3) {
                    positions.push(Vec3::new(p[0], p[1], p[2]));
                }
                for i in mesh.indices {
                    indices.push(offset + i);
                }
            }
            Self::new(positions, indices)
        } else {
            Self::new(Vec::new(), Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_positions_and_indices() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = Mesh::load_obj(obj);
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.positions[1], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn garbage_input_yields_empty_mesh() {
        let mesh = Mesh::load_obj(b"not an obj file");
        assert!(mesh.positions.is_empty());
        assert!(mesh.indices.is_empty());
    }
}

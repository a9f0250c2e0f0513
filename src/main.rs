use std::env;

use bvh_toy::geometry::Mesh;
use bvh_toy::scene::bvh::{Config, Tree};
use bvh_toy::scene::{Primitive, Sphere, Triangle};
use glam::Vec3;
use log::info;
use rand::prelude::*;

fn random_spheres(count: usize) -> Vec<Primitive> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let center = Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            let radius = rng.gen_range(0.1..2.0);
            Primitive::Sphere(Sphere::new(center, radius))
        })
        .collect()
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let primitives = match args.get(1) {
        Some(path) => {
            let source = std::fs::read(path).expect("failed to read obj file");
            let mesh = Mesh::load_obj(&source);
            Triangle::from_mesh(&mesh)
                .into_iter()
                .map(Primitive::Triangle)
                .collect()
        }
        None => random_spheres(512),
    };
    info!("indexing {} primitives", primitives.len());
    let mut tree = Tree::new(&primitives, Config::default()).unwrap();
    for i in 0..primitives.len() as u32 {
        tree.insert(i).unwrap();
    }
    let buffer = tree.encode();
    info!(
        "depth {}, {} nodes, encoded {} floats ({} bytes)",
        tree.depth(),
        tree.node_count(),
        buffer.len(),
        tree.encode_bytes().len()
    );
}

use crate::geometry::{Aabb, Mesh};
use crate::scene::Bounded;
use glam::Vec3;

#[derive(Copy, Clone, Debug)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Bounded for Sphere {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.center - self.radius, self.center + self.radius)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }
    pub fn from_mesh(mesh: &Mesh) -> Vec<Self> {
        mesh.indices
            .chunks_exact(3)
            .map(|t| {
                Self::new(
                    mesh.positions[t[0] as usize],
                    mesh.positions[t[1] as usize],
                    mesh.positions[t[2] as usize],
                )
            })
            .collect()
    }
}

impl Bounded for Triangle {
    fn bounds(&self) -> Aabb {
        Aabb::from_point(self.a)
            .union_point(self.b)
            .union_point(self.c)
    }
}

#[derive(Copy, Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Bounded for Primitive {
    fn bounds(&self) -> Aabb {
        match self {
            Primitive::Sphere(sphere) => sphere.bounds(),
            Primitive::Triangle(triangle) => triangle.bounds(),
        }
    }
}

use std::ops::{Add, Index, Mul, Sub};

use crate::vec3::Vec3;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec4<T>([T; 4]);

impl<T> Vec4<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Vec4([x, y, z, w])
    }

    #[inline]
    pub fn x(&self) -> &T {
        self.index(0)
    }

    #[inline]
    pub fn y(&self) -> &T {
        self.index(1)
    }

    #[inline]
    pub fn z(&self) -> &T {
        self.index(2)
    }

    #[inline]
    pub fn w(&self) -> &T {
        self.index(3)
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec4<T> {
    #[inline]
    pub fn dot(&self, other: &Vec4<T>) -> T {
        self.0[0] * other.0[0]
            + self.0[1] * other.0[1]
            + self.0[2] * other.0[2]
            + self.0[3] * other.0[3]
    }
}

impl<T: Copy + Mul<Output = T>> Vec4<T> {
    #[inline]
    pub fn scale(&self, factor: T) -> Vec4<T> {
        Vec4([
            self.0[0] * factor,
            self.0[1] * factor,
            self.0[2] * factor,
            self.0[3] * factor,
        ])
    }
}

impl Vec4<f64> {
    #[inline]
    pub fn len(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Panics when the norm is zero.
    #[inline]
    pub fn unit(&self) -> Vec4<f64> {
        let len = self.len();
        assert!(len != 0.0, "cannot normalize a zero vector");

        Vec4([
            self.0[0] / len,
            self.0[1] / len,
            self.0[2] / len,
            self.0[3] / len,
        ])
    }
}

impl<T: Copy> From<[T; 4]> for Vec4<T> {
    #[inline]
    fn from(v: [T; 4]) -> Self {
        Vec4::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Vec3<f64>> for Vec4<f64> {
    /// Lifts a point into homogeneous coordinates with w = 1.
    #[inline]
    fn from(v: Vec3<f64>) -> Self {
        Vec4::new(v.x, v.y, v.z, 1.0)
    }
}

impl From<Vec4<f64>> for Vec3<f64> {
    #[inline]
    fn from(v: Vec4<f64>) -> Self {
        Vec3::new(*v.x(), *v.y(), *v.z())
    }
}

impl<T: Add<Output = T> + Copy> Add for Vec4<T> {
    type Output = Vec4<T>;

    #[inline]
    fn add(self, other: Vec4<T>) -> Self::Output {
        Vec4([
            self.0[0] + other.0[0],
            self.0[1] + other.0[1],
            self.0[2] + other.0[2],
            self.0[3] + other.0[3],
        ])
    }
}

impl<T: Sub<Output = T> + Copy> Sub for Vec4<T> {
    type Output = Vec4<T>;

    #[inline]
    fn sub(self, other: Vec4<T>) -> Self::Output {
        Vec4([
            self.0[0] - other.0[0],
            self.0[1] - other.0[1],
            self.0[2] - other.0[2],
            self.0[3] - other.0[3],
        ])
    }
}

impl<T> Index<usize> for Vec4<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[test]
fn homogeneous_round_trip() {
    let v = Vec3::new(1.0, -2.0, 3.0);
    let h = Vec4::from(v);

    assert_eq!(1.0, *h.w());
    assert_eq!(v, Vec3::from(h));
}

#[test]
fn dot_product() {
    let a = Vec4::new(1, 2, 3, 4);
    let b = Vec4::new(4, 3, 2, 1);
    assert_eq!(20, a.dot(&b));
}

#[test]
fn arithmetic() {
    let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
    let b = Vec4::new(4.0, 3.0, 2.0, 1.0);

    assert_eq!(Vec4::new(5.0, 5.0, 5.0, 5.0), a + b);
    assert_eq!(Vec4::new(-3.0, -1.0, 1.0, 3.0), a - b);
    assert_eq!(Vec4::new(2.0, 4.0, 6.0, 8.0), a.scale(2.0));
}

#[test]
fn unit_has_length_one() {
    let v = Vec4::new(1.0, -2.0, 2.0, 4.0);
    assert_eq!(5.0, v.len());
    assert!((v.unit().len() - 1.0).abs() < 1e-12);
}

#[test]
#[should_panic]
fn unit_of_zero_vector_panics() {
    Vec4::new(0.0, 0.0, 0.0, 0.0).unit();
}

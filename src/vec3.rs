use std::ops::{Add, Index, Mul, Neg, Sub};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vec3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn scale(&self, factor: T) -> Vec3<T> {
        Vec3 {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn dot(&self, other: &Vec3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Copy + Sub<Output = T> + Mul<Output = T>> Vec3<T> {
    /// Right-handed cross product. The result is orthogonal to both inputs
    /// with magnitude equal to the area of the parallelogram they span.
    #[inline]
    pub fn cross(&self, other: &Vec3<T>) -> Vec3<T> {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Vec3<f64> {
    #[inline]
    pub fn len(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Panics when the norm is zero.
    #[inline]
    pub fn unit(&self) -> Vec3<f64> {
        let len = self.len();
        assert!(len != 0.0, "cannot normalize a zero vector");

        Vec3 {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }
}

impl<T: Add<Output = T>> Add for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn add(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn sub(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Neg<Output = T>> Neg for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn neg(self) -> Self::Output {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl<T> Index<usize> for Vec3<T> {
    type Output = T;

    /// Valid indices are 0..3; anything else is a caller bug.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of range: {}", index),
        }
    }
}

#[test]
fn cross_is_right_handed() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);

    assert_eq!(Vec3::new(0.0, 0.0, 1.0), x.cross(&y));
    assert_eq!(Vec3::new(0.0, 0.0, -1.0), y.cross(&x));
}

#[test]
fn cross_is_orthogonal() {
    let a: Vec3<f64> = Vec3::new(1.5, -2.0, 0.25);
    let b: Vec3<f64> = Vec3::new(0.5, 3.0, -1.0);
    let c = a.cross(&b);

    assert!(c.dot(&a).abs() < 1e-12);
    assert!(c.dot(&b).abs() < 1e-12);
}

#[test]
fn unit_has_length_one() {
    let v = Vec3::new(3.0, 4.0, 12.0);
    assert!((v.unit().len() - 1.0).abs() < 1e-12);
}

#[test]
#[should_panic]
fn unit_of_zero_vector_panics() {
    Vec3::new(0.0, 0.0, 0.0).unit();
}

#[test]
#[should_panic]
fn index_out_of_range_panics() {
    let v = Vec3::new(1, 2, 3);
    let _ = v[3];
}

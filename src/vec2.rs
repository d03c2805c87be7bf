use std::ops::{Add, Index, Mul, Sub};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vec2<T> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy + Mul<Output = T>> Vec2<T> {
    #[inline]
    pub fn scale(&self, factor: T) -> Vec2<T> {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec2<T> {
    #[inline]
    pub fn dot(&self, other: &Vec2<T>) -> T {
        self.x * other.x + self.y * other.y
    }
}

impl Vec2<f64> {
    #[inline]
    pub fn len(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Panics when the norm is zero.
    #[inline]
    pub fn unit(&self) -> Vec2<f64> {
        let len = self.len();
        assert!(len != 0.0, "cannot normalize a zero vector");

        Vec2 {
            x: self.x / len,
            y: self.y / len,
        }
    }
}

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Vec2<T>;

    #[inline]
    fn add(self, other: Vec2<T>) -> Self::Output {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Vec2<T>;

    #[inline]
    fn sub(self, other: Vec2<T>) -> Self::Output {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T> Index<usize> for Vec2<T> {
    type Output = T;

    /// Valid indices are 0..2; anything else is a caller bug.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 index out of range: {}", index),
        }
    }
}

#[test]
fn dot_and_len() {
    let a = Vec2::new(3.0, 4.0);
    assert_eq!(25.0, a.dot(&a));
    assert_eq!(5.0, a.len());
}

#[test]
fn arithmetic() {
    let a = Vec2::new(1.0, 2.0);
    let b = Vec2::new(3.0, -1.0);

    assert_eq!(Vec2::new(4.0, 1.0), a + b);
    assert_eq!(Vec2::new(-2.0, 3.0), a - b);
    assert_eq!(Vec2::new(2.0, 4.0), a.scale(2.0));
}

#[test]
fn unit_has_length_one() {
    let v = Vec2::new(3.0, 4.0);
    assert!((v.unit().len() - 1.0).abs() < 1e-12);
}

#[test]
#[should_panic]
fn unit_of_zero_vector_panics() {
    Vec2::new(0.0, 0.0).unit();
}

#[test]
#[should_panic]
fn index_out_of_range_panics() {
    let v = Vec2::new(1, 2);
    let _ = v[2];
}

use std::ops::{Index, IndexMut, Mul};

use crate::vec3::Vec3;
use crate::vec4::Vec4;

/// Largest supported dimension in either direction. The recursive
/// determinant below costs O(n!), which is only tolerable under this cap.
pub const MAX_DIM: usize = 4;

///
/// Row-major matrix with dimensions fixed at construction, capped at
/// [`MAX_DIM`]. Index notation is: i, j - row, column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: [[f64; MAX_DIM]; MAX_DIM],
}

impl Matrix {
    pub fn zero(rows: usize, cols: usize) -> Self {
        assert!(
            (1..=MAX_DIM).contains(&rows) && (1..=MAX_DIM).contains(&cols),
            "matrix dimensions must lie in 1..={}, got {}x{}",
            MAX_DIM,
            rows,
            cols
        );

        Matrix {
            rows,
            cols,
            data: [[0.0; MAX_DIM]; MAX_DIM],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zero(n, n);
        for i in 0..n {
            m.data[i][i] = 1.0;
        }
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zero(self.cols, self.rows);
        for i in 0..self.cols {
            for j in 0..self.rows {
                out.data[i][j] = self.data[j][i];
            }
        }
        out
    }

    /// Submatrix obtained by deleting `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> Matrix {
        let mut sub = Matrix::zero(self.rows - 1, self.cols - 1);
        let mut si = 0;
        for i in 0..self.rows {
            if i == row {
                continue;
            }
            let mut sj = 0;
            for j in 0..self.cols {
                if j == col {
                    continue;
                }
                sub.data[si][sj] = self.data[i][j];
                sj += 1;
            }
            si += 1;
        }
        sub
    }

    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col).det()
    }

    /// Laplace expansion along the first row, recursing through minors.
    /// Square matrices only.
    pub fn det(&self) -> f64 {
        assert_eq!(self.rows, self.cols, "determinant requires a square matrix");

        if self.rows == 1 {
            return self.data[0][0];
        }
        (0..self.cols).map(|j| self.data[0][j] * self.cofactor(0, j)).sum()
    }

    /// Inverse as adjugate over determinant: the adjugate is the transpose
    /// of the cofactor matrix. Panics on non-square or singular input.
    pub fn invert(&self) -> Matrix {
        let det = self.det();
        assert!(det != 0.0, "cannot invert a singular matrix");

        let mut out = Matrix::zero(self.rows, self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[i][j] = self.cofactor(j, i) / det;
            }
        }
        out
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Matrix {
    fn from(v: [[f64; C]; R]) -> Self {
        let mut m = Matrix::zero(R, C);
        for (row, src) in m.data.iter_mut().zip(v.iter()) {
            row[..C].copy_from_slice(src);
        }
        m
    }
}

impl Index<usize> for Matrix {
    type Output = [f64];

    #[inline]
    fn index(&self, row: usize) -> &Self::Output {
        assert!(row < self.rows, "row index out of range: {}", row);
        &self.data[row][..self.cols]
    }
}

impl IndexMut<usize> for Matrix {
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        assert!(row < self.rows, "row index out of range: {}", row);
        let cols = self.cols;
        &mut self.data[row][..cols]
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Self::Output {
        assert_eq!(
            self.cols, other.rows,
            "matrix dimensions do not conform: {}x{} * {}x{}",
            self.rows, self.cols, other.rows, other.cols
        );

        let mut out = Matrix::zero(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                for k in 0..self.cols {
                    out.data[i][j] += self.data[i][k] * other.data[k][j];
                }
            }
        }
        out
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, factor: f64) -> Self::Output {
        let mut out = self;
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[i][j] *= factor;
            }
        }
        out
    }
}

impl<'a> Mul<Vec3<f64>> for &'a Matrix {
    type Output = Vec3<f64>;

    fn mul(self, v: Vec3<f64>) -> Self::Output {
        assert!(self.rows == 3 && self.cols == 3, "Vec3 product requires a 3x3 matrix");

        Vec3::new(
            self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z,
            self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z,
            self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z,
        )
    }
}

impl<'a> Mul<Vec4<f64>> for &'a Matrix {
    type Output = Vec4<f64>;

    fn mul(self, v: Vec4<f64>) -> Self::Output {
        assert!(self.rows == 4 && self.cols == 4, "Vec4 product requires a 4x4 matrix");

        Vec4::new(
            self.data[0][0] * v[0] + self.data[0][1] * v[1] + self.data[0][2] * v[2] + self.data[0][3] * v[3],
            self.data[1][0] * v[0] + self.data[1][1] * v[1] + self.data[1][2] * v[2] + self.data[1][3] * v[3],
            self.data[2][0] * v[0] + self.data[2][1] * v[1] + self.data[2][2] * v[2] + self.data[2][3] * v[3],
            self.data[3][0] * v[0] + self.data[3][1] * v[1] + self.data[3][2] * v[2] + self.data[3][3] * v[3],
        )
    }
}

#[cfg(test)]
fn approx_eq(a: &Matrix, b: &Matrix, eps: f64) -> bool {
    a.rows == b.rows
        && a.cols == b.cols
        && (0..a.rows).all(|i| (0..a.cols).all(|j| (a[i][j] - b[i][j]).abs() < eps))
}

#[test]
fn det_of_identity_is_one() {
    for n in 1..=MAX_DIM {
        assert_eq!(1.0, Matrix::identity(n).det());
    }
}

#[test]
fn det_known_values() {
    assert_eq!(7.0, Matrix::from([[7.0]]).det());
    assert_eq!(-2.0, Matrix::from([[1.0, 2.0], [3.0, 4.0]]).det());

    let m = Matrix::from([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [0.0, 1.0, 1.0]]);
    assert_eq!(3.0, m.det());
}

#[test]
fn inverse_times_original_is_identity() {
    let matrices = [
        Matrix::from([[4.0, 7.0], [2.0, 6.0]]),
        Matrix::from([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [0.0, 1.0, 1.0]]),
        Matrix::from([
            [1.0, 0.0, 2.0, -1.0],
            [3.0, 0.0, 0.0, 5.0],
            [2.0, 1.0, 4.0, -3.0],
            [1.0, 0.0, 5.0, 0.0],
        ]),
    ];

    for m in &matrices {
        let product = m.invert() * *m;
        assert!(approx_eq(&product, &Matrix::identity(m.rows()), 1e-9));
    }
}

#[test]
fn inverse_of_random_matrices() {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    for n in 1..=MAX_DIM {
        let mut checked = 0;
        while checked < 8 {
            let mut m = Matrix::zero(n, n);
            for i in 0..n {
                for j in 0..n {
                    m[i][j] = rng.gen_range(-5.0..5.0);
                }
            }
            // a nearly singular draw would only test float noise
            if m.det().abs() < 1e-3 {
                continue;
            }

            let product = m.invert() * m;
            assert!(approx_eq(&product, &Matrix::identity(n), 1e-6));
            checked += 1;
        }
    }
}

#[test]
fn transpose_twice_is_original() {
    let m = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    assert_eq!(m, m.transpose().transpose());
}

#[test]
fn mul_matrix_vec() {
    let matrix = Matrix::from([
        [1.0, 0.0, 0.0, 10.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let vec = Vec4::new(10.0, 10.0, 10.0, 1.0);

    assert_eq!(Vec4::new(20.0, 10.0, 10.0, 1.0), &matrix * vec);
}

#[test]
fn scalar_scaling() {
    let m = Matrix::from([[1.0, -2.0], [0.5, 4.0]]);
    assert_eq!(Matrix::from([[2.0, -4.0], [1.0, 8.0]]), m * 2.0);
}

#[test]
#[should_panic]
fn det_of_non_square_panics() {
    Matrix::zero(2, 3).det();
}

#[test]
#[should_panic]
fn invert_singular_panics() {
    Matrix::from([[1.0, 2.0], [2.0, 4.0]]).invert();
}

#[test]
#[should_panic]
fn oversized_construction_panics() {
    Matrix::zero(5, 5);
}

#[test]
#[should_panic]
fn nonconforming_mul_panics() {
    let _ = Matrix::zero(2, 3) * Matrix::zero(2, 3);
}

//! Indexed triangle mesh loaded from the Wavefront OBJ `v`/`f` subset.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::vec3::Vec3;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("i/o error while reading mesh: {0}")]
    Read(#[from] io::Error),

    #[error("line {line}: vertex needs three coordinates")]
    ShortVertex { line: usize },

    #[error("line {line}: malformed vertex coordinate `{token}`")]
    BadCoordinate { line: usize, token: String },

    #[error("line {line}: face needs three vertices")]
    ShortFace { line: usize },

    #[error("line {line}: malformed face index `{token}`")]
    BadIndex { line: usize, token: String },

    #[error("face {face} references vertex {index}, model has {nverts}")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        nverts: usize,
    },
}

impl ModelError {
    /// True for errors of the unreadable-source kind, which a caller may
    /// choose to degrade on instead of aborting. Parse errors are fatal.
    pub fn is_io(&self) -> bool {
        matches!(self, ModelError::Open { .. } | ModelError::Read(..))
    }
}

/// Immutable after construction: an ordered vertex list plus one flat list
/// of face-vertex indices, three per triangle. All indices are validated
/// against the vertex count at load time.
#[derive(Debug, Default)]
pub struct Model {
    verts: Vec<Vec3<f64>>,
    faces: Vec<usize>,
}

impl Model {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelError::Open {
            path: path.into(),
            source,
        })?;

        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ModelError> {
        let mut verts = Vec::new();
        let mut faces = Vec::new();

        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    let mut coords = [0.0; 3];
                    for c in coords.iter_mut() {
                        let token = tokens.next().ok_or(ModelError::ShortVertex { line: n + 1 })?;
                        *c = token.parse().map_err(|_| ModelError::BadCoordinate {
                            line: n + 1,
                            token: token.into(),
                        })?;
                    }
                    verts.push(Vec3::new(coords[0], coords[1], coords[2]));
                }
                Some("f") => {
                    // Faces are assumed pre-triangulated: only the first
                    // three corner tokens count. A token may carry
                    // texture/normal parts (`idx/idx/idx`); only the part
                    // before the first slash is used.
                    for _ in 0..3 {
                        let token = tokens.next().ok_or(ModelError::ShortFace { line: n + 1 })?;
                        let index = token.split('/').next().unwrap_or(token);
                        let index: usize = index.parse().map_err(|_| ModelError::BadIndex {
                            line: n + 1,
                            token: token.into(),
                        })?;
                        if index == 0 {
                            // OBJ indices are 1-based
                            return Err(ModelError::BadIndex {
                                line: n + 1,
                                token: token.into(),
                            });
                        }
                        faces.push(index - 1);
                    }
                }
                // normals, texture coordinates, groups etc. are outside
                // the subset and skipped
                _ => {}
            }
        }

        // Validate now so face lookups cannot go out of range later.
        for (i, &index) in faces.iter().enumerate() {
            if index >= verts.len() {
                return Err(ModelError::IndexOutOfRange {
                    face: i / 3,
                    index: index + 1,
                    nverts: verts.len(),
                });
            }
        }

        Ok(Model { verts, faces })
    }

    #[inline]
    pub fn nverts(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn nfaces(&self) -> usize {
        self.faces.len() / 3
    }

    /// 0 <= i < nverts().
    #[inline]
    pub fn vert(&self, i: usize) -> Vec3<f64> {
        self.verts[i]
    }

    /// The `nth` corner (0..3) of face `iface`.
    #[inline]
    pub fn vert_of_face(&self, iface: usize, nth: usize) -> Vec3<f64> {
        assert!(nth < 3, "a triangle has corners 0..3, got {}", nth);
        self.verts[self.faces[iface * 3 + nth]]
    }
}

#[cfg(test)]
use std::io::Cursor;

#[test]
fn single_triangle_round_trip() {
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
    let model = Model::from_reader(Cursor::new(src)).unwrap();

    assert_eq!(3, model.nverts());
    assert_eq!(1, model.nfaces());
    assert_eq!(Vec3::new(0.0, 0.0, 0.0), model.vert_of_face(0, 0));
    assert_eq!(Vec3::new(1.0, 0.0, 0.0), model.vert_of_face(0, 1));
    assert_eq!(Vec3::new(0.0, 1.0, 0.0), model.vert_of_face(0, 2));
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let src = "# a comment\n\nv 1 2 3\n\n# another\nv 4 5 6\n";
    let model = Model::from_reader(Cursor::new(src)).unwrap();

    assert_eq!(2, model.nverts());
    assert_eq!(0, model.nfaces());
    assert_eq!(Vec3::new(4.0, 5.0, 6.0), model.vert(1));
}

#[test]
fn slash_tokens_use_first_component() {
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/4/6 2//3 3/9\n";
    let model = Model::from_reader(Cursor::new(src)).unwrap();

    assert_eq!(1, model.nfaces());
    assert_eq!(Vec3::new(0.0, 1.0, 0.0), model.vert_of_face(0, 2));
}

#[test]
fn only_first_three_face_tokens_are_consumed() {
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3 4\n";
    let model = Model::from_reader(Cursor::new(src)).unwrap();

    assert_eq!(1, model.nfaces());
}

#[test]
fn unknown_prefixes_are_ignored() {
    let src = "vn 0 0 1\nvt 0.5 0.5\ng head\nv 0 0 0\n";
    let model = Model::from_reader(Cursor::new(src)).unwrap();

    assert_eq!(1, model.nverts());
}

#[test]
fn malformed_face_index_is_fatal() {
    let src = "v 0 0 0\nf 1 two 3\n";
    let err = Model::from_reader(Cursor::new(src)).unwrap_err();

    assert!(matches!(err, ModelError::BadIndex { line: 2, .. }));
    assert!(!err.is_io());
}

#[test]
fn malformed_vertex_coordinate_is_fatal() {
    let src = "v 0 zero 0\n";
    let err = Model::from_reader(Cursor::new(src)).unwrap_err();

    assert!(matches!(err, ModelError::BadCoordinate { line: 1, .. }));
}

#[test]
fn short_face_line_is_fatal() {
    let src = "v 0 0 0\nv 1 0 0\nf 1 2\n";
    let err = Model::from_reader(Cursor::new(src)).unwrap_err();

    assert!(matches!(err, ModelError::ShortFace { line: 3 }));
}

#[test]
fn zero_face_index_is_fatal() {
    let src = "v 0 0 0\nf 0 1 1\n";
    assert!(Model::from_reader(Cursor::new(src)).is_err());
}

#[test]
fn out_of_range_face_index_is_rejected_at_load() {
    let src = "v 0 0 0\nv 1 0 0\nf 1 2 9\n";
    let err = Model::from_reader(Cursor::new(src)).unwrap_err();

    assert!(matches!(
        err,
        ModelError::IndexOutOfRange {
            face: 0,
            index: 9,
            nverts: 2
        }
    ));
}

#[test]
fn missing_file_reports_io() {
    let err = Model::load("no/such/mesh.obj").unwrap_err();
    assert!(err.is_io());
}

#[test]
fn empty_source_yields_empty_model() {
    let model = Model::from_reader(Cursor::new("")).unwrap();
    assert_eq!(0, model.nverts());
    assert_eq!(0, model.nfaces());
}

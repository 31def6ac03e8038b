//! # Binary STL
//!
//! Streaming writer and reader for the binary STL format.
//!
//! ```text
//! UINT8[80]    – Header (free text, space padded)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! All values are little-endian. The triangle count has to be known before
//! the first record is written, so callers count first and stream second.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use config::constants::{
    MAX_TRIANGLES, STL_COUNT_SIZE, STL_HEADER_SIZE, STL_HEADER_TEXT, STL_TRIANGLE_RECORD_SIZE,
};
use glam::Vec3;

use crate::error::{EmbossError, EmbossResult};
use crate::mesh::{Mesh, Triangle};

/// Incremental binary STL writer.
///
/// The header is written on construction with the declared triangle count;
/// [`StlWriter::finish`] fails if a different number of records was written.
///
/// # Example
///
/// ```rust
/// use emboss_mesh::{StlWriter, Triangle};
/// use glam::DVec3;
///
/// let mut buffer = Vec::new();
/// let mut stl = StlWriter::new(&mut buffer, 1).unwrap();
/// stl.write_triangle(&Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y)).unwrap();
/// stl.finish().unwrap();
/// assert_eq!(buffer.len(), 84 + 50);
/// ```
#[derive(Debug)]
pub struct StlWriter<W: Write> {
    writer: W,
    declared: usize,
    written: usize,
}

impl<W: Write> StlWriter<W> {
    /// Writes the header and the declared triangle count.
    pub fn new(mut writer: W, triangle_count: usize) -> EmbossResult<Self> {
        if triangle_count > MAX_TRIANGLES {
            return Err(EmbossError::TooManyTriangles {
                count: triangle_count,
                max: MAX_TRIANGLES,
            });
        }

        let mut header = [b' '; STL_HEADER_SIZE];
        let text = STL_HEADER_TEXT.as_bytes();
        header[..text.len()].copy_from_slice(text);
        writer.write_all(&header)?;

        #[allow(clippy::cast_possible_truncation)]
        // Truncation: MAX_TRIANGLES fits in u32
        let count = triangle_count as u32;
        writer.write_all(&count.to_le_bytes())?;

        Ok(Self {
            writer,
            declared: triangle_count,
            written: 0,
        })
    }

    /// Appends one triangle record.
    ///
    /// Fails with [`EmbossError::DegenerateInput`] if the normal or a vertex
    /// does not survive narrowing to f32.
    pub fn write_triangle(&mut self, triangle: &Triangle) -> EmbossResult<()> {
        if self.written == self.declared {
            return Err(EmbossError::TriangleCountMismatch {
                declared: self.declared,
                written: self.written + 1,
            });
        }

        let [v0, v1, v2] = triangle.vertices;
        let values = [triangle.normal(), v0, v1, v2].map(|v| v.as_vec3());
        if !values.iter().all(|v| v.is_finite()) {
            return Err(EmbossError::degenerate(format!(
                "triangle {} has coordinates outside the f32 range: {:?}",
                self.written, triangle.vertices
            )));
        }

        let mut record = [0u8; STL_TRIANGLE_RECORD_SIZE];
        for (slot, value) in values.into_iter().enumerate() {
            encode_vec3(&mut record[slot * 12..slot * 12 + 12], value);
        }
        // attribute byte count stays zero
        self.writer.write_all(&record)?;

        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Checks the record count, flushes, and hands back the inner writer.
    pub fn finish(mut self) -> EmbossResult<W> {
        if self.written != self.declared {
            return Err(EmbossError::TriangleCountMismatch {
                declared: self.declared,
                written: self.written,
            });
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn encode_vec3(buf: &mut [u8], v: Vec3) {
    buf[0..4].copy_from_slice(&v.x.to_le_bytes());
    buf[4..8].copy_from_slice(&v.y.to_le_bytes());
    buf[8..12].copy_from_slice(&v.z.to_le_bytes());
}

fn decode_vec3(buf: &[u8]) -> Vec3 {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vec3::new(x, y, z)
}

/// One triangle record as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlRecord {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
    pub attribute: u16,
}

impl StlRecord {
    /// Widens the record back into a [`Triangle`].
    pub fn to_triangle(&self) -> Triangle {
        let [a, b, c] = self.vertices.map(|v| v.as_dvec3());
        Triangle::new(a, b, c)
    }
}

/// Parsed contents of a binary STL file.
#[derive(Debug, Clone, PartialEq)]
pub struct StlContents {
    pub header: [u8; STL_HEADER_SIZE],
    pub records: Vec<StlRecord>,
}

impl StlContents {
    /// Header text up to the first NUL, with trailing padding removed.
    pub fn header_text(&self) -> String {
        let end = self
            .header
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(STL_HEADER_SIZE);
        String::from_utf8_lossy(&self.header[..end])
            .trim_end()
            .to_string()
    }

    /// Converts the records into a [`Mesh`].
    pub fn to_mesh(&self) -> Mesh {
        self.records.iter().map(StlRecord::to_triangle).collect()
    }
}

/// Reads a binary STL stream.
///
/// Fails with [`EmbossError::InvalidStl`] if the stream ends before the
/// header or the declared number of records, or if bytes follow the last
/// declared record.
pub fn read_binary_stl<R: Read>(mut reader: R) -> EmbossResult<StlContents> {
    let mut header = [0u8; STL_HEADER_SIZE];
    read_exact_or(&mut reader, &mut header, "header")?;

    let mut count = [0u8; STL_COUNT_SIZE];
    read_exact_or(&mut reader, &mut count, "triangle count")?;
    let count = u32::from_le_bytes(count) as usize;
    if count > MAX_TRIANGLES {
        return Err(EmbossError::TooManyTriangles {
            count,
            max: MAX_TRIANGLES,
        });
    }

    let mut records = Vec::with_capacity(count);
    let mut buf = [0u8; STL_TRIANGLE_RECORD_SIZE];
    for i in 0..count {
        read_exact_or(&mut reader, &mut buf, &format!("record {i} of {count}"))?;
        records.push(StlRecord {
            normal: decode_vec3(&buf[0..12]),
            vertices: [
                decode_vec3(&buf[12..24]),
                decode_vec3(&buf[24..36]),
                decode_vec3(&buf[36..48]),
            ],
            attribute: u16::from_le_bytes([buf[48], buf[49]]),
        });
    }

    let mut extra = [0u8; 1];
    loop {
        match reader.read(&mut extra) {
            Ok(0) => break,
            Ok(_) => {
                return Err(EmbossError::invalid_stl(format!(
                    "data after the declared {count} records"
                )))
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(EmbossError::Io(e)),
        }
    }

    Ok(StlContents { header, records })
}

fn read_exact_or<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> EmbossResult<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            EmbossError::invalid_stl(format!("unexpected end of file reading {what}"))
        } else {
            EmbossError::Io(e)
        }
    })
}

/// Saves a mesh to a binary STL file.
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P) -> EmbossResult<()> {
    let file = File::create(path)?;
    mesh.write_stl(BufWriter::new(file))
}

/// Loads a binary STL file.
pub fn load_stl<P: AsRef<Path>>(path: P) -> EmbossResult<StlContents> {
    let file = File::open(path)?;
    read_binary_stl(BufReader::new(file))
}

//! Binary dataset format.
//!
//! One file `<name>.bin` per labelled instance, little-endian, no padding:
//!
//! ```text
//! i32           name length, then the name bytes (no terminator)
//! u64 + u8[]    constraint sense tags ('L', 'G', 'E')
//! u64 + f64[]   objective
//! u64           row count, then per row: u64 + f64[]
//! u64 + f64[]   right-hand sides
//! u64 + f64[]   lower bounds
//! u64 + f64[]   upper bounds
//! f64           objective value
//! u8            feasible flag (0 or 1)
//! u64 + f64[]   assignment
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{ConstraintType, Instance, Solution};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Encoding failed: {0}")]
    Encode(#[source] io::Error),

    #[error("Instance {0} has no solution attached")]
    MissingSolution(String),

    #[error("Instance name is {0} bytes, longer than the format allows")]
    NameTooLong(usize),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read instance: {0}")]
    Io(#[from] io::Error),

    #[error("File ends before {0} is complete")]
    Truncated(&'static str),

    #[error("Negative name length: {0}")]
    NegativeNameLength(i32),

    #[error("Name is not valid UTF-8: {0}")]
    InvalidName(#[from] std::string::FromUtf8Error),

    #[error("Invalid constraint tag {tag:#04x} at row {row}")]
    InvalidTag { row: usize, tag: u8 },

    #[error("Invalid feasibility flag: {0}")]
    InvalidFlag(u8),

    #[error("Unexpected data after the assignment")]
    TrailingData,
}

/// Writes labelled instances into a dataset directory
pub struct BinaryExporter;

impl BinaryExporter {
    /// Path an instance is written to inside `dir`.
    pub fn file_path(instance: &Instance, dir: &Path) -> PathBuf {
        dir.join(format!("{}.bin", instance.name))
    }

    /// Write `instance` to `dir/<name>.bin`. The directory must exist.
    ///
    /// A failed write may leave a truncated file behind.
    pub fn export(instance: &Instance, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = Self::file_path(instance, dir);
        let with_path = |error: ExportError| match error {
            ExportError::Encode(source) => ExportError::Io {
                path: path.clone(),
                source,
            },
            other => other,
        };

        let file = File::create(&path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        Self::encode(instance, &mut writer).map_err(with_path)?;
        writer.flush().map_err(|e| with_path(ExportError::Encode(e)))?;

        Ok(path)
    }

    /// Encode `instance` into `writer`.
    pub fn encode<W: Write>(instance: &Instance, writer: &mut W) -> Result<(), ExportError> {
        let solution = instance
            .solution
            .as_ref()
            .ok_or_else(|| ExportError::MissingSolution(instance.name.clone()))?;
        let name_len = i32::try_from(instance.name.len())
            .map_err(|_| ExportError::NameTooLong(instance.name.len()))?;

        write_instance(writer, instance, name_len, solution).map_err(ExportError::Encode)
    }

    /// Encode `instance` into memory.
    pub fn to_bytes(instance: &Instance) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        Self::encode(instance, &mut bytes)?;
        Ok(bytes)
    }
}

fn write_len<W: Write>(w: &mut W, len: usize) -> io::Result<()> {
    w.write_all(&(len as u64).to_le_bytes())
}

fn write_f64s<W: Write>(w: &mut W, values: &[f64]) -> io::Result<()> {
    write_len(w, values.len())?;
    for value in values {
        w.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

fn write_instance<W: Write>(
    w: &mut W,
    instance: &Instance,
    name_len: i32,
    solution: &Solution,
) -> io::Result<()> {
    w.write_all(&name_len.to_le_bytes())?;
    w.write_all(instance.name.as_bytes())?;

    write_len(w, instance.constraint_types.len())?;
    let tags: Vec<u8> = instance.constraint_types.iter().map(|t| t.tag()).collect();
    w.write_all(&tags)?;

    write_f64s(w, &instance.objective)?;

    write_len(w, instance.matrix.len())?;
    for row in &instance.matrix {
        write_f64s(w, row)?;
    }

    write_f64s(w, &instance.rhs)?;
    write_f64s(w, &instance.lower_bound)?;
    write_f64s(w, &instance.upper_bound)?;

    w.write_all(&solution.objective_value.to_le_bytes())?;
    w.write_all(&[u8::from(solution.feasible)])?;
    write_f64s(w, &solution.assignment)
}

struct Decoder<R> {
    reader: R,
}

impl<R: Read> Decoder<R> {
    fn fill(&mut self, buf: &mut [u8], what: &'static str) -> Result<(), DecodeError> {
        self.reader.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => DecodeError::Truncated(what),
            _ => DecodeError::Io(e),
        })
    }

    fn array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.fill(&mut buf, what)?;
        Ok(buf)
    }

    fn len(&mut self, what: &'static str) -> Result<usize, DecodeError> {
        Ok(u64::from_le_bytes(self.array(what)?) as usize)
    }

    fn f64(&mut self, what: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.array(what)?))
    }

    fn bytes(&mut self, len: usize, what: &'static str) -> Result<Vec<u8>, DecodeError> {
        let mut buf = Vec::new();
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if read < len {
            return Err(DecodeError::Truncated(what));
        }
        Ok(buf)
    }

    fn f64s(&mut self, what: &'static str) -> Result<Vec<f64>, DecodeError> {
        let len = self.len(what)?;
        let raw = self.bytes(len.saturating_mul(8), what)?;
        Ok(raw
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect())
    }

    fn instance(&mut self) -> Result<Instance, DecodeError> {
        let name_len = i32::from_le_bytes(self.array("name length")?);
        let name_len =
            usize::try_from(name_len).map_err(|_| DecodeError::NegativeNameLength(name_len))?;
        let name = String::from_utf8(self.bytes(name_len, "name")?)?;

        let n_constraints = self.len("constraint count")?;
        let constraint_types = self
            .bytes(n_constraints, "constraint tags")?
            .into_iter()
            .enumerate()
            .map(|(row, tag)| {
                ConstraintType::from_tag(tag).ok_or(DecodeError::InvalidTag { row, tag })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let objective = self.f64s("objective")?;

        let n_rows = self.len("row count")?;
        let mut matrix = Vec::new();
        for _ in 0..n_rows {
            matrix.push(self.f64s("matrix row")?);
        }

        let rhs = self.f64s("right-hand sides")?;
        let lower_bound = self.f64s("lower bounds")?;
        let upper_bound = self.f64s("upper bounds")?;

        let objective_value = self.f64("objective value")?;
        let feasible = match self.array::<1>("feasibility flag")?[0] {
            0 => false,
            1 => true,
            flag => return Err(DecodeError::InvalidFlag(flag)),
        };
        let assignment = self.f64s("assignment")?;

        Ok(Instance {
            name,
            constraint_types,
            objective,
            matrix,
            rhs,
            lower_bound,
            upper_bound,
            solution: Some(Solution {
                objective_value,
                feasible,
                assignment,
            }),
        })
    }
}

/// Decode one instance; the reader must hold nothing after it.
pub fn decode<R: Read>(reader: R) -> Result<Instance, DecodeError> {
    let mut decoder = Decoder { reader };
    let instance = decoder.instance()?;

    let mut rest = [0u8; 1];
    if decoder.reader.read(&mut rest)? != 0 {
        return Err(DecodeError::TrailingData);
    }
    Ok(instance)
}

/// Read an instance file written by [`BinaryExporter::export`].
pub fn read_instance(path: &Path) -> Result<Instance, DecodeError> {
    decode(BufReader::new(File::open(path)?))
}

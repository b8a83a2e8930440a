use crate::core::io::traits::CoordinateFile;
use crate::core::models::atoms::AtomSet;
use crate::core::models::domain::SimulationDomain;
use std::io::{self, Write};
use thiserror::Error;

pub const DEFAULT_SPECIES: &str = "C";
const SCALE_FACTOR_LINE: &str = "1.0";
const COORDINATE_MODE_LINE: &str = "Direct";

#[derive(Debug, Clone, PartialEq)]
pub struct PoscarMetadata {
    pub title: String,
    pub species: String,
}

impl PoscarMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            species: DEFAULT_SPECIES.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PoscarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Cannot serialize an incomplete atom set ({placed} of {capacity} atoms placed)")]
    IncompleteAtomSet { placed: usize, capacity: usize },
}

/// Writer for the POSCAR-style structured coordinate file.
///
/// Positions are normalized to fractional form by dividing every axis by the
/// domain's single [`fractional_divisor`](SimulationDomain::fractional_divisor), even
/// where the written cell is anisotropic (the cylinder).
pub struct PoscarFile;

impl PoscarFile {
    fn write_lattice_line(writer: &mut impl Write, axis: usize, length: f64) -> io::Result<()> {
        let mut row = [0.0f64; 3];
        row[axis] = length;
        writeln!(writer, "{:.6} {:.6} {:.6}", row[0], row[1], row[2])
    }
}

impl CoordinateFile for PoscarFile {
    type Metadata = PoscarMetadata;
    type Error = PoscarError;

    fn write_to(
        domain: &SimulationDomain,
        atoms: &AtomSet,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if !atoms.is_full() {
            return Err(PoscarError::IncompleteAtomSet {
                placed: atoms.len(),
                capacity: atoms.capacity(),
            });
        }

        writeln!(writer, "{}", metadata.title)?;
        writeln!(writer, "{}", SCALE_FACTOR_LINE)?;
        let lattice = domain.lattice_lengths();
        for axis in 0..3 {
            Self::write_lattice_line(writer, axis, lattice[axis])?;
        }
        writeln!(writer, "{}", metadata.species)?;
        writeln!(writer, "{}", atoms.len())?;
        writeln!(writer, "{}", COORDINATE_MODE_LINE)?;

        let divisor = domain.fractional_divisor();
        for p in atoms.iter() {
            let f = p / divisor;
            writeln!(writer, "{} {} {}", f.x, f.y, f.z)?;
        }
        Ok(())
    }
}

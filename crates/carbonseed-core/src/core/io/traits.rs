use crate::core::models::atoms::AtomSet;
use crate::core::models::domain::SimulationDomain;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for writing coordinate file formats.
///
/// Implementors turn a placed atom set and the domain it lives in into a
/// format-specific text layout.
pub trait CoordinateFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Writes an atom set and its domain cell to a writer.
    ///
    /// # Arguments
    ///
    /// * `domain` - The domain governing the cell and fractional normalization.
    /// * `atoms` - The atom set to write.
    /// * `metadata` - The metadata to include in the output.
    /// * `writer` - The writer to output to.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the atom set cannot be written in this format or the
    /// writer fails.
    fn write_to(
        domain: &SimulationDomain,
        atoms: &AtomSet,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Renders an atom set into an in-memory string.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the output is not valid UTF-8.
    fn write_to_string(
        domain: &SimulationDomain,
        atoms: &AtomSet,
        metadata: &Self::Metadata,
    ) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(domain, atoms, metadata, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    /// Writes an atom set to a file path.
    ///
    /// # Arguments
    ///
    /// * `domain` - The domain governing the cell.
    /// * `atoms` - The atom set to write.
    /// * `metadata` - The metadata to include in the output.
    /// * `path` - The path to the file to write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        domain: &SimulationDomain,
        atoms: &AtomSet,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(domain, atoms, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

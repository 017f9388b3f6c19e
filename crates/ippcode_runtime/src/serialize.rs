//! Program images in `MessagePack`.
//!
//! An image holds the instruction records a front end produced, LABELs
//! included, so loading one goes through the same [`Program`] checks as
//! parsing source.
//!
//! [`Program`]: ippcode_language::Program

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ippcode_foundation::{Error, ErrorKind, Result};
use ippcode_language::Instruction;
use serde::{Deserialize, Serialize};

/// Bumped whenever the instruction encoding changes.
const IMAGE_VERSION: u32 = 1;

/// File extension of program images.
pub const IMAGE_EXTENSION: &str = "ippc";

#[derive(Serialize, Deserialize)]
struct ProgramImage {
    version: u32,
    instructions: Vec<Instruction>,
}

/// Serializes instruction records to `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(instructions: &[Instruction]) -> Result<Vec<u8>> {
    let image = ProgramImage {
        version: IMAGE_VERSION,
        instructions: instructions.to_vec(),
    };
    rmp_serde::to_vec_named(&image)
        .map_err(|e| Error::internal(format!("cannot encode program image: {e}")))
}

/// Deserializes instruction records from `MessagePack` bytes.
///
/// # Errors
///
/// Returns `MalformedProgram` for bytes that are not an image of this
/// version.
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<Instruction>> {
    let image: ProgramImage = rmp_serde::from_slice(bytes)
        .map_err(|e| Error::malformed(format!("corrupt program image: {e}"), 0))?;
    if image.version != IMAGE_VERSION {
        return Err(Error::malformed(
            format!(
                "program image version {} is not supported (expected {IMAGE_VERSION})",
                image.version
            ),
            0,
        ));
    }
    Ok(image.instructions)
}

/// Saves instruction records to an image file.
///
/// # Errors
///
/// Returns `CannotOpenOutput` if the file cannot be created or written.
pub fn save_to_file<P: AsRef<Path>>(instructions: &[Instruction], path: P) -> Result<()> {
    let path = path.as_ref();
    let cannot_write =
        |e: std::io::Error| Error::new(ErrorKind::CannotOpenOutput(format!("'{}': {e}", path.display())));

    let bytes = to_bytes(instructions)?;
    let file = File::create(path).map_err(cannot_write)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(cannot_write)?;
    writer.flush().map_err(cannot_write)?;
    Ok(())
}

/// Loads instruction records from an image file.
///
/// # Errors
///
/// Returns `CannotOpenInput` if the file cannot be read, or
/// `MalformedProgram` if its contents are not an image.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Instruction>> {
    let path = path.as_ref();
    let cannot_read =
        |e: std::io::Error| Error::new(ErrorKind::CannotOpenInput(format!("'{}': {e}", path.display())));

    let file = File::open(path).map_err(cannot_read)?;
    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(cannot_read)?;
    from_bytes(&bytes)
}

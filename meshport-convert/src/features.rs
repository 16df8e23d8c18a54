//! Converter capability flags
//!
//! Plugins advertise the operations they support as a bit set queried before
//! every dispatch. `CONVERT_MESH_TO_FILE` carries the `CONVERT_MESH_TO_DATA`
//! bit in its value: a plugin advertising file output is treated as also
//! advertising data output when feature sets are compared, even when it
//! overrides the file hook directly.

use std::fmt;

bitflags::bitflags! {
    /// Operations a scene-converter plugin supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConverterFeatures: u8 {
        /// Producing a new mesh from an input mesh.
        const CONVERT_MESH = 1 << 0;
        /// Mutating a caller-owned mesh in place.
        const CONVERT_MESH_IN_PLACE = 1 << 1;
        /// Encoding a mesh into a raw byte buffer.
        const CONVERT_MESH_TO_DATA = 1 << 2;
        /// Writing an encoded mesh to a file. Implies data output.
        const CONVERT_MESH_TO_FILE = (1 << 3) | (1 << 2);
    }
}

impl ConverterFeatures {
    /// Whether file output is reachable, either through a direct file hook
    /// or through the default path derived from data output.
    pub fn supports_file_output(self) -> bool {
        self.intersects(ConverterFeatures::CONVERT_MESH_TO_FILE)
    }
}

/// Named flags in rendering order. File output is listed after data output
/// so the implied pair renders as both names.
const NAMED_FLAGS: [(ConverterFeatures, &str); 4] = [
    (ConverterFeatures::CONVERT_MESH, "ConvertMesh"),
    (ConverterFeatures::CONVERT_MESH_IN_PLACE, "ConvertMeshInPlace"),
    (ConverterFeatures::CONVERT_MESH_TO_DATA, "ConvertMeshToData"),
    (ConverterFeatures::CONVERT_MESH_TO_FILE, "ConvertMeshToFile"),
];

impl fmt::Display for ConverterFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "ConverterFeatures{{}}");
        }

        let mut known = ConverterFeatures::empty();
        let mut first = true;
        for (flag, name) in NAMED_FLAGS {
            // Checked against the full value, not the remainder, so a flag
            // implied by an earlier one still gets its own name.
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                known |= flag;
                first = false;
            }
        }

        let unknown = self.difference(known);
        if !unknown.is_empty() {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{:#04x}", unknown.bits())?;
        }

        Ok(())
    }
}

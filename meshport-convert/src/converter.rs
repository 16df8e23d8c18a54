//! Converter plugin contract
//!
//! [`SceneConverter`] is the hook trait concrete plugins implement;
//! [`Converter`] is the capability-gated facade the host calls. Every public
//! entry point checks the advertised features before dispatching to the hook
//! and validates the release policy of whatever comes back, so the host can
//! free plugin output uniformly.
//!
//! Two failure channels, kept strictly apart:
//!
//! - Contract violations (operation invoked without the capability, a
//!   capability advertised but its hook left at the default, an output
//!   buffer with an unsanctioned release policy, an empty feature set)
//!   panic. They mean a bug in the plugin or the caller, not bad input.
//! - Data-level failures (the hook can't process this particular mesh, a
//!   file write hits an I/O error) come back as `None`/`false` with a
//!   diagnostic on the error channel, and the caller decides what's next.

use std::fs;
use std::path::Path;

use meshport_common::{ByteBuffer, MeshData};

use crate::features::ConverterFeatures;

/// Hook trait implemented by concrete converter plugins.
///
/// Only [`features`](Self::features) is required. Each conversion hook has a
/// default body that panics, so a plugin advertising a capability without
/// overriding the matching hook is caught at the first dispatch. The file
/// hook's default instead derives file output from the data hook, which is
/// how a plugin implementing only `CONVERT_MESH_TO_DATA` gets file output
/// for free.
///
/// Hooks are called only through [`Converter`], after the capability check;
/// they don't need to re-verify their own preconditions.
pub trait SceneConverter {
    /// Capabilities this plugin advertises. Must never be empty.
    ///
    /// Queried fresh on every entry point; expected to stay stable over the
    /// instance's lifetime unless the concrete plugin documents otherwise.
    fn features(&self) -> ConverterFeatures;

    /// Produce a new mesh from `mesh`, or `None` if this input can't be
    /// converted.
    fn convert(&mut self, mesh: &MeshData) -> Option<MeshData> {
        let _ = mesh;
        panic!("SceneConverter::convert(): mesh conversion advertised but not implemented");
    }

    /// Mutate `mesh` in place, returning whether conversion succeeded.
    fn convert_in_place(&mut self, mesh: &mut MeshData) -> bool {
        let _ = mesh;
        panic!("SceneConverter::convert_in_place(): mesh conversion advertised but not implemented");
    }

    /// Encode `mesh` into a raw byte buffer, or `None` on failure.
    fn convert_to_data(&mut self, mesh: &MeshData) -> Option<ByteBuffer> {
        let _ = mesh;
        panic!("SceneConverter::convert_to_data(): mesh conversion advertised but not implemented");
    }

    /// Write `mesh` to `path`, returning whether it succeeded.
    ///
    /// The default implementation encodes through
    /// [`convert_to_data`](Self::convert_to_data) and writes the bytes out.
    /// A plugin that advertises file output without data output must
    /// override this.
    fn convert_to_file(&mut self, path: &Path, mesh: &MeshData) -> bool {
        assert!(
            self.features().contains(ConverterFeatures::CONVERT_MESH_TO_DATA),
            "SceneConverter::convert_to_file(): mesh conversion advertised but not implemented"
        );

        // No release-policy check: the buffer is consumed right here, never
        // handed to the caller.
        let Some(data) = self.convert_to_data(mesh) else {
            return false;
        };

        if let Err(err) = fs::write(path, &data) {
            tracing::error!(
                "SceneConverter::convert_to_file(): cannot write to {}: {err}",
                path.display()
            );
            return false;
        }

        true
    }
}

/// Capability-gated facade over a loaded converter plugin.
///
/// Wraps the plugin the loading subsystem instantiated and performs the
/// precondition checks and output validation the contract requires. The
/// facade holds no state of its own; concurrent use of two `Converter`s is
/// independent, while concurrent calls on one instance are only as safe as
/// the concrete plugin documents.
pub struct Converter {
    plugin: Box<dyn SceneConverter>,
}

impl Converter {
    pub fn new(plugin: Box<dyn SceneConverter>) -> Self {
        Converter { plugin }
    }

    /// Capabilities advertised by the plugin.
    ///
    /// Panics if the plugin reports an empty set: a converter with no
    /// features is a broken plugin, not a degraded one.
    pub fn features(&self) -> ConverterFeatures {
        let features = self.plugin.features();
        assert!(
            !features.is_empty(),
            "Converter::features(): plugin reported no features"
        );
        features
    }

    /// Convert `mesh` into a new mesh.
    ///
    /// Requires `CONVERT_MESH`. Returns `None` if the plugin cannot convert
    /// this particular input. Panics if the capability is missing or if the
    /// returned mesh holds a buffer with an unsanctioned release policy.
    pub fn convert(&mut self, mesh: &MeshData) -> Option<MeshData> {
        assert!(
            self.features().contains(ConverterFeatures::CONVERT_MESH),
            "Converter::convert(): mesh conversion not supported"
        );

        let out = self.plugin.convert(mesh);
        if let Some(out) = &out {
            assert!(
                out.index_data().release_policy().is_sanctioned()
                    && out.vertex_data().release_policy().is_sanctioned()
                    && out.attributes().release_policy().is_sanctioned(),
                "Converter::convert(): plugin is not allowed to use a custom buffer deleter"
            );
        }
        out
    }

    /// Convert the caller-owned `mesh` in place.
    ///
    /// Requires `CONVERT_MESH_IN_PLACE`. No ownership transfer happens; the
    /// mesh keeps the release policies it came in with.
    pub fn convert_in_place(&mut self, mesh: &mut MeshData) -> bool {
        assert!(
            self.features()
                .contains(ConverterFeatures::CONVERT_MESH_IN_PLACE),
            "Converter::convert_in_place(): mesh conversion not supported"
        );

        self.plugin.convert_in_place(mesh)
    }

    /// Encode `mesh` into a raw byte buffer.
    ///
    /// Requires `CONVERT_MESH_TO_DATA`. Returns `None` if the plugin cannot
    /// encode this input. Panics if the capability is missing or the
    /// returned buffer uses an unsanctioned release policy.
    pub fn convert_to_data(&mut self, mesh: &MeshData) -> Option<ByteBuffer> {
        assert!(
            self.features()
                .contains(ConverterFeatures::CONVERT_MESH_TO_DATA),
            "Converter::convert_to_data(): mesh conversion not supported"
        );

        let out = self.plugin.convert_to_data(mesh);
        if let Some(out) = &out {
            assert!(
                out.release_policy().is_sanctioned(),
                "Converter::convert_to_data(): plugin is not allowed to use a custom buffer deleter"
            );
        }
        out
    }

    /// Write `mesh` to `path`, returning whether it succeeded.
    ///
    /// Satisfiable by a plugin advertising either `CONVERT_MESH_TO_FILE` or
    /// just `CONVERT_MESH_TO_DATA`; in the latter case the default file hook
    /// derives the output from the data hook. A `false` return means the
    /// encoding or the write failed for this input, with the reason on the
    /// error channel.
    pub fn convert_to_file(&mut self, path: impl AsRef<Path>, mesh: &MeshData) -> bool {
        assert!(
            self.features().supports_file_output(),
            "Converter::convert_to_file(): mesh conversion not supported"
        );

        self.plugin.convert_to_file(path.as_ref(), mesh)
    }
}

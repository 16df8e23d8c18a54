//! Release-policy-tagged buffers
//!
//! Every buffer a plugin hands back across the converter boundary carries a
//! [`ReleasePolicy`] describing who is responsible for freeing the memory and
//! how. The host validates the tag against a small sanctioned set so it can
//! release any plugin output uniformly, without knowing which plugin produced
//! it. See `meshport-convert` for where that validation happens.

use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};

/// How a buffer's memory is released once its holder is done with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleasePolicy {
    /// The holder does not own the memory. The buffer is a view into storage
    /// kept alive elsewhere and nothing is freed when it is dropped.
    Borrowed,
    /// Allocated by the framework allocator; dropping the buffer frees it.
    Framework,
    /// Released through a plugin-supplied deleter function.
    Custom,
}

impl ReleasePolicy {
    /// Whether the host can release a buffer with this policy on the caller's
    /// behalf.
    ///
    /// Only `Borrowed` and `Framework` are sanctioned for buffers returned
    /// across the converter boundary. A custom deleter is opaque to the host,
    /// which would have no uniform way to free the memory later.
    pub fn is_sanctioned(self) -> bool {
        !matches!(self, ReleasePolicy::Custom)
    }
}

/// A contiguous buffer paired with the release policy for its memory.
///
/// Dropping the buffer honors the policy: `Framework` storage is freed,
/// `Borrowed` storage is left untouched, and `Custom` storage is handed to
/// its deleter exactly once.
pub struct Buffer<T: 'static> {
    storage: Storage<T>,
}

enum Storage<T: 'static> {
    Borrowed(&'static [T]),
    Framework(Vec<T>),
    Custom(CustomStorage<T>),
}

/// Plugin-allocated storage released through a supplied deleter.
struct CustomStorage<T> {
    data: ManuallyDrop<Vec<T>>,
    deleter: fn(Vec<T>),
}

impl<T> Drop for CustomStorage<T> {
    fn drop(&mut self) {
        // Safety: `data` is only ever taken here, and drop runs once.
        let data = unsafe { ManuallyDrop::take(&mut self.data) };
        (self.deleter)(data);
    }
}

impl<T: 'static> Buffer<T> {
    /// Empty buffer with the framework release policy.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Buffer owning `data` through the framework allocator.
    pub fn from_vec(data: Vec<T>) -> Self {
        Buffer {
            storage: Storage::Framework(data),
        }
    }

    /// Non-owning view of memory kept alive elsewhere.
    pub fn borrowed(data: &'static [T]) -> Self {
        Buffer {
            storage: Storage::Borrowed(data),
        }
    }

    /// Buffer releasing `data` through `deleter` when dropped.
    ///
    /// The deleter is invoked exactly once with the full storage. Buffers
    /// built this way are rejected by the converter entry points; the
    /// constructor exists so the host can detect plugins that try.
    pub fn with_deleter(data: Vec<T>, deleter: fn(Vec<T>)) -> Self {
        Buffer {
            storage: Storage::Custom(CustomStorage {
                data: ManuallyDrop::new(data),
                deleter,
            }),
        }
    }

    /// The release policy tag for this buffer's memory.
    pub fn release_policy(&self) -> ReleasePolicy {
        match &self.storage {
            Storage::Borrowed(_) => ReleasePolicy::Borrowed,
            Storage::Framework(_) => ReleasePolicy::Framework,
            Storage::Custom(_) => ReleasePolicy::Custom,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Borrowed(data) => data,
            Storage::Framework(data) => data,
            Storage::Custom(custom) => &custom.data,
        }
    }

    /// Mutable access to the contents, or `None` for a borrowed view.
    ///
    /// Mutation never changes the buffer's release policy.
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        match &mut self.storage {
            Storage::Borrowed(_) => None,
            Storage::Framework(data) => Some(data),
            Storage::Custom(custom) => Some(&mut custom.data),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<T: 'static> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Deref for Buffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: 'static> AsRef<[T]> for Buffer<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: 'static> From<Vec<T>> for Buffer<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("release_policy", &self.release_policy())
            .field("len", &self.len())
            .finish()
    }
}

/// Raw byte output of a "convert to data" operation.
pub type ByteBuffer = Buffer<u8>;

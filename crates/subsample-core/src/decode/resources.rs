//! Resource access for the resource-backed image source.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Identifier of a packaged resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        ResourceId(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Gives access to the encoded bytes of packaged resources.
pub trait ResourceProvider {
    /// Return the encoded bytes for `id`.
    ///
    /// A missing resource is reported as `io::ErrorKind::NotFound`.
    fn open_resource(&self, id: ResourceId) -> io::Result<Cow<'_, [u8]>>;
}

/// In-memory resource table.
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    entries: HashMap<ResourceId, Vec<u8>>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: ResourceId, bytes: Vec<u8>) {
        self.entries.insert(id, bytes);
    }

    /// Read a file and register its contents under `id`.
    pub fn insert_file(&mut self, id: ResourceId, path: &Path) -> io::Result<()> {
        let bytes = std::fs::read(path)?;
        self.insert(id, bytes);
        Ok(())
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceProvider for ResourceBundle {
    fn open_resource(&self, id: ResourceId) -> io::Result<Cow<'_, [u8]>> {
        self.entries
            .get(&id)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no resource {}", id))
            })
    }
}

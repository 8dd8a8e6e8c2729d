//! Image sources accepted by the bounded decoder.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Seek};
use std::path::Path;

use super::{DecodeError, ResourceId, ResourceProvider};
use crate::checks::{check_at_least, check_at_most, check_not_empty};

/// Where the encoded image bytes come from.
#[derive(Clone, Copy)]
pub enum ImageSource<'a> {
    /// A packaged resource, looked up through `resources`.
    Resource {
        resources: &'a dyn ResourceProvider,
        id: ResourceId,
    },
    /// The window `[offset, offset + length)` of `data`.
    Bytes { data: &'a [u8], offset: i64, length: i64 },
    /// A file on disk.
    File(&'a Path),
}

impl<'a> ImageSource<'a> {
    pub fn resource(resources: &'a dyn ResourceProvider, id: ResourceId) -> Self {
        ImageSource::Resource {
            resources,
            id,
        }
    }

    /// The whole of `data`.
    pub fn bytes(data: &'a [u8]) -> Self {
        ImageSource::Bytes {
            data,
            offset: 0,
            length: data.len() as i64,
        }
    }

    pub fn byte_range(data: &'a [u8], offset: i64, length: i64) -> Self {
        ImageSource::Bytes {
            data,
            offset,
            length,
        }
    }

    pub fn file(path: &'a Path) -> Self {
        ImageSource::File(path)
    }

    /// Check the source descriptor without touching its contents.
    pub fn validate(&self) -> Result<(), DecodeError> {
        match *self {
            ImageSource::Resource { .. } => Ok(()),
            ImageSource::Bytes {
                data,
                offset,
                length,
            } => {
                let size = data.len() as i64;
                let offset = check_at_least(offset, 0, "offset")?;
                check_at_most(offset, size, "offset")?;
                check_at_least(length, 0, "length")?;
                check_at_most(length, size - offset, "length")?;
                Ok(())
            }
            ImageSource::File(path) => check_not_empty(path, "path").map(|_| ()),
        }
    }

    /// Load whatever must stay alive for the two decode passes.
    ///
    /// Must only be called on a validated source.
    pub(crate) fn open(&self) -> io::Result<SourceInput<'a>> {
        match *self {
            ImageSource::Resource { resources, id } => {
                Ok(SourceInput::Memory(resources.open_resource(id)?))
            }
            ImageSource::Bytes {
                data,
                offset,
                length,
            } => {
                let window = usize::try_from(offset)
                    .ok()
                    .zip(usize::try_from(length).ok())
                    .and_then(|(start, len)| data.get(start..start.checked_add(len)?))
                    .ok_or_else(|| {
                        io::Error::new(io::ErrorKind::InvalidInput, "byte range out of bounds")
                    })?;
                Ok(SourceInput::Memory(Cow::Borrowed(window)))
            }
            ImageSource::File(path) => Ok(SourceInput::File(path)),
        }
    }
}

impl fmt::Display for ImageSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Resource { id, .. } => write!(f, "resource {}", id),
            ImageSource::Bytes { offset, length, .. } => {
                write!(f, "bytes [{}, +{})", offset, length)
            }
            ImageSource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

impl fmt::Debug for ImageSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageSource({})", self)
    }
}

/// Seekable buffered reader handed to the codec.
pub(crate) trait SourceReader: BufRead + Seek {}

impl<T: BufRead + Seek> SourceReader for T {}

/// An opened source; each call to [`SourceInput::reader`] starts a fresh pass.
pub(crate) enum SourceInput<'a> {
    Memory(Cow<'a, [u8]>),
    File(&'a Path),
}

impl SourceInput<'_> {
    pub(crate) fn reader(&self) -> io::Result<Box<dyn SourceReader + '_>> {
        match self {
            SourceInput::Memory(bytes) => Ok(Box::new(Cursor::new(bytes.as_ref()))),
            SourceInput::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ResourceBundle;
    use std::io::Read;

    #[test]
    fn test_whole_buffer_is_valid() {
        let data = [1u8, 2, 3, 4];
        assert!(ImageSource::bytes(&data).validate().is_ok());
        assert!(ImageSource::bytes(&[]).validate().is_ok());
    }

    #[test]
    fn test_byte_range_validation() {
        let data = [0u8; 10];
        assert!(ImageSource::byte_range(&data, 2, 8).validate().is_ok());
        assert!(ImageSource::byte_range(&data, 10, 0).validate().is_ok());

        assert!(ImageSource::byte_range(&data, -1, 5).validate().is_err());
        assert!(ImageSource::byte_range(&data, 11, 0).validate().is_err());
        assert!(ImageSource::byte_range(&data, 0, -1).validate().is_err());
        assert!(ImageSource::byte_range(&data, 2, 9).validate().is_err());
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert!(ImageSource::file(Path::new("")).validate().is_err());
        assert!(ImageSource::file(Path::new("photo.png")).validate().is_ok());
    }

    #[test]
    fn test_open_byte_window() {
        let data = [0u8, 1, 2, 3, 4, 5];
        let input = ImageSource::byte_range(&data, 2, 3).open().unwrap();

        let mut read = Vec::new();
        input.reader().unwrap().read_to_end(&mut read).unwrap();
        assert_eq!(read, vec![2, 3, 4]);
    }

    #[test]
    fn test_open_missing_resource() {
        let bundle = ResourceBundle::new();
        let source = ImageSource::resource(&bundle, ResourceId(5));
        assert!(source.validate().is_ok());
        assert!(source.open().is_err());
    }

    #[test]
    fn test_reader_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let input = ImageSource::file(&path).open().unwrap();
        assert!(input.reader().is_err());
    }

    #[test]
    fn test_display() {
        let data = [0u8; 4];
        assert_eq!(ImageSource::byte_range(&data, 1, 2).to_string(), "bytes [1, +2)");
        let bundle = ResourceBundle::new();
        assert_eq!(ImageSource::resource(&bundle, ResourceId(9)).to_string(), "resource #9");
    }
}

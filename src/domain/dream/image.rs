//! Generated image value object

/// Raw bytes of an illustration returned by the image service.
///
/// The content type is whatever the service produced; it is not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    bytes: Vec<u8>,
}

impl GeneratedImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

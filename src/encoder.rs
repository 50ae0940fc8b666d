//! Multi-document YAML output stream.

use serde::Serialize;
use std::io::Write;

use crate::error::{Error, Result};
use crate::resource::Secret;

/// Writes secrets as a YAML document stream, one document per secret, with
/// `---` separators between documents.
pub struct SecretEncoder<W: Write> {
    serializer: serde_yaml::Serializer<W>,
    documents: usize,
}

impl<W: Write> SecretEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            serializer: serde_yaml::Serializer::new(writer),
            documents: 0,
        }
    }

    /// Append one secret to the stream.
    pub fn encode(&mut self, secret: &Secret) -> Result<()> {
        secret
            .serialize(&mut self.serializer)
            .map_err(Error::Encode)?;
        self.documents += 1;
        Ok(())
    }

    /// Number of documents written so far.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Close the YAML stream and flush the writer, handing it back.
    ///
    /// Must be called after the last document; dropping the encoder instead
    /// may leave buffered output unwritten.
    pub fn finish(self) -> Result<W> {
        let mut writer = self.serializer.into_inner().map_err(Error::Encode)?;
        writer.flush().map_err(Error::Write)?;
        Ok(writer)
    }
}

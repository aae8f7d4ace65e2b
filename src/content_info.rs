//! `ContentInfo`: a content-type OID with optional content.

use der::{Any, Decode, Encode, Reader, SliceReader, Tag, TagNumber, Tagged};

use crate::{encoding, oid, Error, ObjectIdentifier, Result};

/// Tag of the explicit wrapper around the content.
const CONTENT_TAG: Tag = encoding::context_tag(TagNumber::N0);

/// ```text
/// ContentInfo ::= SEQUENCE {
///     contentType ContentType,
///     content [0] EXPLICIT ANY DEFINED BY contentType OPTIONAL }
/// ```
///
/// Legacy encodings place the content directly after the content type,
/// without the `[0]` wrapper. Encoding always uses the wrapper.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContentInfo {
    /// Content type.
    pub content_type: ObjectIdentifier,

    /// Content TLV, if any.
    pub content: Option<Any>,
}

impl ContentInfo {
    /// Creates a content info.
    pub fn new(content_type: ObjectIdentifier, content: Option<Any>) -> Self {
        Self {
            content_type,
            content,
        }
    }

    /// Creates a `data` content info holding `bytes` as an OCTET STRING.
    pub fn new_data(bytes: &[u8]) -> Result<Self> {
        let content = Any::new(Tag::OctetString, bytes)?;
        Ok(Self::new(oid::DATA, Some(content)))
    }

    /// Decodes a content info in the standard or the legacy layout.
    pub fn decode(reader: &mut SliceReader<'_>, legacy: bool) -> Result<Self> {
        let mut contents = encoding::constructed(reader, Tag::Sequence)?;
        let content_type = ObjectIdentifier::decode(&mut contents)?;

        let content = if contents.is_finished() {
            None
        } else if legacy {
            Some(Any::decode(&mut contents)?)
        } else {
            let mut explicit = encoding::constructed(&mut contents, CONTENT_TAG)?;
            let content = Any::decode(&mut explicit)?;
            Some(explicit.finish(content)?)
        };

        Ok(contents.finish(Self::new(content_type, content))?)
    }

    /// Decodes a standard-layout content info from `bytes`.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(bytes)?;
        let content_info = Self::decode(&mut reader, false)?;
        Ok(reader.finish(content_info)?)
    }

    /// Encodes this content info with the explicit `[0]` wrapper.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut contents = self.content_type.to_der()?;
        if let Some(content) = &self.content {
            contents.extend(encoding::tlv(CONTENT_TAG, &content.to_der()?)?);
        }
        encoding::tlv(Tag::Sequence, &contents)
    }

    /// Content TLV, if any.
    pub fn content(&self) -> Option<&Any> {
        self.content.as_ref()
    }

    /// Returns the octets of `data`-like content.
    ///
    /// Only `data`, its legacy arc and `TSTInfo` content qualify; any other
    /// content type is an error. Absent content yields `None`.
    pub fn data(&self) -> Result<Option<&[u8]>> {
        if [oid::DATA, oid::OLD_DATA, oid::TIMESTAMP_TOKEN_INFO].contains(&self.content_type) {
            self.content_bytes()
        } else {
            Err(Error::NotData(self.content_type))
        }
    }

    /// Returns the content as OCTET STRING octets regardless of content type.
    pub fn content_bytes(&self) -> Result<Option<&[u8]>> {
        match &self.content {
            Some(content) => {
                content.tag().assert_eq(Tag::OctetString)?;
                Ok(Some(content.value()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // SEQUENCE { data, [0] { OCTET STRING "hi" } }
    const STANDARD: [u8; 19] = hex!("3011 06092a864886f70d010701 a004 04026869");

    // SEQUENCE { data, OCTET STRING "hi" }
    const LEGACY: [u8; 17] = hex!("300f 06092a864886f70d010701 04026869");

    #[test]
    fn test_decode_standard() {
        let content_info = ContentInfo::from_der(&STANDARD).unwrap();
        assert_eq!(content_info.content_type, oid::DATA);
        assert_eq!(content_info.data().unwrap(), Some(&b"hi"[..]));
        assert_eq!(content_info.encode().unwrap(), STANDARD);
    }

    #[test]
    fn test_decode_legacy_reencodes_standard() {
        let mut reader = SliceReader::new(&LEGACY).unwrap();
        let content_info = ContentInfo::decode(&mut reader, true).unwrap();
        assert!(reader.is_finished());
        assert_eq!(content_info, ContentInfo::new_data(b"hi").unwrap());
        assert_eq!(content_info.encode().unwrap(), STANDARD);
    }

    #[test]
    fn test_legacy_layout_rejected_in_standard_mode() {
        assert!(ContentInfo::from_der(&LEGACY).is_err());
    }

    #[test]
    fn test_explicit_wrapper_must_hold_one_element() {
        // [0] holding two OCTET STRINGs
        let two = hex!("3015 06092a864886f70d010701 a008 04026869 04026869");
        assert!(ContentInfo::from_der(&two).is_err());

        // [0] holding nothing
        let none = hex!("300d 06092a864886f70d010701 a000");
        assert!(ContentInfo::from_der(&none).is_err());
    }

    #[test]
    fn test_absent_content() {
        let bytes = hex!("300b 06092a864886f70d010701");
        let content_info = ContentInfo::from_der(&bytes).unwrap();
        assert_eq!(content_info.content, None);
        assert_eq!(content_info.data().unwrap(), None);
        assert_eq!(content_info.encode().unwrap(), bytes);
    }

    #[test]
    fn test_data_rejects_other_content_types() {
        let content_info = ContentInfo::new(oid::SIGNED_DATA, None);
        assert_eq!(content_info.data(), Err(Error::NotData(oid::SIGNED_DATA)));

        let mut old = ContentInfo::new_data(b"hi").unwrap();
        old.content_type = oid::OLD_DATA;
        assert_eq!(old.data().unwrap(), Some(&b"hi"[..]));
    }

    #[test]
    fn test_empty_sequence_is_an_error() {
        assert!(ContentInfo::from_der(&hex!("3000")).is_err());
    }
}

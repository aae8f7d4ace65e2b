use der::{Reader, SliceReader, Tag};
use x509_cert::time::Time;

use super::{Attribute, AttributeKind, AttributeValue};
use crate::{encoding, Error, ObjectIdentifier, Result};

/// An ordered set of PKCS#9 attributes with distinct OIDs.
///
/// Keeps the DER contents it was decoded from: signatures over
/// authenticated attributes are computed over those exact bytes, re-tagged
/// as a `SET OF`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
    contents: Vec<u8>,
}

impl AttributeSet {
    /// Creates a set, encoding the attributes in DER order.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        check_distinct(&attributes)?;
        let contents = canonical_contents(&attributes)?;
        Ok(Self {
            attributes,
            contents,
        })
    }

    /// Decodes a set carried under `tag`.
    ///
    /// With `ignore_unsupported`, attributes whose OID is missing from the
    /// registry are skipped; the retained encoding is then regenerated from
    /// the attributes that remain.
    pub fn decode(
        reader: &mut SliceReader<'_>,
        tag: Tag,
        ignore_unsupported: bool,
    ) -> Result<Self> {
        let received = encoding::value_of(reader, tag)?;
        let mut contents = SliceReader::new(received)?;
        let mut attributes = Vec::new();
        let mut skipped = false;

        while !contents.is_finished() {
            match Attribute::decode(&mut contents) {
                Ok(attribute) => attributes.push(attribute),
                Err(Error::UnsupportedPkcs9Attribute(oid)) if ignore_unsupported => {
                    log::debug!("skipping unsupported attribute {oid}");
                    skipped = true;
                }
                Err(err) => return Err(err),
            }
        }

        check_distinct(&attributes)?;
        let contents = if skipped {
            canonical_contents(&attributes)?
        } else {
            received.to_vec()
        };

        Ok(Self {
            attributes,
            contents,
        })
    }

    /// DER encoding as a `SET OF`, the form signatures are computed over.
    pub fn der_encoding(&self) -> Result<Vec<u8>> {
        encoding::tlv(Tag::Set, &self.contents)
    }

    /// DER encoding under an implicit `tag`.
    pub fn encode_tagged(&self, tag: Tag) -> Result<Vec<u8>> {
        encoding::tlv(tag, &self.contents)
    }

    /// Attribute of the given kind.
    pub fn get(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.kind() == kind)
    }

    /// Attribute with the given OID.
    pub fn get_by_oid(&self, oid: &ObjectIdentifier) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.oid() == *oid)
    }

    /// Value of the attribute of the given kind.
    pub fn value(&self, kind: AttributeKind) -> Option<&AttributeValue> {
        self.get(kind).map(Attribute::value)
    }

    /// `contentType` attribute value.
    pub fn content_type(&self) -> Option<&ObjectIdentifier> {
        match self.value(AttributeKind::ContentType)? {
            AttributeValue::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    /// `messageDigest` attribute value.
    pub fn message_digest(&self) -> Option<&[u8]> {
        match self.value(AttributeKind::MessageDigest)? {
            AttributeValue::Bytes(digest) => Some(digest),
            _ => None,
        }
    }

    /// `signingTime` attribute value.
    pub fn signing_time(&self) -> Option<&Time> {
        match self.value(AttributeKind::SigningTime)? {
            AttributeValue::Time(time) => Some(time),
            _ => None,
        }
    }

    /// Attributes in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = core::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

fn check_distinct(attributes: &[Attribute]) -> Result<()> {
    for (i, attribute) in attributes.iter().enumerate() {
        if attributes[..i]
            .iter()
            .any(|earlier| earlier.kind() == attribute.kind())
        {
            return Err(Error::DuplicateAttribute(attribute.oid()));
        }
    }
    Ok(())
}

fn canonical_contents(attributes: &[Attribute]) -> Result<Vec<u8>> {
    let mut encodings = attributes
        .iter()
        .map(Attribute::encode)
        .collect::<Result<Vec<_>>>()?;
    encodings.sort();
    Ok(encodings.concat())
}

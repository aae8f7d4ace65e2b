//! PKCS#9 attributes.
//!
//! ```text
//! Attribute ::= SEQUENCE {
//!     type   OBJECT IDENTIFIER,
//!     values SET OF ANY DEFINED BY type }
//! ```
//!
//! Which OIDs are understood, which wire tags their values may carry and how
//! each value is represented in Rust is fixed by the table in [`registry`].

mod registry;
mod set;
mod value;

pub use self::{
    registry::{AttributeInfo, AttributeKind},
    set::AttributeSet,
    value::{AttributeValue, ValueShape},
};

use der::{
    asn1::{
        Ia5StringRef, OctetStringRef, PrintableStringRef, TeletexStringRef, Utf8StringRef,
    },
    Any, Decode, Encode, Reader, SliceReader, Tag, Tagged,
};
use x509_cert::{ext::Extensions, time::Time};

use crate::{
    encoding, AttributeOperation, Error, ObjectIdentifier, Result, SignerInfo,
    SigningCertificateInfo,
};

/// A single PKCS#9 attribute: a registry kind and its value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    kind: AttributeKind,
    value: AttributeValue,
}

impl Attribute {
    /// Creates an attribute for `oid`, checking `value` against the registry.
    pub fn new(oid: &ObjectIdentifier, value: AttributeValue) -> Result<Self> {
        let kind = AttributeKind::from_oid(oid).ok_or(Error::UnknownAttributeOid(*oid))?;
        Self::from_kind(kind, value)
    }

    /// Creates an attribute from its case-insensitive registry name.
    pub fn from_name(name: &str, value: AttributeValue) -> Result<Self> {
        let kind = AttributeKind::from_name(name)
            .ok_or_else(|| Error::UnknownAttributeName(name.to_owned()))?;
        Self::from_kind(kind, value)
    }

    /// Creates an attribute of `kind`, checking `value` against the registry.
    pub fn from_kind(kind: AttributeKind, value: AttributeValue) -> Result<Self> {
        let expected = kind.info().shape.ok_or(Error::AttributeNotSupported {
            kind,
            operation: AttributeOperation::Construct,
        })?;

        if value.shape() != expected {
            return Err(Error::ValueShape {
                kind,
                expected,
                actual: value.shape(),
            });
        }

        // Opaque values are written as given, so they must already be one TLV.
        if let (AttributeKind::SignatureTimestampToken, AttributeValue::Bytes(token)) =
            (kind, &value)
        {
            let token = Any::from_der(token)?;
            let value_tags = kind.info().value_tags;
            if !value_tags.contains(&token.tag()) {
                return Err(Error::AttributeTag {
                    kind,
                    tag: token.tag(),
                    expected: value_tags,
                });
            }
        }

        Ok(Self { kind, value })
    }

    /// Decodes one attribute from `reader`.
    ///
    /// An OID missing from the registry yields
    /// [`Error::UnsupportedPkcs9Attribute`] after the whole attribute has
    /// been consumed, so callers may skip it and carry on.
    pub fn decode(reader: &mut SliceReader<'_>) -> Result<Self> {
        let mut contents = encoding::constructed(reader, Tag::Sequence)?;
        let oid = ObjectIdentifier::decode(&mut contents)?;
        let elements = encoding::collection_of(&mut contents, Tag::Set, |set| {
            Ok(Any::decode(set)?)
        })?;
        contents.finish(())?;

        let kind = match AttributeKind::from_oid(&oid) {
            Some(kind) => kind,
            None => {
                log::debug!("unsupported PKCS#9 attribute: {oid}");
                return Err(Error::UnsupportedPkcs9Attribute(oid));
            }
        };
        let info = kind.info();

        if info.single_valued && elements.len() != 1 {
            return Err(Error::AttributeCardinality {
                kind,
                count: elements.len(),
            });
        }

        // Nothing is known about the wire form of these.
        if info.value_tags.is_empty() {
            return Err(Error::AttributeNotSupported {
                kind,
                operation: AttributeOperation::Decode,
            });
        }

        for element in &elements {
            if !info.value_tags.contains(&element.tag()) {
                return Err(Error::AttributeTag {
                    kind,
                    tag: element.tag(),
                    expected: info.value_tags,
                });
            }
        }

        let value = match (kind, elements.as_slice()) {
            (
                AttributeKind::EmailAddress
                | AttributeKind::UnstructuredName
                | AttributeKind::UnstructuredAddress,
                _,
            ) => AttributeValue::Strings(
                elements.iter().map(decode_string).collect::<Result<_>>()?,
            ),
            (AttributeKind::ContentType, [element]) => {
                AttributeValue::ObjectIdentifier(decode_any(element)?)
            }
            (AttributeKind::MessageDigest, [element]) => {
                AttributeValue::Bytes(element.value().to_vec())
            }
            (AttributeKind::SigningTime, [element]) => {
                AttributeValue::Time(decode_any::<Time>(element)?)
            }
            (AttributeKind::Countersignature, _) => AttributeValue::SignerInfos(
                elements
                    .iter()
                    .map(|element| SignerInfo::from_der(&element.to_der()?))
                    .collect::<Result<_>>()?,
            ),
            (AttributeKind::ChallengePassword, [element]) => {
                AttributeValue::String(decode_string(element)?)
            }
            (AttributeKind::ExtensionRequest, [element]) => {
                AttributeValue::Extensions(decode_any::<Extensions>(element)?)
            }
            (AttributeKind::SigningCertificate, [element]) => AttributeValue::SigningCertificate(
                SigningCertificateInfo::from_der(&element.to_der()?)?,
            ),
            (AttributeKind::SignatureTimestampToken, [element]) => {
                AttributeValue::Bytes(element.to_der()?)
            }
            _ => {
                return Err(Error::AttributeNotSupported {
                    kind,
                    operation: AttributeOperation::Decode,
                })
            }
        };

        Ok(Self { kind, value })
    }

    /// Decodes a complete DER attribute.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(bytes)?;
        let attribute = Self::decode(&mut reader)?;
        Ok(reader.finish(attribute)?)
    }

    /// Encodes this attribute as a DER `Attribute`.
    ///
    /// `UnstructuredName` is written as IA5String and `UnstructuredAddress`
    /// and `ChallengePassword` as PrintableString, falling back to UTF8String
    /// for values outside those character sets. `EmailAddress` is IA5String
    /// only.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let not_supported = || Error::AttributeNotSupported {
            kind: self.kind,
            operation: AttributeOperation::Encode,
        };

        if !self.kind.info().encodable {
            return Err(not_supported());
        }

        let values = match (self.kind, &self.value) {
            (AttributeKind::EmailAddress, AttributeValue::Strings(strings)) => strings
                .iter()
                .map(|s| Ok(Ia5StringRef::new(s)?.to_der()?))
                .collect::<Result<_>>()?,
            (AttributeKind::UnstructuredName, AttributeValue::Strings(strings)) => strings
                .iter()
                .map(|s| or_utf8(s, Ia5StringRef::new(s).and_then(|s| s.to_der())))
                .collect::<Result<_>>()?,
            (AttributeKind::UnstructuredAddress, AttributeValue::Strings(strings)) => strings
                .iter()
                .map(|s| or_utf8(s, PrintableStringRef::new(s).and_then(|s| s.to_der())))
                .collect::<Result<_>>()?,
            (AttributeKind::ChallengePassword, AttributeValue::String(s)) => {
                vec![or_utf8(s, PrintableStringRef::new(s).and_then(|s| s.to_der()))?]
            }
            (AttributeKind::ContentType, AttributeValue::ObjectIdentifier(oid)) => {
                vec![oid.to_der()?]
            }
            (AttributeKind::MessageDigest, AttributeValue::Bytes(digest)) => {
                vec![OctetStringRef::new(digest)?.to_der()?]
            }
            (AttributeKind::SigningTime, AttributeValue::Time(time)) => vec![time.to_der()?],
            (AttributeKind::Countersignature, AttributeValue::SignerInfos(signers)) => signers
                .iter()
                .map(SignerInfo::encode)
                .collect::<Result<_>>()?,
            (AttributeKind::ExtensionRequest, AttributeValue::Extensions(extensions)) => {
                vec![extensions.to_der()?]
            }
            (AttributeKind::SignatureTimestampToken, AttributeValue::Bytes(token)) => {
                vec![token.clone()]
            }
            _ => return Err(not_supported()),
        };

        let mut contents = self.oid().to_der()?;
        contents.extend(encoding::ordered_set_of(Tag::Set, values)?);
        encoding::tlv(Tag::Sequence, &contents)
    }

    /// Registry kind.
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Attribute OID.
    pub fn oid(&self) -> ObjectIdentifier {
        self.kind.oid()
    }

    /// Registry name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Attribute value.
    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    /// Consumes the attribute and returns its value.
    pub fn into_value(self) -> AttributeValue {
        self.value
    }

    /// Whether the attribute holds exactly one value.
    pub fn is_single_valued(&self) -> bool {
        self.kind.is_single_valued()
    }
}

fn decode_any<T>(any: &Any) -> Result<T>
where
    T: for<'a> Decode<'a>,
{
    encoding::decode_all(&any.to_der()?)
}

fn decode_string(any: &Any) -> Result<String> {
    let bytes = any.value();
    let string = match any.tag() {
        Tag::Ia5String => Ia5StringRef::new(bytes)?.to_string(),
        Tag::PrintableString => PrintableStringRef::new(bytes)?.to_string(),
        Tag::TeletexString => TeletexStringRef::new(bytes)?.to_string(),
        Tag::Utf8String => Utf8StringRef::new(bytes)?.to_string(),
        tag => return Err(tag.value_error().into()),
    };
    Ok(string)
}

/// Keeps `preferred` when `s` fits its character set, else writes a UTF8String.
fn or_utf8(s: &str, preferred: der::Result<Vec<u8>>) -> Result<Vec<u8>> {
    match preferred {
        Ok(encoded) => Ok(encoded),
        Err(_) => Ok(Utf8StringRef::new(s)?.to_der()?),
    }
}

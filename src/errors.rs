//! Error types.

use core::fmt;
use der::Tag;

use crate::{AttributeKind, ObjectIdentifier, ValueShape};

/// Alias for [`core::result::Result`] with the `pkcs7-signed` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed, truncated or trailing DER data.
    Asn1(der::Error),

    /// Neither the standard nor the legacy encoding could be parsed.
    ///
    /// Carries the error the legacy attempt ended with.
    Parsing(Box<Error>),

    /// The content type cannot be handled here.
    UnsupportedContentType(ObjectIdentifier),

    /// Typed data was requested from a content info that does not carry data.
    NotData(ObjectIdentifier),

    /// A content info carries no content where some is required.
    ContentAbsent,

    /// A recognized PKCS#9 attribute has no support for this operation.
    AttributeNotSupported {
        /// Attribute kind.
        kind: AttributeKind,
        /// Operation that was attempted.
        operation: AttributeOperation,
    },

    /// An attribute was constructed from an OID missing from the registry.
    UnknownAttributeOid(ObjectIdentifier),

    /// An attribute was constructed from a name missing from the registry.
    UnknownAttributeName(String),

    /// An encoded attribute carries an OID missing from the registry.
    UnsupportedPkcs9Attribute(ObjectIdentifier),

    /// A single-valued attribute does not hold exactly one value.
    AttributeCardinality {
        /// Attribute kind.
        kind: AttributeKind,
        /// Number of values found.
        count: usize,
    },

    /// An attribute value carries a tag the attribute does not accept.
    AttributeTag {
        /// Attribute kind.
        kind: AttributeKind,
        /// Offending tag.
        tag: Tag,
        /// Tags accepted for the attribute.
        expected: &'static [Tag],
    },

    /// An attribute was constructed with a value of the wrong shape.
    ValueShape {
        /// Attribute kind.
        kind: AttributeKind,
        /// Shape the registry requires.
        expected: ValueShape,
        /// Shape that was supplied.
        actual: ValueShape,
    },

    /// The same attribute OID occurs twice in one attribute set.
    DuplicateAttribute(ObjectIdentifier),

    /// Digest or signature algorithm not supported.
    UnsupportedAlgorithm(ObjectIdentifier),

    /// Signer public key could not be decoded.
    PublicKey(spki::Error),

    /// Signer certificate forbids digital signatures.
    KeyUsage,

    /// PEM encoding error.
    #[cfg(feature = "pem")]
    Pem(pem_rfc7468::Error),

    /// PEM label is neither `PKCS7` nor `CMS`.
    #[cfg(feature = "pem")]
    PemLabel(String),
}

/// Attribute operation reported by [`Error::AttributeNotSupported`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeOperation {
    /// Construction from a value.
    Construct,
    /// Decoding from DER.
    Decode,
    /// Encoding to DER.
    Encode,
}

impl fmt::Display for AttributeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttributeOperation::Construct => "construction",
            AttributeOperation::Decode => "decoding",
            AttributeOperation::Encode => "encoding",
        })
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Asn1(err) => Some(err),
            Error::Parsing(cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Asn1(err) => write!(f, "ASN.1 error: {err}"),
            Error::Parsing(cause) => write!(f, "unable to parse the encoded bytes: {cause}"),
            Error::UnsupportedContentType(oid) => write!(f, "content type {oid} not supported"),
            Error::NotData(oid) => write!(f, "content type is not DATA: {oid}"),
            Error::ContentAbsent => f.write_str("content info carries no content"),
            Error::AttributeNotSupported { kind, operation } => {
                write!(f, "PKCS#9 {kind} attribute: {operation} not supported")
            }
            Error::UnknownAttributeOid(oid) => write!(f, "unrecognized PKCS#9 attribute OID {oid}"),
            Error::UnknownAttributeName(name) => {
                write!(f, "unrecognized PKCS#9 attribute name {name}")
            }
            Error::UnsupportedPkcs9Attribute(oid) => {
                write!(f, "unsupported PKCS#9 attribute: {oid}")
            }
            Error::AttributeCardinality { kind, count } => {
                write!(f, "single-valued PKCS#9 {kind} attribute has {count} values")
            }
            Error::AttributeTag {
                kind,
                tag,
                expected,
            } => {
                write!(f, "value of PKCS#9 {kind} attribute has invalid tag {tag}")?;
                for (i, tag) in expected.iter().enumerate() {
                    f.write_str(if i == 0 { "; expected one of " } else { ", " })?;
                    write!(f, "{tag}")?;
                }
                Ok(())
            }
            Error::ValueShape {
                kind,
                expected,
                actual,
            } => write!(
                f,
                "PKCS#9 {kind} attribute requires a {expected} value, got {actual}"
            ),
            Error::DuplicateAttribute(oid) => write!(f, "duplicate PKCS#9 attribute: {oid}"),
            Error::UnsupportedAlgorithm(oid) => write!(f, "algorithm {oid} not supported"),
            Error::PublicKey(err) => write!(f, "invalid signer public key: {err}"),
            Error::KeyUsage => f.write_str(
                "key usage restricted: certificate cannot be used for digital signatures",
            ),
            #[cfg(feature = "pem")]
            Error::Pem(err) => write!(f, "PEM error: {err}"),
            #[cfg(feature = "pem")]
            Error::PemLabel(label) => write!(f, "unexpected PEM label: {label}"),
        }
    }
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Asn1(err)
    }
}

impl From<spki::Error> for Error {
    fn from(err: spki::Error) -> Error {
        Error::PublicKey(err)
    }
}

#[cfg(feature = "pem")]
impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Error {
        Error::Pem(err)
    }
}

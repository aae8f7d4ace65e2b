use core::fmt;
use x509_cert::{ext::Extensions, time::Time};

use crate::{ObjectIdentifier, SignerInfo, SigningCertificateInfo};

/// Decoded value of a PKCS#9 attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeValue {
    /// Email address, unstructured name or unstructured address.
    Strings(Vec<String>),
    /// Content type.
    ObjectIdentifier(ObjectIdentifier),
    /// Message digest, or the complete DER encoding of a timestamp token.
    Bytes(Vec<u8>),
    /// Signing time.
    Time(Time),
    /// Countersignatures.
    SignerInfos(Vec<SignerInfo>),
    /// Challenge password.
    String(String),
    /// Requested certificate extensions.
    Extensions(Extensions),
    /// ESS signing certificate.
    SigningCertificate(SigningCertificateInfo),
}

/// The shape of an [`AttributeValue`], without its payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueShape {
    /// [`AttributeValue::Strings`]
    Strings,
    /// [`AttributeValue::ObjectIdentifier`]
    ObjectIdentifier,
    /// [`AttributeValue::Bytes`]
    Bytes,
    /// [`AttributeValue::Time`]
    Time,
    /// [`AttributeValue::SignerInfos`]
    SignerInfos,
    /// [`AttributeValue::String`]
    String,
    /// [`AttributeValue::Extensions`]
    Extensions,
    /// [`AttributeValue::SigningCertificate`]
    SigningCertificate,
}

impl AttributeValue {
    /// Shape of this value.
    pub fn shape(&self) -> ValueShape {
        match self {
            AttributeValue::Strings(_) => ValueShape::Strings,
            AttributeValue::ObjectIdentifier(_) => ValueShape::ObjectIdentifier,
            AttributeValue::Bytes(_) => ValueShape::Bytes,
            AttributeValue::Time(_) => ValueShape::Time,
            AttributeValue::SignerInfos(_) => ValueShape::SignerInfos,
            AttributeValue::String(_) => ValueShape::String,
            AttributeValue::Extensions(_) => ValueShape::Extensions,
            AttributeValue::SigningCertificate(_) => ValueShape::SigningCertificate,
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueShape::Strings => "string list",
            ValueShape::ObjectIdentifier => "object identifier",
            ValueShape::Bytes => "byte string",
            ValueShape::Time => "time",
            ValueShape::SignerInfos => "signer info list",
            ValueShape::String => "string",
            ValueShape::Extensions => "extension list",
            ValueShape::SigningCertificate => "signing certificate",
        })
    }
}

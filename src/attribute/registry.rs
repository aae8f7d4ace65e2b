//! The fixed PKCS#9 attribute table.

use core::fmt;
use der::Tag;

use super::ValueShape;
use crate::ObjectIdentifier;

/// Attributes known to the registry, numbered as in the PKCS#9 arc.
///
/// Kinds 1 through 15 live under `1.2.840.113549.1.9`; the last two are
/// S/MIME attributes under `1.2.840.113549.1.9.16.2`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum AttributeKind {
    /// `emailAddress`
    EmailAddress = 1,
    /// `unstructuredName`
    UnstructuredName = 2,
    /// `contentType`
    ContentType = 3,
    /// `messageDigest`
    MessageDigest = 4,
    /// `signingTime`
    SigningTime = 5,
    /// `countersignature`
    Countersignature = 6,
    /// `challengePassword`
    ChallengePassword = 7,
    /// `unstructuredAddress`
    UnstructuredAddress = 8,
    /// `extendedCertificateAttributes`
    ExtendedCertificateAttributes = 9,
    /// `issuerAndSerialNumber`
    IssuerAndSerialNumber = 10,
    /// RSA DSI proprietary arc 11.
    RsaProprietary = 11,
    /// RSA DSI proprietary arc 12; shares its name with arc 11.
    RsaProprietarySecondary = 12,
    /// `smimeSigningDesc`
    SmimeSigningDesc = 13,
    /// `extensionRequest`
    ExtensionRequest = 14,
    /// `smimeCapability`
    SmimeCapability = 15,
    /// `signingCertificate`
    SigningCertificate = 16,
    /// `signatureTimestampToken`
    SignatureTimestampToken = 17,
}

/// Registry entry for one attribute kind.
#[derive(Debug)]
pub struct AttributeInfo {
    /// Kind this entry describes.
    pub kind: AttributeKind,
    /// Attribute OID.
    pub oid: ObjectIdentifier,
    /// Display name; lookup by name is case-insensitive.
    pub name: &'static str,
    /// Tags a value may carry on the wire.
    pub value_tags: &'static [Tag],
    /// Whether the attribute holds exactly one value.
    pub single_valued: bool,
    /// Value shape accepted on construction, if construction is supported.
    pub shape: Option<ValueShape>,
    /// Whether values can be decoded.
    pub decodable: bool,
    /// Whether values can be encoded.
    pub encodable: bool,
}

const fn pkcs9(arc: &str) -> ObjectIdentifier {
    ObjectIdentifier::new_unwrap(arc)
}

const STRING_TAGS: &[Tag] = &[Tag::PrintableString, Tag::TeletexString, Tag::Utf8String];

static REGISTRY: [AttributeInfo; 17] = [
    AttributeInfo {
        kind: AttributeKind::EmailAddress,
        oid: pkcs9("1.2.840.113549.1.9.1"),
        name: "EmailAddress",
        value_tags: &[Tag::Ia5String],
        single_valued: false,
        shape: Some(ValueShape::Strings),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::UnstructuredName,
        oid: pkcs9("1.2.840.113549.1.9.2"),
        name: "UnstructuredName",
        value_tags: &[Tag::Ia5String, Tag::PrintableString, Tag::Utf8String],
        single_valued: false,
        shape: Some(ValueShape::Strings),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::ContentType,
        oid: pkcs9("1.2.840.113549.1.9.3"),
        name: "ContentType",
        value_tags: &[Tag::ObjectIdentifier],
        single_valued: true,
        shape: Some(ValueShape::ObjectIdentifier),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::MessageDigest,
        oid: pkcs9("1.2.840.113549.1.9.4"),
        name: "MessageDigest",
        value_tags: &[Tag::OctetString],
        single_valued: true,
        shape: Some(ValueShape::Bytes),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::SigningTime,
        oid: pkcs9("1.2.840.113549.1.9.5"),
        name: "SigningTime",
        value_tags: &[Tag::UtcTime, Tag::GeneralizedTime],
        single_valued: true,
        shape: Some(ValueShape::Time),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::Countersignature,
        oid: pkcs9("1.2.840.113549.1.9.6"),
        name: "Countersignature",
        value_tags: &[Tag::Sequence],
        single_valued: false,
        shape: Some(ValueShape::SignerInfos),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::ChallengePassword,
        oid: pkcs9("1.2.840.113549.1.9.7"),
        name: "ChallengePassword",
        value_tags: STRING_TAGS,
        single_valued: true,
        shape: Some(ValueShape::String),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::UnstructuredAddress,
        oid: pkcs9("1.2.840.113549.1.9.8"),
        name: "UnstructuredAddress",
        value_tags: STRING_TAGS,
        single_valued: false,
        shape: Some(ValueShape::Strings),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::ExtendedCertificateAttributes,
        oid: pkcs9("1.2.840.113549.1.9.9"),
        name: "ExtendedCertificateAttributes",
        value_tags: &[Tag::Set],
        single_valued: false,
        shape: None,
        decodable: false,
        encodable: false,
    },
    AttributeInfo {
        kind: AttributeKind::IssuerAndSerialNumber,
        oid: pkcs9("1.2.840.113549.1.9.10"),
        name: "IssuerAndSerialNumber",
        value_tags: &[Tag::Sequence],
        single_valued: true,
        shape: None,
        decodable: false,
        encodable: false,
    },
    AttributeInfo {
        kind: AttributeKind::RsaProprietary,
        oid: pkcs9("1.2.840.113549.1.9.11"),
        name: "RSAProprietary",
        value_tags: &[],
        single_valued: false,
        shape: None,
        decodable: false,
        encodable: false,
    },
    AttributeInfo {
        kind: AttributeKind::RsaProprietarySecondary,
        oid: pkcs9("1.2.840.113549.1.9.12"),
        name: "RSAProprietary",
        value_tags: &[],
        single_valued: false,
        shape: None,
        decodable: false,
        encodable: false,
    },
    AttributeInfo {
        kind: AttributeKind::SmimeSigningDesc,
        oid: pkcs9("1.2.840.113549.1.9.13"),
        name: "SMIMESigningDesc",
        value_tags: &[],
        single_valued: false,
        shape: None,
        decodable: false,
        encodable: false,
    },
    AttributeInfo {
        kind: AttributeKind::ExtensionRequest,
        oid: pkcs9("1.2.840.113549.1.9.14"),
        name: "ExtensionRequest",
        value_tags: &[Tag::Sequence],
        single_valued: true,
        shape: Some(ValueShape::Extensions),
        decodable: true,
        encodable: true,
    },
    AttributeInfo {
        kind: AttributeKind::SmimeCapability,
        oid: pkcs9("1.2.840.113549.1.9.15"),
        name: "SMIMECapability",
        value_tags: &[Tag::Sequence],
        single_valued: true,
        shape: None,
        decodable: false,
        encodable: false,
    },
    AttributeInfo {
        kind: AttributeKind::SigningCertificate,
        oid: pkcs9("1.2.840.113549.1.9.16.2.12"),
        name: "SigningCertificate",
        value_tags: &[Tag::Sequence],
        single_valued: true,
        shape: Some(ValueShape::SigningCertificate),
        decodable: true,
        encodable: false,
    },
    AttributeInfo {
        kind: AttributeKind::SignatureTimestampToken,
        oid: pkcs9("1.2.840.113549.1.9.16.2.14"),
        name: "SignatureTimestampToken",
        value_tags: &[Tag::Sequence],
        single_valued: true,
        shape: Some(ValueShape::Bytes),
        decodable: true,
        encodable: true,
    },
];

impl AttributeKind {
    /// Every kind, in registry order.
    pub fn all() -> impl Iterator<Item = AttributeKind> {
        REGISTRY.iter().map(|info| info.kind)
    }

    /// Registry entry for this kind.
    pub fn info(self) -> &'static AttributeInfo {
        &REGISTRY[self as usize - 1]
    }

    /// Looks up the kind registered for `oid`.
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|info| info.oid == *oid)
            .map(|info| info.kind)
    }

    /// Looks up a kind by name, ignoring ASCII case.
    ///
    /// Where two entries share a name the lower-numbered one wins.
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(name))
            .map(|info| info.kind)
    }

    /// Attribute OID.
    pub fn oid(self) -> ObjectIdentifier {
        self.info().oid
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Whether the attribute holds exactly one value.
    pub fn is_single_valued(self) -> bool {
        self.info().single_valued
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

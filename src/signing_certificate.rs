//! ESS `SigningCertificate` (RFC 2634 §5.4), the value of the
//! `signingCertificate` attribute.

use der::{
    asn1::OctetString, Any, Decode, DecodeValue, Encode, EncodeValue, FixedTag, Header, Length,
    Reader, Sequence, Tag, Tagged, Writer,
};
use sha1::{Digest, Sha1};
use x509_cert::{
    ext::pkix::name::{GeneralName, GeneralNames},
    Certificate,
};

use crate::Result;

/// ```text
/// SigningCertificate ::= SEQUENCE {
///     certs    SEQUENCE OF ESSCertID,
///     policies SEQUENCE OF PolicyInformation OPTIONAL }
/// ```
///
/// Policies are checked to be a `SEQUENCE OF` and then dropped; they are
/// not written back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigningCertificateInfo {
    /// Certificate identifiers; the first one names the signing certificate.
    pub certs: Vec<EssCertId>,
}

impl<'a> DecodeValue<'a> for SigningCertificateInfo {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let certs = Vec::<EssCertId>::decode(reader)?;
            if !reader.is_finished() {
                Vec::<Any>::decode(reader)?;
            }
            Ok(Self { certs })
        })
    }
}

impl EncodeValue for SigningCertificateInfo {
    fn value_len(&self) -> der::Result<Length> {
        self.certs.encoded_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.certs.encode(writer)
    }
}

impl FixedTag for SigningCertificateInfo {
    const TAG: Tag = Tag::Sequence;
}

/// ```text
/// ESSCertID ::= SEQUENCE {
///     certHash     Hash,
///     issuerSerial IssuerSerial OPTIONAL }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct EssCertId {
    /// SHA-1 hash of the certificate encoding.
    pub cert_hash: OctetString,

    /// Issuer and serial number of the certificate.
    pub issuer_serial: Option<IssuerSerial>,
}

/// ```text
/// IssuerSerial ::= SEQUENCE {
///     issuer       GeneralNames,
///     serialNumber CertificateSerialNumber }
/// ```
///
/// Both fields are kept as raw TLVs. Serial numbers of any length are
/// accepted; the issuer is only decoded on demand.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct IssuerSerial {
    /// Encoded `GeneralNames` of the certificate issuer.
    pub issuer: Any,

    /// Encoded serial number INTEGER.
    pub serial_number: Any,
}

impl SigningCertificateInfo {
    /// Identifier of the signing certificate.
    pub fn signing_cert_id(&self) -> Option<&EssCertId> {
        self.certs.first()
    }
}

impl IssuerSerial {
    /// Decodes the issuer names.
    pub fn issuer_names(&self) -> Result<GeneralNames> {
        Ok(GeneralNames::from_der(&self.issuer.to_der()?)?)
    }
}

impl EssCertId {
    /// Checks whether this identifier names `certificate`.
    pub fn matches(&self, certificate: &Certificate) -> Result<bool> {
        let hash = Sha1::digest(certificate.to_der()?);
        if self.cert_hash.as_bytes() != hash.as_slice() {
            return Ok(false);
        }

        let Some(issuer_serial) = &self.issuer_serial else {
            return Ok(true);
        };

        let tbs = &certificate.tbs_certificate;
        let serial = &issuer_serial.serial_number;
        if serial.tag() != Tag::Integer || serial.value() != tbs.serial_number.as_bytes() {
            return Ok(false);
        }

        Ok(issuer_serial.issuer_names()?.iter().any(
            |name| matches!(name, GeneralName::DirectoryName(dn) if *dn == tbs.issuer),
        ))
    }
}

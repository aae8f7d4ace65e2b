//! The PKCS#7 signed-message container.

use std::{collections::BTreeSet, sync::OnceLock};

use der::{Any, Decode, Encode, Reader, SliceReader, Tag, TagNumber, Tagged};
use spki::AlgorithmIdentifierOwned;
use x509_cert::{crl::CertificateList, name::Name, serial_number::SerialNumber, Certificate};

use crate::{encoding, oid, ContentInfo, Error, Result, SignerInfo};

const CERTIFICATES_TAG: Tag = encoding::context_tag(TagNumber::N0);
const CRLS_TAG: Tag = encoding::context_tag(TagNumber::N1);

/// A signed message: `SignedData`, its legacy JDK layout, or a Netscape
/// certificate sequence.
///
/// ```text
/// SignedData ::= SEQUENCE {
///     version          Version,
///     digestAlgorithms DigestAlgorithmIdentifiers,
///     contentInfo      ContentInfo,
///     certificates     [0] IMPLICIT ExtendedCertificatesAndCertificates OPTIONAL,
///     crls             [1] IMPLICIT CertificateRevocationLists OPTIONAL,
///     signerInfos      SignerInfos }
/// ```
///
/// Whatever layout was parsed, [`SignedMessage::encode`] writes standard
/// `SignedData`.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedMessage {
    version: Option<u32>,
    digest_algorithm_ids: Vec<AlgorithmIdentifierOwned>,
    content_info: ContentInfo,
    certificates: Option<Vec<Certificate>>,
    crls: Option<Vec<CertificateList>>,
    signer_infos: Vec<SignerInfo>,
    legacy_encoding: bool,

    /// Issuer names of `certificates`, by index; built on first lookup.
    issuer_names: OnceLock<Vec<Name>>,
}

impl SignedMessage {
    /// Assembles a version 1 `SignedData` container.
    pub fn new(
        digest_algorithm_ids: Vec<AlgorithmIdentifierOwned>,
        content_info: ContentInfo,
        certificates: Option<Vec<Certificate>>,
        crls: Option<Vec<CertificateList>>,
        signer_infos: Vec<SignerInfo>,
    ) -> Self {
        Self {
            version: Some(1),
            digest_algorithm_ids,
            content_info,
            certificates,
            crls,
            signer_infos,
            legacy_encoding: false,
            issuer_names: OnceLock::new(),
        }
    }

    /// Parses a DER-encoded container.
    ///
    /// The standard layout is tried first; if that fails the input is parsed
    /// again from the start in the legacy layout. When both fail the error
    /// of the legacy attempt is returned wrapped in [`Error::Parsing`].
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let reader = SliceReader::new(bytes)?;
        match Self::decode_layout(reader.clone(), false) {
            Ok(message) => Ok(message),
            Err(standard) => {
                log::debug!("standard PKCS#7 parse failed ({standard}); trying legacy layout");
                Self::decode_layout(reader, true).map_err(|legacy| Error::Parsing(Box::new(legacy)))
            }
        }
    }

    fn decode_layout(mut reader: SliceReader<'_>, legacy: bool) -> Result<Self> {
        let content_info = ContentInfo::decode(&mut reader, legacy)?;
        let mut message = Self::from_content_info(content_info, legacy)?;
        message.legacy_encoding = legacy;
        Ok(reader.finish(message)?)
    }

    fn from_content_info(content_info: ContentInfo, legacy: bool) -> Result<Self> {
        let content_type = content_info.content_type;
        let content = content_info.content.ok_or(Error::ContentAbsent)?;

        if content_type == oid::SIGNED_DATA {
            Self::decode_signed_data(&content)
        } else if content_type == oid::OLD_SIGNED_DATA && legacy {
            Self::decode_legacy_signed_data(&content)
        } else if content_type == oid::NETSCAPE_CERT_SEQUENCE {
            Self::decode_netscape_cert_sequence(&content)
        } else {
            Err(Error::UnsupportedContentType(content_type))
        }
    }

    fn decode_signed_data(content: &Any) -> Result<Self> {
        content.tag().assert_eq(Tag::Sequence)?;
        let mut contents = SliceReader::new(content.value())?;

        let version = u32::decode(&mut contents)?;
        let digest_algorithm_ids = encoding::collection_of(&mut contents, Tag::Set, |set| {
            Ok(AlgorithmIdentifierOwned::decode(set)?)
        })?;
        let content_info = ContentInfo::decode(&mut contents, false)?;

        let certificates = if encoding::next_is(&contents, CERTIFICATES_TAG) {
            Some(decode_certificate_set(&mut contents)?)
        } else {
            None
        };

        let crls = if encoding::next_is(&contents, CRLS_TAG) {
            Some(encoding::collection_of(&mut contents, CRLS_TAG, |set| {
                Ok(CertificateList::decode(set)?)
            })?)
        } else {
            None
        };

        let signer_infos = encoding::collection_of(&mut contents, Tag::Set, |set| {
            SignerInfo::decode(set, false)
        })?;

        let message = Self {
            version: Some(version),
            digest_algorithm_ids,
            content_info,
            certificates,
            crls,
            signer_infos,
            legacy_encoding: false,
            issuer_names: OnceLock::new(),
        };
        Ok(contents.finish(message)?)
    }

    /// Legacy JDK layout: certificates and CRLs sit in plain SETs, both
    /// mandatory, and the CRLs are dropped.
    fn decode_legacy_signed_data(content: &Any) -> Result<Self> {
        content.tag().assert_eq(Tag::Sequence)?;
        let mut contents = SliceReader::new(content.value())?;

        let version = u32::decode(&mut contents)?;
        let digest_algorithm_ids = encoding::collection_of(&mut contents, Tag::Set, |set| {
            Ok(AlgorithmIdentifierOwned::decode(set)?)
        })?;
        let content_info = ContentInfo::decode(&mut contents, true)?;
        let certificates = encoding::collection_of(&mut contents, Tag::Set, |set| {
            Ok(Certificate::decode(set)?)
        })?;
        encoding::value_of(&mut contents, Tag::Set)?;
        let signer_infos = encoding::collection_of(&mut contents, Tag::Set, |set| {
            SignerInfo::decode(set, true)
        })?;

        let message = Self {
            version: Some(version),
            digest_algorithm_ids,
            content_info,
            certificates: Some(certificates),
            crls: None,
            signer_infos,
            legacy_encoding: true,
            issuer_names: OnceLock::new(),
        };
        Ok(contents.finish(message)?)
    }

    /// A bare `SEQUENCE OF Certificate`; re-encodes as a certificates-only
    /// `SignedData` with empty `data` content.
    fn decode_netscape_cert_sequence(content: &Any) -> Result<Self> {
        content.tag().assert_eq(Tag::Sequence)?;
        let mut contents = SliceReader::new(content.value())?;
        let mut certificates = Vec::new();
        while !contents.is_finished() {
            certificates.push(Certificate::decode(&mut contents)?);
        }

        Ok(Self {
            version: None,
            digest_algorithm_ids: Vec::new(),
            content_info: ContentInfo::new(oid::DATA, None),
            certificates: Some(certificates),
            crls: None,
            signer_infos: Vec::new(),
            legacy_encoding: false,
            issuer_names: OnceLock::new(),
        })
    }

    /// Encodes the container as a standard `SignedData` content info.
    ///
    /// CRLs are de-duplicated; every other collection is written as given,
    /// in DER set order. Empty certificate and CRL collections are omitted.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut contents = self.version.unwrap_or(1).to_der()?;
        contents.extend(encoding::ordered_set_of(
            Tag::Set,
            encoding::encode_each(&self.digest_algorithm_ids)?,
        )?);
        contents.extend(self.content_info.encode()?);

        if let Some(certificates) = self.certificates.as_ref().filter(|c| !c.is_empty()) {
            contents.extend(encoding::ordered_set_of(
                CERTIFICATES_TAG,
                encoding::encode_each(certificates)?,
            )?);
        }

        if let Some(crls) = self.crls.as_ref().filter(|c| !c.is_empty()) {
            let unique: BTreeSet<Vec<u8>> = encoding::encode_each(crls)?.into_iter().collect();
            contents.extend(encoding::ordered_set_of(
                CRLS_TAG,
                unique.into_iter().collect(),
            )?);
        }

        let signer_infos = self
            .signer_infos
            .iter()
            .map(SignerInfo::encode)
            .collect::<Result<Vec<_>>>()?;
        contents.extend(encoding::ordered_set_of(Tag::Set, signer_infos)?);

        let signed_data = Any::new(Tag::Sequence, contents)?;
        ContentInfo::new(oid::SIGNED_DATA, Some(signed_data)).encode()
    }

    /// `SignedData` version; absent for a Netscape certificate sequence.
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Digest algorithms used by the signers.
    pub fn digest_algorithm_ids(&self) -> &[AlgorithmIdentifierOwned] {
        &self.digest_algorithm_ids
    }

    /// The signed content.
    pub fn content_info(&self) -> &ContentInfo {
        &self.content_info
    }

    /// Certificates, if the certificate field was present.
    pub fn certificates(&self) -> Option<&[Certificate]> {
        self.certificates.as_deref()
    }

    /// CRLs, if the CRL field was present.
    pub fn crls(&self) -> Option<&[CertificateList]> {
        self.crls.as_deref()
    }

    /// Signer infos.
    pub fn signer_infos(&self) -> &[SignerInfo] {
        &self.signer_infos
    }

    /// Whether the container was parsed from the legacy layout.
    pub fn is_legacy_encoding(&self) -> bool {
        self.legacy_encoding
    }

    /// Finds the certificate with the given serial number and issuer.
    ///
    /// Matching on both matters: unrelated issuers may reuse a serial number.
    /// Safe to call from several threads; the issuer index is built once.
    pub fn certificate(&self, serial_number: &SerialNumber, issuer: &Name) -> Option<&Certificate> {
        let certificates = self.certificates.as_deref()?;
        let issuer_names = self.issuer_names.get_or_init(|| {
            certificates
                .iter()
                .map(|certificate| certificate.tbs_certificate.issuer.clone())
                .collect()
        });

        certificates
            .iter()
            .zip(issuer_names)
            .find(|(certificate, name)| {
                certificate.tbs_certificate.serial_number == *serial_number && *name == issuer
            })
            .map(|(certificate, _)| certificate)
    }

    /// Verifies one signer; see [`SignerInfo::verify`].
    pub fn verify<'s>(
        &self,
        signer_info: &'s SignerInfo,
        data: Option<&[u8]>,
    ) -> Result<Option<&'s SignerInfo>> {
        signer_info.verify(self, data)
    }

    /// Verifies every signer against `data`, or against the carried content.
    ///
    /// Returns the signers that verified, or `None` if none did.
    pub fn verify_all(&self, data: Option<&[u8]>) -> Result<Option<Vec<&SignerInfo>>> {
        let mut verified = Vec::new();
        for signer_info in &self.signer_infos {
            if let Some(signer_info) = self.verify(signer_info, data)? {
                verified.push(signer_info);
            }
        }
        Ok(if verified.is_empty() { None } else { Some(verified) })
    }
}

impl TryFrom<&[u8]> for SignedMessage {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_der(bytes)
    }
}

/// Reads `[0] IMPLICIT SET OF CertificateChoices`, keeping only X.509
/// certificates.
fn decode_certificate_set(reader: &mut SliceReader<'_>) -> Result<Vec<Certificate>> {
    let mut contents = encoding::constructed(reader, CERTIFICATES_TAG)?;
    let mut certificates = Vec::new();
    while !contents.is_finished() {
        if encoding::next_is(&contents, Tag::Sequence) {
            certificates.push(Certificate::decode(&mut contents)?);
        } else {
            let skipped = Any::decode(&mut contents)?;
            log::debug!("skipping certificate choice with tag {}", skipped.tag());
        }
    }
    Ok(certificates)
}

#[cfg(feature = "pem")]
impl SignedMessage {
    /// Parses a PEM-armoured container labelled `PKCS7` or `CMS`.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        match label {
            "PKCS7" | "CMS" => Self::from_der(&der),
            other => Err(Error::PemLabel(other.to_owned())),
        }
    }

    /// Encodes the container as PEM with the `PKCS7` label.
    pub fn to_pem(&self, line_ending: pem_rfc7468::LineEnding) -> Result<String> {
        Ok(pem_rfc7468::encode_string(
            "PKCS7",
            line_ending,
            &self.encode()?,
        )?)
    }
}

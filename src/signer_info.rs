//! Per-signer records.

use std::borrow::Cow;

use der::{asn1::OctetString, Decode, Encode, Reader, SliceReader, Tag, TagNumber};
use spki::AlgorithmIdentifierOwned;
use subtle::ConstantTimeEq;
use x509_cert::{name::Name, serial_number::SerialNumber, Certificate};

use crate::{
    encoding, verifier, AttributeKind, AttributeSet, AttributeValue, DigestAlgorithm, Error,
    Result, SignedMessage,
};

const AUTHENTICATED_ATTRIBUTES_TAG: Tag = encoding::context_tag(TagNumber::N0);
const UNAUTHENTICATED_ATTRIBUTES_TAG: Tag = encoding::context_tag(TagNumber::N1);

/// ```text
/// SignerInfo ::= SEQUENCE {
///     version                   Version,
///     issuerAndSerialNumber     IssuerAndSerialNumber,
///     digestAlgorithm           DigestAlgorithmIdentifier,
///     authenticatedAttributes   [0] IMPLICIT Attributes OPTIONAL,
///     digestEncryptionAlgorithm DigestEncryptionAlgorithmIdentifier,
///     encryptedDigest           EncryptedDigest,
///     unauthenticatedAttributes [1] IMPLICIT Attributes OPTIONAL }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerInfo {
    /// Syntax version.
    pub version: u32,

    /// Issuer of the signer certificate.
    pub issuer: Name,

    /// Serial number of the signer certificate.
    pub serial_number: SerialNumber,

    /// Digest algorithm applied to the content.
    pub digest_algorithm: AlgorithmIdentifierOwned,

    /// Attributes covered by the signature.
    pub authenticated_attributes: Option<AttributeSet>,

    /// Signature algorithm.
    pub digest_encryption_algorithm: AlgorithmIdentifierOwned,

    /// Signature value.
    pub encrypted_digest: Vec<u8>,

    /// Attributes outside the signature.
    pub unauthenticated_attributes: Option<AttributeSet>,
}

impl SignerInfo {
    /// Decodes a signer info in the standard or the legacy layout.
    ///
    /// The legacy layout carries a SET in both attribute positions; those
    /// are read and dropped.
    pub fn decode(reader: &mut SliceReader<'_>, legacy: bool) -> Result<Self> {
        let mut contents = encoding::constructed(reader, Tag::Sequence)?;
        let version = u32::decode(&mut contents)?;

        let mut issuer_and_serial = encoding::constructed(&mut contents, Tag::Sequence)?;
        let issuer = Name::decode(&mut issuer_and_serial)?;
        let serial_number = SerialNumber::decode(&mut issuer_and_serial)?;
        issuer_and_serial.finish(())?;

        let digest_algorithm = AlgorithmIdentifierOwned::decode(&mut contents)?;

        let authenticated_attributes = if legacy {
            encoding::value_of(&mut contents, Tag::Set)?;
            None
        } else if encoding::next_is(&contents, AUTHENTICATED_ATTRIBUTES_TAG) {
            Some(AttributeSet::decode(
                &mut contents,
                AUTHENTICATED_ATTRIBUTES_TAG,
                false,
            )?)
        } else {
            None
        };

        let digest_encryption_algorithm = AlgorithmIdentifierOwned::decode(&mut contents)?;
        let encrypted_digest = OctetString::decode(&mut contents)?.into_bytes();

        let unauthenticated_attributes = if legacy {
            encoding::value_of(&mut contents, Tag::Set)?;
            None
        } else if encoding::next_is(&contents, UNAUTHENTICATED_ATTRIBUTES_TAG) {
            Some(AttributeSet::decode(
                &mut contents,
                UNAUTHENTICATED_ATTRIBUTES_TAG,
                true,
            )?)
        } else {
            None
        };

        let signer_info = Self {
            version,
            issuer,
            serial_number,
            digest_algorithm,
            authenticated_attributes,
            digest_encryption_algorithm,
            encrypted_digest,
            unauthenticated_attributes,
        };
        Ok(contents.finish(signer_info)?)
    }

    /// Decodes a complete standard-layout signer info.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(bytes)?;
        let signer_info = Self::decode(&mut reader, false)?;
        Ok(reader.finish(signer_info)?)
    }

    /// Encodes this signer info in the standard layout.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut issuer_and_serial = self.issuer.to_der()?;
        issuer_and_serial.extend(self.serial_number.to_der()?);

        let mut contents = self.version.to_der()?;
        contents.extend(encoding::tlv(Tag::Sequence, &issuer_and_serial)?);
        contents.extend(self.digest_algorithm.to_der()?);
        if let Some(attributes) = &self.authenticated_attributes {
            contents.extend(attributes.encode_tagged(AUTHENTICATED_ATTRIBUTES_TAG)?);
        }
        contents.extend(self.digest_encryption_algorithm.to_der()?);
        contents.extend(encoding::tlv(Tag::OctetString, &self.encrypted_digest)?);
        if let Some(attributes) = &self.unauthenticated_attributes {
            contents.extend(attributes.encode_tagged(UNAUTHENTICATED_ATTRIBUTES_TAG)?);
        }

        encoding::tlv(Tag::Sequence, &contents)
    }

    /// Verifies this signer against `data`, or against the content carried
    /// by `message` when `data` is `None`.
    ///
    /// Returns `Ok(None)` when the signature does not check out or the
    /// signer certificate is not in `message`.
    pub fn verify<'s>(
        &'s self,
        message: &SignedMessage,
        data: Option<&[u8]>,
    ) -> Result<Option<&'s SignerInfo>> {
        let content_info = message.content_info();
        let data = match data {
            Some(data) => data,
            None => content_info
                .content_bytes()?
                .ok_or(Error::ContentAbsent)?,
        };

        let digest_algorithm = DigestAlgorithm::from_oid(&self.digest_algorithm.oid)?;

        let signed = match &self.authenticated_attributes {
            None => Cow::Borrowed(data),
            Some(attributes) => {
                if attributes.content_type() != Some(&content_info.content_type) {
                    log::debug!("signer {}: content type mismatch", self.serial_number_hex());
                    return Ok(None);
                }

                let Some(expected) = attributes.message_digest() else {
                    log::debug!("signer {}: no message digest", self.serial_number_hex());
                    return Ok(None);
                };
                let computed = digest_algorithm.digest(data);
                if !bool::from(expected.ct_eq(&computed)) {
                    log::debug!("signer {}: message digest mismatch", self.serial_number_hex());
                    return Ok(None);
                }

                Cow::Owned(attributes.der_encoding()?)
            }
        };

        let Some(certificate) = message.certificate(&self.serial_number, &self.issuer) else {
            log::debug!(
                "signer {}: certificate not found for issuer {}",
                self.serial_number_hex(),
                self.issuer
            );
            return Ok(None);
        };
        verifier::check_key_usage(certificate)?;

        let verified = verifier::verify_signature(
            &certificate.tbs_certificate.subject_public_key_info,
            &self.digest_encryption_algorithm.oid,
            digest_algorithm,
            &signed,
            &self.encrypted_digest,
        )?;

        Ok(verified.then_some(self))
    }

    /// Returns the signer certificate followed by its issuers, as far as
    /// `message` carries them.
    pub fn certificate_chain<'m>(&self, message: &'m SignedMessage) -> Option<Vec<&'m Certificate>> {
        let signer = message.certificate(&self.serial_number, &self.issuer)?;
        let pool = message.certificates().unwrap_or_default();
        let mut chain = vec![signer];

        let mut current = signer;
        while current.tbs_certificate.subject != current.tbs_certificate.issuer {
            let issuer = pool.iter().find(|candidate| {
                candidate.tbs_certificate.subject == current.tbs_certificate.issuer
                    && !chain.iter().any(|seen| core::ptr::eq(*seen, *candidate))
            });
            match issuer {
                Some(issuer) => {
                    chain.push(issuer);
                    current = issuer;
                }
                None => break,
            }
        }

        Some(chain)
    }

    /// Parses the signature timestamp token, if one is attached.
    pub fn timestamp_token(&self) -> Result<Option<SignedMessage>> {
        let token = self
            .unauthenticated_attributes
            .as_ref()
            .and_then(|attributes| attributes.value(AttributeKind::SignatureTimestampToken));

        match token {
            Some(AttributeValue::Bytes(bytes)) => Ok(Some(SignedMessage::from_der(bytes)?)),
            _ => Ok(None),
        }
    }

    fn serial_number_hex(&self) -> String {
        self.serial_number
            .as_bytes()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }
}

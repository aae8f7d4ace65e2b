//! Signature checks for signer infos.
//!
//! Only RSASSA-PKCS1-v1_5 is understood. The digest comes from the signer's
//! digest algorithm; the "encryption" algorithm may be `rsaEncryption` or a
//! combined `shaNWithRSAEncryption` identifier naming the same scheme.

use const_oid::AssociatedOid;
use der::{Decode, Encode};
use pkcs8::DecodePublicKey;
use rsa::{
    pkcs1v15::{Signature, VerifyingKey},
    RsaPublicKey,
};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use signature::Verifier;
use spki::SubjectPublicKeyInfoOwned;
use x509_cert::{ext::pkix::KeyUsage, Certificate};

use crate::{oid, DigestAlgorithm, Error, ObjectIdentifier, Result};

const RSA_SIGNATURE_OIDS: [ObjectIdentifier; 6] = [
    oid::RSA_ENCRYPTION,
    oid::SHA1_WITH_RSA_ENCRYPTION,
    oid::SHA224_WITH_RSA_ENCRYPTION,
    oid::SHA256_WITH_RSA_ENCRYPTION,
    oid::SHA384_WITH_RSA_ENCRYPTION,
    oid::SHA512_WITH_RSA_ENCRYPTION,
];

/// Fails unless the certificate may be used to verify digital signatures.
pub(crate) fn check_key_usage(certificate: &Certificate) -> Result<()> {
    let extensions = certificate.tbs_certificate.extensions.iter().flatten();
    for extension in extensions {
        if extension.extn_id != KeyUsage::OID {
            continue;
        }
        let key_usage = KeyUsage::from_der(extension.extn_value.as_bytes())?;
        if !key_usage.digital_signature() && !key_usage.non_repudiation() {
            return Err(Error::KeyUsage);
        }
    }
    Ok(())
}

/// Checks `signature` over `signed` with the subject key of a certificate.
pub(crate) fn verify_signature(
    public_key_info: &SubjectPublicKeyInfoOwned,
    encryption_algorithm: &ObjectIdentifier,
    digest_algorithm: DigestAlgorithm,
    signed: &[u8],
    signature: &[u8],
) -> Result<bool> {
    if !RSA_SIGNATURE_OIDS.contains(encryption_algorithm) {
        return Err(Error::UnsupportedAlgorithm(*encryption_algorithm));
    }

    let public_key = RsaPublicKey::from_public_key_der(&public_key_info.to_der()?)?;
    let signature = match Signature::try_from(signature) {
        Ok(signature) => signature,
        Err(_) => return Ok(false),
    };

    let verified = match digest_algorithm {
        DigestAlgorithm::Sha1 => VerifyingKey::<Sha1>::new(public_key).verify(signed, &signature),
        DigestAlgorithm::Sha224 => {
            VerifyingKey::<Sha224>::new(public_key).verify(signed, &signature)
        }
        DigestAlgorithm::Sha256 => {
            VerifyingKey::<Sha256>::new(public_key).verify(signed, &signature)
        }
        DigestAlgorithm::Sha384 => {
            VerifyingKey::<Sha384>::new(public_key).verify(signed, &signature)
        }
        DigestAlgorithm::Sha512 => {
            VerifyingKey::<Sha512>::new(public_key).verify(signed, &signature)
        }
    };

    Ok(verified.is_ok())
}

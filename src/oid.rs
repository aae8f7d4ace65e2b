//! Object identifiers for content types and signature algorithms.

use const_oid::ObjectIdentifier;

/// PKCS#7 `data`.
pub const DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.1");

/// PKCS#7 `signedData`.
pub const SIGNED_DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.2");

/// PKCS#7 `envelopedData`.
pub const ENVELOPED_DATA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.3");

/// PKCS#7 `signedAndEnvelopedData`.
pub const SIGNED_AND_ENVELOPED_DATA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.4");

/// PKCS#7 `digestedData`.
pub const DIGESTED_DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.5");

/// PKCS#7 `encryptedData`.
pub const ENCRYPTED_DATA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.6");

/// Misspelled `data` arc emitted by old JDK signers.
pub const OLD_DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.1113549.1.7.1");

/// Misspelled `signedData` arc emitted by old JDK signers.
pub const OLD_SIGNED_DATA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.1113549.1.7.2");

/// Netscape certificate sequence.
pub const NETSCAPE_CERT_SEQUENCE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.16.840.1.113730.2.5");

/// RFC 3161 `id-ct-TSTInfo`.
pub const TIMESTAMP_TOKEN_INFO: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.1.4");

/// `rsaEncryption`.
pub const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// `sha1WithRSAEncryption`.
pub const SHA1_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");

/// `sha224WithRSAEncryption`.
pub const SHA224_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.14");

/// `sha256WithRSAEncryption`.
pub const SHA256_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");

/// `sha384WithRSAEncryption`.
pub const SHA384_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");

/// `sha512WithRSAEncryption`.
pub const SHA512_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");

//! PKCS#9 attribute registry, construction and wire forms.

mod common;

use common::*;
use der::{asn1::OctetString, Any, Decode, Encode, Tag};
use hex_literal::hex;
use pkcs7_signed::{
    oid, Attribute, AttributeKind, AttributeOperation, AttributeValue, Error, EssCertId,
    IssuerSerial, ObjectIdentifier, SignedMessage, SigningCertificateInfo, ValueShape,
};
use sha1::{Digest, Sha1};
use x509_cert::{
    ext::{pkix::name::GeneralName, Extension},
    time::Time,
};

const NAMES: [(&str, u8); 16] = [
    ("EmailAddress", 1),
    ("UnstructuredName", 2),
    ("ContentType", 3),
    ("MessageDigest", 4),
    ("SigningTime", 5),
    ("Countersignature", 6),
    ("ChallengePassword", 7),
    ("UnstructuredAddress", 8),
    ("ExtendedCertificateAttributes", 9),
    ("IssuerAndSerialNumber", 10),
    ("RSAProprietary", 11),
    ("SMIMESigningDesc", 13),
    ("ExtensionRequest", 14),
    ("SMIMECapability", 15),
    ("SigningCertificate", 16),
    ("SignatureTimestampToken", 17),
];

/// `Attribute ::= SEQUENCE { oid, SET { values } }` without reordering.
fn attribute(kind: AttributeKind, values: &[&[u8]]) -> Vec<u8> {
    tlv(
        0x30,
        &[&kind.oid().to_der().unwrap(), &tlv(0x31, values)],
    )
}

fn round_trip(kind: AttributeKind, value: AttributeValue) -> Attribute {
    let attribute = Attribute::from_kind(kind, value).unwrap();
    let encoded = attribute.encode().unwrap();
    let decoded = Attribute::from_der(&encoded).unwrap();
    assert_eq!(decoded, attribute);
    assert_eq!(decoded.encode().unwrap(), encoded);
    decoded
}

#[test]
fn names_and_oids_agree() {
    for (name, arc) in NAMES {
        let kind = AttributeKind::from_name(name).unwrap();
        assert_eq!(kind as u8, arc);
        assert_eq!(AttributeKind::from_name(&name.to_ascii_lowercase()), Some(kind));
        assert_eq!(AttributeKind::from_name(&name.to_ascii_uppercase()), Some(kind));
        assert_eq!(AttributeKind::from_oid(&kind.oid()), Some(kind));
        assert_eq!(kind.to_string(), name);
    }

    let secondary: ObjectIdentifier = "1.2.840.113549.1.9.12".parse().unwrap();
    assert_eq!(
        AttributeKind::from_oid(&secondary),
        Some(AttributeKind::RsaProprietarySecondary)
    );
    assert_eq!(AttributeKind::all().count(), 17);
}

#[test]
fn construct_by_oid_and_name() {
    let value = AttributeValue::ObjectIdentifier(oid::DATA);
    let by_oid = Attribute::new(&AttributeKind::ContentType.oid(), value.clone()).unwrap();
    let by_name = Attribute::from_name("contenttype", value).unwrap();
    assert_eq!(by_oid, by_name);
    assert_eq!(by_oid.name(), "ContentType");
    assert!(by_oid.is_single_valued());

    let unknown: ObjectIdentifier = "1.2.3.4".parse().unwrap();
    assert_eq!(
        Attribute::new(&unknown, AttributeValue::Bytes(Vec::new())),
        Err(Error::UnknownAttributeOid(unknown))
    );
    assert_eq!(
        Attribute::from_name("favouriteColour", AttributeValue::Bytes(Vec::new())),
        Err(Error::UnknownAttributeName("favouriteColour".into()))
    );
}

#[test]
fn construct_checks_value_shape() {
    assert_eq!(
        Attribute::from_kind(AttributeKind::ContentType, AttributeValue::Bytes(vec![1])),
        Err(Error::ValueShape {
            kind: AttributeKind::ContentType,
            expected: ValueShape::ObjectIdentifier,
            actual: ValueShape::Bytes,
        })
    );
    assert!(matches!(
        Attribute::from_kind(
            AttributeKind::ChallengePassword,
            AttributeValue::Strings(vec!["a".into()])
        ),
        Err(Error::ValueShape { .. })
    ));
}

#[test]
fn construct_without_shape_is_unsupported() {
    for kind in [
        AttributeKind::ExtendedCertificateAttributes,
        AttributeKind::IssuerAndSerialNumber,
        AttributeKind::RsaProprietary,
        AttributeKind::RsaProprietarySecondary,
        AttributeKind::SmimeSigningDesc,
        AttributeKind::SmimeCapability,
    ] {
        assert_eq!(
            Attribute::from_kind(kind, AttributeValue::Bytes(Vec::new())),
            Err(Error::AttributeNotSupported {
                kind,
                operation: AttributeOperation::Construct,
            })
        );
    }
}

#[test]
fn string_attributes() {
    let email = round_trip(
        AttributeKind::EmailAddress,
        AttributeValue::Strings(vec!["signer@example.com".into()]),
    );
    assert!(!email.is_single_valued());

    round_trip(
        AttributeKind::UnstructuredName,
        AttributeValue::Strings(vec!["host.example.com".into(), "alias".into()]),
    );
    round_trip(
        AttributeKind::UnstructuredAddress,
        AttributeValue::Strings(vec!["1 Example Street".into()]),
    );
    round_trip(
        AttributeKind::ChallengePassword,
        AttributeValue::String("open sesame".into()),
    );
}

#[test]
fn strings_decode_from_every_accepted_tag() {
    let bytes = attribute(
        AttributeKind::UnstructuredName,
        &[&hex!("1603 616263"), &hex!("1303 646566"), &hex!("0c04 c3a9c3a9")],
    );
    let decoded = Attribute::from_der(&bytes).unwrap();
    assert_eq!(
        decoded.value(),
        &AttributeValue::Strings(vec!["abc".into(), "def".into(), "éé".into()])
    );
    // written back as IA5String unless it does not fit, in DER set order
    assert_eq!(
        decoded.encode().unwrap(),
        attribute(
            AttributeKind::UnstructuredName,
            &[&hex!("0c04 c3a9c3a9"), &hex!("1603 616263"), &hex!("1603 646566")],
        )
    );

    let bytes = attribute(AttributeKind::UnstructuredAddress, &[&hex!("1403 78797a")]);
    assert_eq!(
        Attribute::from_der(&bytes).unwrap().into_value(),
        AttributeValue::Strings(vec!["xyz".into()])
    );
}

#[test]
fn non_ascii_email_cannot_be_encoded() {
    let attribute = Attribute::from_kind(
        AttributeKind::EmailAddress,
        AttributeValue::Strings(vec!["sí@example.com".into()]),
    )
    .unwrap();
    assert!(matches!(attribute.encode(), Err(Error::Asn1(_))));
}

#[test]
fn rejected_value_tag_lists_accepted_tags() {
    let bytes = attribute(AttributeKind::EmailAddress, &[&hex!("1303 616263")]);
    let err = Attribute::from_der(&bytes).unwrap_err();
    assert_eq!(
        err,
        Error::AttributeTag {
            kind: AttributeKind::EmailAddress,
            tag: Tag::PrintableString,
            expected: &[Tag::Ia5String],
        }
    );
    let message = err.to_string();
    assert!(message.contains("EmailAddress"), "{message}");

    let bytes = attribute(AttributeKind::SigningTime, &[&hex!("0403 010203")]);
    assert!(matches!(
        Attribute::from_der(&bytes),
        Err(Error::AttributeTag {
            kind: AttributeKind::SigningTime,
            tag: Tag::OctetString,
            ..
        })
    ));
}

#[test]
fn single_valued_cardinality() {
    let data = oid::DATA.to_der().unwrap();
    let signed_data = oid::SIGNED_DATA.to_der().unwrap();
    let bytes = attribute(AttributeKind::ContentType, &[&data, &signed_data]);
    assert_eq!(
        Attribute::from_der(&bytes),
        Err(Error::AttributeCardinality {
            kind: AttributeKind::ContentType,
            count: 2,
        })
    );

    let bytes = attribute(AttributeKind::MessageDigest, &[]);
    assert_eq!(
        Attribute::from_der(&bytes),
        Err(Error::AttributeCardinality {
            kind: AttributeKind::MessageDigest,
            count: 0,
        })
    );
}

#[test]
fn content_type_and_digest() {
    let content_type = round_trip(
        AttributeKind::ContentType,
        AttributeValue::ObjectIdentifier(oid::SIGNED_DATA),
    );
    assert_eq!(
        content_type.oid(),
        "1.2.840.113549.1.9.3".parse::<ObjectIdentifier>().unwrap()
    );

    round_trip(
        AttributeKind::MessageDigest,
        AttributeValue::Bytes(hex!("a9993e364706816aba3e25717850c26c9cd0d89d").to_vec()),
    );
}

#[test]
fn signing_time() {
    let utc = Time::from_der(&hex!("170d 3236313031393130323435385a")).unwrap();
    let decoded = round_trip(AttributeKind::SigningTime, AttributeValue::Time(utc));
    assert!(matches!(
        decoded.value(),
        AttributeValue::Time(Time::UtcTime(_))
    ));

    let generalized = Time::from_der(&hex!("180f 32303530303130313030303030305a")).unwrap();
    round_trip(AttributeKind::SigningTime, AttributeValue::Time(generalized));
}

#[test]
fn extension_request() {
    // basicConstraints, critical, cA = TRUE
    let extension = Extension {
        extn_id: "2.5.29.19".parse().unwrap(),
        critical: true,
        extn_value: OctetString::new(hex!("30030101ff")).unwrap(),
    };
    let decoded = round_trip(
        AttributeKind::ExtensionRequest,
        AttributeValue::Extensions(vec![extension.clone()]),
    );
    assert_eq!(decoded.value(), &AttributeValue::Extensions(vec![extension]));
}

#[test]
fn countersignature() {
    let message = SignedMessage::from_der(DETACHED).unwrap();
    let signers = message.signer_infos().to_vec();
    let decoded = round_trip(
        AttributeKind::Countersignature,
        AttributeValue::SignerInfos(signers.clone()),
    );
    assert_eq!(decoded.into_value(), AttributeValue::SignerInfos(signers));
}

#[test]
fn timestamp_token_keeps_full_encoding() {
    let decoded = round_trip(
        AttributeKind::SignatureTimestampToken,
        AttributeValue::Bytes(DETACHED.to_vec()),
    );
    assert_eq!(decoded.value(), &AttributeValue::Bytes(DETACHED.to_vec()));
}

#[test]
fn signing_certificate_accepts_long_serial_numbers() {
    let signer = certificate(SIGNER_CERT);
    let hash = Sha1::digest(SIGNER_CERT);
    let issuer = vec![GeneralName::DirectoryName(signer.tbs_certificate.issuer.clone())];

    let mut serial = vec![0x02, 25, 0x01];
    serial.extend([0xee; 24]);
    let issuer_serial = tlv(0x30, &[&issuer.to_der().unwrap(), &serial]);
    let ess_cert_id = tlv(
        0x30,
        &[&OctetString::new(hash.as_slice()).unwrap().to_der().unwrap(), &issuer_serial],
    );
    // certs, then policies { { anyPolicy } }
    let value = tlv(
        0x30,
        &[&tlv(0x30, &[&ess_cert_id]), &hex!("3008 3006 0604551d2000")],
    );

    let bytes = attribute(AttributeKind::SigningCertificate, &[&value]);
    let decoded = Attribute::from_der(&bytes).unwrap();
    let AttributeValue::SigningCertificate(info) = decoded.value() else {
        panic!("expected signing certificate");
    };

    let id = info.signing_cert_id().unwrap();
    let decoded_serial = &id.issuer_serial.as_ref().unwrap().serial_number;
    assert_eq!(decoded_serial.value(), &serial[2..]);
    // hash matches, serial does not
    assert!(!id.matches(&signer).unwrap());
}

#[test]
fn signing_certificate_decodes_but_does_not_encode() {
    let signer = certificate(SIGNER_CERT);
    let hash = Sha1::digest(SIGNER_CERT);
    let info = SigningCertificateInfo {
        certs: vec![EssCertId {
            cert_hash: OctetString::new(hash.as_slice()).unwrap(),
            issuer_serial: Some(IssuerSerial {
                issuer: Any::encode_from(&vec![GeneralName::DirectoryName(
                    signer.tbs_certificate.issuer.clone(),
                )])
                .unwrap(),
                serial_number: Any::encode_from(&signer.tbs_certificate.serial_number).unwrap(),
            }),
        }],
    };

    let bytes = attribute(AttributeKind::SigningCertificate, &[&info.to_der().unwrap()]);
    let decoded = Attribute::from_der(&bytes).unwrap();
    assert_eq!(
        decoded.value(),
        &AttributeValue::SigningCertificate(info.clone())
    );

    let id = info.signing_cert_id().unwrap();
    assert!(id.matches(&signer).unwrap());
    assert!(!id.matches(&certificate(OTHER_ISSUER_CERT)).unwrap());
    assert!(!id.matches(&certificate(CA_CERT)).unwrap());

    assert_eq!(
        decoded.encode(),
        Err(Error::AttributeNotSupported {
            kind: AttributeKind::SigningCertificate,
            operation: AttributeOperation::Encode,
        })
    );
}

#[test]
fn kinds_without_decoding_support() {
    let cases: [(AttributeKind, &[u8]); 3] = [
        (AttributeKind::ExtendedCertificateAttributes, &hex!("3100")),
        (AttributeKind::IssuerAndSerialNumber, &hex!("3000")),
        (AttributeKind::SmimeCapability, &hex!("3000")),
    ];
    for (kind, value) in cases {
        assert_eq!(
            Attribute::from_der(&attribute(kind, &[value])),
            Err(Error::AttributeNotSupported {
                kind,
                operation: AttributeOperation::Decode,
            })
        );
    }
}

#[test]
fn kinds_without_wire_form_fail_before_tag_checks() {
    for kind in [
        AttributeKind::RsaProprietary,
        AttributeKind::RsaProprietarySecondary,
        AttributeKind::SmimeSigningDesc,
    ] {
        assert_eq!(
            Attribute::from_der(&attribute(kind, &[&hex!("0500")])),
            Err(Error::AttributeNotSupported {
                kind,
                operation: AttributeOperation::Decode,
            })
        );
    }
}

#[test]
fn unregistered_oid_on_the_wire() {
    let oid: ObjectIdentifier = "1.2.840.113549.1.9.99".parse().unwrap();
    let bytes = tlv(0x30, &[&oid.to_der().unwrap(), &hex!("3102 0500")]);
    assert_eq!(
        Attribute::from_der(&bytes),
        Err(Error::UnsupportedPkcs9Attribute(oid))
    );
}

#[test]
fn multi_valued_encoding_is_sorted() {
    let attribute = Attribute::from_kind(
        AttributeKind::EmailAddress,
        AttributeValue::Strings(vec!["zz".into(), "a".into(), "mm".into()]),
    )
    .unwrap();
    assert_eq!(
        attribute.encode().unwrap(),
        hex!("3018 06092a864886f70d010901 310b 160161 16026d6d 16027a7a")
    );
}

//! Shared fixtures and DER builders for the integration tests.

#![allow(dead_code)]

use der::Decode;
use x509_cert::{crl::CertificateList, Certificate};

pub const DETACHED: &[u8] = include_bytes!("../data/detached.p7s");
pub const ATTACHED: &[u8] = include_bytes!("../data/attached.p7m");
pub const ATTACHED_PEM: &str = include_str!("../data/attached.pem");
pub const NO_ATTRIBUTES: &[u8] = include_bytes!("../data/noattr.p7m");
pub const CERTS_AND_CRLS: &[u8] = include_bytes!("../data/certs_crls.p7b");
pub const CRLS_ONLY: &[u8] = include_bytes!("../data/crls_only.p7b");
pub const CERTS_ONLY: &[u8] = include_bytes!("../data/certs_only.p7b");
pub const EMPTY: &[u8] = include_bytes!("../data/empty.p7b");

pub const MESSAGE: &[u8] = include_bytes!("../data/message.txt");

pub const CA_CERT: &[u8] = include_bytes!("../data/ca.der");
pub const SIGNER_CERT: &[u8] = include_bytes!("../data/signer.der");
pub const ENCIPHER_CERT: &[u8] = include_bytes!("../data/encipher.der");
pub const OTHER_ISSUER_CERT: &[u8] = include_bytes!("../data/other-issuer.der");
pub const SIGNER_KEY: &[u8] = include_bytes!("../data/signer-key.der");

pub const CRL: &[u8] = include_bytes!("../data/crl.der");
pub const CRL_REVOKED: &[u8] = include_bytes!("../data/crl-revoked.der");

pub fn certificate(der: &[u8]) -> Certificate {
    Certificate::from_der(der).unwrap()
}

pub fn crl(der: &[u8]) -> CertificateList {
    CertificateList::from_der(der).unwrap()
}

/// Builds a TLV from a one-byte tag and the concatenated parts.
pub fn tlv(tag: u8, parts: &[&[u8]]) -> Vec<u8> {
    let contents = parts.concat();
    let mut out = vec![tag];
    if contents.len() < 0x80 {
        out.push(contents.len() as u8);
    } else {
        let len = contents.len().to_be_bytes();
        let skip = len.iter().take_while(|byte| **byte == 0).count();
        out.push(0x80 | (len.len() - skip) as u8);
        out.extend_from_slice(&len[skip..]);
    }
    out.extend(contents);
    out
}

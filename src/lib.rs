#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Usage
//!
//! ## Parsing and verifying a detached signature
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pkcs7_signed::SignedMessage;
//!
//! let signature = std::fs::read("message.p7s")?;
//! let message = std::fs::read("message.txt")?;
//!
//! let signed = SignedMessage::from_der(&signature)?;
//! match signed.verify_all(Some(&message))? {
//!     Some(signers) => println!("{} signer(s) verified", signers.len()),
//!     None => println!("no signer verified"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Building PKCS#9 attributes
//!
//! ```
//! use pkcs7_signed::{Attribute, AttributeKind, AttributeValue};
//!
//! let attribute = Attribute::from_name(
//!     "emailaddress",
//!     AttributeValue::Strings(vec!["signer@example.com".into()]),
//! )?;
//! assert_eq!(attribute.kind(), AttributeKind::EmailAddress);
//!
//! let encoded = attribute.encode()?;
//! assert_eq!(Attribute::from_der(&encoded)?, attribute);
//! # Ok::<(), pkcs7_signed::Error>(())
//! ```

pub mod attribute;
pub mod errors;
pub mod oid;

mod content_info;
mod encoding;
mod hash;
mod signed_message;
mod signer_info;
mod signing_certificate;
mod verifier;

pub use const_oid::ObjectIdentifier;
pub use der;
pub use x509_cert;

pub use crate::{
    attribute::{Attribute, AttributeInfo, AttributeKind, AttributeSet, AttributeValue, ValueShape},
    content_info::ContentInfo,
    errors::{AttributeOperation, Error, Result},
    hash::DigestAlgorithm,
    signed_message::SignedMessage,
    signer_info::SignerInfo,
    signing_certificate::{EssCertId, IssuerSerial, SigningCertificateInfo},
};

#[cfg(feature = "pem")]
pub use pem_rfc7468::LineEnding;

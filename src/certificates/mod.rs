// Certificates module - Server certificate attached to a scan result

pub mod parser;

pub use parser::{Certificate, CertificateInfo};

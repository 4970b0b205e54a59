//! TLS configuration loading
//!
//! Builds a rustls server config from PEM certificate and key files at
//! startup. Any problem here is fatal; the server never starts half
//! configured.

use std::fs::File;
use std::io::{self, BufReader};
use std::sync::Arc;
use tokio_rustls::rustls::pki_types::CertificateDer;
use tokio_rustls::rustls::ServerConfig;

pub fn load_server_config(cert_path: &str, key_path: &str) -> io::Result<Arc<ServerConfig>> {
    let mut cert_reader = BufReader::new(open(cert_path)?);
    let certs: Vec<CertificateDer<'static>> =
        rustls_pemfile::certs(&mut cert_reader).collect::<Result<_, _>>()?;
    if certs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no certificates found in {cert_path:?}"),
        ));
    }

    let mut key_reader = BufReader::new(open(key_path)?);
    let key = rustls_pemfile::private_key(&mut key_reader)?.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no private key found in {key_path:?}"),
        )
    })?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("building tls config: {e}"),
            )
        })?;

    Ok(Arc::new(config))
}

fn open(path: &str) -> io::Result<File> {
    File::open(path).map_err(|e| io::Error::new(e.kind(), format!("opening {path:?}: {e}")))
}

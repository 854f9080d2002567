use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::Sha256;

use crate::error::{DashboardError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Canonical string for a body-less GET under the Shared Key scheme.
///
/// The eleven standard header slots are all empty for a download, so the
/// string reduces to the verb, eleven blank lines, the `x-ms-*` headers and
/// the canonicalized resource.
pub fn string_to_sign(account: &str, url: &Url, ms_date: &str, ms_version: &str) -> String {
    let mut canonical = String::from("GET\n");
    canonical.push_str(&"\n".repeat(11));
    canonical.push_str(&format!("x-ms-date:{ms_date}\nx-ms-version:{ms_version}\n"));
    canonical.push_str(&format!("/{account}{path}", path = url.path()));

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.to_lowercase(), v.into_owned()))
        .collect();
    params.sort();
    for (name, value) in params {
        canonical.push_str(&format!("\n{name}:{value}"));
    }

    canonical
}

pub fn sign(key: &[u8], string_to_sign: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| DashboardError::StorageUnavailable(format!("cannot sign request: {}", e)))?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

pub fn authorization_header(
    account: &str,
    key: &[u8],
    url: &Url,
    ms_date: &str,
    ms_version: &str,
) -> Result<String> {
    let signature = sign(key, &string_to_sign(account, url, ms_date, ms_version))?;
    Ok(format!("SharedKey {account}:{signature}"))
}

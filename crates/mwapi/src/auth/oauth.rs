//! OAuth 1.0a HMAC-SHA1 request signing (RFC 5849).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use ring::hmac;
use url::Url;
use uuid::Uuid;

use mwapi_core::Verb;

use super::Authorization;

/// Everything except RFC 3986 unreserved characters.
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Percent-encode a value the way OAuth requires.
pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE).to_string()
}

/// Produces `Authorization: OAuth ...` header values.
#[derive(Clone)]
pub(crate) struct Signer {
    authorization: Authorization,
}

impl Signer {
    pub(crate) fn new(authorization: Authorization) -> Self {
        Self { authorization }
    }

    pub(crate) fn authorization(&self) -> &Authorization {
        &self.authorization
    }

    /// Sign a request with a fresh nonce and the current time.
    ///
    /// `params` must hold every query parameter and, for form bodies, every
    /// body parameter, exactly as they are sent.
    pub(crate) fn sign(&self, verb: Verb, url: &Url, params: &[(String, String)]) -> String {
        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = Utc::now().timestamp();
        self.sign_with(verb, url, params, &nonce, timestamp)
    }

    pub(crate) fn sign_with(
        &self,
        verb: Verb,
        url: &Url,
        params: &[(String, String)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let timestamp = timestamp.to_string();
        let protocol = [
            ("oauth_consumer_key", self.authorization.client_key()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.authorization.access_key()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let mut all: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        all.extend(protocol.iter().copied());

        let base = signature_base_string(verb, url, &all);
        let signature = self.signature(&base);

        let mut header = String::from("OAuth ");
        for (i, (key, value)) in protocol.iter().enumerate() {
            if i > 0 {
                header.push_str(", ");
            }
            header.push_str(&format!("{}=\"{}\"", key, encode(value)));
        }
        header.push_str(&format!(", oauth_signature=\"{}\"", encode(&signature)));
        header
    }

    fn signature(&self, base: &str) -> String {
        let key = format!(
            "{}&{}",
            encode(self.authorization.client_secret()),
            encode(self.authorization.access_secret())
        );
        let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key.as_bytes());
        let tag = hmac::sign(&key, base.as_bytes());
        STANDARD.encode(tag.as_ref())
    }
}

/// Scheme, authority and path; default ports and the query are dropped.
fn base_uri(url: &Url) -> String {
    let mut base = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        base.push_str(&format!(":{}", port));
    }
    base.push_str(url.path());
    base
}

fn signature_base_string(verb: Verb, url: &Url, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        verb.as_str(),
        encode(&base_uri(url)),
        encode(&normalized)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twitter_signer() -> Signer {
        Signer::new(Authorization::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        ))
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(
            encode("Ladies + Gentlemen, a signed OAuth request!"),
            "Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
        );
        assert_eq!(encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(encode("+\\"), "%2B%5C");
    }

    #[test]
    fn base_uri_drops_default_port_and_query() {
        let url = Url::parse("https://Test.Wikipedia.org:443/w/api.php?format=json").unwrap();
        assert_eq!(base_uri(&url), "https://test.wikipedia.org/w/api.php");

        let url = Url::parse("http://127.0.0.1:8080/w/api.php").unwrap();
        assert_eq!(base_uri(&url), "http://127.0.0.1:8080/w/api.php");
    }

    #[test]
    fn signs_known_vector() {
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
        let params = pairs(&[
            ("include_entities", "true"),
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
        ]);
        let header = twitter_signer().sign_with(
            Verb::Post,
            &url,
            &params,
            "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
            1318622958,
        );
        assert!(header.ends_with("oauth_signature=\"tnnArxj06cWHq44gCs1OSKk%2FjLY%3D\""));
    }

    #[test]
    fn header_carries_protocol_parameters() {
        let url = Url::parse("https://test.wikipedia.org/w/api.php").unwrap();
        let header = twitter_signer().sign(Verb::Get, &url, &pairs(&[("format", "json")]));
        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(!header.contains("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"));
    }

    #[test]
    fn nonce_changes_signature() {
        let url = Url::parse("https://test.wikipedia.org/w/api.php").unwrap();
        let signer = twitter_signer();
        let params = pairs(&[("action", "query")]);
        let a = signer.sign_with(Verb::Get, &url, &params, "nonce-a", 1);
        let b = signer.sign_with(Verb::Get, &url, &params, "nonce-b", 1);
        assert_ne!(a, b);
    }
}

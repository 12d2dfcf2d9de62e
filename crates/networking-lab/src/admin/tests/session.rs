use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use super::common::*;
use crate::admin::session::{
    clear_session_cookies, cookie_value, AdminCredentials, AdminSessionSigner, SessionError,
    SESSION_MAX_AGE_SECS,
};
use crate::config::AdminConfig;

#[test]
fn issued_token_verifies_until_expiry() {
    let signer = signer();
    let now = at("2025-03-01T10:00:00Z");

    let token = signer.issue("admin", now).expect("token issued");
    let claims = signer.verify(&token, now).expect("token verifies");

    assert_eq!(claims.username, "admin");
    assert_eq!(claims.exp, now.timestamp() + SESSION_MAX_AGE_SECS);

    let later = now + chrono::Duration::seconds(SESSION_MAX_AGE_SECS + 1);
    assert!(matches!(signer.verify(&token, later), Err(SessionError::Expired)));
}

#[test]
fn token_halves_are_unpadded_base64url() {
    let token = signer()
        .issue("admin", at("2025-03-01T10:00:00Z"))
        .expect("token issued");

    let (payload, signature) = token.split_once('.').expect("two halves");
    assert!(!token.contains('='));
    assert_eq!(URL_SAFE_NO_PAD.decode(signature).expect("decodes").len(), 32);
    let json: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).expect("decodes"))
            .expect("json claims");
    assert_eq!(json["username"], "admin");
}

#[test]
fn tampered_payload_is_rejected() {
    let signer = signer();
    let now = at("2025-03-01T10:00:00Z");
    let token = signer.issue("admin", now).expect("token issued");
    let (_, signature) = token.split_once('.').expect("two halves");

    let forged_claims = URL_SAFE_NO_PAD.encode(br#"{"username":"root","exp":99999999999}"#);
    let forged = format!("{forged_claims}.{signature}");

    assert!(matches!(
        signer.verify(&forged, now),
        Err(SessionError::BadSignature)
    ));
}

#[test]
fn token_from_other_secret_is_rejected() {
    let now = at("2025-03-01T10:00:00Z");
    let other = AdminSessionSigner::new("another-secret-of-length", false).expect("signer");
    let token = other.issue("admin", now).expect("token issued");

    assert!(matches!(
        signer().verify(&token, now),
        Err(SessionError::BadSignature)
    ));
    assert!(matches!(
        signer().verify("no-dot-here", now),
        Err(SessionError::Malformed)
    ));
}

#[test]
fn short_secret_is_refused() {
    assert!(matches!(
        AdminSessionSigner::new("short", false),
        Err(SessionError::WeakSecret)
    ));
    assert!(AdminSessionSigner::from_config(&AdminConfig::default()).is_err());
}

#[test]
fn cookie_header_lookup_finds_session() {
    let header = "theme=dark; admin_session=abc.def;other=1";

    assert_eq!(cookie_value(header, "admin_session"), Some("abc.def"));
    assert_eq!(cookie_value(header, "theme"), Some("dark"));
    assert_eq!(cookie_value("admin_session=", "admin_session"), None);
    assert_eq!(cookie_value("xadmin_session=1", "admin_session"), None);
}

#[test]
fn verify_cookie_header_requires_cookie() {
    let signer = signer();
    let now = at("2025-03-01T10:00:00Z");
    let token = signer.issue("admin", now).expect("token issued");

    let claims = signer
        .verify_cookie_header(&format!("a=b; admin_session={token}"), now)
        .expect("cookie verifies");
    assert_eq!(claims.username, "admin");
    assert!(matches!(
        signer.verify_cookie_header("a=b", now),
        Err(SessionError::MissingCookie)
    ));
}

#[test]
fn session_cookie_attributes() {
    let plain = signer().session_cookie("tok");
    assert_eq!(
        plain,
        "admin_session=tok; Path=/; Max-Age=604800; HttpOnly; SameSite=Lax"
    );

    let secure = AdminSessionSigner::new(SECRET, true)
        .expect("signer")
        .session_cookie("tok");
    assert!(secure.ends_with("; Secure"));

    let [root, legacy] = clear_session_cookies();
    assert!(root.contains("Path=/;") && root.contains("Max-Age=0"));
    assert!(legacy.contains("Path=/admin;"));
}

#[test]
fn credentials_trim_username_only() {
    let credentials = AdminCredentials::new("admin", "pa ss");

    assert!(credentials.matches("  admin ", "pa ss"));
    assert!(!credentials.matches("admin", " pa ss"));
    assert!(!credentials.matches("root", "pa ss"));
}

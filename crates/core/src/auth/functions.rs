use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{distr::Alphanumeric, Rng};
use subtle::ConstantTimeEq;

use super::{AuthError, BasicCredentials, SessionId};

/// Generate a cryptographically random session ID.
pub fn generate_session_id() -> SessionId {
    let id: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    SessionId::new(id)
}

/// Compare two byte strings without short-circuiting on the first difference.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Decode the value of an `Authorization` header using the Basic scheme.
pub fn decode_basic_header(value: &str) -> Result<BasicCredentials, AuthError> {
    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| AuthError::MalformedCredentials("missing scheme".to_string()))?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::MissingCredentials);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AuthError::MalformedCredentials(e.to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|e| AuthError::MalformedCredentials(e.to_string()))?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::MalformedCredentials("missing ':' separator".to_string()))?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Check credentials against a username to password table.
///
/// Returns the authenticated username.
pub fn check_basic_credentials(
    table: &HashMap<String, String>,
    credentials: &BasicCredentials,
) -> Result<String, AuthError> {
    let expected = table
        .get(&credentials.username)
        .ok_or(AuthError::InvalidCredentials)?;
    if !constant_time_eq(expected.as_bytes(), credentials.password.as_bytes()) {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(credentials.username.clone())
}

/// Resolve a static token to its username.
pub fn lookup_token(table: &HashMap<String, String>, token: &str) -> Result<String, AuthError> {
    table
        .iter()
        .find(|(known, _)| constant_time_eq(known.as_bytes(), token.as_bytes()))
        .map(|(_, username)| username.clone())
        .ok_or(AuthError::InvalidToken)
}

/// Parse `key:value,key:value` into a map.
///
/// Blank entries are skipped. An entry without `:` or with an empty key is an error.
pub fn parse_pairs(raw: &str) -> Result<HashMap<String, String>, String> {
    let mut pairs = HashMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| format!("expected 'key:value', got '{entry}'"))?;
        if key.trim().is_empty() {
            return Err(format!("empty key in '{entry}'"));
        }
        pairs.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> HashMap<String, String> {
        HashMap::from([
            ("admin".to_string(), "admin".to_string()),
            ("john".to_string(), "eggs".to_string()),
        ])
    }

    fn basic(user: &str, pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
    }

    #[test]
    fn generate_session_id_produces_32_char_alphanumeric() {
        let id = generate_session_id();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generate_session_id_is_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }

    #[test]
    fn constant_time_eq_compares_content_and_length() {
        assert!(constant_time_eq(b"eggs", b"eggs"));
        assert!(!constant_time_eq(b"eggs", b"eggz"));
        assert!(!constant_time_eq(b"eggs", b"eggs!"));
    }

    #[test]
    fn decode_basic_header_extracts_credentials() {
        let creds = decode_basic_header(&basic("john", "eggs")).unwrap();
        assert_eq!(creds.username, "john");
        assert_eq!(creds.password, "eggs");
    }

    #[test]
    fn decode_basic_header_keeps_colons_in_password() {
        let creds = decode_basic_header(&basic("admin", "a:b")).unwrap();
        assert_eq!(creds.password, "a:b");
    }

    #[test]
    fn decode_basic_header_rejects_other_schemes() {
        assert_eq!(
            decode_basic_header("Bearer abc"),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn decode_basic_header_rejects_bad_base64() {
        assert!(matches!(
            decode_basic_header("Basic !!!"),
            Err(AuthError::MalformedCredentials(_))
        ));
    }

    #[test]
    fn check_basic_credentials_accepts_known_user() {
        let creds = decode_basic_header(&basic("admin", "admin")).unwrap();
        assert_eq!(check_basic_credentials(&users(), &creds).unwrap(), "admin");
    }

    #[test]
    fn check_basic_credentials_rejects_wrong_password_and_unknown_user() {
        let wrong = decode_basic_header(&basic("admin", "wrong")).unwrap();
        assert_eq!(
            check_basic_credentials(&users(), &wrong),
            Err(AuthError::InvalidCredentials)
        );
        let unknown = decode_basic_header(&basic("mallory", "admin")).unwrap();
        assert_eq!(
            check_basic_credentials(&users(), &unknown),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn lookup_token_resolves_username() {
        let tokens = HashMap::from([(
            "f89e14d25f30b24a70ad4c0cb745".to_string(),
            "admin".to_string(),
        )]);
        assert_eq!(
            lookup_token(&tokens, "f89e14d25f30b24a70ad4c0cb745").unwrap(),
            "admin"
        );
        assert_eq!(lookup_token(&tokens, "nope"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn parse_pairs_reads_comma_separated_entries() {
        let pairs = parse_pairs("admin:admin, john:eggs,").unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs["john"], "eggs");
        assert!(parse_pairs("admin").is_err());
        assert!(parse_pairs(":x").is_err());
    }

    #[test]
    fn basic_credentials_debug_hides_password() {
        let creds = decode_basic_header(&basic("john", "eggs")).unwrap();
        assert!(!format!("{creds:?}").contains("eggs"));
    }
}

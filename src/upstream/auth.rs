//! Token Bearer del proveedor de identidad

use crate::error::{AppError, AppResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Token tal como lo envía el navegador. Nunca se imprime completo.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

/// Claims que interesan del JWT (sin verificar firma)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl BearerToken {
    /// Acepta el valor de la cabecera `Authorization` o el token solo
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        let token = match raw.split_once(' ') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            Some(_) => return Err(AppError::Unauthorized),
            None if raw.eq_ignore_ascii_case("bearer") => return Err(AppError::Unauthorized),
            None => raw,
        };
        if token.is_empty() || token.contains(char::is_whitespace) {
            return Err(AppError::Unauthorized);
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Huella corta para logs
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        digest.iter().take(6).map(|b| format!("{:02x}", b)).collect()
    }

    /// Decodifica el payload si el token es un JWT; los tokens opacos devuelven `None`
    pub fn claims(&self) -> Option<Claims> {
        let mut partes = self.0.split('.');
        let (_header, payload, _firma) = (partes.next()?, partes.next()?, partes.next()?);
        if partes.next().is_some() {
            return None;
        }
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Rechaza JWT vencidos antes de llamar al API. La firma la valida el API remoto.
    pub fn ensure_not_expired(&self, now_ts: i64) -> AppResult<()> {
        match self.claims().and_then(|c| c.exp) {
            Some(exp) if exp <= now_ts => {
                tracing::debug!("Token {} vencido en {}", self.fingerprint(), exp);
                Err(AppError::Unauthorized)
            }
            _ => Ok(()),
        }
    }

    /// Identificador legible del usuario para logs
    pub fn subject(&self) -> String {
        self.claims()
            .and_then(|c| c.email.or(c.sub))
            .unwrap_or_else(|| self.fingerprint())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken({})", self.fingerprint())
    }
}

#[cfg(test)]
pub(crate) fn jwt_con_claims(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{}.{}.firma", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_header() {
        assert_eq!(BearerToken::parse("Bearer abc.def").unwrap().as_str(), "abc.def");
        assert_eq!(BearerToken::parse("bearer   xyz").unwrap().as_str(), "xyz");
        assert_eq!(BearerToken::parse("xyz").unwrap().as_str(), "xyz");
        assert!(BearerToken::parse("Basic dXNlcjpwYXNz").is_err());
        assert!(BearerToken::parse("Bearer ").is_err());
        assert!(BearerToken::parse("").is_err());
    }

    #[test]
    fn test_debug_oculta_token() {
        let token = BearerToken::parse("secreto-muy-largo").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secreto"));
        assert_eq!(token.fingerprint().len(), 12);
    }

    #[test]
    fn test_jwt_vencido() {
        let jwt = jwt_con_claims(json!({ "sub": "auth0|123", "exp": 1_000 }));
        let token = BearerToken::parse(&jwt).unwrap();
        assert!(matches!(token.ensure_not_expired(2_000), Err(AppError::Unauthorized)));
        assert!(token.ensure_not_expired(500).is_ok());
        assert_eq!(token.subject(), "auth0|123");
    }

    #[test]
    fn test_token_opaco_no_se_valida() {
        let token = BearerToken::parse("opaque-token").unwrap();
        assert!(token.claims().is_none());
        assert!(token.ensure_not_expired(i64::MAX).is_ok());
    }
}

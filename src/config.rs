use crate::error::{AppError, Result};

/// Currencies Discogs accepts for marketplace stats, with the symbol used
/// in folder names.
const CURRENCIES: &[(&str, &str)] = &[
    ("USD", "$"),
    ("GBP", "£"),
    ("EUR", "€"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
    ("JPY", "¥"),
    ("CHF", "CHF"),
    ("MXN", "MX$"),
    ("BRL", "R$"),
    ("NZD", "NZ$"),
    ("SEK", "kr"),
    ("ZAR", "R"),
];

/// A marketplace currency: ISO code for the API, symbol for folder names.
#[derive(Debug, Clone)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Currency {
    pub fn from_code(code: &str) -> Result<Self> {
        let code = code.trim().to_uppercase();
        CURRENCIES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(c, s)| Currency {
                code: c.to_string(),
                symbol: s.to_string(),
            })
            .ok_or_else(|| {
                let supported: Vec<&str> = CURRENCIES.iter().map(|(c, _)| *c).collect();
                AppError::Config(format!(
                    "Unsupported currency '{}'. Supported: {}",
                    code,
                    supported.join(", ")
                ))
            })
    }
}

/// Discogs credentials, resolved flag-first with env fallback.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn resolve(username_flag: Option<String>, token_flag: Option<String>) -> Result<Self> {
        let username = resolve_value(username_flag, "DISCOGS_USERNAME", "username")?;
        let token = resolve_value(token_flag, "DISCOGS_TOKEN", "token")?;
        Ok(Self { username, token })
    }
}

fn resolve_value(flag: Option<String>, env_key: &str, what: &str) -> Result<String> {
    flag.filter(|v| !v.trim().is_empty())
        .or_else(|| std::env::var(env_key).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| {
            AppError::Config(format!(
                "Missing Discogs {}: pass --{} or set {}",
                what, what, env_key
            ))
        })
}

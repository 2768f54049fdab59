//! Token types recognized by the MediaWiki API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A kind of token issued by `action=query&meta=tokens`.
///
/// [`TokenType::Csrf`] is the default wherever a token is implied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    CreateAccount,
    #[default]
    Csrf,
    DeleteGlobalAccount,
    Login,
    Patrol,
    Rollback,
    SetGlobalAccountStatus,
    UserRights,
    Watch,
}

impl TokenType {
    /// All token types, in API order.
    pub const ALL: [TokenType; 9] = [
        TokenType::CreateAccount,
        TokenType::Csrf,
        TokenType::DeleteGlobalAccount,
        TokenType::Login,
        TokenType::Patrol,
        TokenType::Rollback,
        TokenType::SetGlobalAccountStatus,
        TokenType::UserRights,
        TokenType::Watch,
    ];

    /// Returns the API name of the token type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::CreateAccount => "createaccount",
            TokenType::Csrf => "csrf",
            TokenType::DeleteGlobalAccount => "deleteglobalaccount",
            TokenType::Login => "login",
            TokenType::Patrol => "patrol",
            TokenType::Rollback => "rollback",
            TokenType::SetGlobalAccountStatus => "setglobalaccountstatus",
            TokenType::UserRights => "userrights",
            TokenType::Watch => "watch",
        }
    }

    /// Returns the response field carrying this token (`<type>token`).
    pub fn response_field(&self) -> String {
        format!("{}token", self.as_str())
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::TokenType {
                    value: s.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_csrf() {
        assert_eq!(TokenType::default(), TokenType::Csrf);
    }

    #[test]
    fn response_field_follows_naming_convention() {
        assert_eq!(TokenType::Csrf.response_field(), "csrftoken");
        assert_eq!(TokenType::UserRights.response_field(), "userrightstoken");
    }

    #[test]
    fn parses_every_api_name() {
        for kind in TokenType::ALL {
            assert_eq!(kind.as_str().parse::<TokenType>().unwrap(), kind);
        }
        assert!("edit".parse::<TokenType>().is_err());
    }

    #[test]
    fn serde_uses_api_names() {
        let json = serde_json::to_string(&TokenType::SetGlobalAccountStatus).unwrap();
        assert_eq!(json, "\"setglobalaccountstatus\"");
    }
}

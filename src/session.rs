use leptos::logging::log;

/// Key the login flow writes the session token under.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Credentials for backend calls. Passed explicitly into every request
/// instead of being read from storage at call time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            Self::anonymous()
        } else {
            Self {
                token: Some(token.to_string()),
            }
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Value for the `Authorization` header, if there is a token.
    pub fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }
}

/// Reads the persisted session once, at application start.
///
/// Outside a browser (server rendering, native tests) there is no storage and
/// the session is anonymous; the backend then rejects calls like any other
/// request failure.
pub fn load_persisted() -> Credentials {
    match read_storage_token() {
        Some(token) => Credentials::bearer(token),
        None => {
            log!("[SESSION] No persisted token found, continuing anonymously");
            Credentials::anonymous()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_storage_token() -> Option<String> {
    web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(TOKEN_STORAGE_KEY).ok().flatten())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_storage_token() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_carries_the_trimmed_token() {
        let creds = Credentials::bearer("  abc.def  ");
        assert_eq!(creds.token(), Some("abc.def"));
        assert_eq!(creds.authorization_header().as_deref(), Some("Bearer abc.def"));
    }

    #[test]
    fn blank_token_is_anonymous() {
        assert_eq!(Credentials::bearer("   "), Credentials::anonymous());
        assert_eq!(Credentials::anonymous().authorization_header(), None);
    }
}

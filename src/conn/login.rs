//! Login identity owned by the connection.

/// Connection endpoint and credentials.
///
/// The password is the Twitch oauth token (`oauth:…`); read-only chat
/// can use a `justinfan` nickname with any password.
#[derive(Clone)]
pub struct ClientConfig {
    /// Chat host. Defaults to the plaintext Twitch endpoint.
    pub host: String,
    /// Chat port.
    pub port: u16,
    /// Login nickname, lowercase.
    pub nickname: String,
    /// Login password (oauth token). Redacted from all log output.
    pub password: String,
}

impl ClientConfig {
    /// Config for the default endpoint, `irc.chat.twitch.tv:6667`.
    pub fn new(nickname: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: crate::DEFAULT_HOST.to_string(),
            port: crate::DEFAULT_PORT,
            nickname: nickname.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("nickname", &self.nickname)
            .field("password", &redact(&self.password, &self.password))
            .finish()
    }
}

/// Login state for the current connection. The display name and user id
/// arrive with `GLOBALUSERSTATE` and are cleared on disconnect.
#[derive(Clone, Default)]
pub struct Login {
    /// Nickname the connection logged in with.
    pub nickname: String,
    pub(crate) password: String,
    /// Display name reported by the server, once authenticated.
    pub display_name: Option<String>,
    /// Numeric user id reported by the server, once authenticated.
    pub user_id: Option<String>,
}

impl Login {
    pub(crate) fn start_session(&mut self, nickname: &str, password: &str) {
        self.nickname = nickname.to_string();
        self.password = password.to_string();
        self.display_name = None;
        self.user_id = None;
    }

    /// Drop the server-derived identity; credentials stay for the next
    /// connect.
    pub(crate) fn reset_session(&mut self) {
        self.display_name = None;
        self.user_id = None;
    }
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("nickname", &self.nickname)
            .field("password", &redact(&self.password, &self.password))
            .field("display_name", &self.display_name)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Replace every occurrence of `secret` in `line` with an equal-length
/// run of `*`. Applied to outbound lines before they reach the logger.
pub(crate) fn redact(line: &str, secret: &str) -> String {
    if secret.is_empty() || !line.contains(secret) {
        return line.to_string();
    }
    line.replace(secret, &"*".repeat(secret.len()))
}

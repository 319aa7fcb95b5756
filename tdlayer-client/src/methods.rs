//! High-level request helpers on [`Client`].

use tdlayer_types as tl;

use crate::{Client, InvocationError, SignInError};

impl Client {
    // ── Login ──────────────────────────────────────────────────────────────

    /// Start a phone login. Formatting characters are stripped and a leading
    /// `+` is added when missing; delivery settings come from the session's
    /// [`crate::AuthenticationSupplier`].
    pub async fn set_phone_number(&self, phone: &str) -> Result<(), InvocationError> {
        let req = tl::functions::SetAuthenticationPhoneNumber {
            phone_number: normalize_phone(phone),
            settings:     None,
        };
        self.invoke(&req).await?;
        Ok(())
    }

    /// Submit the login code. Wrong or expired codes are reported as
    /// [`SignInError::InvalidCode`].
    pub async fn check_code(&self, code: &str) -> Result<(), SignInError> {
        let req = tl::functions::CheckAuthenticationCode { code: code.trim().to_string() };
        self.invoke(&req).await?;
        tracing::info!("[tdlayer] client {} signed in ✓", self.client_id());
        Ok(())
    }

    /// Log out. The session stops whatever the outcome.
    pub async fn log_out(&self) -> Result<(), InvocationError> {
        self.invoke(&tl::functions::LogOut {}).await?;
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub async fn get_me(&self) -> Result<tl::types::User, InvocationError> {
        self.invoke(&tl::functions::GetMe {}).await
    }

    /// Fetch up to `limit` chat identifiers from `chat_list`.
    pub async fn get_chats(
        &self,
        chat_list: tl::enums::ChatList,
        limit:     i32,
    ) -> Result<tl::types::Chats, InvocationError> {
        self.invoke(&tl::functions::GetChats { chat_list, limit }).await
    }

    pub async fn get_chat(&self, chat_id: i64) -> Result<tl::types::Chat, InvocationError> {
        self.invoke(&tl::functions::GetChat { chat_id }).await
    }

    /// Fetch messages of `chat_id`, newest first, starting at
    /// `from_message_id` (`0` for the latest).
    pub async fn get_chat_history(
        &self,
        chat_id:         i64,
        from_message_id: i64,
        offset:          i32,
        limit:           i32,
        only_local:      bool,
    ) -> Result<tl::types::Messages, InvocationError> {
        let req = tl::functions::GetChatHistory { chat_id, from_message_id, offset, limit, only_local };
        self.invoke(&req).await
    }

    pub async fn download_file(
        &self,
        file_id:     i32,
        priority:    i32,
        offset:      i64,
        limit:       i64,
        synchronous: bool,
    ) -> Result<tl::types::File, InvocationError> {
        let req = tl::functions::DownloadFile { file_id, priority, offset, limit, synchronous };
        self.invoke(&req).await
    }
}

/// Keep digits and `+` signs, then add a leading `+` if there is none.
/// A stray `+` after the first character is passed through for the backend
/// to reject.
pub(crate) fn normalize_phone(phone: &str) -> String {
    let kept: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
    if kept.starts_with('+') { kept } else { format!("+{kept}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_are_normalized() {
        assert_eq!(normalize_phone("+1 (555) 010-1"), "+15550101");
        assert_eq!(normalize_phone("44 20 7946 0000"), "+442079460000");
        assert_eq!(normalize_phone("+15550101"), "+15550101");
    }

    #[test]
    fn existing_plus_signs_are_kept() {
        assert_eq!(normalize_phone(" +44 (20) 7946-0000 "), "+442079460000");
        assert_eq!(normalize_phone("++1555"), "++1555");
        assert_eq!(normalize_phone("1+555"), "+1+555");
        assert_eq!(normalize_phone(""), "+");
    }
}

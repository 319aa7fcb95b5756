//! Requests ("functions") as `struct`s implementing [`RemoteCall`].

use crate::schema::id;
use crate::{RemoteCall, enums, types};

tl_constructor! {
    /// Start a phone-number login.
    ///
    /// `settings: None` lets the dispatcher fill in whatever the session's
    /// authentication supplier returned.
    pub struct SetAuthenticationPhoneNumber = id::SET_AUTHENTICATION_PHONE_NUMBER {
        phone_number: String,
        settings: Option<types::PhoneNumberAuthenticationSettings>,
    }
}

impl RemoteCall for SetAuthenticationPhoneNumber {
    type Return = types::Ok;
}

tl_constructor! {
    /// Finish a phone-number login with the code the user received.
    pub struct CheckAuthenticationCode = id::CHECK_AUTHENTICATION_CODE {
        code: String,
    }
}

impl RemoteCall for CheckAuthenticationCode {
    type Return = types::Ok;
}

tl_constructor! {
    /// Fetch up to `limit` chat identifiers from a chat list.
    pub struct GetChats = id::GET_CHATS {
        chat_list: enums::ChatList,
        limit: i32,
    }
}

impl RemoteCall for GetChats {
    type Return = types::Chats;
}

tl_constructor! {
    pub struct GetChat = id::GET_CHAT {
        chat_id: i64,
    }
}

impl RemoteCall for GetChat {
    type Return = types::Chat;
}

tl_constructor! {
    /// Fetch messages of a chat, walking back from `from_message_id`
    /// (`0` for the newest message).
    pub struct GetChatHistory = id::GET_CHAT_HISTORY {
        chat_id: i64,
        from_message_id: i64,
        /// Usually `0` or negative to also fetch newer messages.
        offset: i32,
        limit: i32,
        only_local: bool,
    }
}

impl RemoteCall for GetChatHistory {
    type Return = types::Messages;
}

tl_constructor! {
    /// Download (part of) a file. `limit == 0` means up to the end.
    pub struct DownloadFile = id::DOWNLOAD_FILE {
        file_id: i32,
        /// 1..=32, higher first.
        priority: i32,
        offset: i64,
        limit: i64,
        synchronous: bool,
    }
}

impl RemoteCall for DownloadFile {
    type Return = types::File;
}

tl_constructor! {
    #[derive(Default)]
    pub struct GetMe = id::GET_ME {}
}

impl RemoteCall for GetMe {
    type Return = types::User;
}

tl_constructor! {
    #[derive(Default)]
    pub struct LogOut = id::LOG_OUT {}
}

impl RemoteCall for LogOut {
    type Return = types::Ok;
}

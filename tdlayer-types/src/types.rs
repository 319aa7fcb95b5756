//! Concrete constructors (bare types).
//!
//! Every struct here is a value object: all fields are required at
//! construction, nothing is shared, and narrowing an [`enums::Object`]
//! hands back exactly the fields it was built with.
//!
//! [`enums::Object`]: crate::enums::Object

use crate::enums;
use crate::schema::id;

// ─── Results ─────────────────────────────────────────────────────────────────

tl_constructor! {
    /// Acknowledges a request that has no payload.
    pub struct Ok = id::OK {}
}

tl_constructor! {
    /// A request-level or session-level failure.
    ///
    /// `code` is stable and meant for programmatic branching; `message` is
    /// never empty.
    pub struct Error = id::ERROR {
        code: i32,
        message: String,
    }
}

impl Error {
    /// Build an error object.
    ///
    /// # Panics
    ///
    /// Panics if `message` is empty.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(!message.is_empty(), "error {code} must carry a message");
        Self { code, message }
    }
}

tl_constructor! {
    /// Chat identifiers in the order the service returned them.
    pub struct Chats = id::CHATS {
        chat_ids: Vec<i64>,
    }
}

tl_constructor! {
    pub struct Chat = id::CHAT {
        id: i64,
        r#type: enums::ChatType,
        title: String,
    }
}

tl_constructor! {
    pub struct Message = id::MESSAGE {
        id: i64,
        /// Unix timestamp (seconds).
        date: i32,
        content: enums::MessageContent,
    }
}

tl_constructor! {
    /// A page of chat history, newest first as delivered by the service.
    pub struct Messages = id::MESSAGES {
        messages: Vec<Message>,
    }
}

tl_constructor! {
    pub struct User = id::USER {
        id: i64,
        first_name: String,
        last_name: String,
        /// `None` when the account has no public usernames.
        usernames: Option<Usernames>,
        phone_number: String,
    }
}

impl User {
    /// The first active username, if any.
    pub fn username(&self) -> Option<&str> {
        self.usernames.as_ref()?.active_usernames.first().map(String::as_str)
    }

    /// First and last name joined by a space, skipping empty parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

tl_constructor! {
    pub struct File = id::FILE {
        id: i32,
        /// Size in bytes, `0` if unknown.
        size: i64,
        local: LocalFile,
    }
}

// ─── Value objects ───────────────────────────────────────────────────────────

tl_constructor! {
    pub struct LocalFile = id::LOCAL_FILE {
        /// Local path; empty until the download starts.
        path: String,
        is_downloading_completed: bool,
    }
}

tl_constructor! {
    pub struct FormattedText = id::FORMATTED_TEXT {
        text: String,
    }
}

tl_constructor! {
    pub struct Video = id::VIDEO {
        /// Duration in seconds.
        duration: i32,
        file_name: String,
        mime_type: String,
        video: File,
    }
}

tl_constructor! {
    pub struct Usernames = id::USERNAMES {
        active_usernames: Vec<String>,
    }
}

tl_constructor! {
    /// How the verification code for a phone login may be delivered.
    #[derive(Default, Copy)]
    pub struct PhoneNumberAuthenticationSettings = id::PHONE_NUMBER_AUTHENTICATION_SETTINGS {
        allow_flash_call: bool,
        is_current_phone_number: bool,
        allow_sms_retriever_api: bool,
    }
}

// ─── ChatType ────────────────────────────────────────────────────────────────

tl_constructor! {
    pub struct ChatTypePrivate = id::CHAT_TYPE_PRIVATE {
        user_id: i64,
    }
}

tl_constructor! {
    pub struct ChatTypeBasicGroup = id::CHAT_TYPE_BASIC_GROUP {
        basic_group_id: i64,
    }
}

tl_constructor! {
    /// A supergroup, or a channel when `is_channel` is set.
    pub struct ChatTypeSupergroup = id::CHAT_TYPE_SUPERGROUP {
        is_channel: bool,
    }
}

// ─── ChatList ────────────────────────────────────────────────────────────────

tl_constructor! {
    #[derive(Default)]
    pub struct ChatListMain = id::CHAT_LIST_MAIN {}
}

tl_constructor! {
    #[derive(Default)]
    pub struct ChatListArchive = id::CHAT_LIST_ARCHIVE {}
}

tl_constructor! {
    pub struct ChatListFolder = id::CHAT_LIST_FOLDER {
        chat_folder_id: i32,
    }
}

// ─── MessageContent ──────────────────────────────────────────────────────────

tl_constructor! {
    pub struct MessageText = id::MESSAGE_TEXT {
        text: FormattedText,
    }
}

tl_constructor! {
    pub struct MessageVideo = id::MESSAGE_VIDEO {
        video: Video,
        caption: FormattedText,
    }
}

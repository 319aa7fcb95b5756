//! Boxed types as `enum`s.
//!
//! Each enum is `#[non_exhaustive]`: the backing service may add variants in
//! later schema versions, so matches outside this crate always carry a
//! fallback arm.

use crate::deserialize::{self, Buffer, Error};
use crate::schema::{self, id};
use crate::{Deserializable, Identifiable, Serializable, functions, types};

// ─── ChatType ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "impl-serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ChatType {
    Private(types::ChatTypePrivate),
    BasicGroup(types::ChatTypeBasicGroup),
    Supergroup(types::ChatTypeSupergroup),
}

impl ChatType {
    /// `true` for broadcast channels.
    pub fn is_channel(&self) -> bool {
        matches!(self, Self::Supergroup(s) if s.is_channel)
    }
}

impl Serializable for ChatType {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Private(x) => x.serialize(buf),
            Self::BasicGroup(x) => x.serialize(buf),
            Self::Supergroup(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for ChatType {
    fn deserialize(buf: Buffer) -> deserialize::Result<Self> {
        Ok(match u32::deserialize(buf)? {
            id::CHAT_TYPE_PRIVATE => Self::Private(types::ChatTypePrivate::deserialize_body(buf)?),
            id::CHAT_TYPE_BASIC_GROUP => Self::BasicGroup(types::ChatTypeBasicGroup::deserialize_body(buf)?),
            id::CHAT_TYPE_SUPERGROUP => Self::Supergroup(types::ChatTypeSupergroup::deserialize_body(buf)?),
            id => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

// ─── ChatList ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "impl-serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ChatList {
    #[default]
    Main,
    Archive,
    Folder(types::ChatListFolder),
}

impl Serializable for ChatList {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Main => types::ChatListMain {}.serialize(buf),
            Self::Archive => types::ChatListArchive {}.serialize(buf),
            Self::Folder(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for ChatList {
    fn deserialize(buf: Buffer) -> deserialize::Result<Self> {
        Ok(match u32::deserialize(buf)? {
            id::CHAT_LIST_MAIN => Self::Main,
            id::CHAT_LIST_ARCHIVE => Self::Archive,
            id::CHAT_LIST_FOLDER => Self::Folder(types::ChatListFolder::deserialize_body(buf)?),
            id => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

// ─── MessageContent ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "impl-serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum MessageContent {
    Text(types::MessageText),
    Video(types::MessageVideo),
}

impl MessageContent {
    /// The text of a text message or the caption of a media message.
    pub fn caption(&self) -> &str {
        match self {
            Self::Text(t) => &t.text.text,
            Self::Video(v) => &v.caption.text,
        }
    }
}

impl Serializable for MessageContent {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Text(x) => x.serialize(buf),
            Self::Video(x) => x.serialize(buf),
        }
    }
}

impl Deserializable for MessageContent {
    fn deserialize(buf: Buffer) -> deserialize::Result<Self> {
        Ok(match u32::deserialize(buf)? {
            id::MESSAGE_TEXT => Self::Text(types::MessageText::deserialize_body(buf)?),
            id::MESSAGE_VIDEO => Self::Video(types::MessageVideo::deserialize_body(buf)?),
            id => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

// ─── Object ──────────────────────────────────────────────────────────────────

/// Anything a request can resolve to: a payload, [`Object::Ok`] or
/// [`Object::Error`].
///
/// Requests live in the separate [`Function`] enum, so a request can never be
/// passed where a result is expected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "impl-serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Object {
    Ok(types::Ok),
    Error(types::Error),
    Chats(types::Chats),
    Chat(types::Chat),
    Message(types::Message),
    Messages(types::Messages),
    User(types::User),
    File(types::File),
    LocalFile(types::LocalFile),
    FormattedText(types::FormattedText),
    Video(types::Video),
    Usernames(types::Usernames),
    PhoneNumberAuthenticationSettings(types::PhoneNumberAuthenticationSettings),
    /// An object whose constructor this build does not know. `body` holds
    /// every byte after the constructor ID.
    Unknown { id: u32, body: Vec<u8> },
}

impl Object {
    /// Shorthand for `Object::Error(types::Error::new(code, message))`.
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self::Error(types::Error::new(code, message))
    }

    /// The constructor ID of the wrapped object.
    pub fn constructor_id(&self) -> u32 {
        match self {
            Self::Ok(_) => types::Ok::CONSTRUCTOR_ID,
            Self::Error(_) => types::Error::CONSTRUCTOR_ID,
            Self::Chats(_) => types::Chats::CONSTRUCTOR_ID,
            Self::Chat(_) => types::Chat::CONSTRUCTOR_ID,
            Self::Message(_) => types::Message::CONSTRUCTOR_ID,
            Self::Messages(_) => types::Messages::CONSTRUCTOR_ID,
            Self::User(_) => types::User::CONSTRUCTOR_ID,
            Self::File(_) => types::File::CONSTRUCTOR_ID,
            Self::LocalFile(_) => types::LocalFile::CONSTRUCTOR_ID,
            Self::FormattedText(_) => types::FormattedText::CONSTRUCTOR_ID,
            Self::Video(_) => types::Video::CONSTRUCTOR_ID,
            Self::Usernames(_) => types::Usernames::CONSTRUCTOR_ID,
            Self::PhoneNumberAuthenticationSettings(_) => {
                types::PhoneNumberAuthenticationSettings::CONSTRUCTOR_ID
            }
            Self::Unknown { id, .. } => *id,
        }
    }

    /// The TL name of the wrapped object (`"chats"`, `"error"`, …), or
    /// `"unknown"` for [`Object::Unknown`].
    pub fn name(&self) -> &'static str {
        schema::name_for_id(self.constructor_id()).unwrap_or("unknown")
    }

    /// Split into the success payload and the error case.
    pub fn into_result(self) -> Result<Self, types::Error> {
        match self {
            Self::Error(e) => Err(e),
            other => Ok(other),
        }
    }
}

impl Serializable for Object {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Ok(x) => x.serialize(buf),
            Self::Error(x) => x.serialize(buf),
            Self::Chats(x) => x.serialize(buf),
            Self::Chat(x) => x.serialize(buf),
            Self::Message(x) => x.serialize(buf),
            Self::Messages(x) => x.serialize(buf),
            Self::User(x) => x.serialize(buf),
            Self::File(x) => x.serialize(buf),
            Self::LocalFile(x) => x.serialize(buf),
            Self::FormattedText(x) => x.serialize(buf),
            Self::Video(x) => x.serialize(buf),
            Self::Usernames(x) => x.serialize(buf),
            Self::PhoneNumberAuthenticationSettings(x) => x.serialize(buf),
            Self::Unknown { id, body } => {
                id.serialize(buf);
                buf.extend(body.iter().copied());
            }
        }
    }
}

impl Deserializable for Object {
    fn deserialize(buf: Buffer) -> deserialize::Result<Self> {
        Ok(match u32::deserialize(buf)? {
            id::OK => Self::Ok(types::Ok::deserialize_body(buf)?),
            id::ERROR => Self::Error(types::Error::deserialize_body(buf)?),
            id::CHATS => Self::Chats(types::Chats::deserialize_body(buf)?),
            id::CHAT => Self::Chat(types::Chat::deserialize_body(buf)?),
            id::MESSAGE => Self::Message(types::Message::deserialize_body(buf)?),
            id::MESSAGES => Self::Messages(types::Messages::deserialize_body(buf)?),
            id::USER => Self::User(types::User::deserialize_body(buf)?),
            id::FILE => Self::File(types::File::deserialize_body(buf)?),
            id::LOCAL_FILE => Self::LocalFile(types::LocalFile::deserialize_body(buf)?),
            id::FORMATTED_TEXT => Self::FormattedText(types::FormattedText::deserialize_body(buf)?),
            id::VIDEO => Self::Video(types::Video::deserialize_body(buf)?),
            id::USERNAMES => Self::Usernames(types::Usernames::deserialize_body(buf)?),
            id::PHONE_NUMBER_AUTHENTICATION_SETTINGS => Self::PhoneNumberAuthenticationSettings(
                types::PhoneNumberAuthenticationSettings::deserialize_body(buf)?,
            ),
            id => Self::Unknown { id, body: buf.take_rest() },
        })
    }
}

macro_rules! object_variants {
    ($($variant:ident),* $(,)?) => {$(
        impl From<types::$variant> for Object {
            fn from(x: types::$variant) -> Self { Self::$variant(x) }
        }

        /// Narrow an [`Object`]; on mismatch the object is handed back.
        impl TryFrom<Object> for types::$variant {
            type Error = Object;

            fn try_from(object: Object) -> Result<Self, Object> {
                match object {
                    Object::$variant(x) => Ok(x),
                    other => Err(other),
                }
            }
        }
    )*};
}

object_variants!(
    Ok, Error, Chats, Chat, Message, Messages, User, File, LocalFile, FormattedText, Video,
    Usernames, PhoneNumberAuthenticationSettings,
);

// ─── Function ────────────────────────────────────────────────────────────────

/// Every request the dispatcher can carry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "impl-serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Function {
    SetAuthenticationPhoneNumber(functions::SetAuthenticationPhoneNumber),
    CheckAuthenticationCode(functions::CheckAuthenticationCode),
    GetChats(functions::GetChats),
    GetChat(functions::GetChat),
    GetChatHistory(functions::GetChatHistory),
    DownloadFile(functions::DownloadFile),
    GetMe(functions::GetMe),
    LogOut(functions::LogOut),
}

impl Function {
    pub fn constructor_id(&self) -> u32 {
        match self {
            Self::SetAuthenticationPhoneNumber(_) => functions::SetAuthenticationPhoneNumber::CONSTRUCTOR_ID,
            Self::CheckAuthenticationCode(_) => functions::CheckAuthenticationCode::CONSTRUCTOR_ID,
            Self::GetChats(_) => functions::GetChats::CONSTRUCTOR_ID,
            Self::GetChat(_) => functions::GetChat::CONSTRUCTOR_ID,
            Self::GetChatHistory(_) => functions::GetChatHistory::CONSTRUCTOR_ID,
            Self::DownloadFile(_) => functions::DownloadFile::CONSTRUCTOR_ID,
            Self::GetMe(_) => functions::GetMe::CONSTRUCTOR_ID,
            Self::LogOut(_) => functions::LogOut::CONSTRUCTOR_ID,
        }
    }

    /// The TL name of the request (`"getChatHistory"`, …).
    pub fn name(&self) -> &'static str {
        schema::name_for_id(self.constructor_id()).unwrap_or("unknown")
    }

    /// `true` for the requests that drive the login flow and are therefore
    /// accepted before the session is ready.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::SetAuthenticationPhoneNumber(_) | Self::CheckAuthenticationCode(_) | Self::LogOut(_)
        )
    }
}

impl Serializable for Function {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::SetAuthenticationPhoneNumber(x) => x.serialize(buf),
            Self::CheckAuthenticationCode(x) => x.serialize(buf),
            Self::GetChats(x) => x.serialize(buf),
            Self::GetChat(x) => x.serialize(buf),
            Self::GetChatHistory(x) => x.serialize(buf),
            Self::DownloadFile(x) => x.serialize(buf),
            Self::GetMe(x) => x.serialize(buf),
            Self::LogOut(x) => x.serialize(buf),
        }
    }
}

/// Backend-side decoding of queued requests.
impl Deserializable for Function {
    fn deserialize(buf: Buffer) -> deserialize::Result<Self> {
        Ok(match u32::deserialize(buf)? {
            id::SET_AUTHENTICATION_PHONE_NUMBER => Self::SetAuthenticationPhoneNumber(
                functions::SetAuthenticationPhoneNumber::deserialize_body(buf)?,
            ),
            id::CHECK_AUTHENTICATION_CODE => Self::CheckAuthenticationCode(
                functions::CheckAuthenticationCode::deserialize_body(buf)?,
            ),
            id::GET_CHATS => Self::GetChats(functions::GetChats::deserialize_body(buf)?),
            id::GET_CHAT => Self::GetChat(functions::GetChat::deserialize_body(buf)?),
            id::GET_CHAT_HISTORY => Self::GetChatHistory(functions::GetChatHistory::deserialize_body(buf)?),
            id::DOWNLOAD_FILE => Self::DownloadFile(functions::DownloadFile::deserialize_body(buf)?),
            id::GET_ME => Self::GetMe(functions::GetMe::deserialize_body(buf)?),
            id::LOG_OUT => Self::LogOut(functions::LogOut::deserialize_body(buf)?),
            id => return Err(Error::UnexpectedConstructor { id }),
        })
    }
}

macro_rules! function_variants {
    ($($variant:ident),* $(,)?) => {$(
        impl From<functions::$variant> for Function {
            fn from(x: functions::$variant) -> Self { Self::$variant(x) }
        }
    )*};
}

function_variants!(
    SetAuthenticationPhoneNumber, CheckAuthenticationCode, GetChats, GetChat, GetChatHistory,
    DownloadFile, GetMe, LogOut,
);

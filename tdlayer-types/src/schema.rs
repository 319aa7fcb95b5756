//! The object schema and its constructor IDs.
//!
//! Every constructor ID is the CRC32 of its normalised definition line in
//! `tl/td_api.tl`. The constants in [`id`] are checked against the schema by
//! this module's tests, so editing a definition without updating its ID fails
//! the build's test run instead of silently breaking the codec.

use std::sync::OnceLock;

/// The raw schema text.
pub const SCHEMA: &str = include_str!("../tl/td_api.tl");

/// Constructor IDs.
pub mod id {
    // Built-in TL constructors.
    pub const BOOL_TRUE:  u32 = 0x997275b5;
    pub const BOOL_FALSE: u32 = 0xbc799737;
    pub const VECTOR:     u32 = 0x1cb5c415;
    pub const NULL:       u32 = 0x56730bcc;

    // Objects.
    pub const OK:                 u32 = 0xd4edbe69;
    pub const ERROR:              u32 = 0x9bdd8f1a;
    pub const FORMATTED_TEXT:     u32 = 0x98a41d7d;
    pub const LOCAL_FILE:         u32 = 0x5cf9d6c9;
    pub const FILE:               u32 = 0x011ed17d;
    pub const VIDEO:              u32 = 0x817bbed4;
    pub const USERNAMES:          u32 = 0x1e3059a7;
    pub const USER:               u32 = 0xe40c2dc6;
    pub const CHAT_TYPE_PRIVATE:     u32 = 0x5e1e6374;
    pub const CHAT_TYPE_BASIC_GROUP: u32 = 0x3a0c4c5c;
    pub const CHAT_TYPE_SUPERGROUP:  u32 = 0x3371b1e1;
    pub const CHAT_LIST_MAIN:     u32 = 0xe8195bac;
    pub const CHAT_LIST_ARCHIVE:  u32 = 0x159f6ec3;
    pub const CHAT_LIST_FOLDER:   u32 = 0x16fe3e58;
    pub const CHAT:               u32 = 0x52cf57f5;
    pub const CHATS:              u32 = 0x9b66e30d;
    pub const MESSAGE_TEXT:       u32 = 0x4733339e;
    pub const MESSAGE_VIDEO:      u32 = 0x7ca916da;
    pub const MESSAGE:            u32 = 0xbce1bbda;
    pub const MESSAGES:           u32 = 0xd175f059;
    pub const PHONE_NUMBER_AUTHENTICATION_SETTINGS: u32 = 0xccc9aae9;

    // Functions.
    pub const SET_AUTHENTICATION_PHONE_NUMBER: u32 = 0x83d438b8;
    pub const CHECK_AUTHENTICATION_CODE:       u32 = 0xedfe44aa;
    pub const GET_CHATS:        u32 = 0xc604bac2;
    pub const GET_CHAT:         u32 = 0x6f421440;
    pub const GET_CHAT_HISTORY: u32 = 0xd051927d;
    pub const DOWNLOAD_FILE:    u32 = 0x3f253234;
    pub const GET_ME:           u32 = 0xf495b27f;
    pub const LOG_OUT:          u32 = 0xa1b5c41b;
}

/// Compute the constructor ID of a single TL definition.
///
/// The definition is normalised the way Telegram's tooling does before
/// hashing: the trailing `;` is dropped, `<` becomes a space, `>` is removed
/// and runs of whitespace collapse to one space.
pub fn tl_id(definition: &str) -> u32 {
    let definition = definition.trim().trim_end_matches(';');
    let replaced = definition.replace('<', " ").replace('>', "");
    let normalised = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    crc32(normalised.as_bytes())
}

/// Standard CRC-32 (ISO 3309 / ITU-T V.42).
fn crc32(data: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
        }
    }
    !crc
}

/// Iterate over the definition lines of [`SCHEMA`], skipping comments, blank
/// lines and section markers.
pub fn definitions() -> impl Iterator<Item = &'static str> {
    SCHEMA
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("//") && !l.starts_with("---"))
}

/// `(constructor ID, name)` for every definition, computed on first use.
fn names() -> &'static [(u32, &'static str)] {
    static NAMES: OnceLock<Vec<(u32, &'static str)>> = OnceLock::new();
    NAMES.get_or_init(|| {
        definitions()
            .filter_map(|def| Some((tl_id(def), def.split_whitespace().next()?)))
            .collect()
    })
}

/// Look up the TL name (e.g. `"getChatHistory"`) of a constructor ID.
pub fn name_for_id(constructor_id: u32) -> Option<&'static str> {
    names().iter().find(|(id, _)| *id == constructor_id).map(|&(_, name)| name)
}

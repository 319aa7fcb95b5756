//! Canned backend for trying the app without a real TDLib build.
//!
//! Enabled with `TDLAYER_DEMO=1`. Accepts the login code `12345`.

use tdlayer_client::Backend;
use tdlayer_types::{enums, types};

pub const DEMO_CODE: &str = "12345";

const RUST_CHANNEL: i64 = -1_001_234_567;
const FRIEND: i64 = 77;
const TEAM: i64 = -42;

#[derive(Default)]
pub struct DemoBackend;

impl Backend for DemoBackend {
    fn execute(&self, _: i64, function: &enums::Function) -> enums::Object {
        match function {
            enums::Function::SetAuthenticationPhoneNumber(_) | enums::Function::LogOut(_) => {
                types::Ok {}.into()
            }
            enums::Function::CheckAuthenticationCode(req) if req.code == DEMO_CODE => {
                types::Ok {}.into()
            }
            enums::Function::CheckAuthenticationCode(_) => {
                enums::Object::error(400, "PHONE_CODE_INVALID")
            }
            enums::Function::GetMe(_) => types::User {
                id:           FRIEND + 1,
                first_name:   "Demo".into(),
                last_name:    "User".into(),
                usernames:    Some(types::Usernames { active_usernames: vec!["demo".into()] }),
                phone_number: "+15550100".into(),
            }
            .into(),
            enums::Function::GetChats(req) => {
                let mut chat_ids = vec![RUST_CHANNEL, FRIEND, TEAM];
                chat_ids.truncate(usize::try_from(req.limit).unwrap_or(0));
                types::Chats { chat_ids }.into()
            }
            enums::Function::GetChat(req) => match chat(req.chat_id) {
                Some(chat) => chat.into(),
                None => enums::Object::error(400, "CHAT_NOT_FOUND"),
            },
            enums::Function::GetChatHistory(req) if req.chat_id == RUST_CHANNEL => {
                types::Messages { messages: history() }.into()
            }
            enums::Function::GetChatHistory(_) => types::Messages { messages: Vec::new() }.into(),
            enums::Function::DownloadFile(req) => types::File {
                id:    req.file_id,
                size:  video_size(req.file_id),
                local: types::LocalFile {
                    path:                     format!("downloads/{}.mp4", req.file_id),
                    is_downloading_completed: true,
                },
            }
            .into(),
            _ => enums::Object::error(400, "METHOD_NOT_SUPPORTED"),
        }
    }

    fn name(&self) -> &str { "demo" }
}

fn chat(id: i64) -> Option<types::Chat> {
    let (r#type, title) = match id {
        RUST_CHANNEL => (
            enums::ChatType::Supergroup(types::ChatTypeSupergroup { is_channel: true }),
            "Rust Videos",
        ),
        FRIEND => (enums::ChatType::Private(types::ChatTypePrivate { user_id: FRIEND }), "Friend"),
        TEAM => (
            enums::ChatType::BasicGroup(types::ChatTypeBasicGroup { basic_group_id: -TEAM }),
            "Team",
        ),
        _ => return None,
    };
    Some(types::Chat { id, r#type, title: title.into() })
}

fn video_size(file_id: i32) -> i64 {
    i64::from(file_id) * 1_048_576
}

fn video(id: i64, date: i32, file_id: i32, file_name: &str, caption: &str) -> types::Message {
    types::Message {
        id,
        date,
        content: enums::MessageContent::Video(types::MessageVideo {
            video:   types::Video {
                duration:  90 * file_id,
                file_name: file_name.into(),
                mime_type: "video/mp4".into(),
                video:     types::File {
                    id:    file_id,
                    size:  video_size(file_id),
                    local: types::LocalFile { path: String::new(), is_downloading_completed: false },
                },
            },
            caption: types::FormattedText { text: caption.into() },
        }),
    }
}

fn history() -> Vec<types::Message> {
    vec![
        video(3, 1_700_003_600, 12, "async-in-depth.mp4", "Pinning, wakers and executors"),
        types::Message {
            id:      2,
            date:    1_700_001_800,
            content: enums::MessageContent::Text(types::MessageText {
                text: types::FormattedText { text: "New talk up tomorrow".into() },
            }),
        },
        video(1, 1_700_000_000, 11, "ownership-101.mkv", ""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdlayer_types::functions;

    #[test]
    fn wrong_code_is_rejected() {
        let out = DemoBackend.execute(1, &functions::CheckAuthenticationCode { code: "0".into() }.into());
        assert_eq!(out, enums::Object::error(400, "PHONE_CODE_INVALID"));
    }

    #[test]
    fn chat_list_honours_limit() {
        let req = functions::GetChats { chat_list: enums::ChatList::default(), limit: 2 };
        match DemoBackend.execute(1, &req.into()) {
            enums::Object::Chats(chats) => assert_eq!(chats.chat_ids, [RUST_CHANNEL, FRIEND]),
            other => panic!("expected chats, got {}", other.name()),
        }
    }

    #[test]
    fn every_listed_chat_resolves() {
        for id in [RUST_CHANNEL, FRIEND, TEAM] {
            assert!(chat(id).is_some());
        }
        assert!(chat(0).is_none());
    }
}

use tdlayer_types::deserialize::Error;
use tdlayer_types::schema::id;
use tdlayer_types::{Deserializable, Identifiable, Serializable, enums, functions, types};

// ── Primitives ────────────────────────────────────────────────────────────────

#[test]
fn bool_uses_tl_constructors() {
    assert_eq!(true.to_bytes(), 0x997275b5u32.to_le_bytes());
    assert_eq!(false.to_bytes(), 0xbc799737u32.to_le_bytes());
    assert!(bool::from_bytes(&true.to_bytes()).unwrap());
    assert_eq!(
        bool::from_bytes(&7u32.to_le_bytes()),
        Err(Error::UnexpectedConstructor { id: 7 })
    );
}

#[test]
fn int53_is_little_endian() {
    let bytes = 0x0102_0304_0506_0708i64.to_bytes();
    assert_eq!(bytes, [8, 7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(i64::from_bytes(&bytes).unwrap(), 0x0102_0304_0506_0708);
}

#[test]
fn short_string_is_padded() {
    let bytes = "hello".to_owned().to_bytes();
    // 1 length byte + 5 data bytes + 2 padding bytes
    assert_eq!(bytes, [5, b'h', b'e', b'l', b'l', b'o', 0, 0]);
    assert_eq!(String::from_bytes(&bytes).unwrap(), "hello");
}

#[test]
fn long_string_uses_wide_header() {
    let s = "x".repeat(300);
    let bytes = s.to_bytes();
    assert_eq!(&bytes[..4], &[0xfe, 0x2c, 0x01, 0x00]);
    assert_eq!(bytes.len() % 4, 0);
    assert_eq!(String::from_bytes(&bytes).unwrap(), s);
}

#[test]
fn invalid_utf8_is_rejected() {
    let bytes = [2u8, 0xff, 0xfe, 0];
    assert_eq!(String::from_bytes(&bytes), Err(Error::InvalidUtf8));
}

#[test]
fn vector_keeps_order() {
    let v = vec![5i64, -1, 3, 3];
    let bytes = v.to_bytes();
    assert_eq!(&bytes[..4], &id::VECTOR.to_le_bytes());
    assert_eq!(Vec::<i64>::from_bytes(&bytes).unwrap(), v);
}

#[test]
fn negative_vector_length_is_rejected() {
    let mut bytes = id::VECTOR.to_le_bytes().to_vec();
    bytes.extend((-1i32).to_le_bytes());
    assert_eq!(Vec::<i32>::from_bytes(&bytes), Err(Error::NegativeLength(-1)));
}

#[test]
fn truncated_input_reports_eof() {
    assert_eq!(i32::from_bytes(&[0x01, 0x02]), Err(Error::UnexpectedEof));
    let bytes = "hello".to_owned().to_bytes();
    assert_eq!(String::from_bytes(&bytes[..4]), Err(Error::UnexpectedEof));
}

// ── Objects ───────────────────────────────────────────────────────────────────

fn sample_user(usernames: Option<types::Usernames>) -> types::User {
    types::User {
        id: 1001,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        usernames,
        phone_number: "+15550100".into(),
    }
}

#[test]
fn object_is_boxed() {
    let bytes = sample_user(None).to_bytes();
    assert_eq!(&bytes[..4], &types::User::CONSTRUCTOR_ID.to_le_bytes());
}

#[test]
fn nullable_object_roundtrip() {
    let without = sample_user(None);
    let bytes = without.to_bytes();
    assert!(bytes.windows(4).any(|w| w == &id::NULL.to_le_bytes()[..]));
    assert_eq!(types::User::from_bytes(&bytes).unwrap(), without);

    let with = sample_user(Some(types::Usernames {
        active_usernames: vec!["ada".into(), "countess".into()],
    }));
    let back = types::User::from_bytes(&with.to_bytes()).unwrap();
    assert_eq!(back.username(), Some("ada"));
    assert_eq!(back, with);
}

#[test]
fn wrong_constructor_is_rejected() {
    let bytes = types::Ok {}.to_bytes();
    assert_eq!(
        types::Error::from_bytes(&bytes),
        Err(Error::UnexpectedConstructor { id: id::OK })
    );
}

#[test]
fn nested_history_roundtrip() {
    let video = types::Video {
        duration: 93,
        file_name: "launch.mp4".into(),
        mime_type: "video/mp4".into(),
        video: types::File {
            id: 77,
            size: 4_194_304,
            local: types::LocalFile { path: String::new(), is_downloading_completed: false },
        },
    };
    let history = types::Messages {
        messages: vec![
            types::Message {
                id: 3 << 20,
                date: 1_700_000_100,
                content: enums::MessageContent::Video(types::MessageVideo {
                    video,
                    caption: types::FormattedText { text: "liftoff".into() },
                }),
            },
            types::Message {
                id: 2 << 20,
                date: 1_700_000_000,
                content: enums::MessageContent::Text(types::MessageText {
                    text: types::FormattedText { text: "countdown".into() },
                }),
            },
        ],
    };

    let object = enums::Object::from(history.clone());
    let back = enums::Object::from_bytes(&object.to_bytes()).unwrap();
    let types::Messages { messages } = types::Messages::try_from(back).unwrap();
    assert_eq!(messages, history.messages);
    assert_eq!(messages[0].content.caption(), "liftoff");
    assert_eq!(messages[1].content.caption(), "countdown");
}

#[test]
fn unknown_object_is_preserved() {
    let mut bytes = 0x1234_5678u32.to_le_bytes().to_vec();
    bytes.extend([1, 2, 3, 4]);

    let object = enums::Object::from_bytes(&bytes).unwrap();
    assert_eq!(object, enums::Object::Unknown { id: 0x1234_5678, body: vec![1, 2, 3, 4] });
    assert_eq!(object.name(), "unknown");
    assert_eq!(object.to_bytes(), bytes);
}

// ── Functions ─────────────────────────────────────────────────────────────────

#[test]
fn function_routes_by_constructor() {
    let requests: Vec<enums::Function> = vec![
        functions::SetAuthenticationPhoneNumber {
            phone_number: "+15550100".into(),
            settings: Some(types::PhoneNumberAuthenticationSettings::default()),
        }
        .into(),
        functions::CheckAuthenticationCode { code: "12345".into() }.into(),
        functions::GetChats { chat_list: enums::ChatList::Main, limit: 100 }.into(),
        functions::GetChat { chat_id: -100_200 }.into(),
        functions::GetChatHistory {
            chat_id: -100_200,
            from_message_id: 0,
            offset: 0,
            limit: 50,
            only_local: false,
        }
        .into(),
        functions::DownloadFile { file_id: 77, priority: 32, offset: 0, limit: 0, synchronous: true }
            .into(),
        functions::GetMe {}.into(),
        functions::LogOut {}.into(),
    ];

    let names: Vec<_> = requests.iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        [
            "setAuthenticationPhoneNumber",
            "checkAuthenticationCode",
            "getChats",
            "getChat",
            "getChatHistory",
            "downloadFile",
            "getMe",
            "logOut",
        ]
    );

    for request in requests {
        let back = enums::Function::from_bytes(&request.to_bytes()).unwrap();
        assert_eq!(back, request);
    }
}

#[test]
fn only_login_requests_are_authentication() {
    let login: enums::Function = functions::CheckAuthenticationCode { code: "1".into() }.into();
    let data: enums::Function = functions::GetMe {}.into();
    assert!(login.is_authentication());
    assert!(!data.is_authentication());
}

#[test]
fn chat_list_folder_roundtrip() {
    let list = enums::ChatList::Folder(types::ChatListFolder { chat_folder_id: 4 });
    assert_eq!(enums::ChatList::from_bytes(&list.to_bytes()).unwrap(), list);
    assert_eq!(enums::ChatList::default(), enums::ChatList::Main);
}

#[cfg(feature = "impl-serde")]
#[test]
fn serde_json_roundtrip() {
    let chat = enums::Object::Chat(types::Chat {
        id: 42,
        r#type: enums::ChatType::Private(types::ChatTypePrivate { user_id: 9 }),
        title: "X".into(),
    });
    let json = serde_json::to_string(&chat).unwrap();
    assert!(json.contains("\"title\":\"X\""));
    assert_eq!(serde_json::from_str::<enums::Object>(&json).unwrap(), chat);
}

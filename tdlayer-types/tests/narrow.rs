use tdlayer_types::{enums, types};

#[test]
fn supergroup_chat_narrows_back() {
    let object: enums::Object = types::Chat {
        id: 42,
        r#type: enums::ChatType::Supergroup(types::ChatTypeSupergroup { is_channel: true }),
        title: "X".into(),
    }
    .into();

    let chat = match object {
        enums::Object::Chat(chat) => chat,
        other => panic!("expected chat, got {}", other.name()),
    };
    assert_eq!(chat.id, 42);
    assert_eq!(chat.title, "X");
    match chat.r#type {
        enums::ChatType::Supergroup(s) => assert!(s.is_channel),
        other => panic!("expected supergroup, got {other:?}"),
    }
}

#[test]
fn try_from_hands_back_mismatches() {
    let object = enums::Object::error(400, "CHAT_NOT_FOUND");
    let back = types::Chat::try_from(object.clone()).unwrap_err();
    assert_eq!(back, object);

    let err = types::Error::try_from(back).unwrap();
    assert_eq!((err.code, err.message.as_str()), (400, "CHAT_NOT_FOUND"));
}

#[test]
fn into_result_splits_errors() {
    assert!(enums::Object::from(types::Ok {}).into_result().is_ok());
    let err = enums::Object::error(420, "FLOOD_WAIT_3").into_result().unwrap_err();
    assert_eq!(err.code, 420);
}

#[test]
#[should_panic(expected = "must carry a message")]
fn error_without_message_is_a_contract_violation() {
    let _ = types::Error::new(500, "");
}

#[test]
fn clones_are_independent() {
    let original = types::Chats { chat_ids: vec![3, 1, 2] };
    let mut copy = original.clone();
    copy.chat_ids.push(9);
    assert_eq!(original.chat_ids, [3, 1, 2]);
}

#[test]
fn object_names_follow_schema() {
    assert_eq!(enums::Object::from(types::Ok {}).name(), "ok");
    assert_eq!(enums::Object::error(1, "x").name(), "error");
    assert_eq!(
        enums::Object::from(types::FormattedText { text: String::new() }).name(),
        "formattedText"
    );
}

#[test]
fn user_display_helpers() {
    let user = types::User {
        id: 7,
        first_name: "Grace".into(),
        last_name: String::new(),
        usernames: None,
        phone_number: "+15550101".into(),
    };
    assert_eq!(user.full_name(), "Grace");
    assert_eq!(user.username(), None);
}

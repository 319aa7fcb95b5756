//! Maps protocol objects into the app's own view models.

use chrono::{DateTime, Utc};
use tdlayer_types::{enums, types};

/// A supergroup or broadcast channel the account can read.
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    pub id:         i64,
    pub title:      String,
    pub is_channel: bool,
}

/// One video posted in a channel.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoItem {
    /// `"{channel_id}_{message_id}"`.
    pub id:         String,
    pub message_id: i64,
    pub channel_id: i64,
    /// File name without its extension.
    pub title:      String,
    pub file_id:    i32,
    pub file_name:  String,
    pub file_size:  i64,
    /// Seconds.
    pub duration:   i32,
    pub mime_type:  String,
    pub caption:    Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp:  i64,
}

impl VideoItem {
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Only supergroups (including broadcast channels) map to a [`Channel`].
pub fn channel_from_chat(chat: &types::Chat) -> Option<Channel> {
    match &chat.r#type {
        enums::ChatType::Supergroup(supergroup) => Some(Channel {
            id:         chat.id,
            title:      chat.title.clone(),
            is_channel: supergroup.is_channel,
        }),
        _ => None,
    }
}

/// Only video messages map to a [`VideoItem`].
pub fn video_from_message(message: &types::Message, channel_id: i64) -> Option<VideoItem> {
    let enums::MessageContent::Video(content) = &message.content else {
        return None;
    };
    let video = &content.video;
    let title = match video.file_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => video.file_name.as_str(),
    };
    let caption = &content.caption.text;

    Some(VideoItem {
        id:         format!("{channel_id}_{}", message.id),
        message_id: message.id,
        channel_id,
        title:      title.to_string(),
        file_id:    video.video.id,
        file_name:  video.file_name.clone(),
        file_size:  video.video.size,
        duration:   video.duration,
        mime_type:  video.mime_type.clone(),
        caption:    (!caption.is_empty()).then(|| caption.clone()),
        timestamp:  i64::from(message.date) * 1000,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(r#type: enums::ChatType) -> types::Chat {
        types::Chat { id: 42, r#type, title: "X".into() }
    }

    fn video_message(file_name: &str, caption: &str) -> types::Message {
        types::Message {
            id:      9,
            date:    1_700_000_000,
            content: enums::MessageContent::Video(types::MessageVideo {
                video:   types::Video {
                    duration:  61,
                    file_name: file_name.into(),
                    mime_type: "video/mp4".into(),
                    video:     types::File {
                        id:    5,
                        size:  1024,
                        local: types::LocalFile { path: String::new(), is_downloading_completed: false },
                    },
                },
                caption: types::FormattedText { text: caption.into() },
            }),
        }
    }

    #[test]
    fn only_supergroups_become_channels() {
        let channel = channel_from_chat(&chat(enums::ChatType::Supergroup(
            types::ChatTypeSupergroup { is_channel: true },
        )))
        .unwrap();
        assert_eq!(channel, Channel { id: 42, title: "X".into(), is_channel: true });

        assert!(channel_from_chat(&chat(enums::ChatType::Private(types::ChatTypePrivate { user_id: 1 }))).is_none());
        assert!(
            channel_from_chat(&chat(enums::ChatType::BasicGroup(types::ChatTypeBasicGroup {
                basic_group_id: 1,
            })))
            .is_none()
        );
    }

    #[test]
    fn video_messages_map() {
        let item = video_from_message(&video_message("holiday.final.mp4", "Summer"), 42).unwrap();
        assert_eq!(item.id, "42_9");
        assert_eq!(item.title, "holiday.final");
        assert_eq!(item.caption.as_deref(), Some("Summer"));
        assert_eq!(item.timestamp, 1_700_000_000_000);
        assert_eq!((item.file_id, item.file_size, item.duration), (5, 1024, 61));
        assert_eq!(item.posted_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn empty_caption_and_bare_names() {
        let item = video_from_message(&video_message("clip", ""), 1).unwrap();
        assert_eq!(item.title, "clip");
        assert_eq!(item.caption, None);
    }

    #[test]
    fn text_messages_are_skipped() {
        let message = types::Message {
            id:      1,
            date:    0,
            content: enums::MessageContent::Text(types::MessageText {
                text: types::FormattedText { text: "hi".into() },
            }),
        };
        assert!(video_from_message(&message, 1).is_none());
    }
}

//! tdlayer-app: interactive phone login + channel video listing.
//!
//! Configure through the environment and run:
//!   TDLAYER_API_ID=… TDLAYER_API_HASH=… TDLAYER_PHONE=+15550100 cargo run -p tdlayer-app
//!
//! Without a linked TDLib backend every request is answered with
//! `TDLIB_STUB_IN_USE`; set `TDLAYER_DEMO=1` to walk through the flow against
//! canned data (login code `12345`).

mod demo;
mod mapper;

use std::io::{self, BufRead, Write};

use tdlayer_client::{Client, Config, InvocationError, SessionState, SignInError};
use tdlayer_types::{enums, types};

const CHAT_LIMIT:    i32 = 100;
const HISTORY_LIMIT: i32 = 50;

#[tokio::main]
async fn main() {
    // Override with RUST_LOG=tdlayer_client=debug
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("tdlayer_client=info,tdlayer_app=info"),
    )
    .init();

    if let Err(e) = run().await {
        eprintln!("\n✗ {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if std::env::var_os("TDLAYER_DEMO").is_some() {
        config = config.with_backend(demo::DemoBackend);
    }
    let phone = std::env::var("TDLAYER_PHONE")
        .map_err(|_| "set TDLAYER_PHONE to the account's phone number")?;

    let client = Client::new(config);
    client.start(|_client_id: i64| types::PhoneNumberAuthenticationSettings::default())?;
    client
        .state_changes()
        .wait_for(|state| *state >= SessionState::Authenticating)
        .await?;

    // ── Login ──────────────────────────────────────────────────────────
    println!("📱 Sending login code to {phone} …");
    client.set_phone_number(&phone).await?;
    loop {
        let code = prompt("Enter the code you received: ")?;
        match client.check_code(&code).await {
            Ok(()) => break,
            Err(SignInError::InvalidCode) => eprintln!("✗ Wrong or expired code, try again"),
            Err(e) => return Err(e.into()),
        }
    }

    let me = client.get_me().await?;
    match me.username() {
        Some(username) => println!("✅ Signed in as {} (@{username})", me.full_name()),
        None => println!("✅ Signed in as {}", me.full_name()),
    }

    // ── Channels and their videos ─────────────────────────────────────
    let mut first_video = None;
    for (channel, videos) in catalog(&client).await? {
        let kind = if channel.is_channel { "channel" } else { "supergroup" };
        println!("\n📺 {} [{kind}, id={}]", channel.title, channel.id);
        for video in videos {
            let posted = video
                .posted_at()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            println!(
                "  🎬 {} ({}s, {} bytes) {posted}{}",
                video.title,
                video.duration,
                video.file_size,
                video.caption.as_deref().map(|c| format!(" · {c}")).unwrap_or_default(),
            );
            first_video.get_or_insert(video);
        }
    }

    if let Some(video) = first_video {
        let file = client.download_file(video.file_id, 1, 0, 0, true).await?;
        println!("\n⬇️  Downloaded {} to {}", video.file_name, file.local.path);
    }

    client.log_out().await?;
    println!("👋 Logged out");
    Ok(())
}

/// Every supergroup in the main chat list, with the videos in its recent history.
async fn catalog(
    client: &Client,
) -> Result<Vec<(mapper::Channel, Vec<mapper::VideoItem>)>, InvocationError> {
    let chats = client.get_chats(enums::ChatList::Main, CHAT_LIMIT).await?;
    let mut out = Vec::new();
    for chat_id in chats.chat_ids {
        let chat = client.get_chat(chat_id).await?;
        let Some(channel) = mapper::channel_from_chat(&chat) else {
            continue;
        };
        let history = client
            .get_chat_history(channel.id, 0, 0, HISTORY_LIMIT, false)
            .await?;
        let videos = history
            .messages
            .iter()
            .filter_map(|message| mapper::video_from_message(message, channel.id))
            .collect();
        out.push((channel, videos));
    }
    Ok(out)
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdlayer_client::ApiToken;

    async fn signed_in_demo() -> Client {
        let token = ApiToken::new(1, "0123abcd").expect("valid token");
        let client = Client::new(Config::new(token).with_backend(demo::DemoBackend));
        client
            .start(|_client_id: i64| types::PhoneNumberAuthenticationSettings::default())
            .expect("start");
        client
            .state_changes()
            .wait_for(|state| *state >= SessionState::Authenticating)
            .await
            .expect("session alive");
        client.set_phone_number("+15550100").await.expect("phone accepted");
        client.check_code(demo::DEMO_CODE).await.expect("demo code accepted");
        client
    }

    #[tokio::test]
    async fn catalog_lists_channel_videos() {
        let client = signed_in_demo().await;
        let catalog = catalog(&client).await.expect("catalog");

        assert_eq!(catalog.len(), 1);
        let (channel, videos) = &catalog[0];
        assert_eq!(channel.title, "Rust Videos");
        assert!(channel.is_channel);
        let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["async-in-depth", "ownership-101"]);
    }

    #[tokio::test]
    async fn catalog_needs_a_signed_in_session() {
        let token = ApiToken::new(1, "0123abcd").expect("valid token");
        let client = Client::new(Config::new(token).with_backend(demo::DemoBackend));
        let err = catalog(&client).await.expect_err("not signed in");
        assert!(err.is_not_ready());
    }
}

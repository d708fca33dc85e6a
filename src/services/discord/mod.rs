mod commands;
mod messages;

use std::sync::Arc;
use std::time::Duration;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::event::MessageUpdateEvent;
use serenity::model::gateway::Ready;
use serenity::prelude::*;

use crate::services::config::BotConfig;
use crate::services::piston::PistonClient;
use crate::services::runner::{BoxError, CodeRunner};
use crate::services::utils::truncate_str;

use commands::{parse_command, rerun_requested, Command};
use messages::{ChannelReplier, SentMessage};

/// Shared state: the command pipeline + prefixes it answers to
pub(crate) struct SharedData {
    pub runner: CodeRunner<PistonClient, SentMessage>,
    pub prefixes: Vec<String>,
}

pub(crate) type SharedState = Arc<SharedData>;

/// TypeMapKey for storing shared state in serenity's data map
struct BotState;
impl TypeMapKey for BotState {
    type Value = SharedState;
}

struct Handler;

async fn shared_state(ctx: &Context) -> Option<SharedState> {
    let data = ctx.data.read().await;
    data.get::<BotState>().cloned()
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore messages from bots (including ourselves)
        if msg.author.bot {
            return;
        }
        let Some(state) = shared_state(&ctx).await else { return };

        if let Err(e) = handle_message(&ctx, &msg, &state).await {
            let ts = chrono::Local::now().format("%H:%M:%S");
            println!("  [{ts}]   ⚠ Discord error: {e}");
        }
    }

    async fn message_update(
        &self,
        ctx: Context,
        _old_if_available: Option<Message>,
        _new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        // Embed-only updates carry no author/content
        let (Some(author), Some(content)) = (event.author.as_ref(), event.content.as_deref()) else {
            return;
        };
        if author.bot {
            return;
        }
        let Some(state) = shared_state(&ctx).await else { return };

        if let Err(e) = handle_edit(&ctx, event.channel_id, author, content, &state).await {
            let ts = chrono::Local::now().format("%H:%M:%S");
            println!("  [{ts}]   ⚠ Discord error (edit): {e}");
        }
    }

    async fn ready(&self, _: Context, ready: Ready) {
        println!("  ✓ Bot connected as {} — Listening for messages", ready.user.name);
    }
}

/// Entry point: start the Discord bot
pub async fn run_bot(token: &str, api_key: &str, config: &BotConfig) {
    let piston = match PistonClient::new(&config.api_url, api_key, Duration::from_secs(config.timeout_secs)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("  ✗ {e}");
            return;
        }
    };

    println!("  ✓ Piston endpoint: {}", piston.api_url());
    println!("  ✓ Prefixes: {}", config.prefixes.iter().map(|p| format!("{p:?}")).collect::<Vec<_>>().join(", "));

    let shared_state: SharedState = Arc::new(SharedData {
        runner: CodeRunner::new(piston, config.session_capacity, config.primary_prefix()),
        prefixes: config.prefixes.clone(),
    });

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let client = Client::builder(token, intents)
        .event_handler(Handler)
        .type_map_insert::<BotState>(shared_state)
        .await;

    let mut client = match client {
        Ok(c) => c,
        Err(e) => {
            eprintln!("  ✗ Failed to create Discord client: {e}");
            return;
        }
    };

    if let Err(e) = client.start().await {
        eprintln!("  ✗ Discord client error: {e}");
    }
}

/// Route incoming messages to the run commands
async fn handle_message(
    ctx: &Context,
    msg: &Message,
    state: &SharedState,
) -> Result<(), BoxError> {
    let Some(call) = parse_command(&msg.content, &state.prefixes) else {
        return Ok(());
    };

    let timestamp = chrono::Local::now().format("%H:%M:%S");
    let user_display = format!("{}({})", msg.author.name, msg.author.id.get());
    let preview = truncate_str(&msg.content, 60);
    println!("  [{timestamp}] ◀ [{user_display}] {}: {preview}", call.command.name());

    let replier = ChannelReplier::new(ctx.http.clone(), msg.channel_id);
    match call.command {
        Command::Run => {
            commands::handle_run(&replier, &msg.author, &msg.content, call.language, state).await?;
        }
        Command::RunAfterEdit => {
            commands::handle_run_after_edit(&replier, &msg.author, &msg.content, call.language, state).await?;
        }
        Command::RunHelp => {
            commands::handle_runhelp(&replier, state).await?;
        }
    }

    let ts = chrono::Local::now().format("%H:%M:%S");
    let tracked = state.runner.session_count().await;
    println!("  [{ts}] ▶ [{user_display}] {} done ({tracked} tracked replies)", call.command.name());
    Ok(())
}

/// Re-run an edited `run` message and rewrite the previous reply
async fn handle_edit(
    ctx: &Context,
    channel_id: serenity::model::id::ChannelId,
    author: &serenity::model::user::User,
    content: &str,
    state: &SharedState,
) -> Result<(), BoxError> {
    if !rerun_requested(content, &state.prefixes) {
        return Ok(());
    }
    let Some(call) = parse_command(content, &state.prefixes) else {
        return Ok(());
    };

    let timestamp = chrono::Local::now().format("%H:%M:%S");
    let user_display = format!("{}({})", author.name, author.id.get());
    println!("  [{timestamp}] ◀ [{user_display}] edit → run_after_edit: {}", truncate_str(content, 60));

    let replier = ChannelReplier::new(ctx.http.clone(), channel_id);
    commands::handle_run_after_edit(&replier, author, content, call.language, state).await
}

#[cfg(test)]
mod tests;

/// The `run` / `run_after_edit` / `runhelp` pipeline, independent of the chat platform.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::services::formatter::{self, HELP_TITLE};
use crate::services::languages;
use crate::services::parser;
use crate::services::piston::{ExecutionBackend, ExecutionRequest, ExecutionResult};
use crate::services::session::SessionTracker;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Where replies go. The Discord adapter implements this for a channel;
/// tests record calls instead.
#[async_trait]
pub trait Replier: Send + Sync {
    /// Handle to a sent reply, kept so the reply can be edited later
    type Handle: Clone + Send + Sync;

    async fn typing(&self) -> Result<(), BoxError> {
        Ok(())
    }
    async fn send(&self, text: &str) -> Result<Self::Handle, BoxError>;
    async fn edit(&self, handle: &Self::Handle, text: &str) -> Result<(), BoxError>;
    async fn send_help(&self, title: &str, description: &str) -> Result<(), BoxError>;
}

/// One command invocation as seen by the runner.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub user_id: u64,
    /// How to address the user in the reply, e.g. "<@1234>"
    pub mention: String,
    /// Full raw message text, fenced block included
    pub content: String,
    /// First argument after the command; `None` shows help
    pub language: Option<String>,
}

pub struct CodeRunner<B, H> {
    backend: B,
    sessions: Mutex<SessionTracker<H>>,
    /// Per-user pipeline locks; `run` and `run_after_edit` of one user never interleave
    user_locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
    help_prefix: String,
}

impl<B, H> CodeRunner<B, H>
where
    B: ExecutionBackend,
    H: Clone + Send + Sync,
{
    pub fn new(backend: B, session_capacity: usize, help_prefix: &str) -> Self {
        Self {
            backend,
            sessions: Mutex::new(SessionTracker::new(session_capacity)),
            user_locks: Mutex::new(HashMap::new()),
            help_prefix: help_prefix.to_string(),
        }
    }

    /// `run [language]`: execute the fenced block, reply, remember the reply.
    pub async fn run<R>(&self, inv: &Invocation, out: &R) -> Result<(), BoxError>
    where
        R: Replier<Handle = H>,
    {
        if let Err(e) = out.typing().await {
            let ts = chrono::Local::now().format("%H:%M:%S");
            println!("  [{ts}]   ⚠ typing indicator failed: {e}");
        }
        let Some((alias, source)) = parser::parse(&inv.content, inv.language.as_deref()).into_parts() else {
            return self.runhelp(out).await;
        };

        let lock = self.user_lock(inv.user_id).await;
        let result = {
            let _guard = lock.lock().await;
            let reply = self.render(alias, source, &inv.mention).await;
            let sent = out.send(&reply).await;
            if let Ok(handle) = &sent {
                self.sessions.lock().await.record(inv.user_id, handle.clone());
            }
            sent.map(|_| ())
        };
        self.release_user_lock(inv.user_id, lock).await;
        result
    }

    /// `run_after_edit [language]`: re-run edited code and rewrite the previous reply.
    /// Users without a previous reply are ignored.
    pub async fn run_after_edit<R>(&self, inv: &Invocation, out: &R) -> Result<(), BoxError>
    where
        R: Replier<Handle = H>,
    {
        let Some((alias, source)) = parser::parse(&inv.content, inv.language.as_deref()).into_parts() else {
            return self.runhelp(out).await;
        };

        let lock = self.user_lock(inv.user_id).await;
        let result = {
            let _guard = lock.lock().await;
            let previous = self.sessions.lock().await.lookup(inv.user_id).cloned();
            match previous {
                Some(handle) => {
                    let reply = self.render(alias, source, &inv.mention).await;
                    out.edit(&handle, &reply).await
                }
                None => Ok(()),
            }
        };
        self.release_user_lock(inv.user_id, lock).await;
        result
    }

    /// `runhelp`: supported languages and usage.
    pub async fn runhelp<R>(&self, out: &R) -> Result<(), BoxError>
    where
        R: Replier,
    {
        out.send_help(HELP_TITLE, &formatter::help_text(&self.help_prefix)).await
    }

    /// Resolve, execute and format; always yields reply text.
    pub async fn render(&self, alias: String, source: Option<String>, mention: &str) -> String {
        let result = self.evaluate(alias, source).await;
        formatter::format(&result, mention)
    }

    async fn evaluate(&self, alias: String, source: Option<String>) -> ExecutionResult {
        let Some(language) = languages::resolve(&alias) else {
            return ExecutionResult::UnsupportedLanguage { alias };
        };
        let Some(source) = source else {
            return ExecutionResult::MalformedInput;
        };
        let request = ExecutionRequest { language: language.to_string(), source };
        self.backend.execute(&request).await
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    async fn user_lock(&self, user_id: u64) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks.entry(user_id).or_default().clone()
    }

    /// Drop the user's lock entry when nobody else is waiting on it.
    async fn release_user_lock(&self, user_id: u64, lock: Arc<Mutex<()>>) {
        let mut locks = self.user_locks.lock().await;
        // map + ours
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&user_id);
        }
    }
}

//! Editor session state.
//!
//! Owns the document, the substitution pipeline, and the verse corpus.
//! The corpus is fetched on a background task and handed over through a
//! channel; until it arrives, triggers produce the "not loaded" placeholder.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc;

use crate::bible::corpus::VerseCorpus;
use crate::bible::loader::fetcher_for;
use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::error::Result;
use crate::input::{dispatch, GlobalHandler, InputHandler, InputResult, TypingHandler};
use crate::services::editor::{Document, SermonDocument};
use crate::services::substitution::SubstitutionEngine;
use crate::types::VerseRecord;

/// Messages from background tasks.
#[derive(Debug)]
pub enum AppUpdate {
    /// The verse dataset fetch finished.
    CorpusLoaded {
        /// Where the data came from.
        source: String,
        /// The fetched records, or why fetching failed.
        result: Result<Vec<VerseRecord>>,
    },
}

/// Where the verse corpus is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusState {
    /// No dataset source is configured.
    Unconfigured,
    /// Fetching from the named source.
    Loading(String),
    /// Loaded with this many verses.
    Loaded(usize),
    /// Fetching failed with this message.
    Failed(String),
}

impl CorpusState {
    /// Short label for the status bar.
    pub fn label(&self) -> String {
        match self {
            Self::Unconfigured => "No verse data configured".to_string(),
            Self::Loading(source) => format!("Loading verses from {source}..."),
            Self::Loaded(count) => format!("{count} verses loaded"),
            Self::Failed(message) => format!("Verse data unavailable: {message}"),
        }
    }
}

/// The editor session.
pub struct App {
    /// Loaded configuration.
    pub config: Config,
    /// The sermon being edited.
    pub document: SermonDocument,
    /// Corpus lifecycle, for display.
    pub corpus_state: CorpusState,
    /// Transient status line message.
    pub status_message: Option<String>,
    /// Transient error message.
    pub error_message: Option<String>,
    /// Sender handed to background tasks.
    pub async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
    corpus: Arc<VerseCorpus>,
    global: GlobalHandler,
    typing: TypingHandler<Arc<VerseCorpus>>,
    should_quit: bool,
}

impl App {
    /// Create a session with an empty document and an unloaded corpus.
    pub fn new(config: Config) -> Self {
        let corpus = Arc::new(VerseCorpus::new());
        let engine = SubstitutionEngine::new(Arc::clone(&corpus));
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            document: SermonDocument::new(),
            corpus_state: CorpusState::Unconfigured,
            status_message: None,
            error_message: None,
            async_task_tx,
            async_task_rx,
            corpus,
            global: GlobalHandler,
            typing: TypingHandler::new(engine),
            should_quit: false,
        }
    }

    /// The session's verse corpus.
    pub const fn corpus(&self) -> &Arc<VerseCorpus> {
        &self.corpus
    }

    /// Whether the user asked to quit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Spawn the background dataset fetch. Must run inside a tokio runtime.
    pub fn start_corpus_load(&mut self) {
        let fetcher = match fetcher_for(&self.config) {
            Ok(fetcher) => fetcher,
            Err(e) => {
                tracing::warn!("Verse corpus not loaded: {e}");
                self.corpus_state = CorpusState::Unconfigured;
                return;
            }
        };

        let source = fetcher.describe();
        tracing::info!("Fetching verse dataset from {source}");
        self.corpus_state = CorpusState::Loading(source.clone());

        let tx = self.async_task_tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch().await;
            if tx.send(AppUpdate::CorpusLoaded { source, result }).await.is_err() {
                tracing::debug!("Session closed before verse dataset arrived");
            }
        });
    }

    /// Apply any finished background work.
    pub fn handle_updates(&mut self) {
        while let Ok(update) = self.async_task_rx.try_recv() {
            match update {
                AppUpdate::CorpusLoaded { source, result } => match result {
                    Ok(records) => {
                        if !self.corpus.load_once(records) {
                            tracing::debug!("Verse dataset from {source} arrived after the corpus was loaded");
                        }
                        self.corpus_state = CorpusState::Loaded(self.corpus.len());
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load verse dataset from {source}: {e}");
                        self.corpus_state = CorpusState::Failed(e.to_string());
                        self.error_message = Some(format!("Failed to load verses: {e}"));
                    }
                },
            }
        }
    }

    /// Route a key press through the handlers.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;
        self.error_message = None;

        let mut handlers: [&mut dyn InputHandler; 2] = [&mut self.global, &mut self.typing];
        match dispatch(&mut handlers, key, &mut self.document) {
            InputResult::Quit => self.should_quit = true,
            InputResult::Status(message) => self.status_message = Some(message),
            InputResult::Error(message) => {
                tracing::error!("Edit failed: {message}");
                self.error_message = Some(message);
            }
            InputResult::Consumed | InputResult::Ignored => {}
        }
    }

    /// Insert pasted text as-is. Triggers inside pasted text are not expanded.
    pub fn handle_paste(&mut self, text: &str) {
        self.status_message = None;
        self.error_message = None;

        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        if let Err(e) = self.document.insert_text(&normalized) {
            tracing::error!("Paste failed: {e}");
            self.error_message = Some(e.to_string());
        }
    }
}

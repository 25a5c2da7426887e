//! Input handling abstractions.
//!
//! Keyboard events are routed through a chain of handlers; the first one
//! that does not ignore the key wins. Typed characters go through the
//! substitution engine before they reach the document.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::services::editor::SermonDocument;
use crate::services::scripture::VerseSource;
use crate::services::substitution::{Substitution, SubstitutionEngine};

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The input was consumed and handled.
    Consumed,
    /// The input was ignored (not applicable to this handler).
    Ignored,
    /// The application should quit.
    Quit,
    /// An error occurred (message to display).
    Error(String),
    /// A status message should be shown.
    Status(String),
}

/// Trait for handling keyboard input.
pub trait InputHandler {
    /// Handle a key event against the document being edited.
    fn handle(&mut self, key: KeyEvent, doc: &mut SermonDocument) -> InputResult;

    /// Get the name of this handler (for debugging).
    fn name(&self) -> &'static str;
}

/// Offer `key` to each handler in turn until one handles it.
pub fn dispatch(handlers: &mut [&mut dyn InputHandler], key: KeyEvent, doc: &mut SermonDocument) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Ignored;
    }
    for handler in handlers.iter_mut() {
        let result = handler.handle(key, doc);
        if result != InputResult::Ignored {
            tracing::trace!("{} handled {:?}", handler.name(), key.code);
            return result;
        }
    }
    InputResult::Ignored
}

/// Handler for global shortcuts (quit, undo, redo).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, doc: &mut SermonDocument) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => InputResult::Quit,
            KeyCode::Char('c' | 'q') if ctrl => InputResult::Quit,
            KeyCode::Char('z') if ctrl => {
                if doc.undo() {
                    InputResult::Consumed
                } else {
                    InputResult::Status("Nothing to undo".to_string())
                }
            }
            KeyCode::Char('y') if ctrl => {
                if doc.redo() {
                    InputResult::Consumed
                } else {
                    InputResult::Status("Nothing to redo".to_string())
                }
            }
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "GlobalHandler"
    }
}

/// Handler for text entry and cursor movement.
#[derive(Debug)]
pub struct TypingHandler<S> {
    engine: SubstitutionEngine<S>,
}

impl<S: VerseSource> TypingHandler<S> {
    /// Create a typing handler that routes characters through `engine`.
    pub const fn new(engine: SubstitutionEngine<S>) -> Self {
        Self { engine }
    }

    /// The substitution engine in use.
    pub const fn engine(&self) -> &SubstitutionEngine<S> {
        &self.engine
    }

    fn type_char(&self, c: char, doc: &mut SermonDocument) -> InputResult {
        let outcome = match self.engine.handle_keystroke(doc, c) {
            Ok(outcome) => outcome,
            Err(e) => return InputResult::Error(e.to_string()),
        };

        if !outcome.consumed_input() {
            if let Err(e) = doc.insert_char(c) {
                return InputResult::Error(e.to_string());
            }
        }

        match outcome {
            Substitution::Inserted(citation) => InputResult::Status(format!("Inserted {}", citation.reference)),
            Substitution::Placeholder { citation, reason } => {
                InputResult::Status(format!("{}: {}", citation.reference, reason.message()))
            }
            Substitution::NoTrigger | Substitution::Unresolved { .. } => InputResult::Consumed,
        }
    }
}

impl<S: VerseSource> InputHandler for TypingHandler<S> {
    fn handle(&mut self, key: KeyEvent, doc: &mut SermonDocument) -> InputResult {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return InputResult::Ignored;
        }

        let edited = match key.code {
            KeyCode::Char(c) => return self.type_char(c, doc),
            KeyCode::Tab => return self.type_char('\t', doc),
            KeyCode::Enter => return self.type_char('\n', doc),
            KeyCode::Backspace => doc.delete_backward(),
            KeyCode::Delete => doc.delete_forward(),
            KeyCode::Left => {
                doc.move_left();
                Ok(true)
            }
            KeyCode::Right => {
                doc.move_right();
                Ok(true)
            }
            KeyCode::Home => {
                doc.move_home();
                Ok(true)
            }
            KeyCode::End => {
                doc.move_end();
                Ok(true)
            }
            _ => return InputResult::Ignored,
        };

        match edited {
            Ok(_) => InputResult::Consumed,
            Err(e) => InputResult::Error(e.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "TypingHandler"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::corpus::tests::genesis_one;
    use crate::bible::corpus::VerseCorpus;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn typing() -> TypingHandler<VerseCorpus> {
        TypingHandler::new(SubstitutionEngine::new(VerseCorpus::with_records(genesis_one())))
    }

    fn type_str(handler: &mut TypingHandler<VerseCorpus>, doc: &mut SermonDocument, text: &str) -> InputResult {
        let mut last = InputResult::Ignored;
        for c in text.chars() {
            last = handler.handle(make_key(KeyCode::Char(c)), doc);
        }
        last
    }

    #[test]
    fn typed_trigger_becomes_citation() {
        let mut handler = typing();
        let mut doc = SermonDocument::new();
        let result = type_str(&mut handler, &mut doc, "/창1:2 ");

        assert_eq!(result, InputResult::Status("Inserted 창세기 1:2".to_string()));
        assert_eq!(doc.plain_text(), "[창세기 1:2] Genesis 1:2 text ");
    }

    #[test]
    fn unknown_book_is_plain_typing() {
        let mut handler = typing();
        let mut doc = SermonDocument::new();
        let result = type_str(&mut handler, &mut doc, "/없음1:1 ");

        assert_eq!(result, InputResult::Consumed);
        assert_eq!(doc.plain_text(), "/없음1:1 ");
    }

    #[test]
    fn placeholder_reports_status() {
        let mut handler = typing();
        let mut doc = SermonDocument::new();
        let result = type_str(&mut handler, &mut doc, "/창999:1 ");
        assert!(matches!(result, InputResult::Status(msg) if msg.starts_with("창세기 999:1")));
    }

    #[test]
    fn enter_completes_a_trigger() {
        let mut handler = typing();
        let mut doc = SermonDocument::new();
        type_str(&mut handler, &mut doc, "/창1:1");
        let result = handler.handle(make_key(KeyCode::Enter), &mut doc);

        assert_eq!(result, InputResult::Status("Inserted 창세기 1:1".to_string()));
        assert_eq!(doc.citations().count(), 1);
        assert_eq!(doc.plain_text(), "[창세기 1:1] Genesis 1:1 text\n");
        assert_eq!(doc.cursor_line_col(), (1, 0));
    }

    #[test]
    fn enter_and_backspace_edit_document() {
        let mut handler = typing();
        let mut doc = SermonDocument::new();
        type_str(&mut handler, &mut doc, "ab");
        assert_eq!(handler.handle(make_key(KeyCode::Enter), &mut doc), InputResult::Consumed);
        assert_eq!(handler.handle(make_key(KeyCode::Backspace), &mut doc), InputResult::Consumed);
        assert_eq!(handler.handle(make_key(KeyCode::Backspace), &mut doc), InputResult::Consumed);
        assert_eq!(doc.plain_text(), "a");
    }

    #[test]
    fn control_keys_are_left_to_global_handler() {
        let mut handler = typing();
        let mut doc = SermonDocument::new();
        assert_eq!(handler.handle(ctrl('z'), &mut doc), InputResult::Ignored);
    }

    #[test]
    fn global_handler_quits_and_undoes() {
        let mut global = GlobalHandler;
        let mut doc = SermonDocument::new();
        assert_eq!(global.handle(make_key(KeyCode::Esc), &mut doc), InputResult::Quit);
        assert_eq!(global.handle(ctrl('c'), &mut doc), InputResult::Quit);
        assert!(matches!(global.handle(ctrl('z'), &mut doc), InputResult::Status(_)));
        assert_eq!(global.handle(make_key(KeyCode::Char('z')), &mut doc), InputResult::Ignored);
    }

    #[test]
    fn dispatch_undo_restores_trigger_in_one_step() {
        let mut global = GlobalHandler;
        let mut typing = typing();
        let mut doc = SermonDocument::from_text("/창1:1");

        {
            let mut handlers: [&mut dyn InputHandler; 2] = [&mut global, &mut typing];
            dispatch(&mut handlers, make_key(KeyCode::Char(' ')), &mut doc);
            assert_eq!(doc.citations().count(), 1);
            assert_eq!(dispatch(&mut handlers, ctrl('z'), &mut doc), InputResult::Consumed);
        }
        assert_eq!(doc.plain_text(), "/창1:1");
    }

    #[test]
    fn dispatch_ignores_key_release() {
        let mut global = GlobalHandler;
        let mut doc = SermonDocument::new();
        let mut key = make_key(KeyCode::Esc);
        key.kind = KeyEventKind::Release;
        let mut handlers: [&mut dyn InputHandler; 1] = [&mut global];
        assert_eq!(dispatch(&mut handlers, key, &mut doc), InputResult::Ignored);
    }
}

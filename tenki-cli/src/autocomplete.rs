use std::sync::{Arc, Mutex as StdMutex};

use inquire::{
    CustomUserError,
    autocompletion::{Autocomplete, Replacement},
};
use tenki_core::Suggestion;
use tokio::{runtime::Handle, sync::Mutex};

use crate::cli::Widget;

pub type SharedWidget = Arc<Mutex<Widget>>;

/// Feeds every edit of the prompt line to the widget and lists its suggestions.
///
/// inquire calls this synchronously, so it must run on a thread outside the
/// runtime where `Handle::block_on` is allowed.
#[derive(Clone)]
pub struct SuggestionCompleter {
    widget: SharedWidget,
    runtime: Handle,
    /// Everything offered during the current prompt, so a chosen label can be
    /// mapped back after the list itself has been refreshed.
    offered: Arc<StdMutex<Vec<Suggestion>>>,
}

impl SuggestionCompleter {
    pub fn new(widget: SharedWidget, runtime: Handle) -> Self {
        Self { widget, runtime, offered: Arc::default() }
    }

    /// The suggestion shown under `label`, if any was offered.
    pub fn offered(&self, label: &str) -> Option<Suggestion> {
        let offered = self.offered.lock().unwrap_or_else(|e| e.into_inner());
        offered.iter().find(|s| s.label() == label).cloned()
    }
}

impl Autocomplete for SuggestionCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let widget = Arc::clone(&self.widget);
        let listed = self.runtime.block_on(async move {
            let mut widget = widget.lock().await;
            widget.input(input).await;
            widget.state().suggestions.clone()
        });

        let labels = listed.iter().map(Suggestion::label).collect();

        let mut offered = self.offered.lock().unwrap_or_else(|e| e.into_inner());
        for s in listed {
            if !offered.contains(&s) {
                offered.push(s);
            }
        }
        Ok(labels)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

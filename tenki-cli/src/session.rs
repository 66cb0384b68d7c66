//! Interactive widget: locate once, then search cities until Esc / Ctrl-C.

use std::sync::Arc;

use anyhow::Result;
use inquire::{InquireError, Text};
use tenki_core::{
    Config, LocationSource,
    view::{LOADING_TEXT, SEARCH_PLACEHOLDER, TITLE},
};
use tokio::{runtime::Handle, sync::Mutex};

use crate::{
    autocomplete::{SharedWidget, SuggestionCompleter},
    cli::widget_from_config,
    output,
};

/// Runs on a blocking thread; async widget work goes through `runtime`.
pub fn run(config: Config, location: Box<dyn LocationSource>, runtime: Handle) -> Result<()> {
    let widget: SharedWidget = Arc::new(Mutex::new(widget_from_config(&config)?));

    println!("{TITLE}\n");
    runtime.block_on(async {
        let mut widget = widget.lock().await;
        widget.mount(location.as_ref()).await;
        output::print_view(&widget.view());
    });

    loop {
        let completer = SuggestionCompleter::new(Arc::clone(&widget), runtime.clone());
        let answer = Text::new("City:")
            .with_placeholder(SEARCH_PLACEHOLDER)
            .with_help_message("Enter to search, ↑↓ to pick a suggestion, Esc to quit")
            .with_autocomplete(completer.clone())
            .prompt_skippable();

        let text = match answer {
            Ok(Some(text)) => text,
            Ok(None) | Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            continue;
        }

        let chosen = completer.offered(&text);
        runtime.block_on(async {
            let mut widget = widget.lock().await;
            println!("{LOADING_TEXT}");
            match chosen {
                Some(suggestion) => widget.select_suggestion(suggestion).await,
                None => {
                    widget.set_query_text(text);
                    widget.submit().await;
                }
            }
            output::print_view(&widget.view());
        });
    }

    tracing::debug!("Interactive session closed");
    Ok(())
}

use chrono::Local;
use tenki_core::{Suggestion, WidgetView};

pub fn print_view(view: &WidgetView) {
    println!("{view}");
    if let WidgetView::Weather { card, .. } = view {
        if let Some(at) = card.observed_at {
            println!("Updated: {}", at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
        }
    }
    println!();
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No matching cities.");
        return;
    }
    for s in suggestions {
        println!("{}", s.label());
    }
}

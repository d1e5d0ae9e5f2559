use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use sharp_syntax::{parse_compilation_unit, ErrorCode};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

#[derive(Clone, Default)]
struct WarningCounter {
    warnings: Arc<Mutex<Vec<String>>>,
}

impl<S: Subscriber> Layer<S> for WarningCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() == Level::WARN {
            if let Ok(mut warnings) = self.warnings.lock() {
                warnings.push(metadata.target().to_string());
            }
        }
    }
}

fn nested_parens(depth: usize) -> String {
    format!(
        "class C {{ void M() {{ var x = {}1{}; }} }}",
        "(".repeat(depth),
        ")".repeat(depth)
    )
}

#[test]
fn moderate_nesting_parses_cleanly() {
    let text = nested_parens(200);
    let tree = parse_compilation_unit(&text);
    assert_eq!(tree.diagnostics, Vec::new());
    assert_eq!(tree.syntax().text().to_string(), text);
}

#[test]
fn deep_nesting_reports_once_and_stays_lossless() {
    let counter = WarningCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let text = nested_parens(5_000);
    let tree = parse_compilation_unit(&text);

    let codes: Vec<ErrorCode> = tree.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::InsufficientStack]);
    assert_eq!(tree.syntax().text().to_string(), text);

    let warnings = counter.warnings.lock().unwrap().clone();
    assert_eq!(warnings, vec!["sharp_syntax".to_string()]);
}

#[test]
fn deep_block_nesting() {
    let text = format!("void M() {}{} ", "{".repeat(4_000), "}".repeat(4_000));
    let tree = parse_compilation_unit(&text);
    let stack_errors = tree
        .diagnostics
        .iter()
        .filter(|d| d.code == ErrorCode::InsufficientStack)
        .count();
    assert_eq!(stack_errors, 1);
    assert_eq!(tree.syntax().text().to_string(), text);
}

#[test]
fn deep_type_and_namespace_nesting() {
    for open in ["class A { ", "namespace ns { "] {
        let text = format!("{}{}", open.repeat(10_000), "} ".repeat(10_000));
        let tree = parse_compilation_unit(&text);
        let codes: Vec<ErrorCode> = tree.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![ErrorCode::InsufficientStack], "{open}");
        assert_eq!(tree.syntax().text().to_string(), text);
    }
}

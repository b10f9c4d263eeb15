use std::sync::OnceLock;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static ACTIVE_DIRECTIVE: OnceLock<String> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "mailbox_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() -> bool {
    init_tracing_with(DEFAULT_DIRECTIVE)
}

/// Like [`init_tracing`], with a caller-supplied directive such as
/// `mailbox_core=debug`. An unparsable directive falls back to the default.
///
/// Only the first call across both functions installs a subscriber; later
/// calls leave the active directive unchanged and return `false`.
pub fn init_tracing_with(directive: &str) -> bool {
    let mut installed = false;
    ACTIVE_DIRECTIVE.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        let mut applied = String::new();
        if let Some(parsed) = parse_directive(directive) {
            applied = parsed.to_string();
            filter = filter.add_directive(parsed);
        }
        let _ = fmt().with_env_filter(filter).try_init();
        installed = true;
        applied
    });
    installed
}

/// Directive installed by the first initialization, if any.
pub fn active_directive() -> Option<&'static str> {
    ACTIVE_DIRECTIVE.get().map(String::as_str)
}

fn parse_directive(directive: &str) -> Option<Directive> {
    directive
        .parse()
        .or_else(|_| DEFAULT_DIRECTIVE.parse())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_falls_back_to_default() {
        let parsed = parse_directive("mailbox_core=loud").expect("fallback directive");
        assert_eq!(parsed.to_string(), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn first_initialization_wins() {
        init_tracing_with("mailbox_core=debug");
        let active = active_directive().expect("tracing initialized");
        assert!(!init_tracing_with("mailbox_core=trace"));
        assert!(!init_tracing());
        assert_eq!(active_directive(), Some(active));
    }
}

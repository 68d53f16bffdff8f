use std::fmt;

/// Error raised by the controller method reader.
///
/// Every variant is a configuration mistake on the caller's side. The reader
/// never retries and never recovers: a controller that cannot be inspected,
/// or an allow-list containing something that is not an HTTP verb, is
/// surfaced immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    /// The introspector could not describe the requested controller class.
    ///
    /// Callers are expected to have validated that the class exists before
    /// asking the reader for its routes.
    UninspectableClass {
        /// The controller class identifier as given to `read()`
        class: String,
        /// Why the introspector rejected it
        reason: String,
    },
    /// An entry of the verb allow-list is empty or not a valid HTTP method token.
    InvalidVerb {
        /// The offending verb string
        verb: String,
    },
}

impl ReaderError {
    pub fn uninspectable(class: impl Into<String>, reason: impl Into<String>) -> Self {
        ReaderError::UninspectableClass {
            class: class.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::UninspectableClass { class, reason } => {
                write!(
                    f,
                    "Configuration error: controller '{}' cannot be inspected: {}",
                    class, reason
                )
            }
            ReaderError::InvalidVerb { verb } => {
                write!(
                    f,
                    "Configuration error: '{}' is not a valid HTTP verb for auto-routing. \
                    Expected a method token such as get, post or put.",
                    verb
                )
            }
        }
    }
}

impl std::error::Error for ReaderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_class_and_reason() {
        let err = ReaderError::uninspectable("App\\Controllers\\Missing", "not registered");
        let msg = err.to_string();
        assert!(msg.contains("App\\Controllers\\Missing"));
        assert!(msg.contains("not registered"));
    }

    #[test]
    fn test_invalid_verb_display() {
        let err = ReaderError::InvalidVerb {
            verb: "g et".to_string(),
        };
        assert!(err.to_string().contains("'g et'"));
    }
}

/// Inputs answered locally instead of by the chatbot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Greeting,
    /// The user agreed to start; the interview is kicked off with
    /// [`START_INTERVIEW`].
    Affirmation,
}

pub const GREETING_REPLY: &str =
    "Hey! I'm your interview prep assistant. Type 'yes' when you're ready to start.";
pub const STARTING_REPLY: &str = "Great, starting the interview now...";
pub const START_INTERVIEW: &str = "start interview";

const GREETINGS: &[&str] = &["hi", "hello", "hey", "hey there", "hi there"];
const AFFIRMATIONS: &[&str] = &["yes", "yeah", "yep", "sure", "okay", "ok", "y"];

impl Shortcut {
    /// Matches whole inputs only, ignoring case and surrounding whitespace.
    pub fn detect(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        if GREETINGS.contains(&normalized.as_str()) {
            Some(Shortcut::Greeting)
        } else if AFFIRMATIONS.contains(&normalized.as_str()) {
            Some(Shortcut::Affirmation)
        } else {
            None
        }
    }

    pub fn reply(self) -> &'static str {
        match self {
            Shortcut::Greeting => GREETING_REPLY,
            Shortcut::Affirmation => STARTING_REPLY,
        }
    }

    /// Message forwarded to the chatbot after the local reply, if any.
    pub fn forward(self) -> Option<&'static str> {
        match self {
            Shortcut::Greeting => None,
            Shortcut::Affirmation => Some(START_INTERVIEW),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Shortcut::detect("  Hey There "), Some(Shortcut::Greeting));
        assert_eq!(Shortcut::detect("HELLO"), Some(Shortcut::Greeting));
        assert_eq!(Shortcut::detect("y"), Some(Shortcut::Affirmation));
        assert_eq!(Shortcut::detect("Okay"), Some(Shortcut::Affirmation));
        assert_eq!(Shortcut::detect("hello everyone"), None);
        assert_eq!(Shortcut::detect("yes please"), None);
        assert_eq!(Shortcut::detect(""), None);
    }

    #[test]
    fn test_only_affirmation_forwards() {
        assert_eq!(Shortcut::Greeting.forward(), None);
        assert_eq!(Shortcut::Affirmation.forward(), Some("start interview"));
    }
}

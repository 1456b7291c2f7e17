//! Normalization of generated explanation text.

const TERMINAL: [char; 3] = ['.', '!', '?'];

/// Make sure generated text ends with terminal punctuation.
///
/// Output cut off mid-sentence is truncated back to the last space and closed
/// with a period. Text already ending in `.`, `!` or `?` is returned as is
/// (after trimming surrounding whitespace).
pub fn ensure_terminal_punctuation(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() || text.ends_with(TERMINAL) {
        return text.to_string();
    }

    let head = match text.rsplit_once(' ') {
        Some((head, _fragment)) => head.trim_end(),
        None => text,
    };
    if head.ends_with(TERMINAL) {
        head.to_string()
    } else {
        format!("{head}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn drops_partial_last_word() {
        assert_eq!(
            ensure_terminal_punctuation("This food is risky because it was stored too long"),
            "This food is risky because it was stored too."
        );
    }

    #[test]
    fn complete_text_unchanged() {
        for text in ["Safe to eat.", "Throw it away!", "Was it frozen?"] {
            assert_eq!(ensure_terminal_punctuation(text), text);
        }
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        assert_eq!(ensure_terminal_punctuation("  Keep it cold.\n"), "Keep it cold.");
    }

    #[test]
    fn single_word_gets_period() {
        assert_eq!(ensure_terminal_punctuation("Spoiled"), "Spoiled.");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(ensure_terminal_punctuation(""), "");
        assert_eq!(ensure_terminal_punctuation("   "), "");
    }

    #[test]
    fn cut_second_sentence_keeps_words_before_last_space() {
        assert_eq!(
            ensure_terminal_punctuation("Milk keeps a week. It was stor"),
            "Milk keeps a week. It was."
        );
    }

    #[test]
    fn no_double_period_after_complete_sentence() {
        assert_eq!(
            ensure_terminal_punctuation("Milk keeps a week. stor"),
            "Milk keeps a week."
        );
        assert_eq!(
            ensure_terminal_punctuation("Is it safe? mayb"),
            "Is it safe?"
        );
    }

    #[test]
    fn comma_before_cut_still_closed() {
        assert_eq!(
            ensure_terminal_punctuation("It smells sour, and the"),
            "It smells sour, and."
        );
    }

    proptest! {
        #[test]
        fn always_ends_in_terminal_mark(text in "[a-zA-Z,. ]{1,80}") {
            let out = ensure_terminal_punctuation(&text);
            if !out.is_empty() {
                prop_assert!(out.ends_with(TERMINAL));
                prop_assert!(out.len() <= text.trim().len() + 1);
            }
        }

        #[test]
        fn result_is_prefix_of_input(text in "[a-z]{1,8}( [a-z]{1,8}){0,10}") {
            let out = ensure_terminal_punctuation(&text);
            let body = out.trim_end_matches('.');
            prop_assert!(text.starts_with(body));
        }
    }
}

//! Plain-text rendering of a lens card

use crate::core::types::Lens;

/// Footer appended to shared text
pub const SHARE_FOOTER: &str = "(This tool offers perspectives, not decisions.)";

/// Shown when there is no lens to display
pub const EMPTY_STATE: &str = "Nothing to show yet.";

/// Card as shown in the terminal
///
/// Prompts and counter only appear while the reflect view is expanded.
pub fn render_card(lens: &Lens, reflect_expanded: bool) -> String {
    let mut out = String::new();
    out.push_str(&lens.principle);
    out.push('\n');

    if reflect_expanded {
        out.push_str("\nReflect:\n");
        for prompt in &lens.prompts {
            out.push_str(&format!("  - {}\n", prompt));
        }
        if !lens.counter.is_empty() {
            out.push_str(&format!("\nCounter:\n  {}\n", lens.counter));
        }
    }

    out
}

/// Text placed on the clipboard by the copy action
pub fn share_text(lens: &Lens) -> String {
    let prompts: Vec<String> = lens.prompts.iter().map(|p| format!("- {}", p)).collect();

    format!(
        "Lens \u{2014} Perspective\nPrinciple: {}\n\nReflect:\n{}\n\nCounter:\n- {}\n\n{}",
        lens.principle,
        prompts.join("\n"),
        lens.counter,
        SHARE_FOOTER
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lens {
        Lens::new("inversion", "Avoid the ways to fail.")
            .with_prompts(["How would this fail?", "Are you doing that?"])
            .with_counter("Avoiding failure is not a goal.")
    }

    #[test]
    fn test_collapsed_card_shows_principle_only() {
        let card = render_card(&sample(), false);
        assert_eq!(card, "Avoid the ways to fail.\n");
    }

    #[test]
    fn test_expanded_card_lists_prompts_and_counter() {
        let card = render_card(&sample(), true);
        assert!(card.contains("  - How would this fail?\n"));
        assert!(card.contains("  - Are you doing that?\n"));
        assert!(card.contains("Counter:\n  Avoiding failure is not a goal."));
    }

    #[test]
    fn test_share_text_format() {
        let text = share_text(&sample());
        assert_eq!(
            text,
            "Lens \u{2014} Perspective\n\
             Principle: Avoid the ways to fail.\n\
             \n\
             Reflect:\n\
             - How would this fail?\n\
             - Are you doing that?\n\
             \n\
             Counter:\n\
             - Avoiding failure is not a goal.\n\
             \n\
             (This tool offers perspectives, not decisions.)"
        );
    }
}

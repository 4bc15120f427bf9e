/// Builds the fixed explain-this instruction around the captured text.
///
/// The extracted text is fenced so the model cannot mistake screen content
/// for instructions. If the text itself contains the fence sequence, the
/// fence grows by one backtick until it no longer collides, keeping the
/// function deterministic for any input.
pub fn compose_explain_prompt(extracted_text: &str) -> String {
    let fence = collision_free_fence(extracted_text);

    format!(
        "You are an expert technical explainer.\n\
         \n\
         The following text was captured from the user's screen:\n\
         \n\
         {fence}\n\
         {extracted_text}\n\
         {fence}\n\
         \n\
         Your tasks:\n\
         - Identify what this text is about (code, error message, article, UI, or something else).\n\
         - Give a concise explanation of what it means.\n\
         - List 3-5 key takeaways.\n\
         - If it looks like code or an error, suggest concrete next steps.\n\
         \n\
         Keep the answer short and use bullet points."
    )
}

fn collision_free_fence(text: &str) -> String {
    let mut fence = String::from("```");
    while text.contains(&fence) {
        fence.push('`');
    }
    fence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_extracted_text_verbatim() {
        let prompt = compose_explain_prompt("SELECT * FROM users");

        assert!(prompt.contains("SELECT * FROM users"));
    }

    #[test]
    fn test_prompt_lists_the_four_fixed_tasks() {
        let prompt = compose_explain_prompt("anything");

        assert!(prompt.contains("- Identify what this text is about"));
        assert!(prompt.contains("- Give a concise explanation"));
        assert!(prompt.contains("- List 3-5 key takeaways"));
        assert!(prompt.contains("- If it looks like code or an error"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let first = compose_explain_prompt("SELECT * FROM users");
        let second = compose_explain_prompt("SELECT * FROM users");

        assert_eq!(first, second);
    }

    #[test]
    fn test_fence_grows_past_collisions_in_the_text() {
        let text = "here is a block:\n```\nlet x = 1;\n```";

        let prompt = compose_explain_prompt(text);

        assert!(prompt.contains(&format!("````\n{}\n````", text)));
    }

    #[test]
    fn test_empty_text_still_produces_a_well_formed_prompt() {
        let prompt = compose_explain_prompt("");

        assert!(prompt.starts_with("You are an expert technical explainer."));
        assert!(prompt.contains("```\n\n```"));
    }
}

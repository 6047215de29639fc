//! Prompt text sent to the completion endpoint.

/// System message framing the assistant's role.
pub fn system_prompt() -> &'static str {
    "You are a helpful assistant that generates Python code puzzles."
}

/// User message asking for one puzzle at `difficulty` on a `1..=max_difficulty` scale.
pub fn user_prompt(difficulty: u32, max_difficulty: u32) -> String {
    format!(
        "Generate a unique Python code snippet that is suitable for a coding puzzle.\n\
         The snippet should have no syntax errors and should not require any external packages.\n\
         The difficulty level is {difficulty} on a scale from 1 (easy) to {max_difficulty} (hard).\n\
         The code should not simply print a string like \"Hello\". It should involve basic Python \
         operations, control structures, or data manipulations.\n\
         Provide the code snippet only without any explanations or comments.\n\
         The answer given must be executable right away and provide a simple output with at most \
         10 characters."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_scale() {
        let prompt = user_prompt(4, 30);
        assert!(prompt.contains("difficulty level is 4"));
        assert!(prompt.contains("from 1 (easy) to 30 (hard)"));
        assert!(prompt.contains("at most 10 characters"));
    }

    #[test]
    fn test_user_prompt_small_ceiling() {
        let prompt = user_prompt(1, 5);
        assert!(prompt.contains("to 5 (hard)"));
    }

    #[test]
    fn test_system_prompt() {
        assert!(system_prompt().contains("Python code puzzles"));
    }
}

/// Append the fixed motivational-coach instruction to the prompt.
pub fn append_instructions(prompt: &mut String) {
    prompt.push_str(
        "Act as my motivational coach. Greet me with a unique motivational \
         quote, a positive thought, and a small productivity tip for the day.",
    );
}

/// Append the tailoring clause, embedding the raw goal text verbatim.
pub fn append_goals_clause(prompt: &mut String, goals: &str) {
    prompt.push_str(&format!(
        " Please tailor your response to help me achieve the following goals: \"{goals}\""
    ));
}

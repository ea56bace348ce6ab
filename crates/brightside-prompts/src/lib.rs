pub mod coach;
pub mod schema;

pub use schema::response_schema;

/// Assemble the full generation prompt: the fixed coaching instruction,
/// plus a tailoring clause when the user supplied non-empty goals.
pub fn assemble_prompt(goals: &str) -> String {
    let mut prompt = String::new();
    coach::append_instructions(&mut prompt);
    if !goals.trim().is_empty() {
        coach::append_goals_clause(&mut prompt, goals);
    }
    prompt
}

// Skill matching: extraction of skill names from free text and JD/CV comparison.
// All provider calls go through skills_client; nothing here talks HTTP directly.

pub mod extractor;
pub mod handlers;
pub mod matcher;

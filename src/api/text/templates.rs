// --- PROMPT TEMPLATES ---
// One template per generation mode; the topic is embedded verbatim in quotes.

use crate::config::Mode;

pub fn build_prompt(topic: &str, mode: Mode) -> String {
    match mode {
        Mode::EduPoem => format!(
            "Create a fun, catchy educational poem long 10 lines about the topic: \"{topic}\".\n\
             - Begin with a song title.\n\
             - Make it engaging and easy to remember.\n\
             - Use simple language suitable for learners.\n\
             - Ensure it teaches the topic effectively through the lyrics.\n\
             - Keep it playful, musical, and informative.\n\
             Output only the 10 lines of the poem but do not number them."
        ),
        Mode::GenZTypeShii => format!(
            "Create a Gen Z \"Type Shii\" educational explanation about the topic: \"{topic}\".\n\
             - Use exaggerated Gen Z slang and humor.\n\
             - Keep it energetic, fun, and full of energy.\n\
             - Make it relatable, using meme references and \"type shii\" culture.\n\
             - Ensure it teaches the topic effectively but in a super cool way.\n\n\
             Make sure you only output the explanation text, don't say anything else. \
             No emojis. 120 words max."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_topic() {
        for mode in Mode::ALL {
            let prompt = build_prompt("Photosynthesis", mode);
            assert!(prompt.contains("\"Photosynthesis\""), "{mode:?}: {prompt}");
        }
    }

    #[test]
    fn test_modes_have_distinct_constraints() {
        let poem = build_prompt("Gravity", Mode::EduPoem);
        let genz = build_prompt("Gravity", Mode::GenZTypeShii);
        assert!(poem.contains("10 lines"));
        assert!(genz.contains("120 words max"));
        assert!(genz.contains("No emojis"));
        assert_ne!(poem, genz);
    }
}

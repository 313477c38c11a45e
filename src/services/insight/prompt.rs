//! Prompt construction for the generative backend.
//!
//! Pure functions of their inputs: no I/O, no randomness.

const SUMMARY_MAX_CHARS: usize = 500;
const COMMENT_MAX_CHARS: usize = 100;
/// Only the most recent comments are consulted
pub const MAX_PROMPT_COMMENTS: usize = 3;

const SHOW_INSTRUCTION: &str = "Provide exactly 2-3 sentences that capture what makes this show unique and appealing. Do not list multiple options, just give one cohesive insight.";
const EPISODE_INSTRUCTION: &str = "Provide exactly 2-3 sentences about this episode's themes and significance. Do not list options, just give one cohesive insight.";

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Strips paragraph tags, trims and caps the summary. `None` when nothing is left.
fn clean_summary(summary: Option<&str>) -> Option<String> {
    let stripped = summary?.replace("<p>", "").replace("</p>", "");
    let cleaned = truncate_chars(stripped.trim(), SUMMARY_MAX_CHARS);
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

fn format_comments(comments: &[String]) -> Option<String> {
    if comments.is_empty() {
        return None;
    }

    let joined = comments
        .iter()
        .take(MAX_PROMPT_COMMENTS)
        .map(|comment| truncate_chars(comment, COMMENT_MAX_CHARS))
        .collect::<Vec<_>>()
        .join(" | ");

    Some(format!("Recent viewer comments: {}", joined))
}

/// Appends the shared middle section: genres, summary, comments
fn push_context(
    parts: &mut Vec<String>,
    genre_label: &str,
    genres: &[String],
    summary_label: &str,
    summary: Option<&str>,
    comments: &[String],
) {
    if !genres.is_empty() {
        parts.push(format!("{}: {}.", genre_label, genres.join(", ")));
    }

    if let Some(summary) = clean_summary(summary) {
        parts.push(format!("{}: {}", summary_label, summary));
    }

    if let Some(comments) = format_comments(comments) {
        parts.push(comments);
    }
}

pub fn build_show_prompt(
    name: &str,
    summary: Option<&str>,
    genres: &[String],
    comments: &[String],
) -> String {
    let mut parts = vec![format!(
        "Write a single compelling insight about the TV show '{}'.",
        name
    )];
    push_context(&mut parts, "Genres", genres, "Summary", summary, comments);
    parts.push(SHOW_INSTRUCTION.to_string());
    parts.join(" ")
}

pub fn build_episode_prompt(
    show_name: &str,
    episode_name: &str,
    season: u32,
    number: u32,
    summary: Option<&str>,
    genres: &[String],
    comments: &[String],
) -> String {
    let mut parts = vec![format!(
        "Write a single insight for episode '{}' (S{}E{}) from '{}'.",
        episode_name, season, number, show_name
    )];
    push_context(
        &mut parts,
        "Show genres",
        genres,
        "Episode summary",
        summary,
        comments,
    );
    parts.push(EPISODE_INSTRUCTION.to_string());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_show_prompt() {
        let prompt = build_show_prompt(
            "Breaking Bad",
            Some("<p>A chemistry teacher turns to crime</p>"),
            &strings(&["Drama", "Crime"]),
            &[],
        );

        assert!(prompt.starts_with("Write a single compelling insight about the TV show 'Breaking Bad'."));
        assert!(prompt.contains("Genres: Drama, Crime."));
        assert!(prompt.contains("Summary: A chemistry teacher turns to crime "));
        assert!(!prompt.contains("<p>"));
        assert!(!prompt.contains("</p>"));
        assert!(prompt.contains("2-3 sentences"));
        assert!(!prompt.contains("Recent viewer comments"));
    }

    #[test]
    fn test_show_prompt_fragment_order() {
        let prompt = build_show_prompt(
            "Lost",
            Some("Survivors on an island."),
            &strings(&["Mystery"]),
            &strings(&["Great finale"]),
        );

        assert_eq!(
            prompt,
            "Write a single compelling insight about the TV show 'Lost'. \
             Genres: Mystery. \
             Summary: Survivors on an island. \
             Recent viewer comments: Great finale \
             Provide exactly 2-3 sentences that capture what makes this show unique and appealing. \
             Do not list multiple options, just give one cohesive insight."
        );
    }

    #[test]
    fn test_build_episode_prompt() {
        let prompt = build_episode_prompt(
            "Breaking Bad",
            "Pilot",
            1,
            1,
            Some("Walt starts cooking"),
            &strings(&["Drama", "Crime"]),
            &[],
        );

        assert!(prompt.starts_with("Write a single insight for episode 'Pilot' (S1E1) from 'Breaking Bad'."));
        assert!(prompt.contains("Show genres: Drama, Crime."));
        assert!(prompt.contains("Episode summary: Walt starts cooking"));
        assert!(prompt.contains("themes and significance"));
    }

    #[test]
    fn test_all_genres_are_listed() {
        let genres = strings(&["Drama", "Crime", "Thriller", "Action", "Comedy", "Horror"]);
        let prompt = build_show_prompt("X", None, &genres, &[]);
        assert!(prompt.contains("Drama, Crime, Thriller, Action, Comedy, Horror"));
    }

    #[test]
    fn test_empty_genres_omit_clause() {
        let prompt = build_show_prompt("X", None, &[], &[]);
        assert!(!prompt.contains("Genres"));
        assert_eq!(
            prompt,
            format!("Write a single compelling insight about the TV show 'X'. {}", SHOW_INSTRUCTION)
        );
    }

    #[test]
    fn test_summary_truncated_to_500_chars() {
        let summary = format!("<p>{}</p>", "a".repeat(800));
        let prompt = build_show_prompt("X", Some(&summary), &[], &[]);

        let expected = format!("Summary: {} Provide", "a".repeat(500));
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains(&"a".repeat(501)));
    }

    #[test]
    fn test_summary_truncation_respects_char_boundaries() {
        let summary = "é".repeat(600);
        let prompt = build_show_prompt("X", Some(&summary), &[], &[]);
        assert!(prompt.contains(&"é".repeat(500)));
        assert!(!prompt.contains(&"é".repeat(501)));
    }

    #[test]
    fn test_blank_summary_is_omitted() {
        let prompt = build_show_prompt("X", Some("<p>  </p>"), &[], &[]);
        assert!(!prompt.contains("Summary"));

        let prompt = build_episode_prompt("X", "Y", 1, 2, None, &[], &[]);
        assert!(!prompt.contains("Episode summary"));
    }

    #[test]
    fn test_only_first_three_comments_used() {
        let comments = strings(&["one", "two", "three", "four", "five"]);
        let prompt = build_show_prompt("X", None, &[], &comments);

        assert!(prompt.contains("Recent viewer comments: one | two | three "));
        assert!(!prompt.contains("four"));
        assert!(!prompt.contains("five"));
    }

    #[test]
    fn test_comments_truncated_to_100_chars() {
        let comments = vec!["b".repeat(150), "short".to_string()];
        let prompt = build_episode_prompt("X", "Y", 2, 3, None, &[], &comments);

        let expected = format!("Recent viewer comments: {} | short", "b".repeat(100));
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains(&"b".repeat(101)));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let genres = strings(&["Drama"]);
        let comments = strings(&["Wow"]);
        let a = build_show_prompt("X", Some("S"), &genres, &comments);
        let b = build_show_prompt("X", Some("S"), &genres, &comments);
        assert_eq!(a, b);
    }
}

//! Pixel-width word wrapping for the output panel.
//!
//! Widths come from a caller-supplied `measure` function so the same code
//! wraps with real font metrics in the UI and with fixed-width metrics in
//! tests. Line breaking itself is textwrap's first-fit algorithm.

use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;

#[derive(Debug)]
struct Word<'a> {
    text: &'a str,
    width: f64,
    space_width: f64,
}

impl Fragment for Word<'_> {
    fn width(&self) -> f64 {
        self.width
    }

    fn whitespace_width(&self) -> f64 {
        self.space_width
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Greedy word wrap of `text` to `max_width`.
///
/// Words are split on single spaces. Every segment fits `max_width` unless
/// it is a single word wider than the panel. Joining the segments with a
/// single space gives back `text` exactly.
pub fn wrap_text<F>(text: &str, measure: F, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let space_width = measure(" ") as f64;
    let words: Vec<Word> = text
        .split(' ')
        .map(|w| Word {
            text: w,
            width: measure(w) as f64,
            space_width,
        })
        .collect();

    // Runs of spaces produce empty words, which can land on a line of their
    // own. Fold each into a neighbour when the result still fits; an empty
    // segment is only kept when the spaces fit nowhere.
    let mut segments: Vec<String> = Vec::new();
    for line in wrap_first_fit(&words, &[max_width as f64]) {
        let segment = line.iter().map(|w| w.text).collect::<Vec<_>>().join(" ");
        match segments.pop() {
            Some(prev) if segment.is_empty() && measure(&format!("{prev} ")) <= max_width => {
                segments.push(prev + " ");
            }
            Some(prev) if prev.is_empty() && measure(&format!(" {segment}")) <= max_width => {
                segments.push(format!(" {segment}"));
            }
            Some(prev) => {
                segments.push(prev);
                segments.push(segment);
            }
            None => segments.push(segment),
        }
    }
    segments
}

/// Wrap every non-blank verse line (trimmed) into display rows.
pub fn layout_rows<F>(lines: &[String], measure: F, max_width: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .flat_map(|line| wrap_text(line, &measure, max_width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10 px per character, like a monospace font
    fn mono(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_short_line_is_untouched() {
        assert_eq!(wrap_text("Gravity pulls", mono, 200.0), vec!["Gravity pulls"]);
    }

    #[test]
    fn test_wide_line_splits_within_budget() {
        let line = "Gravity is the force that keeps our feet upon the ground and the moon in orbit";
        assert!(mono(line) > 200.0);

        let segments = wrap_text(line, mono, 200.0);
        assert!(segments.len() >= 2, "{segments:?}");
        for segment in &segments {
            assert!(mono(segment) <= 200.0, "{segment:?} too wide");
            assert!(!segment.is_empty());
        }
        assert_eq!(segments.join(" "), line);
    }

    #[test]
    fn test_exact_fit_stays_on_one_line() {
        // "abcd efgh" is 9 chars = 90 px
        assert_eq!(wrap_text("abcd efgh", mono, 90.0), vec!["abcd efgh"]);
        assert_eq!(wrap_text("abcd efgh", mono, 89.0), vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_overlong_word_gets_own_segment() {
        let segments = wrap_text("a supercalifragilistic b", mono, 50.0);
        assert_eq!(segments, vec!["a", "supercalifragilistic", "b"]);
        assert_eq!(segments.join(" "), "a supercalifragilistic b");
    }

    #[test]
    fn test_repeated_spaces_survive_round_trip() {
        let line = "one  two   three four five six";
        let segments = wrap_text(line, mono, 80.0);
        assert!(segments.len() >= 2);
        for segment in &segments {
            assert!(mono(segment) <= 80.0, "{segment:?} too wide");
        }
        assert_eq!(segments.join(" "), line);
    }

    #[test]
    fn test_space_runs_fold_only_when_they_fit() {
        let segments = wrap_text("a  b", mono, 20.0);
        assert_eq!(segments, vec!["a ", "b"]);
        assert_eq!(segments.join(" "), "a  b");
        assert_eq!(wrap_text("", mono, 10.0), vec![""]);
    }

    #[test]
    fn test_space_run_between_full_words_stays_in_budget() {
        let line = "aaaaa  bbbbb";
        let segments = wrap_text(line, mono, 50.0);
        assert_eq!(segments, vec!["aaaaa", "", "bbbbb"]);
        for segment in &segments {
            assert!(mono(segment) <= 50.0, "{segment:?} too wide");
        }
        assert_eq!(segments.join(" "), line);
    }

    #[test]
    fn test_layout_rows_skips_blank_lines_and_trims() {
        let lines = vec![
            "  Title  ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "alpha beta gamma".to_string(),
        ];
        let rows = layout_rows(&lines, mono, 110.0);
        assert_eq!(rows, vec!["Title", "alpha beta", "gamma"]);
    }
}

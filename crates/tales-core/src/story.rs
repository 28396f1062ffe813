//! Static story content and its per-mode layout.

use crate::session::FontMode;

pub const HEADER: &str = "Horror Tales";
pub const TITLE: &str = "The Whisper in the Hall";
pub const BODY: &str = "\
It was a cold, moonless night when the whisper first floated through the hallway.
The house, with its peeling wallpaper and crooked doorframes, breathed like a sleeping creature.
Somewhere between the ticking clock and the restless wind, a floorboard sighed\u{2014}then another.
I told myself it was just the old wood settling.
But the whispers kept returning, closer each time, curling around my ears like frost.
When I finally turned the corner, the hallway stretched longer than it should have, the end swallowed by shadow.
And from that shadow, something began to hum my name.";

/// Gap between words in dyslexia mode.
const WIDE_GAP: &str = "   ";

/// A run of text with a single style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub emphasis: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            emphasis: false,
        }
    }

    fn bold(text: &'a str) -> Self {
        Self {
            text,
            emphasis: true,
        }
    }
}

pub type StoryLine<'a> = Vec<Segment<'a>>;

/// Lays `text` out for `mode`, one entry per output line.
///
/// - `Normal`: lines as written.
/// - `Dyslexia`: widened word gaps and a blank line after every line.
/// - `Adhd`: the leading half of each word is emphasized.
pub fn layout(text: &str, mode: FontMode) -> Vec<StoryLine<'_>> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match mode {
            FontMode::Normal => out.push(vec![Segment::plain(line)]),
            FontMode::Dyslexia => {
                if i > 0 {
                    out.push(Vec::new());
                }
                out.push(spaced_words(line));
            }
            FontMode::Adhd => out.push(anchored_words(line)),
        }
    }
    out
}

fn spaced_words(line: &str) -> StoryLine<'_> {
    let mut segments = Vec::new();
    for (i, word) in line.split_whitespace().enumerate() {
        if i > 0 {
            segments.push(Segment::plain(WIDE_GAP));
        }
        segments.push(Segment::plain(word));
    }
    segments
}

fn anchored_words(line: &str) -> StoryLine<'_> {
    let mut segments = Vec::new();
    for (i, word) in line.split_whitespace().enumerate() {
        if i > 0 {
            segments.push(Segment::plain(" "));
        }
        let (stem, rest) = split_stem(word);
        segments.push(Segment::bold(stem));
        if !rest.is_empty() {
            segments.push(Segment::plain(rest));
        }
    }
    segments
}

/// Splits `word` after the first half of its characters (rounded up).
fn split_stem(word: &str) -> (&str, &str) {
    let count = word.chars().count();
    let stem_chars = count.div_ceil(2);
    let at = word
        .char_indices()
        .nth(stem_chars)
        .map_or(word.len(), |(idx, _)| idx);
    word.split_at(at)
}

/// Concatenates a laid-out line, dropping styling.
pub fn line_text(line: &[Segment<'_>]) -> String {
    line.iter().map(|s| s.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_layout_matches_source_lines() {
        let lines = layout(BODY, FontMode::Normal);
        assert_eq!(lines.len(), 7);
        assert_eq!(
            line_text(&lines[3]),
            "I told myself it was just the old wood settling."
        );
        assert!(lines.iter().flatten().all(|s| !s.emphasis));
    }

    #[test]
    fn test_dyslexia_layout_double_spaces_lines_and_words() {
        let lines = layout("one two\nthree", FontMode::Dyslexia);
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "one   two");
        assert!(lines[1].is_empty());
        assert_eq!(line_text(&lines[2]), "three");
    }

    #[test]
    fn test_adhd_layout_emphasizes_word_stems() {
        let lines = layout("house whisper a", FontMode::Adhd);
        let line = &lines[0];
        assert_eq!(line[0], Segment::bold("hou"));
        assert_eq!(line[1], Segment::plain("se"));
        assert_eq!(line[3], Segment::bold("whis"));
        assert_eq!(line[4], Segment::plain("per"));
        assert_eq!(line[6], Segment::bold("a"));
        assert_eq!(line.len(), 7);
        assert_eq!(line_text(line), "house whisper a");
    }

    #[test]
    fn test_split_stem_respects_char_boundaries() {
        assert_eq!(split_stem("sighed\u{2014}then"), ("sighed", "\u{2014}then"));
        assert_eq!(split_stem("é"), ("é", ""));
    }

    #[test]
    fn test_layout_preserves_words_in_every_mode() {
        let expected: Vec<&str> = BODY.split_whitespace().collect();
        for mode in FontMode::all() {
            let text: Vec<String> = layout(BODY, *mode).iter().map(|l| line_text(l)).collect();
            let joined = text.join(" ");
            let words: Vec<&str> = joined.split_whitespace().collect();
            assert_eq!(words, expected, "mode {mode}");
        }
    }
}

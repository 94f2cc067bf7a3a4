//! Greedy word wrapping.  Layout and rendering share this so that measured
//! heights always match what gets drawn.

/// Wrap `text` into lines of at most `width` characters.  Explicit newlines
/// are kept; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }
        lines.push(line);
    }

    lines
}

/// Number of rows `text` occupies at `width`.
pub fn height(text: &str, width: usize) -> usize {
    wrap(text, width).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap("Built with React and Tailwind CSS.", 12),
            vec!["Built with", "React and", "Tailwind", "CSS."]
        );
    }

    #[test]
    fn keeps_newlines_and_empty_paragraphs() {
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(wrap("x abcdefgh", 3), vec!["x", "abc", "def", "gh"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap("₹2000 - ₹15000", 14), vec!["₹2000 - ₹15000"]);
    }
}

//! Tag editor state
//!
//! Tags form an ordered list without duplicates or blanks. Typing `,` or
//! pressing Enter commits the current input; leaving the field commits a
//! pending non-blank input too. A rejected commit (blank or duplicate) keeps
//! the input so the user can see and fix it.

/// A key event in the tag input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Char(char),
    Enter,
    Backspace,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEditor {
    tags: Vec<String>,
    input: String,
}

impl TagEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing tags, normalizing them the same way commits do
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut editor = Self::new();
        for tag in tags {
            editor.add_tag(tag.as_ref());
        }
        editor
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Add a tag directly. Returns whether the list changed.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Commit the current input; it is cleared only when a tag was added
    pub fn commit(&mut self) -> bool {
        let input = std::mem::take(&mut self.input);
        if self.add_tag(&input) {
            true
        } else {
            self.input = input;
            false
        }
    }

    pub fn key(&mut self, key: TagKey) {
        match key {
            TagKey::Char(',') | TagKey::Enter => {
                self.commit();
            }
            TagKey::Char(c) => self.input.push(c),
            TagKey::Backspace => {
                self.input.pop();
            }
        }
    }

    /// Feed typed text one character at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(TagKey::Char(c));
        }
    }

    /// The input lost focus
    pub fn blur(&mut self) {
        if !self.input.trim().is_empty() {
            self.commit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_input_then_blur() {
        let mut editor = TagEditor::new();
        editor.type_text("alpha, beta,");
        editor.blur();

        assert_eq!(editor.tags(), ["alpha", "beta"]);
        assert_eq!(editor.input(), "");
    }

    #[test]
    fn test_readding_existing_tag_changes_nothing() {
        let mut editor = TagEditor::with_tags(["alpha", "beta"]);
        editor.type_text("alpha");
        editor.key(TagKey::Enter);

        assert_eq!(editor.tags(), ["alpha", "beta"]);
        // Rejected input stays visible
        assert_eq!(editor.input(), "alpha");
    }

    #[test]
    fn test_blur_commits_pending_tag() {
        let mut editor = TagEditor::new();
        editor.type_text("  gamma ");
        editor.blur();
        assert_eq!(editor.tags(), ["gamma"]);
    }

    #[test]
    fn test_blank_commits_are_ignored() {
        let mut editor = TagEditor::new();
        editor.type_text(",, ,");
        editor.key(TagKey::Enter);
        editor.blur();
        assert!(editor.tags().is_empty());
    }

    #[test]
    fn test_backspace_and_remove() {
        let mut editor = TagEditor::new();
        editor.type_text("rusty");
        editor.key(TagKey::Backspace);
        editor.key(TagKey::Enter);
        assert_eq!(editor.tags(), ["rust"]);

        assert!(editor.remove_tag("rust"));
        assert!(!editor.remove_tag("rust"));
        assert!(editor.tags().is_empty());
    }

    #[test]
    fn test_with_tags_dedupes_and_trims() {
        let editor = TagEditor::with_tags(vec![" a", "a", "", "b "]);
        assert_eq!(editor.into_tags(), vec!["a".to_string(), "b".to_string()]);
    }
}

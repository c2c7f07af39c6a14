use std::fmt;

use serde::{Serialize, Serializer};

use super::value::Value;

/// A value that resolves key collisions by merging instead of overwriting.
///
/// `merge` must be associative: a product folds any number of colliding
/// values left-to-right, and the grouping must not be observable.
pub trait Combining: Sized {
    fn merge(&self, other: &Self) -> Self;
}

/// Left-fold a slice of combining values, `None` if the slice is empty
pub fn fold_combining<C: Combining + Clone>(values: &[&C]) -> Option<C> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold((*first).clone(), |acc, next| acc.merge(next)))
}

/// A human-readable name assembled from fragments.
///
/// Merging `a` with `b` joins them with `a`'s separator and the result takes
/// `b`'s separator. So after merging in a label with a different separator,
/// subsequent merges use the new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    text: String,
    separator: String,
}

impl Label {
    pub const DEFAULT_SEPARATOR: &'static str = ".";

    /// Create a label with the default `.` separator
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_separator(text, Self::DEFAULT_SEPARATOR)
    }

    pub fn with_separator(text: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            separator: separator.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Append any value; labels are merged, other values are stringified
    /// and joined with this label's separator
    pub fn append(&self, other: &Value) -> Self {
        match other {
            Value::Label(label) => self.merge(label),
            plain => Self {
                text: format!("{}{}{}", self.text, self.separator, plain),
                separator: self.separator.clone(),
            },
        }
    }
}

impl Combining for Label {
    fn merge(&self, other: &Self) -> Self {
        Self {
            text: format!("{}{}{}", self.text, self.separator, other.text),
            separator: other.separator.clone(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_dot_separator() {
        let label = Label::new("base");
        assert_eq!(label.text(), "base");
        assert_eq!(label.separator(), ".");
    }

    #[test]
    fn merge_joins_with_own_separator() {
        let merged = Label::new("x").merge(&Label::new("y"));
        assert_eq!(merged.text(), "x.y");
        assert_eq!(merged.separator(), ".");
    }

    #[test]
    fn merge_inherits_operand_separator() {
        let merged = Label::new("x").merge(&Label::with_separator("y", "-"));
        assert_eq!(merged.text(), "x.y");
        assert_eq!(merged.separator(), "-");

        let next = merged.merge(&Label::new("z"));
        assert_eq!(next.text(), "x.y-z");
    }

    #[test]
    fn merge_is_associative_across_separators() {
        let a = Label::with_separator("a", "_");
        let b = Label::with_separator("b", "-");
        let c = Label::with_separator("c", "/");

        let left = a.merge(&b).merge(&c);
        let right = a.merge(&b.merge(&c));

        assert_eq!(left, right);
        assert_eq!(left.text(), "a_b-c");
        assert_eq!(left.separator(), "/");
    }

    #[test]
    fn append_stringifies_plain_values() {
        let label = Label::with_separator("lr", "=").append(&Value::Float(0.5));
        assert_eq!(label.text(), "lr=0.5");
        assert_eq!(label.separator(), "=");

        let label = Label::new("run").append(&Value::Int(3));
        assert_eq!(label.text(), "run.3");
    }

    #[test]
    fn append_label_behaves_like_merge() {
        let a = Label::new("a");
        let b = Label::with_separator("b", ":");
        assert_eq!(a.append(&Value::Label(b.clone())), a.merge(&b));
    }

    #[test]
    fn fold_combining_folds_left() {
        let x = Label::new("x");
        let y = Label::new("y");
        let z = Label::new("z");
        let folded = fold_combining(&[&x, &y, &z]).unwrap();
        assert_eq!(folded.text(), "x.y.z");
    }

    #[test]
    fn fold_combining_empty_is_none() {
        let empty: [&Label; 0] = [];
        assert!(fold_combining(&empty).is_none());
    }

    #[test]
    fn display_shows_text_only() {
        assert_eq!(Label::with_separator("name", "-").to_string(), "name");
    }
}

//! Free-text cleaning: strip annotations and normalize separators.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::table::{Column, Value};

/// A run of annotation spans: greedy `(...)` or `[...]` groups and stray
/// `?`, `(`, `)`, `[`, `]` characters, together with surrounding whitespace.
static ANNOTATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(?:(?:\(.*\)|\[.*\]|[?()\[\]])\s*)+").expect("valid annotation regex")
});

/// Whitespace on either side of a literal dot.
static DOT_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\.\s*").expect("valid dot regex"));

/// Clean a column of free-text values.
///
/// Non-missing values have annotation spans removed, whitespace around `.`
/// collapsed and leading/trailing `;` and spaces stripped. A value that is
/// empty afterwards becomes `Null`. Integers are cleaned as their decimal
/// text. Output has the same length and order as the input.
pub fn clean(values: &[Value]) -> Vec<Value> {
    values.iter().map(clean_value).collect()
}

/// Clean a named column, keeping its name.
pub fn clean_column(column: &Column) -> Column {
    Column::new(column.name.clone(), clean(&column.values))
}

/// Clean a single value.
pub fn clean_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Int(n) => clean_text(&n.to_string()),
        Value::Text(s) => clean_text(s),
    }
}

fn clean_text(text: &str) -> Value {
    // A removed run that touched whitespace leaves one space behind
    let stripped = ANNOTATIONS.replace_all(text, |caps: &Captures<'_>| {
        let run = &caps[0];
        if run.starts_with(char::is_whitespace) || run.ends_with(char::is_whitespace) {
            " "
        } else {
            ""
        }
    });
    let dotted = DOT_SPACING.replace_all(&stripped, ".");
    let trimmed = dotted.trim_matches(|c: char| c == ';' || c == ' ');

    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::text(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(s: &str) -> Value {
        clean_value(&Value::text(s))
    }

    #[test]
    fn test_removes_adjacent_group() {
        assert_eq!(cleaned("A(note)B"), Value::text("AB"));
    }

    #[test]
    fn test_collapses_spaces_around_removed_group() {
        assert_eq!(cleaned("A (note) B"), Value::text("A B"));
        assert_eq!(cleaned("A ? [x] B"), Value::text("A B"));
    }

    #[test]
    fn test_removes_brackets_and_question_marks() {
        assert_eq!(cleaned("Paris [FR]"), Value::text("Paris"));
        assert_eq!(cleaned("Smith?"), Value::text("Smith"));
        assert_eq!(cleaned("a)b(c"), Value::text("abc"));
        assert_eq!(cleaned("x]y"), Value::text("xy"));
    }

    #[test]
    fn test_greedy_groups_swallow_middle_text() {
        // Outermost parentheses are matched greedily
        assert_eq!(cleaned("A (x) mid (y) B"), Value::text("A B"));
        assert_eq!(cleaned("A (x (y)) B"), Value::text("A B"));
    }

    #[test]
    fn test_dot_spacing() {
        assert_eq!(cleaned("A . B"), Value::text("A.B"));
        assert_eq!(cleaned("J. R. R. Tolkien"), Value::text("J.R.R.Tolkien"));
    }

    #[test]
    fn test_strips_separators() {
        assert_eq!(cleaned("; Drama; "), Value::text("Drama"));
        assert_eq!(cleaned("Action;Comedy;"), Value::text("Action;Comedy"));
    }

    #[test]
    fn test_empty_becomes_null() {
        assert_eq!(cleaned(""), Value::Null);
        assert_eq!(cleaned("(unknown)"), Value::Null);
        assert_eq!(cleaned(" ; ? "), Value::Null);
    }

    #[test]
    fn test_null_and_int() {
        assert_eq!(clean_value(&Value::Null), Value::Null);
        assert_eq!(clean_value(&Value::Int(1999)), Value::text("1999"));
    }

    #[test]
    fn test_length_and_order_preserved() {
        let input = vec![Value::text("b (x)"), Value::Null, Value::text("a")];
        let output = clean(&input);
        assert_eq!(output, vec![Value::text("b"), Value::Null, Value::text("a")]);
    }

    #[test]
    fn test_idempotent_on_fixtures() {
        for s in ["A (x) . B", "; (a) ; b ;", "x ? . ] y", "Dr . Who [1963]"] {
            let once = cleaned(s);
            assert_eq!(clean_value(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn test_clean_column_keeps_name() {
        let column = Column::new("title", vec![Value::text("Alien (1979)")]);
        let cleaned = clean_column(&column);
        assert_eq!(cleaned.name, "title");
        assert_eq!(cleaned.values, vec![Value::text("Alien")]);
    }
}

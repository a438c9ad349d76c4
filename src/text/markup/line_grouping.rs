//! Line Grouping
//!
//! Folds the flat run sequence into rendered lines. The renderer's output for one
//! invocation is deterministic, so runs on the same line carry bit-identical `y`
//! values and plain equality is the right comparison.
use super::{Line, RawElement};

/// Group runs into lines by exact `y` equality.
///
/// - Consecutive runs with the same `y` share a line
/// - A change of `y` starts a new line, even if that `y` was seen before
/// - No runs at all still yields one empty line
pub fn group_into_lines<I>(elements: I) -> Vec<Line>
where
    I: IntoIterator<Item = RawElement>,
{
    let mut lines = elements
        .into_iter()
        .fold(Vec::<Line>::new(), |mut lines, element| {
            match lines.last_mut() {
                Some(line) if line.y() == Some(element.y) => line.elements.push(element),
                _ => lines.push(Line::new(vec![element])),
            }
            lines
        });
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_single_line() {
        let lines = group_into_lines(vec![
            RawElement::new("Hello ", 0.0, 15.0),
            RawElement::new("World", 40.0, 15.0),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].elements.len(), 2);
    }

    #[test]
    fn test_group_multiple_lines() {
        let lines = group_into_lines(vec![
            RawElement::new("Hello ", 0.0, 15.0),
            RawElement::new("Wo", 40.0, 15.0),
            RawElement::new("rld", 0.0, 32.0),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].y(), Some(15.0));
        assert_eq!(lines[1].y(), Some(32.0));
        assert_eq!(lines[1].elements[0].text, "rld");
    }

    #[test]
    fn test_returning_y_starts_new_line() {
        let lines = group_into_lines(vec![
            RawElement::new("a", 0.0, 10.0),
            RawElement::new("b", 0.0, 20.0),
            RawElement::new("c", 0.0, 10.0),
        ]);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_no_elements() {
        assert_eq!(group_into_lines(Vec::new()), vec![Line::default()]);
    }

    #[test]
    fn test_near_equal_y_is_not_equal() {
        let lines = group_into_lines(vec![
            RawElement::new("a", 0.0, 10.0),
            RawElement::new("b", 5.0, 10.000001),
        ]);
        assert_eq!(lines.len(), 2);
    }
}

//! Dotted-numeric ordering for chart version tags
//!
//! Tags are split on `.` and compared component by component. The leading
//! digits of a component are compared as an integer, any remaining text is
//! compared lexicographically. Missing trailing components count as zero;
//! when two tags are equal under that padding the shorter one sorts first,
//! so `1.2 < 1.2.0` and the order is total.

use std::cmp::Ordering;

/// Compare two dotted version tags.
pub fn compare_dotted(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => break,
            (l, r) => compare_component(l.unwrap_or("0"), r.unwrap_or("0")),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    let a_len = a.split('.').count();
    let b_len = b.split('.').count();
    a_len.cmp(&b_len).then_with(|| a.cmp(b))
}

/// Sort tags in ascending dotted-numeric order (highest last).
pub fn sort_dotted(tags: &mut [String]) {
    tags.sort_by(|a, b| compare_dotted(a, b));
}

fn compare_component(a: &str, b: &str) -> Ordering {
    let (a_digits, a_rest) = split_digits(a);
    let (b_digits, b_rest) = split_digits(b);

    // Compare digit runs without parsing so arbitrarily long numbers can't overflow
    let a_digits = a_digits.trim_start_matches('0');
    let b_digits = b_digits.trim_start_matches('0');

    a_digits
        .len()
        .cmp(&b_digits.len())
        .then_with(|| a_digits.cmp(b_digits))
        .then_with(|| a_rest.cmp(b_rest))
}

fn split_digits(component: &str) -> (&str, &str) {
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    component.split_at(end)
}

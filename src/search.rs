//! Substring Search
//!
//! Knuth-Morris-Pratt search built on the prefix function of
//! `pattern + separator + text`. The separator is modeled as [`None`] over a
//! sequence of `Option<&C>`, so it can never occur in either input.

/// Compute the prefix function of `s`.
///
/// `result[i]` is the length of the longest proper prefix of `s[..=i]` that is
/// also a suffix of it. Runs in linear time.
pub fn prefix_function<C: PartialEq>(s: &[C]) -> Vec<usize> {
    let mut pref = vec![0; s.len()];
    for i in 1..s.len() {
        let mut j = pref[i - 1];
        while j > 0 && s[j] != s[i] {
            j = pref[j - 1];
        }
        if s[j] == s[i] {
            j += 1;
        }
        pref[i] = j;
    }
    pref
}

/// If `pattern` occurs as a contiguous subsequence of `text`.
///
/// The empty pattern occurs in every text.
pub fn contains_slice<C: PartialEq>(text: &[C], pattern: &[C]) -> bool {
    if pattern.is_empty() {
        return true;
    }
    if pattern.len() > text.len() {
        return false;
    }

    let combined: Vec<Option<&C>> = pattern
        .iter()
        .map(Some)
        .chain(std::iter::once(None))
        .chain(text.iter().map(Some))
        .collect();

    prefix_function(&combined)
        .into_iter()
        .skip(pattern.len() + 1)
        .any(|len| len == pattern.len())
}

/// If `pattern` occurs in `text`, compared by `char`.
///
/// # Examples
///
/// ```
/// use fwdlist::search::contains;
///
/// assert!(contains("abxabcabcaby", "abcaby"));
/// assert!(!contains("aaaa", "ab"));
/// ```
pub fn contains(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    contains_slice(&text, &pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_function() {
        let s: Vec<char> = "abcabcd".chars().collect();
        assert_eq!(prefix_function(&s), vec![0, 0, 0, 1, 2, 3, 0]);

        let s: Vec<char> = "aabaaab".chars().collect();
        assert_eq!(prefix_function(&s), vec![0, 1, 0, 1, 2, 2, 3]);

        assert!(prefix_function::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_contains() {
        assert!(contains("abxabcabcaby", "abcaby"));
        assert!(!contains("aaaa", "ab"));
        assert!(contains("", ""));
        assert!(contains("abc", ""));
        assert!(!contains("ab", "abc"));
        assert!(contains("abc", "abc"));
        assert!(contains("xxabc", "abc"));
    }

    #[test]
    fn test_contains_separator_in_input() {
        // '#' is an ordinary character here
        assert!(contains("a#b", "#"));
        assert!(contains("ab#ab#", "b#a"));
        assert!(!contains("ab#", "#a"));
    }

    #[test]
    fn test_contains_slice() {
        assert!(contains_slice(&[1, 2, 3, 4], &[2, 3]));
        assert!(!contains_slice(&[1, 2, 3, 4], &[3, 2]));
    }
}

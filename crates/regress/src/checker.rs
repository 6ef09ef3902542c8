//! Expected-vs-actual output comparison.
//!
//! Trailing whitespace is never significant. A numeric-aware checker also
//! treats decimal tokens as numbers: both sides are rounded to the active
//! accuracy before comparing, so `3.14159265` and `3.14160001` agree at four
//! significant digits.

use std::sync::OnceLock;

use manifold_kernel::number::round_significant;
use regex::Regex;

fn decimal_token() -> &'static Regex {
    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    DECIMAL.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.\d*|\.\d+)(?:[eE][-+]?\d+)?")
            .expect("decimal token pattern should always compile")
    })
}

/// Strip trailing whitespace from every line and drop trailing blank lines.
pub fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Compares example output against the recorded expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputChecker {
    numeric: bool,
}

impl Default for OutputChecker {
    fn default() -> Self {
        Self::numeric()
    }
}

impl OutputChecker {
    /// Text comparison only.
    pub fn exact() -> Self {
        Self { numeric: false }
    }

    /// Decimal tokens compared as numbers.
    ///
    /// A token needs a decimal point to count as a number, so exponent-only
    /// forms such as `1e-5` are compared as text.
    pub fn numeric() -> Self {
        Self { numeric: true }
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// Whether `got` matches `want`. `digits` is the accuracy for numeric
    /// comparison; `None` compares parsed values exactly.
    pub fn check(&self, want: &str, got: &str, digits: Option<u32>) -> bool {
        let want = normalize(want);
        let got = normalize(got);
        if want == got {
            return true;
        }
        if !self.numeric {
            return false;
        }
        numbers_agree(&want, &got, digits)
    }
}

fn split_numbers(text: &str) -> (Vec<&str>, Vec<&str>) {
    let mut literal = Vec::new();
    let mut numbers = Vec::new();
    let mut last = 0;
    for m in decimal_token().find_iter(text) {
        literal.push(&text[last..m.start()]);
        numbers.push(m.as_str());
        last = m.end();
    }
    literal.push(&text[last..]);
    (literal, numbers)
}

fn numbers_agree(want: &str, got: &str, digits: Option<u32>) -> bool {
    let (want_text, want_nums) = split_numbers(want);
    let (got_text, got_nums) = split_numbers(got);
    if want_text != got_text || want_nums.len() != got_nums.len() {
        return false;
    }
    want_nums.iter().zip(got_nums.iter()).all(|(w, g)| {
        match (w.parse::<f64>(), g.parse::<f64>()) {
            (Ok(w), Ok(g)) => match digits {
                Some(d) => round_significant(w, d) == round_significant(g, d),
                None => w == g,
            },
            _ => w == g,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_whitespace_ignored() {
        let c = OutputChecker::exact();
        assert!(c.check("abc\n", "abc   \n\n", None));
        assert!(!c.check("abc", "abd", None));
    }

    #[test]
    fn test_four_digit_agreement() {
        let c = OutputChecker::numeric();
        assert!(c.check("3.14159265", "3.14160001", Some(4)));
        assert!(!c.check("3.14159265", "3.14260001", Some(4)));
    }

    #[test]
    fn test_surrounding_text_must_match() {
        let c = OutputChecker::numeric();
        assert!(c.check("volume 2.0299", "volume 2.02988", Some(4)));
        assert!(!c.check("volume 2.0299", "area 2.02988", Some(4)));
        assert!(!c.check("(1.5, 2.5)", "(1.5)", Some(4)));
    }

    #[test]
    fn test_full_precision_compares_values() {
        let c = OutputChecker::numeric();
        assert!(c.check("2.50", "2.5", None));
        assert!(!c.check("2.0298832", "2.029883212819307", None));
    }

    #[test]
    fn test_exponent_without_point_is_text() {
        let c = OutputChecker::numeric();
        assert!(c.check("1.0e-5", "1.0e-05", Some(8)));
        assert!(!c.check("1e-5", "1e-05", Some(8)));
        assert!(!c.check("1e-5", "1.0e-5", Some(8)));
    }

    #[test]
    fn test_exact_checker_ignores_numbers() {
        let c = OutputChecker::exact();
        assert!(!c.check("3.14159265", "3.14160001", Some(4)));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a  \nb\n\n  \n"), "a\nb");
        assert_eq!(normalize(""), "");
    }
}

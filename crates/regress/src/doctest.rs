//! Embedded documentation examples: modules, units, parsing and exclusions.
//!
//! A unit's text holds examples in the interactive-session style:
//!
//! ```text
//! >>> volume m004
//! 2.0298832
//! ```
//!
//! `>>> ` starts an example, `... ` continues its input, and the following
//! non-blank lines up to a blank line or the next prompt are the expected
//! output. Directives go in a trailing `# doctest:` comment on an input line.

use manifold_kernel::Precision;

use crate::environment::FieldBackend;

/// A named block of documentation containing examples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocUnit {
    pub name: String,
    pub text: &'static str,
}

impl DocUnit {
    pub fn new(name: impl Into<String>, text: &'static str) -> Self {
        Self {
            name: name.into(),
            text,
        }
    }
}

/// A module: a name and its documentation units, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocModule {
    pub name: String,
    pub units: Vec<DocUnit>,
    /// Precision of the manifolds its examples create.
    pub precision: Precision,
}

impl DocModule {
    pub fn new(name: impl Into<String>, units: Vec<DocUnit>) -> Self {
        Self {
            name: name.into(),
            units,
            precision: Precision::Double,
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }
}

/// Per-example flags parsed from `# doctest:` directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleOptions {
    /// `+SKIP`
    pub skip: bool,
    /// `+NUMERIC<n>`: compare numbers at `n` significant digits.
    pub numeric_digits: Option<u32>,
    /// `+MODERN_GL`: needs the modern OpenGL code path.
    pub modern_gl: bool,
    /// `+NATIVE` / `+ALGEBRA`: only run under that field backend.
    pub backend: Option<FieldBackend>,
}

impl ExampleOptions {
    /// Whether the example should be attempted at all.
    pub fn applies(&self, modern_gl: bool, field: FieldBackend) -> bool {
        if self.skip || (self.modern_gl && !modern_gl) {
            return false;
        }
        self.backend.map_or(true, |b| b == field)
    }
}

/// One example: input, expected output, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub source: String,
    pub want: String,
    /// 1-based line of the prompt within the unit text.
    pub line: usize,
    pub options: ExampleOptions,
}

const PROMPT: &str = ">>>";
const CONTINUATION: &str = "...";
const DIRECTIVE: &str = "# doctest:";

fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

fn parse_directives(source: &str, options: &mut ExampleOptions) -> String {
    let Some(pos) = source.find(DIRECTIVE) else {
        return source.trim_end().to_string();
    };
    for flag in source[pos + DIRECTIVE.len()..]
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
    {
        match flag {
            "+SKIP" => options.skip = true,
            "+MODERN_GL" => options.modern_gl = true,
            "+NATIVE" => options.backend = Some(FieldBackend::Native),
            "+ALGEBRA" => options.backend = Some(FieldBackend::Algebra),
            other => {
                if let Some(digits) = other
                    .strip_prefix("+NUMERIC")
                    .and_then(|d| d.parse::<u32>().ok())
                    .filter(|d| *d > 0)
                {
                    options.numeric_digits = Some(digits);
                } else {
                    tracing::warn!(flag = other, "ignoring unknown doctest directive");
                }
            }
        }
    }
    source[..pos].trim_end().to_string()
}

/// Extract every example from a unit's text.
pub fn parse_examples(text: &str) -> Vec<Example> {
    let lines: Vec<&str> = text.lines().collect();
    let mut examples = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let stripped = lines[i].trim_start();
        let Some(first) = strip_marker(stripped, PROMPT) else {
            i += 1;
            continue;
        };
        let indent = lines[i].chars().count() - stripped.chars().count();
        let line = i + 1;
        let mut options = ExampleOptions::default();
        let mut source = vec![parse_directives(first, &mut options)];
        i += 1;

        while i < lines.len() {
            match strip_marker(lines[i].trim_start(), CONTINUATION) {
                Some(more) => {
                    source.push(parse_directives(more, &mut options));
                    i += 1;
                }
                None => break,
            }
        }

        let mut want = Vec::new();
        while i < lines.len() {
            let l = lines[i];
            let t = l.trim_start();
            if t.is_empty() || strip_marker(t, PROMPT).is_some() {
                break;
            }
            let dedented = if l.chars().count() - t.chars().count() >= indent {
                dedent(l, indent)
            } else {
                t
            };
            want.push(dedented);
            i += 1;
        }

        examples.push(Example {
            source: source.join("\n"),
            want: want.join("\n"),
            line,
            options,
        });
    }

    examples
}

/// `line` without its first `n` characters.
fn dedent(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((at, _)) => &line[at..],
        None => "",
    }
}

// ── Exclusions ──────────────────────────────────────────────────────────────

/// A unit-name prefix the generic runner never executes, with the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusion {
    pub prefix: &'static str,
    pub reason: &'static str,
}

/// Units excluded from the generic example runner.
pub const EXCLUDED_UNITS: &[Exclusion] = &[
    Exclusion {
        prefix: "Manifold.identify",
        reason: "identification heuristics depend on which census databases are installed",
    },
    Exclusion {
        prefix: "Manifold.browse",
        reason: "opens an interactive browser window",
    },
    Exclusion {
        prefix: "get_triangulation_tester",
        reason: "uses environment-specific triangulation fixtures",
    },
];

/// The exclusion covering `unit_name`, if any.
pub fn exclusion_for(unit_name: &str) -> Option<&'static Exclusion> {
    EXCLUDED_UNITS
        .iter()
        .find(|e| unit_name.starts_with(e.prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_example() {
        let ex = parse_examples(">>> volume m004\n2.0298832\n");
        assert_eq!(ex.len(), 1);
        assert_eq!(ex[0].source, "volume m004");
        assert_eq!(ex[0].want, "2.0298832");
        assert_eq!(ex[0].line, 1);
    }

    #[test]
    fn test_indented_examples_and_prose() {
        let text = "
    Some prose.

        >>> M = m004
        >>> num_cusps M
        1

    More prose.
        >>> homology M
          Z
";
        let ex = parse_examples(text);
        assert_eq!(ex.len(), 3);
        assert_eq!(ex[0].want, "");
        assert_eq!(ex[1].want, "1");
        assert_eq!(ex[2].want, "  Z");
        assert_eq!(ex[1].line, 5);
    }

    #[test]
    fn test_continuation_lines() {
        let ex = parse_examples(">>> print a\n... print b\na\nb\n");
        assert_eq!(ex[0].source, "print a\nprint b");
        assert_eq!(ex[0].want, "a\nb");
    }

    #[test]
    fn test_output_stops_at_next_prompt() {
        let ex = parse_examples(">>> print a\na\n>>> print b\nb");
        assert_eq!(ex.len(), 2);
        assert_eq!(ex[0].want, "a");
    }

    #[test]
    fn test_directives() {
        let ex = parse_examples(
            ">>> number 3.14160001  # doctest: +NUMERIC4\n3.14159265\n\
             >>> scene inside_view m004  # doctest: +MODERN_GL, +ALGEBRA\nx\n\
             >>> print x # doctest: +SKIP\nx",
        );
        assert_eq!(ex[0].source, "number 3.14160001");
        assert_eq!(ex[0].options.numeric_digits, Some(4));
        assert!(ex[1].options.modern_gl);
        assert_eq!(ex[1].options.backend, Some(FieldBackend::Algebra));
        assert!(ex[2].options.skip);
    }

    #[test]
    fn test_applies() {
        let gl = ExampleOptions {
            modern_gl: true,
            ..Default::default()
        };
        assert!(gl.applies(true, FieldBackend::Native));
        assert!(!gl.applies(false, FieldBackend::Native));

        let native = ExampleOptions {
            backend: Some(FieldBackend::Native),
            ..Default::default()
        };
        assert!(!native.applies(true, FieldBackend::Algebra));
    }

    #[test]
    fn test_wide_whitespace_indent() {
        let ex = parse_examples("    >>> print a\n\u{3000}\u{3000}a\n");
        assert_eq!(ex.len(), 1);
        assert_eq!(ex[0].want, "a");

        let ex = parse_examples("\u{3000}>>> print a\n\u{3000}\u{3000}a\n");
        assert_eq!(ex[0].want, "\u{3000}a");
    }

    #[test]
    fn test_exclusions_match_by_prefix() {
        assert!(exclusion_for("Manifold.identify").is_some());
        assert!(exclusion_for("Manifold.browse_extra").is_some());
        assert!(exclusion_for("Manifold.volume").is_none());
    }
}

//! Indentation-aware text accumulator

/// Append-only text buffer that re-indents fragments as they are nested.
///
/// Indentation is applied per call: a fragment produced by a nested block
/// already carries its own relative indentation and the enclosing call
/// shifts it by the given number of levels.
#[derive(Debug, Clone)]
pub struct CodeBlock<'a> {
    code: String,
    indent: &'a str,
}

impl<'a> CodeBlock<'a> {
    /// Create an empty block using `indent` as one indentation level
    pub fn new(indent: &'a str) -> Self {
        Self {
            code: String::new(),
            indent,
        }
    }

    /// Append `fragment` shifted by `levels`, followed by a line break.
    ///
    /// Empty lines inside the fragment stay empty.
    pub fn append(&mut self, fragment: &str, levels: usize) {
        let prefix = self.indent.repeat(levels);
        let body = fragment
            .lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{prefix}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        self.code.push_str(&body);
        self.code.push('\n');
    }

    /// Append a nested fragment, or nothing at all if it is empty
    pub fn nest(&mut self, fragment: &str, levels: usize) {
        if !fragment.is_empty() {
            self.append(fragment, levels);
        }
    }

    /// Append an empty line
    pub fn blank_line(&mut self) {
        self.code.push('\n');
    }

    /// Append `text` as line comments, one `//` per line
    pub fn comment(&mut self, text: &str, levels: usize) {
        let commented = text
            .lines()
            .map(|line| format!("// {line}").trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.nest(&commented, levels);
    }

    /// Accumulated text with its final line break removed
    pub fn finalize(mut self) -> String {
        if self.code.ends_with('\n') {
            self.code.pop();
        }
        self.code
    }
}

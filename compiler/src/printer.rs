/// Text sink for generated sources.
///
/// Templates reference variables as `$name$`; `$$` prints a literal `$`.
/// Every line is prefixed with the current indentation when its first
/// character is written, so substituted values indent like template text.
#[derive(Debug)]
pub struct Printer {
    out:           String,
    indent:        usize,
    at_line_start: bool,
}

const INDENT: &str = "  ";

impl Default for Printer {
    fn default() -> Self {
        Printer::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Printer {
            out:           String::new(),
            indent:        0,
            at_line_start: true,
        }
    }

    /// Prints `template`, replacing each `$name$` with its value from `vars`.
    ///
    /// A reference to a name absent from `vars` is a bug in the caller; it
    /// is printed verbatim so the mistake shows up in the output.
    pub fn print(&mut self, vars: &[(&str, &str)], template: &str) {
        let mut rest = template;
        while let Some(start) = rest.find('$') {
            self.write(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('$') else {
                debug_assert!(false, "unterminated variable in template {:?}", template);
                self.write(&rest[start..]);
                return;
            };
            let name = &after[..end];
            if name.is_empty() {
                self.write("$");
            } else if let Some((_, value)) = vars.iter().find(|(key, _)| *key == name) {
                self.write(value);
            } else {
                debug_assert!(false, "unknown variable ${}$ in template {:?}", name, template);
                self.write(&rest[start..start + end + 2]);
            }
            rest = &after[end + 1..];
        }
        self.write(rest);
    }

    /// Prints a template without variables.
    pub fn text(&mut self, template: &str) {
        self.print(&[], template);
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn outdent(&mut self) {
        debug_assert!(self.indent > 0, "outdent below zero");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Runs `body` one level deeper.
    pub fn indented<F>(&mut self, body: F)
    where
        F: FnOnce(&mut Printer),
    {
        self.indent();
        body(self);
        self.outdent();
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn write(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            if self.at_line_start && line != "\n" {
                for _ in 0..self.indent {
                    self.out.push_str(INDENT);
                }
            }
            self.out.push_str(line);
            self.at_line_start = line.ends_with('\n');
        }
    }
}

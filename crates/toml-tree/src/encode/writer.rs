use crate::options::Indent;

/// Line-at-a-time output buffer with per-depth indentation.
pub struct LineWriter {
    out: String,
    unit: String,
    indent_cache: String,
    after_header: bool,
}

impl LineWriter {
    pub fn new(indent: Indent) -> Self {
        Self {
            out: String::new(),
            unit: indent.unit(),
            indent_cache: String::new(),
            after_header: false,
        }
    }

    fn write_indent(&mut self, depth: usize) {
        if depth == 0 || self.unit.is_empty() {
            return;
        }
        let width = depth * self.unit.len();
        while self.indent_cache.len() < width {
            self.indent_cache.push_str(&self.unit);
        }
        self.out.push_str(&self.indent_cache[..width]);
    }

    pub fn line_kv(&mut self, depth: usize, key: &str, value: &str) {
        self.write_indent(depth);
        self.out.push_str(key);
        self.out.push_str(" = ");
        self.out.push_str(value);
        self.out.push('\n');
        self.after_header = false;
    }

    /// `[path]` or `[[path]]`.
    pub fn line_header(&mut self, depth: usize, path: &str, is_array: bool) {
        self.write_indent(depth);
        let (open, close) = if is_array { ("[[", "]]") } else { ("[", "]") };
        self.out.push_str(open);
        self.out.push_str(path);
        self.out.push_str(close);
        self.out.push('\n');
        self.after_header = true;
    }

    pub fn blank_line(&mut self) {
        self.out.push('\n');
        self.after_header = false;
    }

    /// True when the last line written was a table header.
    pub fn after_header(&self) -> bool {
        self.after_header
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for LineWriter {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}

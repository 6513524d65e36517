/// Indentation unit written once per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

impl Indent {
    pub(crate) fn unit(self) -> String {
        match self {
            Indent::Tab => String::from("\t"),
            Indent::Spaces(n) => " ".repeat(n),
        }
    }
}

/// Serializer settings.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Indentation for table bodies (default: one tab per level)
    pub indent: Indent,
}

impl Options {
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}

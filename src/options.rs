use crate::NumberFormat;

/// Controls how a file is laid out.
///
/// The defaults write values with 16 significant digits, indent nested elements by two
/// spaces, keep a trailing comma after the last name in `Scalars` and skip the
/// `<?xml ...?>` declaration.
///
/// ```
/// let options = vts::ExportOptions::default()
///     .with_number_format(vts::NumberFormat::Shortest)
///     .with_indent(None);
/// assert!(options.trailing_scalar_comma);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub number_format: NumberFormat,
    /// number of spaces per nesting level, `None` writes everything on one line
    pub indent: Option<usize>,
    pub trailing_scalar_comma: bool,
    pub xml_declaration: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            number_format: NumberFormat::default(),
            indent: Some(2),
            trailing_scalar_comma: true,
            xml_declaration: false,
        }
    }
}

impl ExportOptions {
    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_trailing_scalar_comma(mut self, trailing_scalar_comma: bool) -> Self {
        self.trailing_scalar_comma = trailing_scalar_comma;
        self
    }

    pub fn with_xml_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }
}

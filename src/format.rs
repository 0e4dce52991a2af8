//! Decimal ASCII formatting of the values written inside `DataArray` elements.

/// How floating point values are rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Round to this many significant digits and pick the shorter of fixed and exponent
    /// notation, dropping trailing zeros (`printf("%.Ng")`). `1.0` is written as `1`.
    ///
    /// The digit count is clamped to `1..=767`; no `f64` has more significant digits.
    Significant(usize),
    /// Shortest text that parses back to exactly the same `f64`.
    Shortest,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::Significant(16)
    }
}

impl NumberFormat {
    /// append the text of `value` to `buffer`
    pub fn push(&self, buffer: &mut String, value: f64) {
        if !value.is_finite() {
            buffer.push_str(non_finite(value));
            return;
        }

        match self {
            NumberFormat::Significant(digits) => push_significant(buffer, value, *digits),
            NumberFormat::Shortest => push_shortest(buffer, value),
        }
    }

    pub fn format(&self, value: f64) -> String {
        let mut out = String::new();
        self.push(&mut out, value);
        out
    }
}

fn non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "nan"
    } else if value.is_sign_positive() {
        "inf"
    } else {
        "-inf"
    }
}

fn push_shortest(buffer: &mut String, value: f64) {
    let mut ryu_buffer = ryu::Buffer::new();
    let num = ryu_buffer.format_finite(value);
    buffer.push_str(num.strip_suffix(".0").unwrap_or(num));
}

fn push_significant(buffer: &mut String, value: f64, digits: usize) {
    let digits = digits.clamp(1, MAX_SIGNIFICANT_DIGITS);

    if value == 0.0 {
        buffer.push_str(if value.is_sign_negative() { "-0" } else { "0" });
        return;
    }

    // the exponent has to come from the rounded value: 9.99 at two digits is 1.0e1
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => {
            buffer.push_str(&scientific);
            return;
        }
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        buffer.push_str(trim_fraction(mantissa));
        buffer.push('e');
        buffer.push(if exponent < 0 { '-' } else { '+' });
        buffer.push_str(&format!("{:02}", exponent.abs()));
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        let fixed = format!("{:.*}", decimals, value);
        buffer.push_str(trim_fraction(&fixed));
    }
}

/// most significant decimal digits in the exact expansion of any `f64`
const MAX_SIGNIFICANT_DIGITS: usize = 767;

/// drop trailing zeros after the decimal point, and the point itself if nothing is left
fn trim_fraction(num: &str) -> &str {
    if num.contains('.') {
        num.trim_end_matches('0').trim_end_matches('.')
    } else {
        num
    }
}

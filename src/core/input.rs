/// Reads the longest leading decimal literal of `raw`, ignoring leading
/// whitespace and any trailing text. Returns `None` when no digits lead the
/// text or the literal does not fit a finite `f64`.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_or_zero(raw: &str) -> f64 {
    parse_leading_number(raw).unwrap_or(0.0)
}

/// Rounds half away from zero and never renders a negative zero.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    // past 2^53 every f64 is already an integer, so skipping the rounding is exact
    let rounded = if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    };
    // -0.0 + 0.0 == +0.0
    format!("{:.*}", decimals, rounded + 0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

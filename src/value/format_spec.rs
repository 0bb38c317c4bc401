//! A small format-spec interpreter for the `:spec` suffix on a variable tag,
//! e.g. `{{amount:.2f}}`.
//!
//! The grammar is a permissive subset of the usual `[[fill]align][sign]['0'][width]['.'precision][type]`
//! shape, with an explicit `f`/`e`/`E`/`x`/`X`/`o`/`b` type letter rather than
//! inferring the type from the value, since a spec is plain text attached to
//! a tag and has no value in hand while it's being parsed.

use super::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, Default)]
struct Spec {
    fill: Option<char>,
    align: Option<Align>,
    sign_plus: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    ty: Option<char>,
}

fn parse_spec(raw: &str) -> Spec {
    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;
    let mut spec = Spec::default();

    if chars.len() >= 2 && matches!(chars[1], '<' | '>' | '^') {
        spec.fill = Some(chars[0]);
        spec.align = Some(match chars[1] {
            '<' => Align::Left,
            '>' => Align::Right,
            _ => Align::Center,
        });
        i = 2;
    } else if !chars.is_empty() && matches!(chars[0], '<' | '>' | '^') {
        spec.align = Some(match chars[0] {
            '<' => Align::Left,
            '>' => Align::Right,
            _ => Align::Center,
        });
        i = 1;
    }

    if i < chars.len() && chars[i] == '+' {
        spec.sign_plus = true;
        i += 1;
    }

    if i < chars.len() && chars[i] == '0' {
        spec.zero = true;
        i += 1;
    }

    let width_start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i > width_start {
        spec.width = chars[width_start..i].iter().collect::<String>().parse().ok();
    }

    if i < chars.len() && chars[i] == '.' {
        i += 1;
        let prec_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        spec.precision = chars[prec_start..i].iter().collect::<String>().parse().ok();
    }

    if i < chars.len() {
        spec.ty = Some(chars[i]);
    }

    spec
}

fn render_body(n: Number, spec: &Spec) -> String {
    match (n, spec.ty) {
        (Number::F64(f), Some('e')) => format!("{:e}", f),
        (Number::F64(f), Some('E')) => format!("{:E}", f),
        (Number::F64(f), Some('f') | None) => format!("{:.*}", spec.precision.unwrap_or(6), f),
        (Number::F64(f), Some(_)) => format!("{:.*}", spec.precision.unwrap_or(6), f),
        (Number::I64(v), Some('x')) => format!("{:x}", v),
        (Number::I64(v), Some('X')) => format!("{:X}", v),
        (Number::I64(v), Some('o')) => format!("{:o}", v),
        (Number::I64(v), Some('b')) => format!("{:b}", v),
        (Number::I64(v), Some('f')) => format!("{:.*}", spec.precision.unwrap_or(6), v as f64),
        (Number::I64(v), _) => v.to_string(),
        (Number::U64(v), Some('x')) => format!("{:x}", v),
        (Number::U64(v), Some('X')) => format!("{:X}", v),
        (Number::U64(v), Some('o')) => format!("{:o}", v),
        (Number::U64(v), Some('b')) => format!("{:b}", v),
        (Number::U64(v), Some('f')) => format!("{:.*}", spec.precision.unwrap_or(6), v as f64),
        (Number::U64(v), _) => v.to_string(),
    }
}

fn is_negative(n: Number) -> bool {
    match n {
        Number::I64(v) => v < 0,
        Number::U64(_) => false,
        Number::F64(v) => v.is_sign_negative() && v != 0.0,
    }
}

fn pad(mut body: String, spec: &Spec, n: Number) -> String {
    if spec.sign_plus && !is_negative(n) && !body.starts_with('+') {
        body.insert(0, '+');
    }

    let width = match spec.width {
        Some(w) => w,
        None => return body,
    };
    let len = body.chars().count();
    if len >= width {
        return body;
    }
    let pad_amount = width - len;

    if spec.zero && spec.align.is_none() {
        let (sign, digits) = if let Some(rest) = body.strip_prefix('-').or_else(|| body.strip_prefix('+')) {
            (&body[..1], rest)
        } else {
            ("", body.as_str())
        };
        return format!("{sign}{}{digits}", "0".repeat(pad_amount));
    }

    let fill = spec.fill.unwrap_or(' ');
    match spec.align.unwrap_or(Align::Right) {
        Align::Left => format!("{body}{}", fill.to_string().repeat(pad_amount)),
        Align::Right => format!("{}{body}", fill.to_string().repeat(pad_amount)),
        Align::Center => {
            let left = pad_amount / 2;
            let right = pad_amount - left;
            format!("{}{body}{}", fill.to_string().repeat(left), fill.to_string().repeat(right))
        }
    }
}

/// Format `n` according to `spec`. Never fails: an unrecognised type letter
/// falls back to the default numeric rendering for that spec's width/precision.
pub fn format_number(n: Number, raw_spec: &str) -> String {
    let spec = parse_spec(raw_spec);
    let body = render_body(n, &spec);
    pad(body, &spec, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_point_precision() {
        assert_eq!(format_number(Number::F64(3.14159), ".2f"), "3.14");
    }

    #[test]
    fn width_and_zero_pad() {
        assert_eq!(format_number(Number::I64(7), "05"), "00007");
    }

    #[test]
    fn hex_upper() {
        assert_eq!(format_number(Number::I64(255), "X"), "FF");
    }

    #[test]
    fn left_align_with_fill() {
        assert_eq!(format_number(Number::I64(5), "*<4"), "5***");
    }
}

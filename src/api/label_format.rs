use std::sync::Arc;

/// Formats a bar's aggregated value into label text.
pub type LabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Formats an axis datum (bin edge or aggregate) for tooltips.
pub type DatumFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Shortest round-trip rendering of a number, in JavaScript `String(n)` form.
///
/// Integral values print without a fractional part, `-0` prints as `0`, and
/// non-finite values print as `NaN`, `Infinity` or `-Infinity`. Magnitudes of
/// at least `1e21` or below `1e-6` switch to exponent form (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }
    let exponent_form = format!("{value:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

pub(crate) fn format_with(formatter: Option<&LabelFormatterFn>, value: f64) -> String {
    match formatter {
        Some(formatter) => formatter(value),
        None => format_number(value),
    }
}

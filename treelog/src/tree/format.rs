/// Two-decimal text of a float, rounding exact midpoints away from zero (`0.125` gives
/// `"0.13"`, `-0.125` gives `"-0.13"`).
///
/// `{:.2}` alone rounds midpoints to the even digit, so the digits are taken from the exact
/// decimal expansion instead and rounded by hand. NaN and infinities print as `NaN`, `inf`
/// and `-inf`.
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value:.2}");
    }

    // A float with n binary fraction digits has exactly n decimal fraction digits.
    let precision = fraction_bits(value).max(3);
    let exact = format!("{:.*}", precision, value.abs());
    let (int, frac) = exact.split_once('.').unwrap_or((exact.as_str(), "000"));

    let mut digits: Vec<u8> = int.bytes().chain(frac.bytes().take(2)).collect();
    if frac.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        round_up(&mut digits);
    }

    let split = digits.len() - 2;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| char::from(*d)));
    out.push('.');
    out.extend(digits[split..].iter().map(|d| char::from(*d)));
    out
}

// Doubling and taking the fraction are both exact, so this terminates within 1074 steps.
fn fraction_bits(value: f64) -> usize {
    let mut fract = value.fract();
    let mut bits = 0;
    while fract != 0.0 {
        fract = (fract * 2.0).fract();
        bits += 1;
    }
    bits
}

fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

use std::{fmt::Display, str::FromStr};

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Parse a thread count in the inclusive range [0, 512]; 0 means one per CPU.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is above 512.
pub fn parse_jobs(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 0, Some(512))
}

/// Parse a key=value pair string into a tuple.
///
/// # Errors
/// Returns an error if the input string does not contain an '=' character
/// or either side is empty.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("Expected key=val: {s}"))
}

//! Parameter handling shared by the command line tools.
//!
//! Both tools accept parameters in the traditional `KEY=value` form
//! (`FROM=in.cub TO=out.cub ACTION=patch`) as well as ordinary long flags
//! (`--from in.cub`). [`normalize_parameter_args`] rewrites the former into the
//! latter so clap only ever sees one grammar.

/// Rewrite `KEY=value` tokens into `--key value` pairs.
///
/// The first element (the program name) is passed through untouched, as is
/// anything already starting with `-` and the token following a bare
/// `--flag`. Keys are lowercased; values keep their case.
///
/// # Example
/// ```
/// use shared::shared_args::normalize_parameter_args;
///
/// let args = normalize_parameter_args(["tool", "FROM=in.cub", "--width", "3"]);
/// assert_eq!(args, vec!["tool", "--from", "in.cub", "--width", "3"]);
/// ```
pub fn normalize_parameter_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut normalized = Vec::new();
    let mut flag_value_pending = false;
    for (position, arg) in args.into_iter().enumerate() {
        let arg: String = arg.into();
        if position == 0 || flag_value_pending {
            flag_value_pending = false;
            normalized.push(arg);
            continue;
        }
        if arg.starts_with('-') {
            // A bare `--flag` takes the next token as its value, verbatim.
            flag_value_pending = !arg.contains('=');
            normalized.push(arg);
            continue;
        }
        match arg.split_once('=') {
            Some((key, value)) if is_parameter_name(key) => {
                normalized.push(format!("--{}", key.to_ascii_lowercase()));
                normalized.push(value.to_string());
            }
            _ => normalized.push(arg),
        }
    }
    normalized
}

fn is_parameter_name(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a boolean parameter value.
///
/// Accepts `yes/no`, `true/false`, `y/n`, and `1/0` in any case.
pub fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "1" => Ok(true),
        "no" | "n" | "false" | "f" | "0" => Ok(false),
        other => Err(format!("Invalid boolean value: {other}")),
    }
}

//! Drive a [`Scanner`] against a [`Config`] and collect owned results.

use crate::config::{Config, ValueMode};
use crate::scanner::{split_inline_value, ScanError, Scanner, Token};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the classification policy.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("missing value for option: {0}")]
    MissingValue(String),

    #[error("option does not take a value: {0}")]
    UnexpectedValue(String),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// An owned, classified argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Classified {
    Long { name: String, value: Option<String> },
    Short { name: char, value: Option<String> },
    Positional { text: String },
}

/// Classify `args` according to `config`.
///
/// Options listed with a value mode take the following token through
/// [`Scanner::take_value`]. Unlisted options carry no value, and are
/// rejected when `config.strict` is set.
pub fn classify_args<S: AsRef<str>>(
    config: &Config,
    args: &[S],
) -> Result<Vec<Classified>, ClassifyError> {
    let mut scanner = Scanner::new(args);
    let mut out = Vec::new();

    while let Some(token) = scanner.next_token() {
        let index = scanner.position() - 1;
        let classified = match token {
            Token::Long(raw) => {
                let (name, inline) = if config.split_inline {
                    split_inline_value(raw)
                } else {
                    (raw, None)
                };
                let flag = format!("--{}", name);
                let mode = lookup(config, config.find_long(name).map(|o| o.value), &flag)?;

                let value = match inline {
                    Some(_) if mode == ValueMode::None && config.strict => {
                        return Err(ClassifyError::UnexpectedValue(flag));
                    }
                    Some(v) => Some(v.to_string()),
                    None => fetch_value(&mut scanner, mode, &flag)?,
                };
                Classified::Long {
                    name: name.to_string(),
                    value,
                }
            }
            Token::Short(name) => {
                let flag = format!("-{}", name);
                let mode = lookup(config, config.find_short(name).map(|o| o.value), &flag)?;
                let value = fetch_value(&mut scanner, mode, &flag)?;
                Classified::Short { name, value }
            }
            Token::Positional(text) => Classified::Positional {
                text: text.to_string(),
            },
        };

        tracing::debug!(index, ?classified, "classified argument");
        out.push(classified);
    }

    Ok(out)
}

fn lookup(
    config: &Config,
    found: Option<ValueMode>,
    flag: &str,
) -> Result<ValueMode, ClassifyError> {
    match found {
        Some(mode) => Ok(mode),
        None if config.strict => Err(ClassifyError::UnknownOption(flag.to_string())),
        None => {
            tracing::debug!(option = flag, "unlisted option, treating as flag");
            Ok(ValueMode::None)
        }
    }
}

fn fetch_value<S: AsRef<str>>(
    scanner: &mut Scanner<'_, S>,
    mode: ValueMode,
    flag: &str,
) -> Result<Option<String>, ClassifyError> {
    match mode {
        ValueMode::None => Ok(None),
        ValueMode::Optional => Ok(scanner.take_value()?.map(str::to_string)),
        ValueMode::Required => scanner
            .take_value()?
            .map(str::to_string)
            .map(Some)
            .ok_or_else(|| ClassifyError::MissingValue(flag.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_config(json: &str) -> Config {
        let config = Config::from_json(json).unwrap();
        config.validate().unwrap();
        config
    }

    fn args(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    fn long(name: &str, value: Option<&str>) -> Classified {
        Classified::Long {
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }

    fn short(name: char, value: Option<&str>) -> Classified {
        Classified::Short {
            name,
            value: value.map(str::to_string),
        }
    }

    fn positional(text: &str) -> Classified {
        Classified::Positional {
            text: text.to_string(),
        }
    }

    const USAGE: &str = r#"{"strict":true,"options":[
        {"long":"help","short":"h"},
        {"long":"dostuff","short":"D","value":"required"}
    ]}"#;

    #[test]
    fn test_help_flag() {
        let config = parse_config(USAGE);
        let result = classify_args(&config, &args(&["--help"])).unwrap();
        assert_eq!(result, vec![long("help", None)]);
    }

    #[test]
    fn test_long_with_value() {
        let config = parse_config(USAGE);
        let result = classify_args(&config, &args(&["--dostuff", "value1"])).unwrap();
        assert_eq!(result, vec![long("dostuff", Some("value1"))]);
    }

    #[test]
    fn test_short_with_value() {
        let config = parse_config(USAGE);
        let result = classify_args(&config, &args(&["-D", "arg"])).unwrap();
        assert_eq!(result, vec![short('D', Some("arg"))]);
    }

    #[test]
    fn test_flag_does_not_consume_positional() {
        let config = parse_config(USAGE);
        let result = classify_args(&config, &args(&["-h", "file.txt"])).unwrap();
        assert_eq!(result, vec![short('h', None), positional("file.txt")]);
    }

    #[test]
    fn test_required_value_missing_at_end() {
        let config = parse_config(USAGE);
        let result = classify_args(&config, &args(&["--dostuff"]));
        assert!(matches!(result, Err(ClassifyError::MissingValue(ref o)) if o == "--dostuff"));
    }

    #[test]
    fn test_required_value_refused_before_option() {
        let config = parse_config(USAGE);
        let result = classify_args(&config, &args(&["-D", "-h"]));
        assert!(matches!(result, Err(ClassifyError::MissingValue(ref o)) if o == "-D"));
    }

    #[test]
    fn test_optional_value_absent_leaves_next_option() {
        let config = parse_config(r#"{"options":[{"short":"D","value":"optional"}]}"#);
        let result = classify_args(&config, &args(&["-D", "-x"])).unwrap();
        assert_eq!(result, vec![short('D', None), short('x', None)]);
    }

    #[test]
    fn test_strict_rejects_unknown_long() {
        let config = parse_config(USAGE);
        let result = classify_args(&config, &args(&["--nope"]));
        assert!(matches!(result, Err(ClassifyError::UnknownOption(ref o)) if o == "--nope"));
    }

    #[test]
    fn test_strict_rejects_unknown_short() {
        let config = parse_config(USAGE);
        let result = classify_args(&config, &args(&["-z"]));
        assert!(matches!(result, Err(ClassifyError::UnknownOption(ref o)) if o == "-z"));
    }

    #[test]
    fn test_lenient_keeps_unknown_as_flags() {
        let config = parse_config("{}");
        let result = classify_args(&config, &args(&["foo", "--bar", "baz", "-q"])).unwrap();
        assert_eq!(
            result,
            vec![
                positional("foo"),
                long("bar", None),
                positional("baz"),
                short('q', None),
            ]
        );
    }

    #[test]
    fn test_lone_dash_is_unlisted_short() {
        let config = parse_config(r#"{"options":[{"short":"o","value":"optional"}]}"#);
        let result = classify_args(&config, &args(&["-o", "-", "x"])).unwrap();
        assert_eq!(
            result,
            vec![short('o', None), short('\0', None), positional("x")]
        );
    }

    #[test]
    fn test_short_cluster_truncates() {
        let config = parse_config(r#"{"options":[{"short":"D","value":"required"}]}"#);
        let result = classify_args(&config, &args(&["-Dxyz", "val"])).unwrap();
        assert_eq!(result, vec![short('D', Some("val"))]);
    }

    #[test]
    fn test_inline_value_not_split_by_default() {
        let config = parse_config("{}");
        let result = classify_args(&config, &args(&["--out=file.txt"])).unwrap();
        assert_eq!(result, vec![long("out=file.txt", None)]);
    }

    #[test]
    fn test_inline_value_split() {
        let config = parse_config(
            r#"{"split_inline":true,"options":[{"long":"out","value":"required"}]}"#,
        );
        let result = classify_args(&config, &args(&["--out=file.txt", "next"])).unwrap();
        assert_eq!(result, vec![long("out", Some("file.txt")), positional("next")]);
    }

    #[test]
    fn test_inline_empty_value_satisfies_required() {
        let config = parse_config(
            r#"{"split_inline":true,"options":[{"long":"out","value":"required"}]}"#,
        );
        let result = classify_args(&config, &args(&["--out="])).unwrap();
        assert_eq!(result, vec![long("out", Some(""))]);
    }

    #[test]
    fn test_inline_value_on_flag_strict() {
        let config = parse_config(
            r#"{"strict":true,"split_inline":true,"options":[{"long":"help"}]}"#,
        );
        let result = classify_args(&config, &args(&["--help=yes"]));
        assert!(matches!(result, Err(ClassifyError::UnexpectedValue(ref o)) if o == "--help"));
    }

    #[test]
    fn test_inline_value_on_flag_lenient() {
        let config = parse_config(r#"{"split_inline":true,"options":[{"long":"help"}]}"#);
        let result = classify_args(&config, &args(&["--help=yes"])).unwrap();
        assert_eq!(result, vec![long("help", Some("yes"))]);
    }

    #[test]
    fn test_every_token_accounted_once() {
        let config = parse_config(
            r#"{"options":[{"long":"a","value":"optional"},{"short":"b","value":"optional"}]}"#,
        );
        let input = args(&["--a", "1", "-b", "--a", "x", "-b", "2", "y"]);
        let result = classify_args(&config, &input).unwrap();
        let values = result
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Classified::Long { value: Some(_), .. } | Classified::Short { value: Some(_), .. }
                )
            })
            .count();
        assert_eq!(result.len() + values, input.len());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&vec![
            long("dostuff", Some("v")),
            short('h', None),
            positional("foo"),
        ])
        .unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"long","name":"dostuff","value":"v"},{"kind":"short","name":"h","value":null},{"kind":"positional","text":"foo"}]"#
        );
    }
}

//! Tests for the command parser
//!
//! These tests verify:
//! - Tokenising with single quotes, double quotes and escapes
//! - Command recognition (case-insensitive)
//! - Argument count checks and error responses

use quillkv::protocol::{parse_line, tokenize, Command, CommandType, ParseError, Response};

// =============================================================================
// Tokenizer Tests
// =============================================================================

#[test]
fn test_tokenize_whitespace() {
    assert_eq!(tokenize("  SET   a\tb  ").unwrap(), vec!["SET", "a", "b"]);
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   ").unwrap().is_empty());
}

#[test]
fn test_tokenize_keeps_non_ascii_whitespace() {
    assert_eq!(tokenize("a\u{2003}b c").unwrap(), vec!["a\u{2003}b", "c"]);
    assert_eq!(tokenize("\u{00A0}x").unwrap(), vec!["\u{a0}x"]);
}

#[test]
fn test_tokenize_double_quotes() {
    assert_eq!(
        tokenize(r#"SET k "hello world""#).unwrap(),
        vec!["SET", "k", "hello world"]
    );
    assert_eq!(tokenize(r#""say \"hi\"""#).unwrap(), vec![r#"say "hi""#]);
    assert_eq!(tokenize(r#""a\\b""#).unwrap(), vec![r"a\b"]);
    // Other escapes are kept literally inside double quotes
    assert_eq!(tokenize(r#""a\nb""#).unwrap(), vec![r"a\nb"]);
}

#[test]
fn test_tokenize_single_quotes_are_literal() {
    assert_eq!(tokenize(r"'a \ b'").unwrap(), vec![r"a \ b"]);
    assert_eq!(tokenize(r#"'say "hi"'"#).unwrap(), vec![r#"say "hi""#]);
}

#[test]
fn test_tokenize_adjacent_pieces_join() {
    assert_eq!(tokenize(r#"a"b c"'d e'"#).unwrap(), vec!["ab cd e"]);
}

#[test]
fn test_tokenize_empty_quotes_make_empty_token() {
    assert_eq!(tokenize(r#"SET k """#).unwrap(), vec!["SET", "k", ""]);
    assert_eq!(tokenize("''").unwrap(), vec![""]);
}

#[test]
fn test_tokenize_backslash_outside_quotes() {
    assert_eq!(tokenize(r"hello\ world").unwrap(), vec!["hello world"]);
    assert_eq!(tokenize(r"\'x").unwrap(), vec!["'x"]);
}

#[test]
fn test_tokenize_errors() {
    assert_eq!(tokenize(r#"SET k "open"#), Err(ParseError::UnclosedQuote('"')));
    assert_eq!(tokenize("SET k 'open"), Err(ParseError::UnclosedQuote('\'')));
    assert_eq!(tokenize(r"trailing\"), Err(ParseError::DanglingEscape));
}

// =============================================================================
// Command Parsing Tests
// =============================================================================

#[test]
fn test_parse_set() {
    assert_eq!(
        parse_line("SET a 1\n").unwrap(),
        Some(Command::Set {
            key: "a".to_string(),
            value: "1".to_string(),
        })
    );
}

#[test]
fn test_parse_set_joins_remaining_tokens() {
    assert_eq!(
        parse_line("SET msg hello   big world").unwrap(),
        Some(Command::Set {
            key: "msg".to_string(),
            value: "hello big world".to_string(),
        })
    );
}

#[test]
fn test_parse_set_quoted_value_keeps_spacing() {
    assert_eq!(
        parse_line(r#"SET msg "hello   world""#).unwrap(),
        Some(Command::Set {
            key: "msg".to_string(),
            value: "hello   world".to_string(),
        })
    );
}

#[test]
fn test_parse_set_value_with_non_breaking_space() {
    assert_eq!(
        parse_line("SET k a\u{00A0}b").unwrap(),
        Some(Command::Set {
            key: "k".to_string(),
            value: "a\u{a0}b".to_string(),
        })
    );
    assert_eq!(
        parse_line("SET k v\u{00A0}\n").unwrap(),
        Some(Command::Set {
            key: "k".to_string(),
            value: "v\u{a0}".to_string(),
        })
    );
}

#[test]
fn test_parse_get_and_exit() {
    assert_eq!(
        parse_line("GET a").unwrap(),
        Some(Command::Get {
            key: "a".to_string()
        })
    );
    assert_eq!(parse_line("EXIT").unwrap(), Some(Command::Exit));
}

#[test]
fn test_command_names_are_case_insensitive() {
    assert_eq!(
        parse_line("get a").unwrap().map(|c| c.command_type()),
        Some(CommandType::Get)
    );
    assert_eq!(
        parse_line("Set a b").unwrap().map(|c| c.command_type()),
        Some(CommandType::Set)
    );
    assert_eq!(parse_line("exit").unwrap(), Some(Command::Exit));
}

#[test]
fn test_blank_line_is_ignored() {
    assert_eq!(parse_line("").unwrap(), None);
    assert_eq!(parse_line("   \r\n").unwrap(), None);
}

#[test]
fn test_usage_errors() {
    assert_eq!(parse_line("SET"), Err(ParseError::Usage(CommandType::Set)));
    assert_eq!(parse_line("SET a"), Err(ParseError::Usage(CommandType::Set)));
    assert_eq!(parse_line("GET"), Err(ParseError::Usage(CommandType::Get)));
    assert_eq!(parse_line("GET a b"), Err(ParseError::Usage(CommandType::Get)));
}

#[test]
fn test_unknown_command() {
    assert_eq!(
        parse_line("DEL a"),
        Err(ParseError::UnknownCommand("DEL".to_string()))
    );
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_parse_errors_map_to_responses() {
    let render = |e: ParseError| Response::from(e).to_string();

    assert_eq!(render(ParseError::UnclosedQuote('"')), "ERR syntax");
    assert_eq!(render(ParseError::DanglingEscape), "ERR syntax");
    assert_eq!(
        render(ParseError::Usage(CommandType::Set)),
        "ERR usage: SET <key> <value>"
    );
    assert_eq!(render(ParseError::Usage(CommandType::Get)), "ERR usage: GET <key>");
    assert_eq!(
        render(ParseError::UnknownCommand("X".to_string())),
        "ERR unknown command"
    );
}

#[test]
fn test_response_display() {
    assert_eq!(Response::Ok.to_string(), "OK");
    assert_eq!(Response::Value("Bob".to_string()).to_string(), "Bob");
    assert_eq!(Response::Null.to_string(), "NULL");
    assert_eq!(Response::error("internal").to_string(), "ERR internal");
    assert!(Response::error("x").is_error());
    assert_eq!(Response::from_lookup(None), Response::Null);
    assert_eq!(Response::from_lookup(Some("v")), Response::Value("v".to_string()));
}

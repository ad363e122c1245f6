use super::error::{ParseError, ParseErrorKind};
use crate::server::controlchan::{command::Command, line_parser::parser::parse};

use pretty_assertions::assert_eq;

#[test]
fn parse_user_cmd_crnl() {
    let input = "USER Dolores\r\n";
    assert_eq!(parse(input).unwrap(), Command::new("USER", ["Dolores"]));
}

#[test]
fn parse_user_cmd_mixed_case() {
    let input = "uSeR Dolores\r\n";
    assert_eq!(parse(input).unwrap(), Command::new("USER", ["Dolores"]));
}

#[test]
// Not all clients include the (actually mandatory) '\r'
fn parse_user_cmd_nl() {
    let input = "USER Dolores\n";
    assert_eq!(parse(input).unwrap(), Command::new("USER", ["Dolores"]));
}

#[test]
// Although we accept requests ending in only '\n', we won't accept requests ending only in '\r'
fn parse_user_cmd_cr() {
    let input = "USER Dolores\r";
    assert_eq!(parse(input), Err(ParseError::from(ParseErrorKind::InvalidEol)));
}

#[test]
fn parse_user_cmd_no_eol() {
    let input = "USER Dolores";
    assert_eq!(parse(input), Err(ParseError::from(ParseErrorKind::InvalidEol)));
}

#[test]
fn parse_bare_cr_inside_line() {
    let input = "USER Dol\rores\r\n";
    assert_eq!(parse(input), Err(ParseError::from(ParseErrorKind::InvalidEol)));
}

#[test]
// We should skip only one space after a token, to allow for tokens starting with a space.
fn parse_user_cmd_double_space() {
    let input = "USER  Dolores\r\n";
    assert_eq!(parse(input).unwrap(), Command::new("USER", [" Dolores"]));
}

#[test]
fn parse_user_cmd_whitespace() {
    let input = "USER Dolores Abernathy\r\n";
    assert_eq!(parse(input).unwrap(), Command::new("USER", ["Dolores Abernathy"]));
}

#[test]
fn parse_pass_cmd_whitespace() {
    let input = "PASS s3cr#t p@S$w0rd\r\n";
    assert_eq!(parse(input).unwrap(), Command::new("PASS", ["s3cr#t p@S$w0rd"]));
}

#[test]
fn parse_stor_path_with_spaces() {
    let input = "STOR my file.txt\r\n";
    assert_eq!(parse(input).unwrap(), Command::new("STOR", ["my file.txt"]));
}

#[test]
fn parse_noop() {
    assert_eq!(parse("NOOP\r\n").unwrap(), Command::named("NOOP"));
    assert_eq!(parse("noop\n").unwrap(), Command::named("NOOP"));
}

#[test]
fn parse_type_with_two_params() {
    assert_eq!(parse("TYPE A N\r\n").unwrap(), Command::new("TYPE", ["A", "N"]));
}

#[test]
fn parse_port_splits_on_commas() {
    assert_eq!(
        parse("PORT 127,0,0,1,4,1\r\n").unwrap(),
        Command::new("PORT", ["127", "0", "0", "1", "4", "1"])
    );
}

#[test]
fn parse_rest_marker() {
    assert_eq!(parse("REST marker1\r\n").unwrap(), Command::new("REST", ["marker1"]));
}

#[test]
fn parse_trailing_space_means_no_params() {
    assert_eq!(parse("PWD \r\n").unwrap(), Command::named("PWD"));
}

#[test]
fn parse_empty_line() {
    assert_eq!(parse("\r\n").unwrap(), Command::named(""));
    assert_eq!(parse("\n").unwrap(), Command::named(""));
}

#[test]
fn parse_unknown_command_keeps_its_name() {
    assert_eq!(parse("XYZZY plugh\r\n").unwrap(), Command::new("XYZZY", ["plugh"]));
}

#[test]
// Some clients send a NUL after the CR as telnet mandates.
fn parse_telnet_null() {
    assert_eq!(parse("NOOP\r\0\n").unwrap(), Command::named("NOOP"));
}

#[test]
fn parse_invalid_utf8() {
    let input: &[u8] = b"USER \xc3\x28\r\n";
    assert_eq!(parse(input), Err(ParseError::from(ParseErrorKind::InvalidUtf8)));
}

#[test]
fn parse_control_character_in_verb() {
    assert_eq!(parse("NO\x07OP\r\n"), Err(ParseError::from(ParseErrorKind::InvalidCommand)));
}

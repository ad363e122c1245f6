use super::{error::ControlChanError, event::Event, line_parser};
use crate::server::reply::Reply;

use bytes::BytesMut;
use std::io::Write;
use tokio_util::codec::{Decoder, Encoder};

// FtpCodec implements tokio's `Decoder` and `Encoder` traits for the control channel, that we'll
// use to decode FTP commands and encode their responses.
#[derive(Debug, Default)]
pub struct FtpCodec {
    // Stored index of the next index to examine for a '\n' character. This is used to optimize
    // searching. For example, if `decode` was called with `abc`, it would hold `3`, because that
    // is the next index to examine. The next time `decode` is called with `abcde\n`, we will only
    // look at `de\n` before returning.
    next_index: usize,
}

impl FtpCodec {
    pub fn new() -> Self {
        FtpCodec { next_index: 0 }
    }
}

impl Decoder for FtpCodec {
    type Item = Event;
    type Error = ControlChanError;

    // Here we decode the incoming bytes into a meaningful command. We'll split on newlines, and
    // parse the resulting line using `line_parser::parse()`. This method will be called by tokio.
    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Event>, Self::Error> {
        if let Some(newline_offset) = buf[self.next_index..].iter().position(|b| *b == b'\n') {
            let newline_index = newline_offset + self.next_index;
            let line = buf.split_to(newline_index + 1);
            self.next_index = 0;
            match line_parser::parse(&line) {
                Ok(cmd) => Ok(Some(Event::Command(cmd))),
                Err(e) => Ok(Some(Event::ParseFailure(e))),
            }
        } else {
            self.next_index = buf.len();
            Ok(None)
        }
    }
}

impl Encoder<Reply> for FtpCodec {
    type Error = ControlChanError;

    // Here we encode the outgoing response
    fn encode(&mut self, reply: Reply, buf: &mut BytesMut) -> Result<(), Self::Error> {
        let mut buffer = vec![];
        match reply {
            Reply::CodeAndMsg { code, msg } => {
                if msg.is_empty() {
                    write!(buffer, "{}\r\n", code.code())?;
                } else {
                    write!(buffer, "{} {}\r\n", code.code(), msg)?;
                }
            }
            Reply::MultiLine { code, mut lines } => {
                // Get the last line since it needs to be preceded by the response code.
                let last_line = lines.pop().unwrap_or_default();

                // Lines starting with a digit should be indented
                for it in lines.iter_mut() {
                    if it.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                        it.insert(0, ' ');
                    }
                }
                if lines.is_empty() {
                    write!(buffer, "{} {}\r\n", code.code(), last_line)?;
                } else {
                    write!(buffer, "{}-{}\r\n{} {}\r\n", code.code(), lines.join("\r\n"), code.code(), last_line)?;
                }
            }
        }
        buf.extend(&buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{Command, ReplyCode, line_parser::error::ParseErrorKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_one_line_at_a_time() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::from("USER ali");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"ce\r\nNOOP\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Event::Command(Command::new("USER", ["alice"]))));
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Event::Command(Command::named("NOOP"))));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn parse_failures_do_not_end_the_stream() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::from(&b"USER \xff\r\nNOOP\r\n"[..]);
        match codec.decode(&mut buf).unwrap() {
            Some(Event::ParseFailure(e)) => assert_eq!(e.kind(), &ParseErrorKind::InvalidUtf8),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(Event::Command(Command::named("NOOP"))));
    }

    #[test]
    fn encodes_multiline_replies() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::new();
        let reply = Reply::new_multiline(ReplyCode::HelpMessage, ["Commands:", "200 lines", "End"]);
        codec.encode(reply, &mut buf).unwrap();
        assert_eq!(&buf[..], b"214-Commands:\r\n 200 lines\r\n214 End\r\n");
    }

    #[test]
    fn encodes_single_line_replies() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(Reply::new(ReplyCode::CommandOkay, "OK"), &mut buf).unwrap();
        assert_eq!(&buf[..], b"200 OK\r\n");
    }
}

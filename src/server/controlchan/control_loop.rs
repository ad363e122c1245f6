use crate::server::{
    controlchan::{
        codecs::FtpCodec,
        dispatcher::Dispatcher,
        error::{ControlChanError, ControlChanErrorKind},
        event::Event,
    },
    recorder::Recordings,
    reply::{Reply, ReplyCode},
    reply_text::ReplyText,
    session::Session,
};
use futures_util::{SinkExt, StreamExt};
use std::{sync::Arc, time::Duration};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Decoder;

pub(crate) trait AsyncReadAsyncWriteSendUnpin: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> AsyncReadAsyncWriteSendUnpin for T {}

#[derive(Debug)]
pub struct Config {
    pub dispatcher: Dispatcher,
    pub greeting: String,
    pub idle_session_timeout: Duration,
    pub reply_text: Option<Arc<dyn ReplyText>>,
    pub recordings: Recordings,
    pub logger: slog::Logger,
}

/// Does the control channel processing of one connected FTP client: greets it, then runs a task
/// that dispatches its commands until it quits, idles out or a command fails fatally.
#[tracing_attributes::instrument(skip(io))]
pub async fn spawn<T>(config: Config, io: T) -> Result<(), ControlChanError>
where
    T: AsyncReadAsyncWriteSendUnpin + 'static,
{
    let Config {
        dispatcher,
        greeting,
        idle_session_timeout,
        reply_text,
        recordings,
        logger,
    } = config;

    let mut session = Session::new().reply_text(reply_text).logger(logger);
    let logger = session.log().clone();

    let (mut reply_sink, command_source) = FtpCodec::new().framed(io).split();
    reply_sink.send(Reply::new_with_string(ReplyCode::ServiceReady, greeting)).await?;
    let mut command_source = command_source.fuse();

    tokio::spawn(async move {
        // The control channel event loop
        slog::info!(logger, "Starting control loop");
        loop {
            let incoming = tokio::select! {
                incoming = command_source.next() => incoming,
                _ = tokio::time::sleep(idle_session_timeout) => {
                    Some(Err(ControlChanError::new(ControlChanErrorKind::ControlChannelTimeout)))
                }
            };

            let mut close_connection = false;
            match incoming {
                None => {
                    slog::info!(logger, "Client closed the control connection");
                    break;
                }
                Some(Ok(Event::Command(cmd))) => {
                    if let Err(err) = dispatcher.dispatch(&cmd, &mut session) {
                        slog::warn!(logger, "Closing control connection after fatal error"; "error" => %err);
                        send_or_fallback(&mut session, ReplyCode::ServiceNotAvailable, "Service not available, closing control connection.");
                        close_connection = true;
                    }
                }
                Some(Ok(Event::ParseFailure(err))) => {
                    slog::info!(logger, "Could not parse command"; "error" => %err);
                    send_or_fallback(&mut session, ReplyCode::CommandSyntaxError, "Syntax error, command unrecognized.");
                }
                Some(Err(err)) if err.kind() == &ControlChanErrorKind::ControlChannelTimeout => {
                    slog::info!(logger, "Control connection timed out");
                    send_or_fallback(&mut session, ReplyCode::ServiceNotAvailable, "Service not available, closing control connection.");
                    close_connection = true;
                }
                Some(Err(err)) => {
                    slog::warn!(logger, "Control channel error"; "error" => %err);
                    break;
                }
            }

            let mut send_failed = false;
            for reply in session.take_replies() {
                if reply_sink.feed(reply).await.is_err() {
                    send_failed = true;
                    break;
                }
            }
            if send_failed || reply_sink.flush().await.is_err() {
                slog::warn!(logger, "Could not send reply to client");
                break;
            }
            if close_connection || session.is_closed() {
                break;
            }
        }
        slog::info!(logger, "Control loop ended"; "session" => %session);
        recordings.push(session.into_recorder());
    });

    Ok(())
}

// Uses literal text when the catalog itself is unusable.
fn send_or_fallback(session: &mut Session, code: ReplyCode, fallback: &str) {
    if session.send_default_reply(code).is_err() {
        session.send_reply_text(code, fallback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{StubCommandHandler, stub::default_registry};
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    fn config(recordings: &Recordings, timeout: Duration) -> Config {
        let mut registry = default_registry();
        registry.register("SYST", StubCommandHandler::new(ReplyCode::SystemType).reply_text("UNIX Type: L8"));
        Config {
            dispatcher: Dispatcher::new(registry, None),
            greeting: "Welcome".to_string(),
            idle_session_timeout: timeout,
            reply_text: Some(Arc::new(crate::server::DefaultReplyText)),
            recordings: recordings.clone(),
            logger: slog::Logger::root(slog::Discard, slog::o!()),
        }
    }

    #[tokio::test]
    async fn greets_dispatches_and_quits() {
        let recordings = Recordings::default();
        let (client, server) = tokio::io::duplex(1024);
        spawn(config(&recordings, Duration::from_secs(5)), server).await.unwrap();

        let (read, mut write) = tokio::io::split(client);
        let mut lines = BufReader::new(read).lines();
        assert_eq!(lines.next_line().await.unwrap().unwrap(), "220 Welcome");

        write.write_all(b"syst\r\n").await.unwrap();
        assert_eq!(lines.next_line().await.unwrap().unwrap(), "215 UNIX Type: L8");

        write.write_all(b"\x01BAD\r\n").await.unwrap();
        assert!(lines.next_line().await.unwrap().unwrap().starts_with("500 "));

        write.write_all(b"QUIT\r\n").await.unwrap();
        assert!(lines.next_line().await.unwrap().unwrap().starts_with("221 "));
        assert_eq!(lines.next_line().await.unwrap(), None);

        assert_eq!(recordings.len(), 1);
        let recorder = &recordings.sessions()[0];
        assert_eq!(recorder.number_of_invocations("SYST"), 1);
    }

    #[tokio::test]
    async fn idle_clients_are_disconnected() {
        let recordings = Recordings::default();
        let (client, server) = tokio::io::duplex(1024);
        spawn(config(&recordings, Duration::from_millis(50)), server).await.unwrap();

        let mut lines = BufReader::new(client).lines();
        assert_eq!(lines.next_line().await.unwrap().unwrap(), "220 Welcome");
        assert!(lines.next_line().await.unwrap().unwrap().starts_with("421 "));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }
}

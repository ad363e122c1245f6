#![allow(missing_docs)]

mod common;

use common::{Client, quiet};
use mockftp::{
    auth::UserAccount,
    server::{Environment, MockFtpServer, ReplyCode, ScriptedReply, StubCommandHandler},
    storage::{Entry, FileSystem, Permissions},
};
use pretty_assertions::assert_eq;
use std::time::Duration;

async fn wait_for_recordings(server_recordings: &mockftp::server::Recordings, count: usize) {
    for _ in 0..50 {
        if server_recordings.len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("expected {} finished sessions, got {}", count, server_recordings.len());
}

fn fake_environment() -> Environment {
    let mut fs = FileSystem::new();
    fs.add_with_parents(Entry::directory("/home/alice").with_owner("alice")).unwrap();
    fs.add(Entry::file("/home/alice/readme.txt", "hello").with_owner("alice")).unwrap();
    fs.add(Entry::directory("/pub").with_owner("root").with_permissions(Permissions::parse("rwxr-xr-x").unwrap()))
        .unwrap();
    Environment::new(fs)
        .user_account(UserAccount::new("alice", "secret", "/home/alice"))
        .user_account(UserAccount::anonymous("anonymous", "/pub"))
}

#[tokio::test]
async fn connect_greets_the_client() {
    let addr = "127.0.0.1:2150";
    tokio::spawn(MockFtpServer::stub().logger(quiet()).greeting("Welcome test").listen(addr));

    let mut client = Client::connect(addr).await;
    let greeting = client.read().await;
    assert_eq!(greeting.code, 220);
    assert_eq!(greeting.text(), "Welcome test");
}

#[tokio::test]
async fn stub_server_records_each_invocation() {
    let addr = "127.0.0.1:2151";
    let server = MockFtpServer::stub().logger(quiet());
    let recordings = server.recordings();
    tokio::spawn(server.listen(addr));

    let mut client = Client::connect(addr).await;
    client.read().await;
    assert_eq!(client.cmd("REST marker1").await.code, 350);
    assert_eq!(client.cmd("REST marker2").await.code, 350);
    assert_eq!(client.cmd("ABOR").await.code, 226);
    assert_eq!(client.cmd("PORT 11,22,33,44,1,206").await.code, 200);
    assert_eq!(client.cmd("CWD").await.code, 501);
    assert_eq!(client.cmd("QUIT").await.code, 221);
    assert!(client.is_closed().await);

    wait_for_recordings(&recordings, 1).await;
    let session = &recordings.sessions()[0];
    assert_eq!(session.number_of_invocations("REST"), 2);
    assert_eq!(session.invocation("REST", 0).unwrap().data("marker"), Some("marker1"));
    assert_eq!(session.invocation("REST", 1).unwrap().data("marker"), Some("marker2"));
    assert_eq!(session.invocation("ABOR", 0).unwrap().data_len(), 0);
    let port = session.invocation("PORT", 0).unwrap();
    assert_eq!(port.data("host"), Some("11.22.33.44"));
    assert_eq!(port.data("port"), Some("462"));
    assert_eq!(session.number_of_invocations("CWD"), 0);
}

#[tokio::test]
async fn stub_replies_can_be_scripted() {
    let addr = "127.0.0.1:2152";
    let server = MockFtpServer::stub().logger(quiet()).register_handler(
        "PWD",
        StubCommandHandler::new(ReplyCode::DirCreated).script(vec![
            ScriptedReply::with_text(ReplyCode::DirCreated, "\"/first\""),
            ScriptedReply::new(ReplyCode::FileError),
        ]),
    );
    tokio::spawn(server.listen(addr));

    let mut client = Client::connect(addr).await;
    client.read().await;
    let first = client.cmd("PWD").await;
    assert_eq!((first.code, first.text()), (257, "\"/first\"".to_string()));
    assert_eq!(client.cmd("PWD").await.code, 550);
    assert_eq!(client.cmd("PWD").await.code, 550);
}

#[tokio::test]
async fn fake_server_keeps_state_across_commands() {
    let addr = "127.0.0.1:2153";
    let env = fake_environment();
    let fs = env.filesystem();
    tokio::spawn(MockFtpServer::fake(env).logger(quiet()).listen(addr));

    let mut client = Client::connect(addr).await;
    client.read().await;
    assert_eq!(client.cmd("PWD").await.code, 530);
    assert_eq!(client.cmd("USER alice").await.code, 331);
    assert_eq!(client.cmd("PASS secret").await.code, 230);
    assert_eq!(client.cmd("MKD reports").await.code, 257);
    assert_eq!(client.cmd("CWD reports").await.code, 250);
    assert!(client.cmd("PWD").await.text().contains("/home/alice/reports"));
    assert_eq!(client.cmd("CDUP").await.code, 200);
    assert_eq!(client.cmd("STOR new.txt").await.code, 425);
    assert_eq!(client.cmd("RNFR readme.txt").await.code, 350);
    assert_eq!(client.cmd("RNTO reports/readme.txt").await.code, 250);

    let stat = client.cmd("STAT reports").await;
    assert_eq!(stat.code, 213);
    assert!(stat.lines.iter().any(|line| line.ends_with("readme.txt")));

    assert_eq!(client.cmd("SMNT /mnt").await.code, 502);
    assert_eq!(client.cmd("XYZZY").await.code, 502);
    assert_eq!(client.cmd("QUIT").await.code, 221);

    let fs = fs.lock().unwrap();
    assert!(fs.is_file("/home/alice/reports/readme.txt"));
    assert!(!fs.exists("/home/alice/readme.txt"));
    assert_eq!(fs.resolve("/home/alice/reports").unwrap().owner(), "alice");
}

#[tokio::test]
async fn anonymous_users_log_in_with_user_alone() {
    let addr = "127.0.0.1:2154";
    tokio::spawn(MockFtpServer::fake(fake_environment()).logger(quiet()).listen(addr));

    let mut client = Client::connect(addr).await;
    client.read().await;
    assert_eq!(client.cmd("USER anonymous").await.code, 230);
    assert!(client.cmd("PWD").await.text().contains("/pub"));
    assert_eq!(client.cmd("MKD upload").await.code, 550);
}

#[tokio::test]
async fn malformed_lines_do_not_end_the_session() {
    let addr = "127.0.0.1:2155";
    tokio::spawn(MockFtpServer::fake(fake_environment()).logger(quiet()).listen(addr));

    let mut client = Client::connect(addr).await;
    client.read().await;
    assert_eq!(client.cmd("\u{1}USER alice").await.code, 500);
    assert_eq!(client.cmd("").await.code, 502);
    assert_eq!(client.cmd("NOOP").await.code, 200);
}

#[tokio::test]
async fn idle_sessions_are_closed() {
    let addr = "127.0.0.1:2156";
    tokio::spawn(MockFtpServer::stub().logger(quiet()).idle_session_timeout(1).listen(addr));

    let mut client = Client::connect(addr).await;
    client.read().await;
    assert_eq!(client.read().await.code, 421);
    assert!(client.is_closed().await);
}

#[tokio::test]
async fn a_missing_text_catalog_closes_the_connection() {
    let addr = "127.0.0.1:2157";
    tokio::spawn(MockFtpServer::stub().logger(quiet()).reply_text(None).listen(addr));

    let mut client = Client::connect(addr).await;
    client.read().await;
    assert_eq!(client.cmd("NOOP").await.code, 421);
    assert!(client.is_closed().await);
}

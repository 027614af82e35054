//! Line-oriented chat front-end over stdin/stdout.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::app::{ChatApp, Sender};
use crate::commands::{parse_slash_command, SlashCommand};
use crate::connection::AgentConnection;

const PROMPT: &str = "you> ";
const HELP_TEXT: &str = "Commands: /help, /end, /reconnect, /quit";

/// Runs the chat loop until the user quits or stdin closes.
pub async fn run(connection: Box<dyn AgentConnection>) -> io::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_with_io(connection, stdin, stdout).await
}

/// Sends are serialized by construction: the loop blocks on each connection
/// call before reading the next line, so at most one request is in flight.
async fn run_with_io<R, W>(
    mut connection: Box<dyn AgentConnection>,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut app = ChatApp::new();
    let mut printed = 0usize;

    write_line(&mut output, "Agentforce Assistant (/help for commands)").await?;
    connect(&mut app, connection.as_mut(), &mut output, &mut printed).await?;

    while !app.should_exit {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim().to_string();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = parse_slash_command(&input) {
            match command {
                SlashCommand::Help => write_line(&mut output, HELP_TEXT).await?,
                SlashCommand::End => {
                    end_session(&mut app, connection.as_mut(), &mut output, &mut printed).await?;
                }
                SlashCommand::Reconnect => {
                    reconnect(&mut app, connection.as_mut(), &mut output, &mut printed).await?;
                }
                SlashCommand::Quit => app.request_exit(),
                SlashCommand::Unknown(command) => {
                    write_line(&mut output, &format!("Unknown command: {command}")).await?;
                }
            }

            continue;
        }

        if !app.is_connected() {
            let notice = "Not connected. Use /reconnect to start a new session.";
            write_line(&mut output, notice).await?;
            continue;
        }

        if !app.begin_send(&input) {
            continue;
        }

        match connection.send(&input).await {
            Ok(reply) => app.reply_received(reply),
            Err(error) => {
                warn!("message send failed: {error}");
                app.send_failed();
            }
        }

        flush_transcript(&mut output, &app, &mut printed).await?;
    }

    if connection.is_open() {
        if let Err(error) = connection.end().await {
            debug!("session cleanup failed: {error}");
        }
    }

    Ok(())
}

async fn connect<W>(
    app: &mut ChatApp,
    connection: &mut dyn AgentConnection,
    output: &mut W,
    printed: &mut usize,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    match connection.open().await {
        Ok(greeting) => app.connection_opened(greeting),
        Err(error) => {
            warn!("failed to open session: {error}");
            app.connection_failed();
        }
    }

    flush_transcript(output, app, printed).await?;
    write_status(output, app).await
}

async fn end_session<W>(
    app: &mut ChatApp,
    connection: &mut dyn AgentConnection,
    output: &mut W,
    printed: &mut usize,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    match connection.end().await {
        Ok(()) => {
            app.session_ended();
            flush_transcript(output, app, printed).await?;
            write_line(output, "Your chat session has been ended.").await?;
            write_status(output, app).await
        }
        Err(error) => {
            warn!("failed to end session: {error}");
            write_line(output, "Failed to end session properly.").await
        }
    }
}

async fn reconnect<W>(
    app: &mut ChatApp,
    connection: &mut dyn AgentConnection,
    output: &mut W,
    printed: &mut usize,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if app.is_connected() {
        let notice = "Already connected. Use /end to end the current session first.";
        return write_line(output, notice).await;
    }

    connect(app, connection, output, printed).await
}

/// Prints transcript entries added since the last flush. User entries are
/// skipped because the prompt already echoed them. A shrunken transcript
/// means it was cleared or restarted, so printing resumes from the top.
async fn flush_transcript<W>(output: &mut W, app: &ChatApp, printed: &mut usize) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if app.transcript.len() < *printed {
        *printed = 0;
    }

    for message in &app.transcript[*printed..] {
        if message.sender == Sender::User {
            continue;
        }

        let prefix = if message.is_error { "error> " } else { "agent> " };
        output.write_all(prefix.as_bytes()).await?;
        output.write_all(message.text.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }

    *printed = app.transcript.len();
    output.flush().await
}

async fn write_status<W>(output: &mut W, app: &ChatApp) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let status = if app.is_connected() {
        "status: connected"
    } else {
        "status: disconnected (/reconnect to start a new session)"
    };

    write_line(output, status).await
}

async fn write_line<W>(output: &mut W, line: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

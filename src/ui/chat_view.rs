use std::io::{self, BufRead, Write};
use std::sync::Arc;

use chrono::Local;

use crate::api::client::ApiClient;
use crate::transcript::{
    append_user_message, new_handle, resolve_reply, Author, Message, Transcript, TranscriptHandle,
};

/// Typed on its own line, ends the session.
pub const EXIT_COMMAND: &str = "/bye";

pub struct ChatView {
    client: Arc<ApiClient>,
    transcript: TranscriptHandle,
}

impl ChatView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
            transcript: new_handle(),
        }
    }

    /// Append the user's message, then block until the reply (or apology) has been appended.
    pub fn submit(&self, text: &str) -> Option<Message> {
        append_user_message(&self.transcript, text);

        let client = self.client.clone();
        let handle = self.transcript.clone();
        let text = text.to_string();
        let rx = crate::utils::run_async_to_main(async move {
            resolve_reply(&client, handle, &text).await
        });
        match rx.recv() {
            Ok(reply) => Some(reply),
            Err(_) => {
                log::error!("reply task ended without a result");
                None
            }
        }
    }

    /// Read lines until EOF or the exit command, redrawing the transcript after each send.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "Escribe tu mensaje ({EXIT_COMMAND} para salir).")?;
        for line in input.lines() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if text == EXIT_COMMAND {
                break;
            }
            self.submit(text);
            let transcript = self.transcript.lock().unwrap_or_else(|p| p.into_inner());
            render(&transcript, &mut out)?;
        }
        Ok(())
    }
}

fn label(author: Author) -> &'static str {
    match author {
        Author::User => "Tú",
        Author::Assistant => "Asistente",
    }
}

/// Newest message first; continuation lines are indented under the label.
pub fn render<W: Write>(transcript: &Transcript, out: &mut W) -> io::Result<()> {
    writeln!(out, "────────────────────────────────")?;
    if transcript.is_empty() {
        writeln!(out, "(sin mensajes)")?;
        return Ok(());
    }
    for message in transcript.messages() {
        let time = message.timestamp.with_timezone(&Local).format("%H:%M");
        let mut lines = message.text.lines();
        writeln!(
            out,
            "[{time}] {}: {}",
            label(message.author),
            lines.next().unwrap_or_default()
        )?;
        for rest in lines {
            writeln!(out, "    {rest}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::closed_endpoint;
    use crate::api::error::APOLOGY;
    use std::io::Cursor;
    use std::time::Duration;

    fn offline_view() -> ChatView {
        let endpoint = crate::utils::RUNTIME.block_on(closed_endpoint());
        ChatView::new(ApiClient::new(vec![endpoint], Duration::from_millis(300)).unwrap())
    }

    #[test]
    fn empty_transcript_renders_placeholder() {
        let mut out = Vec::new();
        render(&Transcript::new(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(sin mensajes)"));
    }

    #[test]
    fn session_stops_at_exit_command() {
        let view = offline_view();
        let input = Cursor::new("hola\n\n   \n/bye\nno se envía\n");
        let mut out = Vec::new();

        view.run(input, &mut out).unwrap();

        let transcript = view.transcript.lock().unwrap();
        let texts: Vec<&str> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec![APOLOGY, "hola"]);

        let printed = String::from_utf8(out).unwrap();
        let assistant_at = printed.find("Asistente:").unwrap();
        let user_at = printed.find("Tú: hola").unwrap();
        assert!(assistant_at < user_at);
    }

    #[test]
    fn multi_line_replies_are_indented() {
        let handle = new_handle();
        append_user_message(&handle, "uno\ndos");
        let mut out = Vec::new();
        render(&handle.lock().unwrap(), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Tú: uno\n    dos\n"));
    }
}

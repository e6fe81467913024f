use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use study_assist::operation::CHAT;
use study_assist::{ActionInvoker, DisplayRegion, Renderer, Transport};

use super::invoke::collect_inputs;

/// Interactive chat: one message per line until EOF or `/quit`.
pub async fn repl<T: Transport, R: Renderer>(
    invoker: &ActionInvoker<T, R>,
    defaults: &HashMap<String, String>,
    region: &dyn DisplayRegion,
) -> Result<()> {
    eprintln!("Chatting with the study assistant. Type /quit or press Ctrl-D to leave.");

    loop {
        eprint!("> ");
        std::io::stderr().flush()?;

        let Some(line) = read_line().await? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "/quit" || message == "/exit" {
            break;
        }

        let inputs = collect_inputs(&CHAT, defaults, [("message", Some(message.to_owned()))]);
        // Failures are already shown in the transcript; keep the session going.
        let _ = invoker.invoke(&CHAT, &inputs, region).await;
    }

    Ok(())
}

/// Read one line from stdin off the runtime threads. `None` on EOF.
async fn read_line() -> Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        let mut buf = String::new();
        let read = std::io::stdin().read_line(&mut buf)?;
        Ok::<_, std::io::Error>((read > 0).then_some(buf))
    })
    .await??;
    Ok(line)
}

// ABOUTME: Deferred work returned from update and run by the runtime
// ABOUTME: Each future resolves to exactly one Message fed back into the loop

use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;

use crate::message::Message;

pub enum Command {
    None,
    Perform(BoxFuture<'static, Message>),
    Batch(Vec<Command>),
}

impl Command {
    pub fn perform<F>(future: F) -> Self
    where
        F: Future<Output = Message> + Send + 'static,
    {
        Command::Perform(future.boxed())
    }

    /// Deliver `message` on the next turn of the loop
    pub fn message(message: Message) -> Self {
        Command::perform(async move { message })
    }

    pub fn batch(commands: impl IntoIterator<Item = Command>) -> Self {
        let commands: Vec<Command> = commands
            .into_iter()
            .filter(|command| !command.is_none())
            .collect();
        match commands.len() {
            0 => Command::None,
            _ => Command::Batch(commands),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }

    /// Flatten into the futures to spawn, in issue order
    pub fn into_futures(self) -> Vec<BoxFuture<'static, Message>> {
        match self {
            Command::None => Vec::new(),
            Command::Perform(future) => vec![future],
            Command::Batch(commands) => commands
                .into_iter()
                .flat_map(Command::into_futures)
                .collect(),
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::None => write!(f, "Command::None"),
            Command::Perform(_) => write!(f, "Command::Perform(..)"),
            Command::Batch(commands) => f.debug_tuple("Command::Batch").field(commands).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_drops_empty_commands() {
        assert!(Command::batch([Command::None, Command::None]).is_none());

        let batch = Command::batch([
            Command::None,
            Command::message(Message::Tick),
            Command::batch([Command::message(Message::Quit)]),
        ]);
        assert_eq!(batch.into_futures().len(), 2);
    }

    #[tokio::test]
    async fn test_futures_keep_issue_order() {
        let command = Command::batch([
            Command::message(Message::Tick),
            Command::message(Message::Quit),
        ]);

        let mut results = Vec::new();
        for future in command.into_futures() {
            results.push(future.await);
        }

        assert!(matches!(results[0], Message::Tick));
        assert!(matches!(results[1], Message::Quit));
    }
}

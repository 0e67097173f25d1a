use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::{parse_local_command, LocalCommand, HELP};
use crate::output::{print_reply, print_system, spinner};
use crate::session::{Reply, Session};

pub struct InteractiveApp {
    session: Session,
}

impl InteractiveApp {
    pub fn new(session: Session) -> Self {
        print_system("💡 Type /help for commands, /config to view configuration, /quit to exit");
        Self { session }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        // Load the voice list up front so /select works immediately
        let reply = self.session.refresh_voices().await;
        print_reply(&reply);

        loop {
            let prompt = match &self.session.state.selected_voice {
                Some(voice) => format!("\x1b[35m{}>\x1b[0m ", voice.name),
                None => "\x1b[35m>\x1b[0m ".to_string(),
            };

            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(err) => match err {
                    ReadlineError::Interrupted => {
                        continue;
                    }
                    _ => break,
                },
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            rl.add_history_entry(&line)?;

            let reply = match parse_local_command(input) {
                LocalCommand::Exit => break,
                LocalCommand::Help => Reply::Info(HELP.to_string()),
                LocalCommand::Invalid(msg) => Reply::Error(msg),
                LocalCommand::Clone { sample, name } => {
                    let progress = spinner("Cloning voice...");
                    let reply = self.session.clone_voice(&sample, &name).await;
                    progress.finish_and_clear();
                    reply
                }
                LocalCommand::Voices => self.session.refresh_voices().await,
                LocalCommand::Select(selector) => self.session.select(&selector),
                LocalCommand::Say(text) => {
                    let progress = spinner("Generating audio...");
                    let reply = self.session.say(&text).await;
                    progress.finish_and_clear();
                    reply
                }
                LocalCommand::Artifacts => self.session.artifacts().await,
                LocalCommand::Play(selector) => self.session.play(selector.as_deref()).await,
                LocalCommand::Config => self.session.config(),
            };

            print_reply(&reply);
        }

        println!("\nGoodbye!");
        Ok(())
    }
}

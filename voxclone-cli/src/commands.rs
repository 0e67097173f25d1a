use std::path::PathBuf;

pub const HELP: &str = "\
/clone <sample path> <name>   Clone a voice from an audio sample
/voices                       List cloned voices
/select <number|id|name>      Select the voice used by /say
/say <text>                   Synthesize text with the selected voice (max 2000 characters)
/artifacts                    List generated audio files
/play [number|file]           Play a generated file (newest when omitted)
/config                       Show the active configuration
/help                         Show this help
/quit                         Exit";

#[derive(Debug, PartialEq, Eq)]
pub enum LocalCommand {
    Clone { sample: PathBuf, name: String },
    Voices,
    Select(String),
    Say(String),
    Artifacts,
    Play(Option<String>),
    Config,
    Help,

    /// A command to exit the app was detected
    Exit,

    /// Input that could not be parsed, with a message for the user
    Invalid(String),
}

pub fn parse_local_command(input: &str) -> LocalCommand {
    let input = input.trim();
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command {
        "/clone" => parse_clone(rest),
        "/voices" => LocalCommand::Voices,
        "/select" if !rest.is_empty() => LocalCommand::Select(rest.to_string()),
        "/select" => LocalCommand::Invalid("Usage: /select <number|id|name>".to_string()),
        "/say" if !rest.is_empty() => LocalCommand::Say(rest.to_string()),
        "/say" => LocalCommand::Invalid("Usage: /say <text>".to_string()),
        "/artifacts" => LocalCommand::Artifacts,
        "/play" => LocalCommand::Play((!rest.is_empty()).then(|| rest.to_string())),
        "/config" | "/settings" => LocalCommand::Config,
        "/help" => LocalCommand::Help,
        "/exit" | "/quit" => LocalCommand::Exit,
        _ if !command.starts_with('/') => LocalCommand::Say(input.to_string()),
        _ => LocalCommand::Invalid(format!("Unknown command {command}. Type /help")),
    }
}

fn parse_clone(rest: &str) -> LocalCommand {
    let Some((sample, name)) = rest.split_once(char::is_whitespace) else {
        return LocalCommand::Invalid("Usage: /clone <sample path> <name>".to_string());
    };

    LocalCommand::Clone {
        sample: PathBuf::from(sample),
        name: name.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clone() {
        assert_eq!(
            parse_local_command("/clone samples/me.wav  My Voice"),
            LocalCommand::Clone {
                sample: PathBuf::from("samples/me.wav"),
                name: "My Voice".to_string()
            }
        );
        assert!(matches!(
            parse_local_command("/clone samples/me.wav"),
            LocalCommand::Invalid(_)
        ));
    }

    #[test]
    fn test_parse_say_keeps_text_verbatim() {
        assert_eq!(
            parse_local_command("/say Hello,   world!"),
            LocalCommand::Say("Hello,   world!".to_string())
        );
        assert_eq!(
            parse_local_command("plain text is spoken"),
            LocalCommand::Say("plain text is spoken".to_string())
        );
        assert!(matches!(parse_local_command("/say"), LocalCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_local_command("/voices"), LocalCommand::Voices);
        assert_eq!(parse_local_command(" /artifacts "), LocalCommand::Artifacts);
        assert_eq!(parse_local_command("/play"), LocalCommand::Play(None));
        assert_eq!(
            parse_local_command("/play 2"),
            LocalCommand::Play(Some("2".to_string()))
        );
        assert_eq!(
            parse_local_command("/select Narrator"),
            LocalCommand::Select("Narrator".to_string())
        );
        assert_eq!(parse_local_command("/settings"), LocalCommand::Config);
        assert_eq!(parse_local_command("/quit"), LocalCommand::Exit);
        assert!(matches!(parse_local_command("/bogus"), LocalCommand::Invalid(_)));
    }
}

//! Fixed-token command parsing.
//!
//! Input is lowercased and split on whitespace. Only the first three tokens
//! matter: a verb and up to two arguments. Anything beyond is ignored.

/// Command reference shown for `help`.
pub const HELP_TEXT: &str = "\
Commands:
  go <direction>           walk through the door in that direction
  pick <tool>              put a tool from the room into your backpack
  use <tool>               use a tool on its own (opens oxygen cylinders)
  use <tool> <object>      use a tool on an object in the room
  use <key> <direction>    try a key on a locked door
  inventory                list what you are carrying
  help                     show this list
  quit                     give up

Every move costs air. When a room runs out, the first cylinder in your
backpack is opened automatically. Some cylinders are contaminated.";

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go { direction: String },
    Pick { tool: String },
    Use { tool: String, target: Option<String> },
    Inventory,
    Help,
    Quit,
    /// Blank line.
    Empty,
    /// A known verb without the argument it needs.
    Missing { verb: String },
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let lowered = line.to_lowercase();
        let mut tokens = lowered.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Command::Empty;
        };
        let arg1 = tokens.next().map(str::to_string);
        let arg2 = tokens.next().map(str::to_string);

        let missing = || Command::Missing {
            verb: verb.to_string(),
        };
        match verb {
            "go" => arg1.map_or_else(missing, |direction| Command::Go { direction }),
            "pick" => arg1.map_or_else(missing, |tool| Command::Pick { tool }),
            "use" => arg1.map_or_else(missing, |tool| Command::Use { tool, target: arg2 }),
            "inventory" => Command::Inventory,
            "help" => Command::Help,
            "quit" | "end" => Command::Quit,
            _ => Command::Invalid(line.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go() {
        assert_eq!(
            Command::parse("go north"),
            Command::Go {
                direction: "north".into()
            }
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            Command::parse("  PICK   Flashlight "),
            Command::Pick {
                tool: "flashlight".into()
            }
        );
    }

    #[test]
    fn test_parse_use_with_and_without_target() {
        assert_eq!(
            Command::parse("use star-tracker ship"),
            Command::Use {
                tool: "star-tracker".into(),
                target: Some("ship".into())
            }
        );
        assert_eq!(
            Command::parse("use cylinder-1"),
            Command::Use {
                tool: "cylinder-1".into(),
                target: None
            }
        );
    }

    #[test]
    fn test_extra_tokens_ignored() {
        assert_eq!(
            Command::parse("go north quickly please"),
            Command::Go {
                direction: "north".into()
            }
        );
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            Command::parse("go"),
            Command::Missing { verb: "go".into() }
        );
        assert_eq!(
            Command::parse("use"),
            Command::Missing { verb: "use".into() }
        );
    }

    #[test]
    fn test_simple_verbs() {
        assert_eq!(Command::parse("inventory"), Command::Inventory);
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("end"), Command::Quit);
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(Command::parse("dance"), Command::Invalid("dance".into()));
    }
}

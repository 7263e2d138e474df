//! Parsing of the interactive `play` prompt.

use creativerse::{StoryPath, Visibility};

/// One line typed at the play prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    /// Choose an option of the newest round (zero-based)
    Pick(usize),
    /// Print the story tree
    Tree,
    /// Print the chosen chapters
    Story,
    /// Revisit an earlier decision
    Switch(StoryPath),
    /// Rewrite a chapter
    Edit {
        /// Chapter to rewrite
        path: StoryPath,
        /// New title
        title: String,
        /// New body
        body: String,
    },
    /// Ask for comments on a draft rewrite
    Feedback {
        /// Chapter being rewritten
        path: StoryPath,
        /// Draft title
        title: String,
        /// Draft body
        body: String,
    },
    /// Save the finished story
    Save(Visibility),
    /// Clear error and notification banners
    Dismiss,
    /// Start over with the same settings
    Restart,
    /// Show the command list
    Help,
    /// Leave without saving
    Quit,
}

pub const HELP: &str = "\
Commands:
  <n> | pick <n>                 choose option n of the current round
  tree                           show every generated chapter
  story                          show the chapters chosen so far
  switch <path>                  go back to a decision, e.g. `switch 0-1` or `switch root`
  edit <path> \"title\" \"body\"     rewrite a chapter and redraw its picture
  feedback <path> \"title\" \"body\" get comments on a rewrite without applying it
  save [private]                 save the finished story to the gallery
  dismiss                        clear messages
  restart                        start the story over
  help                           show this list
  quit                           leave without saving";

/// Split a line on whitespace, keeping double-quoted runs together.
pub fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err("Unclosed quote".to_string());
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

fn parse_path(arg: Option<&String>) -> Result<StoryPath, String> {
    arg.ok_or_else(|| "Expected a chapter path such as 0-1".to_string())?
        .parse()
}

fn parse_pick(arg: &str) -> Result<PlayCommand, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(PlayCommand::Pick(n - 1)),
        _ => Err(format!("'{}' is not an option number", arg)),
    }
}

fn parse_rewrite(args: &[String]) -> Result<(StoryPath, String, String), String> {
    match args {
        [path, title, body] => Ok((parse_path(Some(path))?, title.clone(), body.clone())),
        _ => Err("Expected <path> \"title\" \"body\"".to_string()),
    }
}

/// Parse one prompt line.
pub fn parse_line(line: &str) -> Result<PlayCommand, String> {
    let args = split_args(line)?;
    let Some((command, rest)) = args.split_first() else {
        return Err("Type `help` for the list of commands".to_string());
    };

    match command.to_lowercase().as_str() {
        "pick" => parse_pick(rest.first().map(String::as_str).unwrap_or_default()),
        "tree" => Ok(PlayCommand::Tree),
        "story" => Ok(PlayCommand::Story),
        "switch" => Ok(PlayCommand::Switch(parse_path(rest.first())?)),
        "edit" => {
            let (path, title, body) = parse_rewrite(rest)?;
            Ok(PlayCommand::Edit { path, title, body })
        }
        "feedback" => {
            let (path, title, body) = parse_rewrite(rest)?;
            Ok(PlayCommand::Feedback { path, title, body })
        }
        "save" => match rest.first().map(|s| s.to_lowercase()).as_deref() {
            None | Some("public") => Ok(PlayCommand::Save(Visibility::Public)),
            Some("private") => Ok(PlayCommand::Save(Visibility::Private)),
            Some(other) => Err(format!("Unknown visibility '{}'", other)),
        },
        "dismiss" => Ok(PlayCommand::Dismiss),
        "restart" => Ok(PlayCommand::Restart),
        "help" | "?" => Ok(PlayCommand::Help),
        "quit" | "exit" => Ok(PlayCommand::Quit),
        other if other.chars().all(|c| c.is_ascii_digit()) => parse_pick(other),
        other => Err(format!("Unknown command '{}'. Type `help`", other)),
    }
}

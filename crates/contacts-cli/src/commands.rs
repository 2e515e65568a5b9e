//! Command parsing for the interactive loop

use anyhow::{Result, anyhow, bail};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  list          show the current page
  next, prev    move between pages
  page <n>      jump to page n (1-based)
  add           add a contact
  edit <id>     edit a contact
  delete <id>   delete a contact (asks first)
  refresh       reload contacts from the store
  help          show this text
  quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Next,
    Prev,
    /// Zero-based page index
    Page(usize),
    Add,
    Edit(String),
    Delete(String),
    Refresh,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };
        let arg = words.next();
        if words.next().is_some() {
            bail!("too many arguments to '{}'", name);
        }

        let command = match (name.to_lowercase().as_str(), arg) {
            ("list" | "ls", None) => Command::List,
            ("next" | "n", None) => Command::Next,
            ("prev" | "p", None) => Command::Prev,
            ("page", Some(n)) => {
                let n: usize = n
                    .parse()
                    .map_err(|_| anyhow!("page must be a number, got '{}'", n))?;
                if n == 0 {
                    bail!("pages start at 1");
                }
                Command::Page(n - 1)
            }
            ("add", None) => Command::Add,
            ("edit", Some(id)) => Command::Edit(id.to_string()),
            ("delete" | "rm", Some(id)) => Command::Delete(id.to_string()),
            ("refresh", None) => Command::Refresh,
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit" | "q", None) => Command::Quit,
            ("page" | "edit" | "delete" | "rm", None) => bail!("'{}' needs an argument", name),
            (_, Some(_)) if is_known(name) => bail!("'{}' takes no argument", name),
            _ => bail!("unknown command '{}', try 'help'", name),
        };

        Ok(command)
    }
}

fn is_known(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "list" | "ls" | "next" | "n" | "prev" | "p" | "add" | "refresh" | "help" | "?" | "quit"
            | "exit" | "q"
    )
}

/// True for "y" / "yes", case-insensitively
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("list".parse::<Command>().unwrap(), Command::List);
        assert_eq!("  NEXT ".parse::<Command>().unwrap(), Command::Next);
        assert_eq!("page 3".parse::<Command>().unwrap(), Command::Page(2));
        assert_eq!(
            "delete 7".parse::<Command>().unwrap(),
            Command::Delete("7".to_string())
        );
        assert_eq!("edit 12".parse::<Command>().unwrap(), Command::Edit("12".to_string()));
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("page".parse::<Command>().is_err());
        assert!("page 0".parse::<Command>().is_err());
        assert!("page two".parse::<Command>().is_err());
        assert!("list 2".parse::<Command>().is_err());
        assert!("delete 1 2".parse::<Command>().is_err());
        assert!("frobnicate".parse::<Command>().is_err());
    }

    #[test]
    fn confirmation_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" Yes\n"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}

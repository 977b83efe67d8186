use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use gallery_core::{FileSelection, Msg};

use crate::app::AppMsg;
use crate::media;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Choose(Vec<PathBuf>),
    Upload,
    Classify,
    Send,
    Help,
    Quit,
}

/// Parses one console line. Unknown verbs return `None`.
pub fn parse_line(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;
    match verb {
        "choose" => Some(Command::Choose(words.map(PathBuf::from).collect())),
        "upload" => Some(Command::Upload),
        "classify" => Some(Command::Classify),
        "send" => Some(Command::Send),
        "help" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Builds the selection the file input would hand over for `path`.
pub fn selection_from_path(path: PathBuf) -> FileSelection {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string());
    let media_type = media::guess_media_type(&path).to_string();
    FileSelection {
        name,
        media_type,
        path,
    }
}

fn command_to_msg(command: Command) -> Option<Msg> {
    match command {
        Command::Choose(paths) => Some(Msg::FilesChosen(
            paths.into_iter().map(selection_from_path).collect(),
        )),
        Command::Upload => Some(Msg::UploadSubmitted),
        Command::Classify => Some(Msg::ClassifyClicked),
        Command::Send => Some(Msg::EchoClicked),
        Command::Help | Command::Quit => None,
    }
}

pub fn print_help() {
    println!("commands:");
    println!("  choose <path>...   pick files for the upload form");
    println!("  upload             submit the form");
    println!("  classify           classify the last uploaded image");
    println!("  send               emit the fixed echo message");
    println!("  help               show this list");
    println!("  quit               leave");
}

/// Reads console lines until EOF or `quit`, funneling them into the main
/// loop as messages.
pub fn spawn_stdin_reader(tx: mpsc::Sender<AppMsg>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Some(Command::Quit) => break,
                Some(Command::Help) => print_help(),
                Some(command) => {
                    let Some(msg) = command_to_msg(command) else {
                        continue;
                    };
                    if tx.send(AppMsg::Core(msg)).is_err() {
                        break;
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        println!("unknown command; try 'help'");
                    }
                }
            }
        }
        let _ = tx.send(AppMsg::Quit);
    })
}

//! Interactive menu loop.
//!
//! Thin collaborator over [`Library`]: it prompts, echoes outcome
//! messages, and loops until the exit command. Every decision that
//! mutates the catalog is made by the library; the menu only relays
//! the user's answers into the injected callbacks.

use std::io::{self, BufRead, Write};
use std::path::Path;

use shelfmark_catalog::error::Result;
use shelfmark_catalog::{Book, Library, Recovery, SearchField};

/// Run the menu loop until the user exits or input runs dry.
pub fn run(mut library: Library) -> Result<()> {
    loop {
        println!();
        println!("Menu:");
        println!("1. Add a book");
        println!("2. Remove a book");
        println!("3. Search for books");
        println!("4. Show all books");
        println!("5. Change a book's status");
        println!("6. Exit");
        let Some(choice) = prompt("Choose an action: ") else { return Ok(()) };

        match choice.trim() {
            "1" => {
                let Some(title) = prompt("Title: ") else { return Ok(()) };
                let Some(author) = prompt("Author: ") else { return Ok(()) };
                let Some(year) = prompt("Publication year: ") else { return Ok(()) };
                let outcome = library.add(&title, &author, &year)?;
                println!("{outcome}");
            }
            "2" => {
                let Some(id) = prompt("Id of the book to remove: ") else { return Ok(()) };
                let outcome = library.remove(&id, confirm_removal)?;
                println!("{outcome}");
            }
            "3" => {
                if !search(&library) {
                    return Ok(());
                }
            }
            "4" => {
                if library.is_empty() {
                    println!("The catalog is empty.");
                } else {
                    for book in library.books() {
                        println!("{book}");
                    }
                }
            }
            "5" => {
                let Some(id) = prompt("Id of the book: ") else { return Ok(()) };
                let Some(status) = prompt("New status ('available' or 'checked_out'): ") else {
                    return Ok(());
                };
                let outcome = library.change_status(&id, &status)?;
                println!("{outcome}");
            }
            "6" => {
                println!("Goodbye.");
                return Ok(());
            }
            _ => println!("Error: invalid choice, try again."),
        }
    }
}

/// Search submenu. Returns `false` when input ran dry and the caller
/// should exit.
fn search(library: &Library) -> bool {
    if library.is_empty() {
        println!("The catalog is empty. Nothing to search.");
        return true;
    }
    println!();
    println!("Search:");
    println!("1. By author");
    println!("2. By title");
    println!("3. By year");
    let Some(choice) = prompt("Choose a search criterion: ") else { return false };
    let (field, question) = match choice.trim() {
        "1" => (SearchField::Author, "Author name: "),
        "2" => (SearchField::Title, "Book title: "),
        "3" => (SearchField::Year, "Publication year: "),
        _ => {
            println!("Error: invalid choice.");
            return true;
        }
    };
    let Some(value) = prompt(question) else { return false };

    let found = library.search(field, &value);
    if found.is_empty() {
        println!("No books found.");
    } else {
        for book in found {
            println!("{book}");
        }
    }
    true
}

/// Destructive-action confirmation handed to [`Library::remove`].
fn confirm_removal(book: &Book) -> bool {
    println!("About to remove: {book}");
    ask_yes_no("Are you sure? (y/n): ")
}

/// Corrupt-document recovery choice handed to [`Library::open`].
pub fn ask_recovery(path: &Path) -> Recovery {
    println!("The catalog document at {} is corrupt or unreadable.", path.display());
    if ask_yes_no("Discard it and start with an empty catalog? (y/n): ") {
        Recovery::Reinitialize
    } else {
        Recovery::Abort
    }
}

fn ask_yes_no(question: &str) -> bool {
    match prompt(question) {
        Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        // Input ran dry; the safe reading of silence is "no".
        None => false,
    }
}

/// Print a prompt and read one line, without its trailing newline.
///
/// Returns `None` on end of input, which callers treat as a request to
/// leave whatever they were doing.
fn prompt(message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }
            Some(line)
        }
    }
}

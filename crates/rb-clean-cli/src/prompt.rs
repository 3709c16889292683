use rb_clean_core::common_root::nearest_directory;
use rb_clean_core::location::lexical_normalize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

fn read_line(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        ));
    }
    Ok(line)
}

pub fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let stdin = io::stdin();
    confirm_from(&mut stdin.lock(), prompt, default)
}

fn confirm_from(input: &mut impl BufRead, prompt: &str, default: Option<bool>) -> io::Result<bool> {
    loop {
        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) => print!("{} (y/N): ", prompt),
            None => print!("{} (y/n): ", prompt),
        }
        io::stdout().flush()?;

        match read_line(input)?.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => {
                println!("Please enter 'Y' or 'N' to answer the question");
                continue;
            }
        }
    }
}

/// Ask the user for the folder to clean, starting from the common folder of
/// all files in the XML. Only existing folders are accepted.
pub fn select_root(common_root: &str) -> io::Result<PathBuf> {
    let stdin = io::stdin();
    select_root_from(&mut stdin.lock(), common_root)
}

fn select_root_from(input: &mut impl BufRead, common_root: &str) -> io::Result<PathBuf> {
    let base = nearest_directory(common_root).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "the common folder of the XML paths ('{}') does not exist on this machine, use --root",
                common_root
            ),
        )
    })?;

    println!(
        "\nSet the folder you want to clean, relative to the common folder for all the files in the XML file. \
         Leave it empty to clean the common folder itself.\n"
    );

    loop {
        let subfolders = list_subfolders(&base);
        if !subfolders.is_empty() {
            println!("Folders in {}:", base.display());
            for name in &subfolders {
                println!("  {}", name);
            }
        }

        println!("SELECT THE PATH:");
        print!("{}", with_trailing_separator(&base));
        io::stdout().flush()?;

        let answer = read_line(input)?;
        let relative = answer.trim();
        let candidate = if relative.is_empty() {
            base.clone()
        } else {
            lexical_normalize(&base.join(relative))
        };

        if !candidate.is_dir() {
            println!("The path does not exist. Please enter a valid path.\n");
            continue;
        }

        println!("\nThe selected path is\n{}", candidate.display());
        if confirm_from(input, "IS THE PATH OKAY?", None)? {
            return Ok(candidate);
        }
    }
}

fn with_trailing_separator(path: &Path) -> String {
    let mut shown = path.display().to_string();
    if !shown.ends_with(std::path::MAIN_SEPARATOR) {
        shown.push(std::path::MAIN_SEPARATOR);
    }
    shown
}

/// Names of the directories directly under `dir`, sorted. Unreadable entries are ignored.
fn list_subfolders(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

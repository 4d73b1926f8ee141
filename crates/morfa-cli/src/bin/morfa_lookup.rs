// morfa-lookup: Look words up in a dictionary.
//
// Prints one `word<TAB>stem<TAB>tag` line per reading, `-` for absent
// segments. Unknown words print as `word<TAB>-`.
//
// Usage:
//   morfa-lookup [-d DICT] [WORD...]
//
// Options:
//   -d, --dict-path PATH   Dictionary file (default: $MORFA_DICT)
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use morfa_dict::DictionaryLookup;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = morfa_cli::parse_dict_path(&args);

    if morfa_cli::wants_help(&args) {
        println!("morfa-lookup: Look words up in a morfa dictionary.");
        println!();
        println!("Usage: morfa-lookup [-d DICT] [WORD...]");
        println!();
        println!("If WORD arguments are given, looks up each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary file (default: $MORFA_DICT)");
        println!("  -h, --help             Print this help");
        return;
    }

    let words: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let dict = morfa_cli::load_dictionary(dict_path.as_deref())
        .unwrap_or_else(|e| morfa_cli::fatal(&e));
    let mut engine = dict.lookup_engine();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            lookup_word(&mut engine, word, &mut out);
        }
    } else {
        for word in &words {
            lookup_word(&mut engine, word, &mut out);
        }
    }
}

fn lookup_word(engine: &mut DictionaryLookup<'_>, word: &str, out: &mut impl Write) {
    match engine.lookup(word) {
        Ok(readings) if readings.is_empty() => {
            let _ = writeln!(out, "{word}\t-");
        }
        Ok(readings) => {
            for wd in &readings {
                let line = morfa_cli::format_entry(wd.word(), wd.stem(), wd.tag());
                let _ = writeln!(out, "{line}");
            }
        }
        Err(e) => eprintln!("{word}: {e}"),
    }
}

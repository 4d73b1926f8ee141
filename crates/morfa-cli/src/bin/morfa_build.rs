// morfa-build: Compile a tab-separated entry list into a dictionary.
//
// Reads `word<TAB>stem<TAB>tag` lines from stdin (in any order; each line
// needs a stem or a tag) and writes OUTPUT.dict plus its OUTPUT.info metadata.
//
// Usage:
//   morfa-build -o OUTPUT [-m METADATA.json] [-e ENCODER] [-s SEP] [-c CHARSET]
//
// Options:
//   -o, --output PATH      Output dictionary file (`.dict` is added if missing)
//   -m, --metadata PATH    Metadata JSON to start from
//   -e, --encoder NAME     SUFFIX, PREFIX or INFIX
//   -s, --separator CHAR   Segment separator
//   -c, --encoding NAME    Charset of the dictionary
//   -h, --help             Print help

use std::io::{self, BufRead};
use std::path::PathBuf;

use morfa_dict::{Codec, Dictionary};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if morfa_cli::wants_help(&args) {
        println!("morfa-build: Compile a tab-separated entry list into a dictionary.");
        println!();
        println!("Usage: morfa-build -o OUTPUT [-m METADATA.json] [-e ENCODER] [-s SEP] [-c CHARSET]");
        println!();
        println!("Reads `word<TAB>stem<TAB>tag` lines from stdin. Writes OUTPUT.dict");
        println!("and the metadata next to it as OUTPUT.info.");
        println!();
        println!("Options:");
        println!("  -o, --output PATH      Output dictionary file");
        println!("  -m, --metadata PATH    Metadata JSON to start from");
        println!("  -e, --encoder NAME     SUFFIX, PREFIX or INFIX (default SUFFIX)");
        println!("  -s, --separator CHAR   Segment separator (default +)");
        println!("  -c, --encoding NAME    Charset (default UTF-8)");
        println!("  -h, --help             Print this help");
        return;
    }

    let (output, args) = morfa_cli::parse_option(&args, "--output", "-o");
    let (metadata_path, args) = morfa_cli::parse_option(&args, "--metadata", "-m");
    let (encoder, args) = morfa_cli::parse_option(&args, "--encoder", "-e");
    let (separator, args) = morfa_cli::parse_option(&args, "--separator", "-s");
    let (encoding, args) = morfa_cli::parse_option(&args, "--encoding", "-c");
    if let Some(unknown) = args.first() {
        morfa_cli::fatal(&format!("unexpected argument: {unknown}"));
    }

    let Some(output) = output else {
        morfa_cli::fatal("missing --output");
    };
    let mut output = PathBuf::from(output);
    if output.extension().is_none() {
        output.set_extension(morfa_cli::DICT_EXT);
    }

    let mut metadata = match metadata_path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| morfa_cli::fatal(&format!("failed to read {path}: {e}")));
            morfa_cli::parse_metadata(&text).unwrap_or_else(|e| morfa_cli::fatal(&e))
        }
        None => Default::default(),
    };
    if let Some(name) = encoder {
        metadata.encoder = Codec::from_name(&name)
            .unwrap_or_else(|| morfa_cli::fatal(&format!("unknown encoder: {name}")));
    }
    if let Some(sep) = separator {
        let mut chars = sep.chars();
        metadata.separator = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => morfa_cli::fatal("--separator must be a single character"),
        };
    }
    if let Some(name) = encoding {
        metadata.encoding = name;
    }

    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        match line {
            Ok(l) => lines.push(l),
            Err(e) => morfa_cli::fatal(&format!("error reading stdin: {e}")),
        }
    }
    let entries = lines.iter().filter_map(|l| morfa_cli::parse_entry_line(l));

    let dict =
        Dictionary::build(entries, metadata).unwrap_or_else(|e| morfa_cli::fatal(&e.to_string()));
    morfa_cli::save_dictionary(&dict, &output).unwrap_or_else(|e| morfa_cli::fatal(&e));

    let stats = dict.fsa().stats();
    eprintln!(
        "{}: {} entries, {} states, {} arcs",
        output.display(),
        stats.sequences,
        stats.states,
        stats.arcs
    );
}

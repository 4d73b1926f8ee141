// morfa-dump: Print every entry of a dictionary.
//
// Output is tab-separated `word<TAB>stem<TAB>tag`, `-` for absent segments,
// in the byte order of the stored sequences. The output can be fed back
// into morfa-build after replacing `-` fields.
//
// Usage:
//   morfa-dump [-d DICT] [--stats]
//
// Options:
//   -d, --dict-path PATH   Dictionary file (default: $MORFA_DICT)
//   --stats                Print automaton statistics instead of entries
//   -h, --help             Print help

use std::io::{self, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = morfa_cli::parse_dict_path(&args);

    if morfa_cli::wants_help(&args) {
        println!("morfa-dump: Print every entry of a morfa dictionary.");
        println!();
        println!("Usage: morfa-dump [-d DICT] [--stats]");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary file (default: $MORFA_DICT)");
        println!("  --stats                Print automaton statistics instead of entries");
        println!("  -h, --help             Print this help");
        return;
    }

    let dict = morfa_cli::load_dictionary(dict_path.as_deref())
        .unwrap_or_else(|e| morfa_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if morfa_cli::has_flag(&args, "--stats") {
        let stats = dict.fsa().stats();
        let metadata = dict.metadata();
        let _ = writeln!(out, "entries:   {}", stats.sequences);
        let _ = writeln!(out, "states:    {}", stats.states);
        let _ = writeln!(out, "arcs:      {}", stats.arcs);
        let _ = writeln!(out, "encoder:   {}", metadata.encoder);
        let _ = writeln!(out, "encoding:  {}", metadata.encoding);
        let _ = writeln!(out, "separator: {}", metadata.separator);
        return;
    }

    let mut cursor = dict.cursor();
    while let Some(entry) = cursor.advance() {
        let line = morfa_cli::format_entry(entry.word(), entry.stem(), entry.tag());
        if writeln!(out, "{line}").is_err() {
            // Broken pipe (e.g. `| head`).
            break;
        }
    }
}

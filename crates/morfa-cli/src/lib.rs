// morfa-cli: shared utilities for CLI tools.
//
// A dictionary on disk is a pair of files: `NAME.dict` holds the binary
// automaton and `NAME.info` holds the metadata as JSON. A missing `.info`
// file means default metadata.

use std::path::{Path, PathBuf};
use std::process;

use morfa_dict::{Dictionary, DictionaryMetadata};

/// Extension of the binary automaton file.
pub const DICT_EXT: &str = "dict";

/// Extension of the metadata file stored next to it.
pub const INFO_EXT: &str = "info";

/// Environment variable consulted when no dictionary path is given.
pub const DICT_ENV: &str = "MORFA_DICT";

/// The metadata file belonging to a `.dict` file.
pub fn info_path(dict_path: &Path) -> PathBuf {
    dict_path.with_extension(INFO_EXT)
}

/// Locate and load a dictionary.
///
/// Uses `dict_path` if given, otherwise the `MORFA_DICT` environment
/// variable.
pub fn load_dictionary(dict_path: Option<&str>) -> Result<Dictionary, String> {
    let path = match dict_path {
        Some(p) => PathBuf::from(p),
        None => std::env::var(DICT_ENV)
            .map(PathBuf::from)
            .map_err(|_| format!("no dictionary given (use -d PATH or set {DICT_ENV})"))?,
    };
    load_dictionary_from(&path)
}

/// Load `path` and the metadata stored next to it.
pub fn load_dictionary_from(path: &Path) -> Result<Dictionary, String> {
    let data =
        std::fs::read(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

    let info = info_path(path);
    let metadata = if info.is_file() {
        let text = std::fs::read_to_string(&info)
            .map_err(|e| format!("failed to read {}: {}", info.display(), e))?;
        parse_metadata(&text).map_err(|e| format!("{}: {}", info.display(), e))?
    } else {
        DictionaryMetadata::default()
    };

    Dictionary::from_bytes(&data, metadata)
        .map_err(|e| format!("failed to load {}: {}", path.display(), e))
}

/// Write `dict` to `path` and its metadata to the matching `.info` file.
pub fn save_dictionary(dict: &Dictionary, path: &Path) -> Result<(), String> {
    std::fs::write(path, dict.fsa().to_bytes())
        .map_err(|e| format!("failed to write {}: {}", path.display(), e))?;

    let info = info_path(path);
    let json = serde_json::to_string_pretty(dict.metadata())
        .map_err(|e| format!("failed to serialize metadata: {e}"))?;
    std::fs::write(&info, json + "\n")
        .map_err(|e| format!("failed to write {}: {}", info.display(), e))
}

/// Parse metadata JSON. Missing fields take their defaults.
pub fn parse_metadata(text: &str) -> Result<DictionaryMetadata, String> {
    serde_json::from_str(text).map_err(|e| format!("invalid metadata: {e}"))
}

/// Split a tab-separated `word [TAB stem [TAB tag]]` line.
///
/// Empty fields read as absent. Returns `None` for blank lines.
pub fn parse_entry_line(line: &str) -> Option<(&str, Option<&str>, Option<&str>)> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let mut fields = line.splitn(3, '\t');
    let word = fields.next()?;
    let stem = fields.next().filter(|s| !s.is_empty());
    let tag = fields.next().filter(|s| !s.is_empty());
    Some((word, stem, tag))
}

/// Format one reading as a tab-separated line, `-` standing for absent segments.
pub fn format_entry(word: &str, stem: Option<&str>, tag: Option<&str>) -> String {
    format!("{}\t{}\t{}", word, stem.unwrap_or("-"), tag.unwrap_or("-"))
}

/// Parse a `--long=VALUE`, `--long VALUE` or `-s VALUE` option.
///
/// Returns `(value, remaining_args)`. The last occurrence wins.
pub fn parse_option(args: &[String], long: &str, short: &str) -> (Option<String>, Vec<String>) {
    let mut value = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;
    let prefix = format!("{long}=");

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || arg == short {
            if i + 1 < args.len() {
                value = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                eprintln!("error: {} requires a value", arg);
                process::exit(1);
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (value, remaining)
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    parse_option(args, "--dict-path", "-d")
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Check if a flag without a value is in the args.
pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

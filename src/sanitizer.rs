//! Source-line sanitizing for embedding in the output document.
//!
//! Raw lines lifted from source files can carry comment syntax and double
//! quotes that would garble the single-quoted step text in the document.
//! The sanitizer strips them with a fixed chain of patterns; it makes no
//! attempt to parse the language.

use regex::Regex;
use std::sync::LazyLock;

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*?\*/").expect("block comment pattern"));
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//.*$").expect("line comment pattern"));
static OPEN_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*$").expect("open block pattern"));
static CLOSE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*?\*/").expect("close block pattern"));
static STRAY_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*.*$").expect("stray star pattern"));

/// Strip comment markers and double quotes from one raw source line.
///
/// Block comments are removed, `//` comments are cut to end of line, dangling
/// `/*` and `*/` delimiters are dropped together with everything they hide,
/// any remaining `*` takes the rest of the line with it, double quotes become
/// single quotes and the result is trimmed. Lines that are entirely comment
/// collapse to `""`. Callers must check for an absent line before calling;
/// the function itself is total.
///
/// The stray-star rule is deliberately crude and also eats multiplication
/// expressions; downstream consumers rely on the historical behavior.
///
/// # Example
///
/// ```
/// use trenzar::sanitizer::sanitize_line;
///
/// assert_eq!(sanitize_line("x = 1; // init"), "x = 1;");
/// assert_eq!(sanitize_line("/* all comment */"), "");
/// assert_eq!(sanitize_line("print(\"done\")"), "print('done')");
/// ```
pub fn sanitize_line(raw: &str) -> String {
    let pass = BLOCK_COMMENT.replace_all(raw, "");
    let pass = LINE_COMMENT.replace_all(&pass, "");
    let pass = OPEN_BLOCK.replace_all(&pass, "");
    let pass = CLOSE_BLOCK.replace_all(&pass, "");
    let pass = STRAY_STAR.replace_all(&pass, "");
    pass.replace('"', "'").trim().to_string()
}

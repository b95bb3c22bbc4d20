pub mod explain;
pub mod installed;
pub mod resolve;
pub mod resolve_all;
pub mod root;
pub mod version;

use bowerpath_core::Error;

/// Report a hard error and exit with status 1.
///
/// JSON mode prints `{"ok": false, "error": {...}}` to stdout; otherwise the
/// message goes to stderr.
pub fn fail(err: &Error, json: bool) -> ! {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": false,
                "error": {
                    "code": err.code(),
                    "message": err.to_string()
                }
            })
        );
    } else {
        eprintln!("error: {err}");
    }
    std::process::exit(1);
}

//! `bowerpath root` command implementation.

use bowerpath_core::{find_project_root_until, ResolveOptions};
use miette::Result;

/// Print the discovered project root and dependency directory.
pub fn run(options: &ResolveOptions, json: bool) -> Result<()> {
    let base = options.base_path();
    let root = find_project_root_until(&base, options.ceiling_path().as_deref());

    if json {
        let body = match &root {
            Some(root) => serde_json::json!({
                "ok": true,
                "found": true,
                "root": root.dir.to_string_lossy(),
                "directory": root.directory,
                "components_dir": root.components_dir().to_string_lossy(),
                "from_bowerrc": root.from_bowerrc
            }),
            None => serde_json::json!({
                "ok": true,
                "found": false,
                "start": base.to_string_lossy()
            }),
        };
        println!("{body}");
        return Ok(());
    }

    match root {
        Some(root) => {
            println!("Project root:   {}", root.dir.display());
            let source = if root.from_bowerrc { " (from .bowerrc)" } else { "" };
            println!("Components dir: {}{source}", root.components_dir().display());
        }
        None => {
            println!("No bower project found above {}", base.display());
            println!("hint: a project has a bower.json, .bowerrc or bower_components directory");
        }
    }

    Ok(())
}

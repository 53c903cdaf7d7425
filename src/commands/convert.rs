//! The conversion command: read HTML, write Markdown (or the AST).

use std::io::Read;
use std::path::Path;

/// Runs a conversion from `input` (stdin when `None`) to `output`
/// (stdout when `None`). With `ast` set, emits the normalized document
/// tree as JSON instead of Markdown.
///
/// # Errors
///
/// Returns an error string naming the offending path on I/O failure, or
/// describing the stage that rejected the document.
pub fn run(input: Option<&Path>, output: Option<&Path>, ast: bool) -> Result<(), String> {
    let source = read_source(input)?;

    let rendered = if ast {
        let document = crate::parse_document(&source).map_err(|e| e.to_string())?;
        let mut json = serde_json::to_string_pretty(&document)
            .map_err(|e| format!("Failed to serialize document tree: {e}"))?;
        json.push('\n');
        json
    } else {
        crate::convert(&source).map_err(|e| e.to_string())?
    };

    write_result(output, &rendered)
}

fn read_source(input: Option<&Path>) -> Result<String, String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(source)
        }
    }
}

fn write_result(output: Option<&Path>, rendered: &str) -> Result<(), String> {
    match output {
        Some(path) => std::fs::write(path, rendered)
            .map_err(|e| format!("Failed to write {}: {e}", path.display())),
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}

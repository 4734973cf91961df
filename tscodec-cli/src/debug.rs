use std::fs::File;
use std::io::Write;

use tscodec::Catalog;

/// Run the debug command: dump a loaded catalogue as JSON.
pub fn run_debug_command(catalog: &Catalog, output: Option<&str>) -> Result<(), String> {
    let json = serde_json::to_string_pretty(catalog)
        .map_err(|e| format!("Error serializing to JSON: {}", e))?;

    match output {
        Some(output_path) => {
            File::create(output_path)
                .and_then(|mut f| f.write_all(json.as_bytes()))
                .map_err(|e| format!("Error writing to {}: {}", output_path, e))?;
            println!("✅ Debug output written to: {}", output_path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

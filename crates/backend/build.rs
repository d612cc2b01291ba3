use std::env;
use std::fs;
use std::path::Path;

// Puts the workspace-root config.toml beside the compiled binary, where the
// runtime config loader looks for it. Without one the server runs on the
// embedded defaults.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // OUT_DIR sits under target/<profile>/build/backend-*/out; walk back up
    // to target/<profile> itself.
    let out_path = Path::new(&out_dir);
    let target_dir = match out_path.ancestors().find(|p| p.ends_with(&profile)) {
        Some(dir) => dir,
        None => return,
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    let source = workspace_root.join("config.toml");
    if source.exists() {
        let dest = target_dir.join("config.toml");
        fs::copy(&source, &dest).unwrap_or_else(|e| panic!("Failed to copy config.toml: {}", e));
    }
}

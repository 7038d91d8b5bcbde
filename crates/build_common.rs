// README-to-rustdoc step shared by every crate's build.rs.
// Pull it in with: include!("../build_common.rs");
//
// The including build.rs must import std::env, std::fs and std::path::Path.

/// Write the crate README to `$OUT_DIR/README_GENERATED.md` with its links
/// rewritten so they resolve inside rustdoc. `lib.rs` includes the result as
/// the crate-level docs.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let Ok(readme) = fs::read_to_string(Path::new(crate_dir).join("README.md")) else {
        return;
    };

    let repo_url = workspace_repository_url(crate_dir);
    let rustdoc = rewrite_readme_links(&readme, repo_url.as_deref());

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    fs::write(Path::new(&out_dir).join("README_GENERATED.md"), rustdoc)
        .expect("README_GENERATED.md must be writable");
}

/// Source-file links become module links (`src/ports/mod.rs` -> `ports`,
/// `src/readiness.rs` -> `readiness`); links to the workspace README become
/// links to the repository.
fn rewrite_readme_links(readme: &str, repo_url: Option<&str>) -> String {
    let mut out = readme
        .replace("](src/", "](")
        .replace("/mod.rs)", ")")
        .replace(".rs)", ")");

    if let Some(url) = repo_url {
        out = out.replace("](../../README.md", &format!("]({url}"));
    }
    out
}

/// `repository = "..."` from the workspace manifest, two levels up.
fn workspace_repository_url(crate_dir: &str) -> Option<String> {
    let manifest = Path::new(crate_dir).parent()?.parent()?.join("Cargo.toml");
    let content = fs::read_to_string(manifest).ok()?;

    content.lines().map(str::trim).find_map(|line| {
        let value = line.strip_prefix("repository")?.trim_start().strip_prefix('=')?;
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

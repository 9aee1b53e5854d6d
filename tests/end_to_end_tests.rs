use std::fs;
use std::path::{Path, PathBuf};
use tailmotion::{build, BuildArgs};
use tempfile::tempdir;

fn build_args(root: &Path) -> BuildArgs {
    BuildArgs {
        entry: None,
        output: None,
        root: root.to_path_buf(),
        config: None,
        manifest: None,
        minify: false,
        dry_run: false,
        verbose: false,
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn seed_project(root: &Path) {
    write(root, "package.json", r#"{ "name": "tailmotion", "version": "0.3.0" }"#);
    write(
        root,
        "src/index.css",
        "@import \"./base.css\";\n@import \"./animations/stagger.css\";\n",
    );
    write(root, "src/base.css", ":root {\n  --tm-duration: 600ms;\n}\n");
    write(
        root,
        "src/animations/stagger.css",
        ".tm-stagger > * {\n  animation-delay: calc(var(--tm-stagger-index) * 60ms);\n}\n/* @generate:stagger-indices:2 */\n",
    );
}

#[tokio::test]
async fn test_end_to_end_build() {
    let temp_dir = tempdir().unwrap();
    seed_project(temp_dir.path());

    let mut args = build_args(temp_dir.path());
    args.manifest = Some(PathBuf::from("dist/manifest.json"));
    let result = build(args).await.unwrap();

    let output = temp_dir.path().join("tailmotion.css");
    assert_eq!(result.output_path, output);
    assert!(output.exists());

    let css = fs::read_to_string(&output).unwrap();
    assert_eq!(css, result.css_content);
    assert!(css.starts_with("/* TailMotion v0.3.0 | Generated "));
    assert!(css.contains("\n/* --- src/base.css --- */\n:root {\n  --tm-duration: 600ms;\n}\n"));
    assert!(css.contains("/* --- src/animations/stagger.css --- */"));
    assert!(css.contains(
        ".tm-stagger > *:nth-child(1) { --tm-stagger-index: 0; }\n  .tm-stagger > *:nth-child(2) { --tm-stagger-index: 1; }"
    ));
    assert!(!css.contains("@import"));
    assert!(!css.contains("@generate"));
    assert!(css.ends_with("}\n"));

    let manifest_path = temp_dir.path().join("dist/manifest.json");
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["metadata"]["package_version"], "0.3.0");
    assert_eq!(manifest["metadata"]["entry"], "src/index.css");
    assert!(manifest["partials"]["src/base.css"].is_object());
    assert_eq!(manifest["generators"][0]["name"], "stagger-indices");
    assert_eq!(manifest["statistics"]["rules_generated"], 2);
    assert_eq!(manifest["statistics"]["css_size_bytes"], css.len());
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    seed_project(temp_dir.path());

    let mut args = build_args(temp_dir.path());
    args.dry_run = true;
    args.manifest = Some(PathBuf::from("manifest.json"));
    let result = build(args).await.unwrap();

    assert!(!result.css_content.is_empty());
    assert!(!temp_dir.path().join("tailmotion.css").exists());
    assert!(!temp_dir.path().join("manifest.json").exists());
}

#[tokio::test]
async fn test_minified_build_keeps_banner() {
    let temp_dir = tempdir().unwrap();
    seed_project(temp_dir.path());

    let mut args = build_args(temp_dir.path());
    args.minify = true;
    args.output = Some(PathBuf::from("dist/tailmotion.min.css"));
    let result = build(args).await.unwrap();

    let css = fs::read_to_string(temp_dir.path().join("dist/tailmotion.min.css")).unwrap();
    assert!(css.starts_with("/* TailMotion v0.3.0 | Generated "));
    assert!(!css.contains("/* ---"));
    assert!(css.contains(":root{--tm-duration:600ms}"));
    assert_eq!(css.lines().count(), 1);

    let stats = result.manifest.statistics.unwrap();
    assert_eq!(stats.minified_size_bytes, Some(css.len()));
    assert!(stats.css_size_bytes > css.len());
}

#[tokio::test]
async fn test_config_file_drives_build() {
    let temp_dir = tempdir().unwrap();
    seed_project(temp_dir.path());
    write(temp_dir.path(), "styles/entry.css", ".only { color: red; }\n");

    let config_path = temp_dir.path().join("tailmotion.yaml");
    fs::write(
        &config_path,
        "build:\n  entry: styles/entry.css\n  output: out/bundle.css\n  version: 9.0.0-beta\n",
    )
    .unwrap();

    let mut args = build_args(temp_dir.path());
    args.config = Some(config_path);
    let result = build(args).await.unwrap();

    assert_eq!(result.package_version, "9.0.0-beta");
    let css = fs::read_to_string(temp_dir.path().join("out/bundle.css")).unwrap();
    assert!(css.starts_with("/* TailMotion v9.0.0-beta | Generated "));
    assert!(css.ends_with("\n.only { color: red; }\n"));
}

#[tokio::test]
async fn test_missing_package_json_uses_fallback_version() {
    let temp_dir = tempdir().unwrap();
    write(temp_dir.path(), "src/index.css", ".a {}\n");

    let result = build(build_args(temp_dir.path())).await.unwrap();
    assert_eq!(result.package_version, "0.0.0");
    assert!(result.css_content.starts_with("/* TailMotion v0.0.0 | "));
}

#[test]
fn test_utilities_command_writes_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("tokens.json");
    fs::write(&config_path, r#"{ "tokens": { "durations": { "250": "250ms" } } }"#).unwrap();
    let output = temp_dir.path().join("css/utilities.css");

    let args = tailmotion::args::UtilitiesArgs {
        config: Some(config_path),
        output: Some(output.clone()),
    };
    let css = tailmotion::utilities(&args).unwrap();

    assert_eq!(fs::read_to_string(output).unwrap(), css);
    assert!(css.contains(".tm-duration-250 { --tm-duration: 250ms !important; }"));
    assert!(css.contains(".tm-repeat-infinite { --tm-iteration-count: infinite !important; }"));
}

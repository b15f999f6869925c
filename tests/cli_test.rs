use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_showoff"))
        .args(args)
        .env_remove("SLIDES_ROOT")
        .output()
        .expect("Failed to execute command")
}

fn write_deck(root: &Path, second_slide_type: &str) {
    fs::write(
        root.join("showoff.json"),
        r#"{"name": "Demo", "sections": [{"section": "one"}, {"section": "two"}]}"#,
    )
    .expect("Failed to write manifest");
    fs::create_dir_all(root.join("one")).expect("Failed to create section");
    fs::create_dir_all(root.join("two")).expect("Failed to create section");
    fs::write(
        root.join("one/slides.md"),
        "Speaker preamble, never shown\n\n!SLIDE\n# First\n\n![chart](chart.png)\n.notes\nmention the chart\n",
    )
    .expect("Failed to write slides");
    fs::write(root.join("one/chart.png"), b"chart").expect("Failed to write image");
    fs::write(
        root.join("two/slides.md"),
        format!("!SLIDE {}\n# Second\n", second_slide_type),
    )
    .expect("Failed to write slides");
}

#[test]
fn test_render_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write_deck(root, "center");
    let output_path = root.join("out/index.html");

    let output = run_command(&[
        "--slides-root",
        root.to_str().unwrap(),
        "render",
        "-o",
        output_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let html_content = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(html_content.contains("<title>Demo</title>"));
    assert_eq!(html_content.matches("<section>").count(), 2);
    assert!(html_content.contains("<h1>First</h1>"));
    assert!(html_content.contains(r#"<img src="images/chart.png""#));
    assert!(html_content.contains("<details>mention the chart</details>"));
    assert!(!html_content.contains("Speaker preamble"));
    assert!(html_content.contains(r#"class="center innerContent""#));
}

#[test]
fn test_export_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write_deck(root, "bullets");
    let output_path = root.join("demo.zip");

    let output = run_command(&[
        "export",
        "--slides-root",
        root.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let bytes = fs::read(&output_path).expect("Failed to read archive");
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Invalid archive");
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort();
    assert_eq!(names, vec!["images/chart.png", "index.html"]);
}

#[test]
fn test_invalid_slide_type_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write_deck(root, "sideways");
    let output_path = root.join("index.html");

    let output = run_command(&[
        "--slides-root",
        root.to_str().unwrap(),
        "render",
        "-o",
        output_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid slide type"), "stderr: {}", stderr);
    assert!(!output_path.exists(), "no partial deck should be written");
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_command(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing a subcommand"));
}

#[test]
fn test_missing_manifest_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_command(&[
        "--slides-root",
        temp_dir.path().to_str().unwrap(),
        "render",
        "-o",
        temp_dir.path().join("index.html").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid slide dir"));
}

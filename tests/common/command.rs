use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn run_bit_merge_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bit-merge").expect("Failed to find bit-merge binary");
    cmd.env_remove("BIT_MERGE_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

#[fixture]
pub fn file_a() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();
    for i in 0..1000000000 {
        println!("{}",  s);
    }

    println!("Done");

    let tx = std::thread::spawn(move || {
        for i in 0..10 {
            println!("Thread: {}", i);
        }
    });

    tx.join().unwrap();

    println!("All threads completed");
}"#
    .to_string()
}

#[fixture]
pub fn file_b() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();

    println!("Done");

    let tx = std::thread::spawn(move || {
        for i in 0..10 {
            println!("Thread: {}", i);
        }
    });

    if let Err(e) = tx.join() {
        eprintln!("Thread error: {}", e);
    }

    println!("All threads completed");
}"#
    .to_string()
}

#[fixture]
pub fn diff_hunks_output() -> String {
    "@@ -1,9 +1,6 @@\n fn main() {\n     let s = String::new();\n     std::io::stdin().read_line(&mut s).unwrap();\n-    for i in 0..1000000000 {\n-        println!(\"{}\",  s);\n-    }\n \n     println!(\"Done\");\n \n@@ -13,7 +10,9 @@\n         }\n     });\n \n-    tx.join().unwrap();\n+    if let Err(e) = tx.join() {\n+        eprintln!(\"Thread error: {}\", e);\n+    }\n \n     println!(\"All threads completed\");\n }\n"
    .to_string()
}

#[fixture]
pub fn diff_files_dir(workspace_dir: TempDir, file_a: String, file_b: String) -> TempDir {
    write_file(FileSpec::new(workspace_dir.path().join("old.rs"), file_a));
    write_file(FileSpec::new(workspace_dir.path().join("new.rs"), file_b));

    workspace_dir
}

/// Base, current and other versions of a short list
///
/// ```text
/// base     current    other
/// apple    apple      apple
/// banana   blueberry  banana
/// cherry   cherry     cherry
/// date     date       dragonfruit
/// ```
#[fixture]
pub fn merge_files_dir(workspace_dir: TempDir) -> TempDir {
    let dir = workspace_dir.path();
    write_file(FileSpec::new(
        dir.join("base.txt"),
        "apple\nbanana\ncherry\ndate\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.join("current.txt"),
        "apple\nblueberry\ncherry\ndate\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.join("other.txt"),
        "apple\nbanana\ncherry\ndragonfruit\n".to_string(),
    ));

    workspace_dir
}

/// Like [`merge_files_dir`], but both sides rewrite the second line
#[fixture]
pub fn conflicting_files_dir(workspace_dir: TempDir) -> TempDir {
    let dir = workspace_dir.path();
    write_file(FileSpec::new(
        dir.join("base.txt"),
        "apple\nbanana\ncherry\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.join("current.txt"),
        "apple\nblueberry\ncherry\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.join("other.txt"),
        "apple\nblackberry\ncherry\n".to_string(),
    ));

    workspace_dir
}

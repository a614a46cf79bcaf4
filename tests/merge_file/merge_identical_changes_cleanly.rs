use crate::common::command::{run_bit_merge_command, workspace_dir};
use crate::common::file::{FileSpec, read_file, write_file, write_generated_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn merge_identical_changes_cleanly(workspace_dir: TempDir) {
    let base = write_generated_file(workspace_dir.path(), 8);
    let changed = base.content.replacen("3 ", "3 rewritten ", 1);
    write_file(FileSpec::new(workspace_dir.path().join("ours.txt"), changed.clone()));
    write_file(FileSpec::new(workspace_dir.path().join("theirs.txt"), changed.clone()));

    let base_name = base.path.file_name().unwrap().to_str().unwrap();
    run_bit_merge_command(
        workspace_dir.path(),
        &["merge-file", "ours.txt", base_name, "theirs.txt"],
    )
    .assert()
    .success();

    pretty_assertions::assert_eq!(read_file(&workspace_dir.path().join("ours.txt")), changed);
}

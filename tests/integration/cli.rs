//! Tests for the documentation command line

use tokenset_core::ErrorKind;
use tokenset_export::Format;
use tokenset_runtime::{Cli, DocArgs, generate_documentation, generate_documentation_from_args, run};

use crate::{MANIFEST, manifest_file};

fn cli(path: &std::path::Path, container: Option<&str>, format: Format) -> Cli {
    Cli {
        manifest: path.to_path_buf(),
        container: container.map(str::to_string),
        format: DocArgs::from(format),
        output: None,
        verbose: 0,
    }
}

#[test]
fn documents_the_selected_container() {
    let file = manifest_file(MANIFEST);

    let wiki = run(&cli(file.path(), Some("app::Fields"), Format::Confluence)).unwrap();
    assert_eq!(wiki, b"||name||stuff||\n|foo|Hello|\n|bar|World|\n|baz| |\n");

    let csv = run(&cli(file.path(), Some("SortedFields"), Format::Csv)).unwrap();
    assert_eq!(csv, b"name,stuff\r\nbaz,\r\nbar,World\r\nfoo,Hello\r\n");
}

#[test]
fn several_containers_need_a_choice() {
    let file = manifest_file(MANIFEST);
    let err = run(&cli(file.path(), None, Format::Csv)).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::ManifestError(_)));
    assert!(err.to_string().contains("app::SortedFields"));
}

#[test]
fn a_single_container_is_chosen_implicitly() {
    let file = manifest_file(
        r#"
[[containers]]
path = "app::Only"
tokens = [{ name = "foo" }, { name = "bar" }]
"#,
    );
    let out = run(&cli(file.path(), None, Format::Csv)).unwrap();
    assert_eq!(out, b"name\r\nfoo\r\nbar\r\n");
}

#[test]
fn excel_goes_to_the_output_file() {
    let file = manifest_file(MANIFEST);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fields.xlsx");

    let mut args = cli(file.path(), Some("app::Fields"), Format::Excel);
    args.output = Some(path.clone());
    assert!(run(&args).unwrap().is_empty());

    let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
    let sheet = book.get_sheet_by_name(tokenset_export::SHEET).unwrap();
    let text = |col: u32, row: u32| sheet.get_cell((col, row)).map(|c| c.get_value().to_string());
    assert_eq!(text(2, 1).as_deref(), Some("stuff"));
    assert_eq!(text(1, 2).as_deref(), Some("foo"));
    assert_eq!(text(2, 3).as_deref(), Some("World"));
}

#[test]
fn unknown_container_is_reported() {
    let file = manifest_file(MANIFEST);
    assert!(run(&cli(file.path(), Some("app::Nope"), Format::Csv)).is_err());
}

#[test]
fn embedded_arguments() {
    let file = manifest_file(MANIFEST);
    let registry = tokenset_runtime::Manifest::load(file.path()).unwrap().build().unwrap();
    let fields = registry.container("app::Fields").unwrap();

    assert_eq!(
        generate_documentation_from_args(fields, ["prog", "--rst"]).unwrap(),
        generate_documentation(fields, DocArgs::from(Format::Rst)).unwrap()
    );
    assert_eq!(
        generate_documentation_from_args(fields, ["prog", "-w"]).unwrap(),
        generate_documentation(fields, DocArgs::from(Format::Confluence)).unwrap()
    );
    assert!(generate_documentation_from_args(fields, ["prog"]).is_err());
    assert!(generate_documentation_from_args(fields, ["prog", "--csv", "--rst"]).is_err());
}
